use serde::Deserialize;

#[derive(Deserialize, Default)]
pub struct Meta {
    #[serde(rename = "regularMarketPrice")]
    pub regular_market_price: Option<f64>,
    #[serde(rename = "chartPreviousClose")]
    pub chart_previous_close: Option<f64>,
}

#[derive(Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Deserialize)]
pub struct ChartBody {
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Deserialize)]
pub struct ChartResponse {
    pub chart: ChartBody,
}

/// Day change of an index
#[derive(Clone, Debug, PartialEq)]
pub struct MarketSnapshot {
    pub price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub is_positive: bool,
}
