pub mod errors;

use ureq::Agent;
use crate::manager_market::errors::MarketError;
use crate::models::yahoo::{ChartResponse, Meta, MarketSnapshot};

const SP500_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/%5EGSPC";

/// Yahoo rejects requests without a browser like user agent
const BROWSER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub struct Market {
    agent: Agent,
}

impl Market {
    pub fn new(agent: Agent) -> Market {
        Self { agent }
    }

    /// Fetches the S&P 500 change since the previous close
    ///
    pub fn sp500(&self) -> Result<Option<MarketSnapshot>, MarketError> {
        let json = self.agent
            .get(SP500_URL)
            .query("interval", "1d")
            .query("range", "2d")
            .header("User-Agent", BROWSER_AGENT)
            .call()?
            .body_mut()
            .read_to_string()?;

        let response: ChartResponse = serde_json::from_str(&json)?;

        Ok(response.chart.result
            .and_then(|r| r.into_iter().next())
            .and_then(|r| snapshot(&r.meta)))
    }
}

/// Computes change and percent change, rounded to two decimals.
/// Missing or zero prices give no snapshot.
///
/// # Arguments
///
/// * 'meta' - chart meta data holding current price and previous close
fn snapshot(meta: &Meta) -> Option<MarketSnapshot> {
    let price = meta.regular_market_price.filter(|p| *p != 0.0)?;
    let previous = meta.chart_previous_close.filter(|p| *p != 0.0)?;

    let change = price - previous;
    let percent_change = change / previous * 100.0;

    Some(MarketSnapshot {
        price: round2(price),
        change: round2(change),
        percent_change: round2(percent_change),
        is_positive: change >= 0.0,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_is_computed_from_previous_close() {
        let json = r#"{"chart": {"result": [{"meta": {"currency": "USD", "symbol": "^GSPC",
            "regularMarketPrice": 5050.0, "chartPreviousClose": 5000.0}}], "error": null}}"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        let meta = &response.chart.result.as_ref().unwrap()[0].meta;

        let snapshot = snapshot(meta).unwrap();
        assert_eq!(snapshot.price, 5050.0);
        assert_eq!(snapshot.change, 50.0);
        assert_eq!(snapshot.percent_change, 1.0);
        assert!(snapshot.is_positive);
    }

    #[test]
    fn falling_market_is_negative() {
        let meta = Meta { regular_market_price: Some(4987.654), chart_previous_close: Some(5000.0) };
        let snapshot = snapshot(&meta).unwrap();

        assert_eq!(snapshot.change, -12.35);
        assert_eq!(snapshot.percent_change, -0.25);
        assert!(!snapshot.is_positive);
    }

    #[test]
    fn missing_prices_give_nothing() {
        assert!(snapshot(&Meta::default()).is_none());
        assert!(snapshot(&Meta { regular_market_price: Some(1.0), chart_previous_close: Some(0.0) }).is_none());
    }
}
