use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with Yahoo Finance: {0}")]
pub struct MarketError(pub String);
impl From<serde_json::Error> for MarketError {
    fn from(e: serde_json::Error) -> MarketError {
        MarketError(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for MarketError {
    fn from(e: ureq::Error) -> MarketError {
        MarketError(format!("http request error: {}", e))
    }
}
