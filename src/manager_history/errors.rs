use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with Wikipedia: {0}")]
pub struct HistoryError(pub String);
impl From<serde_json::Error> for HistoryError {
    fn from(e: serde_json::Error) -> HistoryError {
        HistoryError(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for HistoryError {
    fn from(e: ureq::Error) -> HistoryError {
        HistoryError(format!("http request error: {}", e))
    }
}
