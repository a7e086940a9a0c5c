use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with NewsAPI: {0}")]
pub struct NewsError(pub String);
impl From<serde_json::Error> for NewsError {
    fn from(e: serde_json::Error) -> NewsError {
        NewsError(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for NewsError {
    fn from(e: ureq::Error) -> NewsError {
        NewsError(format!("http request error: {}", e))
    }
}
