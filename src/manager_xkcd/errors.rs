use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with xkcd: {0}")]
pub struct XkcdError(pub String);
impl From<serde_json::Error> for XkcdError {
    fn from(e: serde_json::Error) -> XkcdError {
        XkcdError(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for XkcdError {
    fn from(e: ureq::Error) -> XkcdError {
        XkcdError(format!("http request error: {}", e))
    }
}
