use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with TMDB: {0}")]
pub struct MovieError(pub String);
impl From<serde_json::Error> for MovieError {
    fn from(e: serde_json::Error) -> MovieError {
        MovieError(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for MovieError {
    fn from(e: ureq::Error) -> MovieError {
        MovieError(format!("http request error: {}", e))
    }
}
