use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with OpenWeatherMap: {0}")]
pub struct WeatherError(pub String);
impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> WeatherError {
        WeatherError(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for WeatherError {
    fn from(e: ureq::Error) -> WeatherError {
        WeatherError(format!("http request error: {}", e))
    }
}
