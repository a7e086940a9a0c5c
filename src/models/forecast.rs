use serde::Serialize;

/// One discrete weather prediction at a specific point in time
///
/// Temperatures are in °F and the precipitation probability is a fraction 0..1
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub weather_code: u32,
    pub weather_description: String,
    pub precipitation_probability: f64,
}

impl ForecastSample {
    /// Returns a copy of the sample moved to the given timestamp
    ///
    /// # Arguments
    ///
    /// * 'timestamp' - epoch seconds for the copy
    pub fn at(&self, timestamp: i64) -> ForecastSample {
        ForecastSample { timestamp, ..self.clone() }
    }
}

/// Inclusive bounds, in epoch seconds, of a forecast display range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForecastWindow {
    pub start: i64,
    pub end: i64,
}

impl ForecastWindow {
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}
