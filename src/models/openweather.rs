use serde::Deserialize;
use crate::models::forecast::ForecastSample;

#[derive(Deserialize, Clone)]
pub struct Condition {
    pub id: u32,
    pub description: String,
}

#[derive(Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
pub struct MainValues {
    pub temp: f64,
    pub feels_like: f64,
}

#[derive(Deserialize)]
pub struct Sys {
    pub sunrise: i64,
    pub sunset: i64,
}

/// Response from the current weather endpoint
#[derive(Deserialize)]
pub struct CurrentResponse {
    pub coord: Coord,
    pub main: MainValues,
    pub weather: Vec<Condition>,
    pub sys: Sys,
    pub name: String,
}

/// One entry in the 5-day/3-hour forecast
#[derive(Deserialize)]
pub struct ThreeHourEntry {
    pub dt: i64,
    pub main: MainValues,
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub pop: f64,
}

#[derive(Deserialize)]
pub struct ThreeHourResponse {
    pub list: Vec<ThreeHourEntry>,
}

/// One entry in the One Call hourly forecast
#[derive(Deserialize)]
pub struct HourlyEntry {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub pop: f64,
}

#[derive(Deserialize)]
pub struct OneCallResponse {
    #[serde(default)]
    pub hourly: Vec<HourlyEntry>,
}

fn first_condition(weather: &[Condition]) -> (u32, String) {
    weather.first()
        .map_or((0, String::new()), |c| (c.id, c.description.clone()))
}

impl From<&ThreeHourEntry> for ForecastSample {
    fn from(e: &ThreeHourEntry) -> Self {
        let (weather_code, weather_description) = first_condition(&e.weather);
        ForecastSample {
            timestamp: e.dt,
            temperature: e.main.temp,
            feels_like: e.main.feels_like,
            weather_code,
            weather_description,
            precipitation_probability: e.pop,
        }
    }
}

impl From<&HourlyEntry> for ForecastSample {
    fn from(e: &HourlyEntry) -> Self {
        let (weather_code, weather_description) = first_condition(&e.weather);
        ForecastSample {
            timestamp: e.dt,
            temperature: e.temp,
            feels_like: e.feels_like,
            weather_code,
            weather_description,
            precipitation_probability: e.pop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_hour_entry_without_pop_maps_to_zero() {
        let json = r#"{"list": [{"dt": 1700000000, "main": {"temp": 51.2, "feels_like": 49.0, "humidity": 80},
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}]}]}"#;
        let response: ThreeHourResponse = serde_json::from_str(json).unwrap();
        let sample = ForecastSample::from(&response.list[0]);

        assert_eq!(sample.timestamp, 1700000000);
        assert_eq!(sample.temperature, 51.2);
        assert_eq!(sample.feels_like, 49.0);
        assert_eq!(sample.weather_code, 803);
        assert_eq!(sample.weather_description, "broken clouds");
        assert_eq!(sample.precipitation_probability, 0.0);
    }

    #[test]
    fn hourly_entry_maps_flat_temperatures() {
        let json = r#"{"lat": 40.0, "lon": -75.0, "hourly": [{"dt": 1700003600, "temp": 60.5, "feels_like": 59.1,
            "pop": 0.35, "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]}]}"#;
        let response: OneCallResponse = serde_json::from_str(json).unwrap();
        let sample = ForecastSample::from(&response.hourly[0]);

        assert_eq!(sample.temperature, 60.5);
        assert_eq!(sample.weather_code, 500);
        assert_eq!(sample.precipitation_probability, 0.35);
    }
}
