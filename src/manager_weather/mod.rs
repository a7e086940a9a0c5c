pub mod errors;

use log::warn;
use ureq::Agent;
use crate::manager_weather::errors::WeatherError;
use crate::models::forecast::ForecastSample;
use crate::models::openweather::{CurrentResponse, OneCallResponse, ThreeHourResponse};
use crate::recipients::Recipient;

const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const ONE_CALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";
const THREE_HOUR_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Current conditions at a recipient's location
#[derive(Clone, Debug)]
pub struct CurrentWeather {
    pub city_name: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub weather_code: u32,
    pub description: String,
    pub sunrise: i64,
    pub sunset: i64,
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions plus the raw forecast samples, sorted by time
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub samples: Vec<ForecastSample>,
}

/// Source of current weather and forecast for a recipient
pub trait WeatherSource {
    /// Fetches current weather and a forecast for the recipient's location
    ///
    /// # Arguments
    ///
    /// * 'recipient' - the recipient to get weather for
    fn weather(&self, recipient: &Recipient) -> Result<WeatherReport, WeatherError>;
}

/// Struct for fetching weather from OpenWeatherMap, all values in imperial units
pub struct OpenWeather {
    agent: Agent,
    api_key: String,
    country_code: String,
}

impl OpenWeather {
    /// Returns a new OpenWeather struct
    ///
    /// # Arguments
    ///
    /// * 'agent' - http agent to use for requests
    /// * 'api_key' - OpenWeatherMap api key
    /// * 'country_code' - country code used in location queries
    pub fn new(agent: Agent, api_key: String, country_code: String) -> OpenWeather {
        Self { agent, api_key, country_code }
    }

    /// Fetches current weather for the recipient's location
    ///
    /// # Arguments
    ///
    /// * 'recipient' - the recipient to get weather for
    pub fn current(&self, recipient: &Recipient) -> Result<CurrentWeather, WeatherError> {
        let (key, location) = recipient.location_query(&self.country_code);

        let json = self.agent
            .get(CURRENT_URL)
            .query(key, &location)
            .query("appid", &self.api_key)
            .query("units", "imperial")
            .call()?
            .body_mut()
            .read_to_string()?;

        let response: CurrentResponse = serde_json::from_str(&json)?;
        let condition = response.weather.first()
            .ok_or_else(|| WeatherError(format!("no weather condition reported for {}", location)))?;

        Ok(CurrentWeather {
            city_name: response.name.clone(),
            temperature: response.main.temp,
            feels_like: response.main.feels_like,
            weather_code: condition.id,
            description: condition.description.clone(),
            sunrise: response.sys.sunrise,
            sunset: response.sys.sunset,
            lat: response.coord.lat,
            lon: response.coord.lon,
        })
    }

    /// Fetches a forecast, hourly if the One Call API is available to the api key,
    /// otherwise 3-hourly. A failing hourly request is logged before falling back.
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'lon' - longitude of the location
    pub fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastSample>, WeatherError> {
        match self.hourly_forecast(lat, lon) {
            Ok(samples) => Ok(samples),
            Err(e) => {
                warn!("Hourly forecast for {:.4},{:.4} unavailable, using 3-hourly: {}", lat, lon, e);
                self.three_hour_forecast(lat, lon)
            }
        }
    }

    fn hourly_forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastSample>, WeatherError> {
        let json = self.agent
            .get(ONE_CALL_URL)
            .query("lat", lat.to_string())
            .query("lon", lon.to_string())
            .query("exclude", "minutely,daily,alerts")
            .query("appid", &self.api_key)
            .query("units", "imperial")
            .call()?
            .body_mut()
            .read_to_string()?;

        let response: OneCallResponse = serde_json::from_str(&json)?;

        Ok(response.hourly.iter().map(ForecastSample::from).collect())
    }

    fn three_hour_forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastSample>, WeatherError> {
        let json = self.agent
            .get(THREE_HOUR_URL)
            .query("lat", lat.to_string())
            .query("lon", lon.to_string())
            .query("appid", &self.api_key)
            .query("units", "imperial")
            .query("cnt", "40")
            .call()?
            .body_mut()
            .read_to_string()?;

        let response: ThreeHourResponse = serde_json::from_str(&json)?;

        Ok(response.list.iter().map(ForecastSample::from).collect())
    }
}

impl WeatherSource for OpenWeather {
    fn weather(&self, recipient: &Recipient) -> Result<WeatherReport, WeatherError> {
        let current = self.current(recipient)?;
        let samples = self.forecast(current.lat, current.lon)?;

        Ok(WeatherReport { current, samples })
    }
}
