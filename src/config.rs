use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    #[serde(default)]
    pub log_to_stdout: bool,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_send_delay")]
    pub send_delay_secs: u64,
}

#[derive(Deserialize)]
pub struct ScheduleParameters {
    #[serde(default = "default_cron")]
    pub cron: String,
}

impl Default for ScheduleParameters {
    fn default() -> Self {
        Self { cron: default_cron() }
    }
}

#[derive(Deserialize)]
pub struct WeatherParameters {
    pub api_key: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

#[derive(Deserialize)]
pub struct NewsParameters {
    pub api_key: Option<String>,
    #[serde(default = "default_num_stories")]
    pub num_stories: usize,
}

impl Default for NewsParameters {
    fn default() -> Self {
        Self { api_key: None, num_stories: default_num_stories() }
    }
}

#[derive(Deserialize, Default)]
pub struct MovieParameters {
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct MailParameters {
    pub smtp_user: String,
    pub smtp_password: String,
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    pub from: Option<String>,
}

impl MailParameters {
    /// Returns the sender address, which defaults to the smtp user
    pub fn from_address(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.smtp_user)
    }
}

#[derive(Deserialize)]
pub struct Files {
    #[serde(default = "default_recipients")]
    pub recipients: String,
    #[serde(default = "default_comic_state")]
    pub comic_state: String,
}

impl Default for Files {
    fn default() -> Self {
        Self { recipients: default_recipients(), comic_state: default_comic_state() }
    }
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    #[serde(default)]
    pub schedule: ScheduleParameters,
    pub weather: WeatherParameters,
    #[serde(default)]
    pub news: NewsParameters,
    #[serde(default)]
    pub movies: MovieParameters,
    pub mail: MailParameters,
    #[serde(default)]
    pub files: Files,
}

fn default_http_timeout() -> u64 { 10 }
fn default_send_delay() -> u64 { 1 }
fn default_cron() -> String { "0 0 8 * * *".to_string() }
fn default_country_code() -> String { "US".to_string() }
fn default_num_stories() -> usize { 8 }
fn default_smtp_server() -> String { "smtp.gmail.com".to_string() }
fn default_smtp_port() -> u16 { 587 }
fn default_from_name() -> String { "Scout".to_string() }
fn default_recipients() -> String { "email-list.csv".to_string() }
fn default_comic_state() -> String { "last_xkcd_shown.txt".to_string() }

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

/// Parses and validates a configuration document
///
/// Credentials for the weather service and the smtp server are required, without them
/// there is nothing meaningful to send.
///
/// # Arguments
///
/// * 'toml' - the configuration document
fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.weather.api_key.trim().is_empty() {
        return Err(ConfigError::Missing("weather.api_key".to_string()));
    }
    if config.mail.smtp_user.trim().is_empty() {
        return Err(ConfigError::Missing("mail.smtp_user".to_string()));
    }
    if config.mail.smtp_password.trim().is_empty() {
        return Err(ConfigError::Missing("mail.smtp_password".to_string()));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [general]
        log_path = "dailybrief.log"
        log_level = "info"

        [weather]
        api_key = "owm-key"

        [mail]
        smtp_user = "scout@example.com"
        smtp_password = "secret"
    "#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse_config(MINIMAL).unwrap();

        assert_eq!(config.general.log_level, LevelFilter::Info);
        assert!(!config.general.log_to_stdout);
        assert_eq!(config.general.http_timeout_secs, 10);
        assert_eq!(config.general.send_delay_secs, 1);
        assert_eq!(config.schedule.cron, "0 0 8 * * *");
        assert_eq!(config.weather.country_code, "US");
        assert!(config.news.api_key.is_none());
        assert_eq!(config.news.num_stories, 8);
        assert!(config.movies.api_key.is_none());
        assert_eq!(config.mail.smtp_server, "smtp.gmail.com");
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.mail.from_address(), "scout@example.com");
        assert_eq!(config.files.recipients, "email-list.csv");
        assert_eq!(config.files.comic_state, "last_xkcd_shown.txt");
    }

    #[test]
    fn news_section_without_count_gets_default_count() {
        let toml = format!("{}\n[news]\napi_key = \"news-key\"\n", MINIMAL);
        let config = parse_config(&toml).unwrap();

        assert_eq!(config.news.api_key.as_deref(), Some("news-key"));
        assert_eq!(config.news.num_stories, 8);
    }

    #[test]
    fn explicit_sender_overrides_smtp_user() {
        let toml = MINIMAL.replace(
            "smtp_password = \"secret\"",
            "smtp_password = \"secret\"\nfrom = \"brief@example.com\"",
        );
        let config = parse_config(&toml).unwrap();

        assert_eq!(config.mail.from_address(), "brief@example.com");
    }

    #[test]
    fn blank_weather_key_is_fatal() {
        let toml = MINIMAL.replace("owm-key", "  ");

        match parse_config(&toml) {
            Err(ConfigError::Missing(key)) => assert_eq!(key, "weather.api_key"),
            _ => panic!("expected missing weather key"),
        }
    }

    #[test]
    fn blank_smtp_password_is_fatal() {
        let toml = MINIMAL.replace("secret", "");

        assert!(matches!(parse_config(&toml), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn missing_mail_section_is_a_parse_error() {
        let toml = MINIMAL.split("[mail]").next().unwrap();

        assert!(matches!(parse_config(toml), Err(ConfigError::Document(_))));
    }
}
