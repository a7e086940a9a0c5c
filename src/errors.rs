use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::File: {0}")]
    File(#[from] std::io::Error),
    #[error("ConfigError::Document: {0}")]
    Document(#[from] toml::de::Error),
    #[error("ConfigError::Missing: {0} must be set")]
    Missing(String),
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("LoggingError::File: {0}")]
    File(#[from] std::io::Error),
    #[error("LoggingError::Config: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("LoggingError::Init: {0}")]
    Init(#[from] log::SetLoggerError),
}

#[derive(Error, Debug)]
pub enum StateError {
    #[error("StateError::File: {0}")]
    File(#[from] std::io::Error),
    #[error("StateError::Corrupt: marker content {0:?} is not a comic number")]
    Corrupt(String),
}

#[derive(Error, Debug)]
#[error("error reading recipient list: {0}")]
pub struct RecipientsError(#[from] pub csv::Error);

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("SchedulerError::CronParse: {0}")]
    CronParse(String),
    #[error("SchedulerError::NoOccurrence: schedule {0} never fires again")]
    NoOccurrence(String),
}

#[derive(Error, Debug)]
#[error("initialization failed: {0}")]
pub struct InitError(pub String);

impl From<crate::manager_mail::errors::MailError> for InitError {
    fn from(e: crate::manager_mail::errors::MailError) -> Self { InitError(e.to_string()) }
}
