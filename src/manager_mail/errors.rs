use std::fmt::{Display, Formatter};
use lettre::address::AddressError;


#[derive(Debug)]
pub enum MailError {
    InvalidEmailAddress(String),
    Message(String),
    Smtp(String),
}

impl Display for MailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MailError::InvalidEmailAddress(e) => write!(f, "MailError::InvalidEmailAddress: {}", e),
            MailError::Message(e) => write!(f, "MailError::Message: {}", e),
            MailError::Smtp(e) => write!(f, "MailError::Smtp: {}", e),
        }
    }
}
impl std::error::Error for MailError {}
impl From<AddressError> for MailError {
    fn from(e: AddressError) -> Self { MailError::InvalidEmailAddress(e.to_string()) }
}
impl From<lettre::error::Error> for MailError {
    fn from(e: lettre::error::Error) -> Self { MailError::Message(e.to_string()) }
}
impl From<lettre::transport::smtp::Error> for MailError {
    fn from(e: lettre::transport::smtp::Error) -> Self { MailError::Smtp(e.to_string()) }
}
