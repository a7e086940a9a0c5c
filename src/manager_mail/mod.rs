pub mod errors;

use std::time::Duration;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, Message, SmtpTransport, Transport};
use crate::config::MailParameters;
use crate::manager_mail::errors::MailError;

pub struct Mail {
    transport: SmtpTransport,
    from: Mailbox,
}

impl Mail {
    /// Returns a new instance of the Mail struct using STARTTLS towards the configured server
    ///
    /// # Arguments
    ///
    /// * 'params' - smtp server, credentials and sender
    /// * 'timeout' - timeout for each smtp conversation
    pub fn new(params: &MailParameters, timeout: Duration) -> Result<Self, MailError> {
        let credentials = Credentials::new(params.smtp_user.clone(), params.smtp_password.clone());

        let transport = SmtpTransport::starttls_relay(&params.smtp_server)?
            .port(params.smtp_port)
            .credentials(credentials)
            .timeout(Some(timeout))
            .build();

        let from = Mailbox::new(
            Some(params.from_name.clone()),
            params.from_address().parse::<Address>()?,
        );

        Ok(Self { transport, from })
    }
}

/// Delivery of a finished html mail to one receiver
pub trait Mailer {
    /// Sends an html mail to a single recipient
    ///
    /// # Arguments
    ///
    /// * 'to_name' - name of the receiver, may be empty
    /// * 'to_email' - email address of the receiver
    /// * 'subject' - the subject of the mail
    /// * 'html' - the html body of the mail
    fn send_mail(&self, to_name: &str, to_email: &str, subject: &str, html: String) -> Result<(), MailError>;
}

impl Mailer for Mail {
    fn send_mail(&self, to_name: &str, to_email: &str, subject: &str, html: String) -> Result<(), MailError> {
        let to = mailbox(to_name, to_email)?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)?;

        self.transport.send(&message)?;

        Ok(())
    }
}

/// Builds a mailbox, an empty name gives a bare address
///
/// # Arguments
///
/// * 'name' - display name
/// * 'email' - email address
fn mailbox(name: &str, email: &str) -> Result<Mailbox, MailError> {
    let address = email.parse::<Address>()?;
    let name = if name.is_empty() { None } else { Some(name.to_string()) };

    Ok(Mailbox::new(name, address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_with_and_without_name() {
        let named = mailbox("Ada Lovelace", "ada@example.com").unwrap();
        assert_eq!(named.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(named.email.to_string(), "ada@example.com");

        assert!(mailbox("", "bob@example.com").unwrap().name.is_none());
    }

    #[test]
    fn invalid_address_is_rejected() {
        assert!(matches!(mailbox("X", "not-an-address"), Err(MailError::InvalidEmailAddress(_))));
    }
}
