//! src/email/mod.rs
//!
//! The email-delivery collaborator. Built once from [`EmailSettings`] at
//! startup and shared by every worker; it never swallows a failure.
mod brevo;
pub use brevo::{BrevoClient, Contact, Email, EmailBuilder};

mod smtp;
pub use smtp::SmtpMailer;

use crate::configuration::{EmailBackend, EmailSettings};
use lettre::message::{header::ContentType, Mailbox};
use lettre::{Address, AsyncTransport, Message};

#[derive(thiserror::Error, Debug)]
pub enum EmailClientError {
    #[error("Invalid {0} address")]
    Address(&'static str, #[source] lettre::address::AddressError),
    #[error("Failed to configure the SMTP relay")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Failed to build the HTTP client")]
    Http(#[from] reqwest::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum SendEmailError {
    #[error("Failed to compose the email")]
    Compose(#[from] lettre::error::Error),
    #[error("SMTP delivery failed")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Email API request failed")]
    Api(#[from] reqwest::Error),
}

impl SendEmailError {
    /// `false` means a bug on our side rather than a delivery problem.
    pub fn is_transport(&self) -> bool {
        !matches!(self, SendEmailError::Compose(_))
    }
}

#[derive(Debug)]
enum Transport {
    Smtp(SmtpMailer),
    Api(BrevoClient),
    Console,
}

impl Transport {
    fn name(&self) -> &'static str {
        match self {
            Transport::Smtp(_) => "smtp",
            Transport::Api(_) => "api",
            Transport::Console => "console",
        }
    }
}

#[derive(Debug)]
pub struct EmailClient {
    sender: Mailbox,
    recipient: Mailbox,
    transport: Transport,
}

impl EmailClient {
    #[tracing::instrument(
        name = "Sending an email",
        skip(self, text_body),
        fields(backend = self.transport.name(), recipient = %self.recipient)
    )]
    pub async fn send_email(&self, subject: &str, text_body: &str) -> Result<(), SendEmailError> {
        match &self.transport {
            Transport::Smtp(mailer) => {
                let message = self.compose(subject, text_body)?;
                mailer.send(message).await?;
            }
            Transport::Api(client) => {
                let email = EmailBuilder::new(&self.sender)
                    .to(&self.recipient)
                    .subject(subject)
                    .text_content(text_body)
                    .build();
                client.send_email(&email).await?;
            }
            Transport::Console => {
                let message = self.compose(subject, text_body)?;
                tracing::info!(
                    email = %String::from_utf8_lossy(&message.formatted()),
                    "Console backend, email not delivered"
                );
            }
        }

        Ok(())
    }

    fn compose(&self, subject: &str, text_body: &str) -> Result<Message, lettre::error::Error> {
        Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(text_body.to_string())
    }
}

fn parse_address(kind: &'static str, s: &str) -> Result<Address, EmailClientError> {
    s.parse().map_err(|e| EmailClientError::Address(kind, e))
}

impl TryFrom<EmailSettings> for EmailClient {
    type Error = EmailClientError;

    fn try_from(settings: EmailSettings) -> Result<Self, Self::Error> {
        let sender = Mailbox::new(
            Some(settings.sender_name.clone()),
            parse_address("sender", &settings.sender_email)?,
        );
        let recipient = Mailbox::new(None, parse_address("recipient", &settings.recipient_email)?);

        let transport = match settings.backend {
            EmailBackend::Smtp => Transport::Smtp(smtp::mailer(&settings.smtp, settings.timeout())?),
            EmailBackend::Api => Transport::Api(BrevoClient::new(
                settings.api.url.clone(),
                settings.api.api_key.clone(),
                settings.timeout(),
            )?),
            EmailBackend::Console => Transport::Console,
        };

        Ok(Self {
            sender,
            recipient,
            transport,
        })
    }
}
