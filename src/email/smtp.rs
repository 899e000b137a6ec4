//! src/email/smtp.rs
use crate::configuration::{SmtpSettings, SmtpTls};
use lettre::transport::smtp::{self, authentication::Credentials};
use lettre::{AsyncSmtpTransport, Tokio1Executor};
use secrecy::ExposeSecret;
use std::time::Duration;

pub type SmtpMailer = AsyncSmtpTransport<Tokio1Executor>;

/// Credentials are only sent when a password is configured.
pub fn mailer(settings: &SmtpSettings, timeout: Duration) -> Result<SmtpMailer, smtp::Error> {
    let builder = match settings.tls {
        SmtpTls::Starttls => SmtpMailer::starttls_relay(&settings.host)?,
        SmtpTls::Wrapper => SmtpMailer::relay(&settings.host)?,
        SmtpTls::Plain => SmtpMailer::builder_dangerous(settings.host.as_str()),
    };

    let mut builder = builder.port(settings.port).timeout(Some(timeout));
    if let Some(password) = &settings.password {
        builder = builder.credentials(Credentials::new(
            settings.username.clone(),
            password.expose_secret().clone(),
        ));
    }

    Ok(builder.build())
}
