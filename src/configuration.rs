//! src/configuration.rs
use config::{Config, File};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("Failed to determine the current directory")]
    WorkingDirectory(#[source] std::io::Error),
    #[error("{0}")]
    Environment(String),
    #[error("Failed to load the .env file")]
    DotEnv(#[from] dotenvy::Error),
    #[error("Failed to read the configuration files")]
    Config(#[from] config::ConfigError),
    #[error("Failed to read email secrets from the environment")]
    Secrets(#[from] envy::Error),
}

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email: EmailSettings,
}

impl Settings {
    /// Points the email client at an HTTP API, e.g. a mock server in tests.
    pub fn set_email_url(&mut self, email_url: String) {
        self.email.backend = EmailBackend::Api;
        self.email.api.url = email_url;
    }

    pub fn log_level(&self) -> &'static str {
        if self.application.debug {
            "debug"
        } else {
            "info"
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmailBackend {
    Smtp,
    Api,
    Console,
}

#[derive(Deserialize, Clone, Debug)]
pub struct EmailSettings {
    pub backend: EmailBackend,
    pub sender_name: String,
    pub sender_email: String,
    pub recipient_email: String,
    pub timeout_milliseconds: u64,
    pub smtp: SmtpSettings,
    pub api: ApiSettings,
}

impl EmailSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    /// Blank secrets, e.g. `EMAIL_CLIENT_SMTP_PASSWORD=`, count as unset.
    fn apply(&mut self, secrets: EmailSecrets) {
        if let Some(password) = non_blank(secrets.smtp_password) {
            self.smtp.password = Some(password);
        }
        if let Some(api_key) = non_blank(secrets.api_key) {
            self.api.api_key = Some(api_key);
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    /// Upgrade a plain connection with STARTTLS (port 587).
    Starttls,
    /// Implicit TLS from the first byte (port 465).
    Wrapper,
    /// No encryption. Only for local relays.
    Plain,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub tls: SmtpTls,
    pub username: String,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiSettings {
    pub url: String,
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
}

/// Credentials that never live in the configuration files.
#[derive(Deserialize, Debug, Default)]
struct EmailSecrets {
    smtp_password: Option<Secret<String>>,
    api_key: Option<Secret<String>>,
}

fn non_blank(secret: Option<Secret<String>>) -> Option<Secret<String>> {
    secret.filter(|s| !s.expose_secret().trim().is_empty())
}

#[derive(Debug, PartialEq)]
pub enum Environment {
    Local,
    Production,
}
impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            _ => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                s
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let base_path = std::env::current_dir().map_err(ConfigurationError::WorkingDirectory)?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if not specified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigurationError::Environment)?;

    if environment == Environment::Local {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
    }

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")).required(true))
        .add_source(File::from(configuration_directory.join(environment.as_str())).required(true))
        // E.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut settings: Settings = settings.try_deserialize()?;

    let secrets = envy::prefixed("EMAIL_CLIENT_").from_env::<EmailSecrets>()?;
    settings.email.apply(secrets);

    Ok(settings)
}
