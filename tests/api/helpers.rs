//! tests/api/helpers.rs

use consultorio::configuration::get_configuration;
use consultorio::startup::build;
use consultorio::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // Set TEST_LOG=true to see logs during tests
    // Use bunyan to format the logs nicely:
    // $ TEST_LOG=true cargo test| bunyan
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct Test {
    pub address: String,
    pub email_server: MockServer,
    pub recipient_email: String,
}

impl Test {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::get(&format!("{}{}", self.address, path))
            .await
            .expect("Failed to execute request.")
    }

    pub async fn request(&self, method: reqwest::Method, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .request(method, &format!("{}{}", self.address, path))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("name=Ana&email=ana%40example.com&message=Hello")
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_appointment(&self, body: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/agendar-consulta/", self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn received_email(&self) -> Email {
        let email_request = self.email_server.received_requests().await.unwrap();
        let email_request = if email_request.len() == 1 {
            &email_request[0]
        } else {
            panic!(
                "Expected 1 email to be sent but instead {} were sent.",
                email_request.len()
            );
        };

        let email: Email =
            serde_json::from_slice(&email_request.body).expect("Failed to parse email");

        email
    }
}

pub async fn setup() -> Test {
    Lazy::force(&TRACING);

    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.host = "127.0.0.1".into();
    config.application.port = 0;
    config.email.recipient_email = "atendimento@example.com".into();

    // Start email server
    let email_server = MockServer::start().await;
    config.set_email_url(email_server.uri());

    // Launch the server
    let app = build(config.clone()).expect("Failed to build server.");
    let address = format!("http://127.0.0.1:{}", app.port());
    config.application.port = app.port();

    tracing::info!("Test running with the following Settings:\n{:#?}", config);

    // Launch the server as a background task
    let _ = tokio::spawn(app.run());

    Test {
        address,
        email_server,
        recipient_email: config.email.recipient_email,
    }
}

#[derive(serde::Deserialize)]
pub struct Recipient {
    pub email: String,
}

#[derive(serde::Deserialize)]
pub struct Email {
    pub to: Vec<Recipient>,
    pub subject: String,
    #[serde(rename = "textContent")]
    pub text_content: String,
}
