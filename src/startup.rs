//! src/startup.rs
use crate::configuration::Settings;
use crate::email::EmailClient;
use crate::routes::{appointment_routes, contact_script, health_check, home};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run(self) -> std::io::Result<()> {
        self.server.await
    }
}

/// Binds the listener and wires the email client. Port `0` picks a free port.
pub fn build(config: Settings) -> Result<Application, anyhow::Error> {
    let address = format!("{}:{}", config.application.host, config.application.port);
    let tcp_listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    let port = tcp_listener.local_addr()?.port();

    let email_client =
        EmailClient::try_from(config.email).context("Failed to configure the email client")?;

    let server = run(tcp_listener, email_client)?;

    Ok(Application { port, server })
}

pub fn run(listener: TcpListener, email_client: EmailClient) -> Result<Server, std::io::Error> {
    let email_client = web::Data::new(email_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .configure(appointment_routes)

            // serving the site
            .route("/", web::get().to(home))
            .route("/static/js/contact.js", web::get().to(contact_script))

            .app_data(email_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
