use anyhow::Context;
use consultorio::configuration::get_configuration;
use consultorio::startup::build;
use consultorio::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = get_configuration().context("Failed to read configuration.")?;

    let subscriber = get_subscriber("consultorio".into(), config.log_level().into(), std::io::stdout);
    init_subscriber(subscriber);

    let app = build(config)?;
    tracing::info!(port = app.port(), "Listening");
    app.run().await?;

    Ok(())
}
