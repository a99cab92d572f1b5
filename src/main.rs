//! src/main.rs
use contacts_api::configuration::get_configuration;
use contacts_api::startup::Application;
use contacts_api::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = get_subscriber("contacts-api".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build(configuration)?;
    tracing::info!("Server is running on port {}", application.port());
    application.run_until_stopped().await?;
    Ok(())
}
