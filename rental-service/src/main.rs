use rental_service::config::RentalConfig;
use rental_service::services::init_metrics;
use rental_service::startup::Application;
use service_core::observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration is fail-fast: a missing or malformed encryption key
    // stops the process before anything binds.
    let config = RentalConfig::from_env()?;

    init_tracing(&config.service_name, &config.log_level);
    init_metrics();

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting rental-service"
    );

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    Ok(())
}
