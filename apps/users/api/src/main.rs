use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;
use users_api::{Config, build_app};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let app = build_app(&config)?;

    info!(
        name = config.app.name,
        version = config.app.version,
        "Starting Users API on {}",
        config.server.address()
    );

    axum_helpers::create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
