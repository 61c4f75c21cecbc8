use anyhow::Result;
use solar_power_predictor::{api, config, state, telemetry};
use config::Config;
use state::AppState;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    let cfg = Config::load()?;
    init_tracing(cfg.server.debug);

    if cfg.server.debug {
        warn!("debug mode enabled - verbose logging, not for production");
    }

    // Artifacts are loaded before the listener binds
    let app_state = AppState::load(&cfg)?;
    let app = api::router(app_state, &cfg);

    let addr = cfg.server.socket_addr()?;
    info!(%addr, models_dir = %cfg.models.dir.display(), "starting solar power predictor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
