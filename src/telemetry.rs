use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Debug mode switches to readable output
/// and a more verbose default filter; `RUST_LOG` wins over both.
pub fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "debug,hyper=info,tower_http=debug"
    } else {
        "info,hyper=warn,tower_http=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if debug {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! { _ = ctrl_c => {}, _ = terminate => {}, }
    info!("shutdown signal received");
}
