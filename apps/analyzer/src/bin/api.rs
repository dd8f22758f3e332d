use std::net::SocketAddr;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use analyzer::config::Config;
use analyzer::routes::build_router;
use analyzer::state::AppState;
use analyzer::{telemetry, Toolkit};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(&config.rust_log);

    info!("Starting analyzer API v{}", env!("CARGO_PKG_VERSION"));

    let toolkit = Toolkit::init(&config)?;
    if !config.skill_library_path.exists() {
        // Not fatal: every analysis reports it until the file appears.
        tracing::warn!(
            path = %config.skill_library_path.display(),
            "skill library not found"
        );
    }

    let state = AppState { toolkit };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
