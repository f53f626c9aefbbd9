//! Fundbook HTTP server.
//!
//! Reads `FUNDBOOK_*` environment variables, opens the store, seeds funds
//! and serves until Ctrl-C.

use fundbook_api::{build_router, AppState, ServerConfig};
use fundbook_core::{db, init_logging};
use log::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, config.log_target.clone())?;

    let conn = match &config.db_path {
        Some(path) => db::open_db(path)?,
        None => db::open_db_in_memory()?,
    };

    let seeded = db::seed_funds(&conn, &config.seed_funds)?;
    if !seeded.is_empty() {
        info!(
            "event=seed_funds module=server status=ok count={}",
            seeded.len()
        );
    }

    let app = build_router(AppState::new(conn, config.base_path.clone()));
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        "event=server_start module=server status=ok bind={} base_path=\"{}\"",
        config.bind, config.base_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=server_stop module=server status=error cause=\"{err}\"");
    }
}
