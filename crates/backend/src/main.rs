pub mod api;
pub mod reports;
pub mod routes;
pub mod shared;
pub mod system;

use std::net::SocketAddr;
use tokio::net::TcpListener;

use shared::config::{get_database_path, load_config};
use shared::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = load_config()?;
    let db_path = get_database_path(&config);
    let db = shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let state = AppState::new(db, &config);
    if state.auth.is_none() {
        tracing::warn!(
            "No basic auth credentials configured, reports are served without authentication"
        );
    }

    let app = routes::configure_routes(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
