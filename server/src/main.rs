//! Chat-room REST server entry point.

use std::env;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use parley_server::{AppState, router};

/// Default bind address
const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG controls the log level, e.g. RUST_LOG=parley_server=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("parley_server=info")),
        )
        .init();

    let addr = env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDR.to_string());

    let state = AppState::seeded().await;
    let app = router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("chat-room API listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
