//! Echo server on `ws://127.0.0.1:8080`. Runs until Ctrl-C.
//!
//! Run with: `cargo run`, log level via `RUST_LOG` (default `info`).

use tracing_subscriber::EnvFilter;
use wsecho::{Server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server = Server::bind(ServerConfig::default())?;
    server.run().await?;
    Ok(())
}
