//! Listener and dispatcher.
//!
//! One spawned task per accepted connection, no shared state between them.
//! Tasks are not tracked: stopping the listener does not wait for them.

mod connection;

pub use connection::{ConnectionHandler, ConnectionState};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpSocket};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::Result;

/// A bound echo server.
pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Bind and listen on `config.addr` with `SO_REUSEADDR` set.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(config: ServerConfig) -> Result<Self> {
        let socket = if config.addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.set_reuseaddr(true)?;
        socket.bind(config.addr)?;
        let listener = socket.listen(config.backlog)?;
        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Accept until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "cannot listen for ctrl-c, running until killed");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Accept until `shutdown` resolves, then close the listening socket.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        info!("starting websocket server on ws://{}", addr);
        info!("server is ready to accept connections");
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("server stopped");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let config = Arc::clone(&self.config);
                        let handler = ConnectionHandler::new(stream, peer.to_string(), config);
                        tokio::spawn(handler.run());
                    }
                    Err(e) => error!(error = %e, "accept failed"),
                },
            }
        }
        drop(self.listener);
        Ok(())
    }
}
