//! # wsecho
//!
//! Minimal WebSocket echo server for manually validating a WebSocket client.
//!
//! ## Features
//!
//! - RFC 6455 upgrade handshake (`Sec-WebSocket-Accept` computation)
//! - Single-frame codec: masked client frames in, unmasked binary frames out
//! - One task per connection: handshake, then echo binary frames prefixed
//!   with `"Echo: "` until the peer closes or sends a close frame
//! - Client-side helpers for probing the server by hand
//!
//! ## Example
//!
//! ```ignore
//! use wsecho::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = Server::bind(ServerConfig::default())?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod frame;
pub mod handshake;
pub mod server;
pub mod transport;

pub use config::ServerConfig;
pub use error::{Error, HandshakeError, Result};
pub use frame::{decode_frame, encode_frame, Frame, OpCode};
pub use handshake::{build_handshake_response, compute_accept_token, parse_headers};
pub use server::{ConnectionHandler, ConnectionState, Server};
pub use transport::Transport;
