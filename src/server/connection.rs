//! Per-connection handler: handshake, then echo until the peer leaves.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::error::HandshakeError;
use crate::frame::{decode_frame, encode_frame, OpCode};
use crate::handshake;
use crate::transport::Transport;
use crate::Result;

/// Lifecycle of one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    AwaitingHandshake,
    Echoing,
    Closed,
}

/// Drives one accepted connection. Owns its transport exclusively.
pub struct ConnectionHandler<T> {
    transport: T,
    peer: String,
    config: Arc<ServerConfig>,
    state: ConnectionState,
    buf: Vec<u8>,
}

impl<T: Transport> ConnectionHandler<T> {
    pub fn new(transport: T, peer: impl Into<String>, config: Arc<ServerConfig>) -> Self {
        let buf = vec![0u8; config.read_buffer_size.max(1)];
        Self {
            transport,
            peer: peer.into(),
            config,
            state: ConnectionState::AwaitingHandshake,
            buf,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Run the connection to completion. The transport is closed on every exit path.
    pub async fn run(mut self) {
        info!(peer = %self.peer, "client connected");
        while self.state != ConnectionState::Closed {
            if let Err(e) = self.step().await {
                error!(peer = %self.peer, error = %e, "error with client");
                self.state = ConnectionState::Closed;
            }
        }
        if let Err(e) = self.transport.close().await {
            debug!(peer = %self.peer, error = %e, "shutdown failed");
        }
        info!(peer = %self.peer, "connection closed");
    }

    /// Perform one receive and advance the state machine.
    ///
    /// An error leaves the state untouched; [`run`](Self::run) treats it as closed.
    pub async fn step(&mut self) -> Result<ConnectionState> {
        let next = match self.state {
            ConnectionState::AwaitingHandshake => self.handshake().await?,
            ConnectionState::Echoing => self.echo().await?,
            ConnectionState::Closed => ConnectionState::Closed,
        };
        self.state = next;
        Ok(next)
    }

    async fn handshake(&mut self) -> Result<ConnectionState> {
        let n = self.transport.recv(&mut self.buf).await?;
        let response = if n == 0 {
            Err(HandshakeError::Empty)
        } else {
            handshake::respond(&self.buf[..n])
        };
        match response {
            Ok(response) => {
                self.transport.send(&response).await?;
                info!(peer = %self.peer, "websocket handshake completed");
                Ok(ConnectionState::Echoing)
            }
            Err(HandshakeError::InvalidEncoding) => Err(HandshakeError::InvalidEncoding.into()),
            Err(e) => {
                debug!(peer = %self.peer, reason = %e, "handshake abandoned");
                Ok(ConnectionState::Closed)
            }
        }
    }

    async fn echo(&mut self) -> Result<ConnectionState> {
        let n = self.transport.recv(&mut self.buf).await?;
        if n == 0 {
            debug!(peer = %self.peer, "peer closed the stream");
            return Ok(ConnectionState::Closed);
        }
        // One frame per read; bytes past the first frame are dropped.
        let Some(frame) = decode_frame(&self.buf[..n]) else {
            debug!(peer = %self.peer, bytes = n, "short read, waiting for more data");
            return Ok(ConnectionState::Echoing);
        };
        match frame.op() {
            Some(OpCode::Close) => {
                info!(peer = %self.peer, "close frame received");
                Ok(ConnectionState::Closed)
            }
            Some(OpCode::Binary) => {
                let message = std::str::from_utf8(&frame.payload)?;
                info!(peer = %self.peer, "received: {}", message);
                let reply = self.config.echo_message(message);
                self.transport.send(&encode_frame(&reply)).await?;
                info!(peer = %self.peer, "sent: {}", reply);
                Ok(ConnectionState::Echoing)
            }
            _ => {
                debug!(peer = %self.peer, opcode = frame.opcode, "ignoring frame");
                Ok(ConnectionState::Echoing)
            }
        }
    }
}
