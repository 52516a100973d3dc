//! Listener and handler settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listen address (`127.0.0.1:8080`).
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080);

/// Default pending-connection backlog.
pub const DEFAULT_BACKLOG: u32 = 5;

/// Size of the buffer each receive reads into.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// Label prepended to every echoed message.
pub const DEFAULT_ECHO_PREFIX: &str = "Echo: ";

/// Settings shared by the listener and every connection handler it spawns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub backlog: u32,
    /// A handler reads at most this many bytes per receive and assumes they hold one frame.
    pub read_buffer_size: usize,
    pub echo_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR,
            backlog: DEFAULT_BACKLOG,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            echo_prefix: DEFAULT_ECHO_PREFIX.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
        self
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    pub fn with_echo_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.echo_prefix = prefix.into();
        self
    }

    /// Build the reply for one received message.
    pub fn echo_message(&self, message: &str) -> String {
        format!("{}{}", self.echo_prefix, message)
    }
}
