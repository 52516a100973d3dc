use thiserror::Error;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a connection or stop the listener.
#[derive(Error, Debug)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("handshake: {0}")]
    Handshake(#[from] HandshakeError),

    #[error("payload is not valid utf-8: {0}")]
    InvalidPayload(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Upgrade request errors. The peer never sees these; the connection is dropped.
#[derive(Error, Debug)]
pub enum HandshakeError {
    #[error("missing Sec-WebSocket-Key header")]
    MissingKey,

    #[error("request is not valid utf-8")]
    InvalidEncoding,

    #[error("peer closed before sending a request")]
    Empty,
}
