//! Transport abstraction for a single accepted connection.
//!
//! A connection handler owns exactly one transport for its lifetime. Any
//! tokio duplex stream qualifies, so handlers run on `TcpStream` in the server
//! and on in-memory mock streams in tests.

use crate::Result;
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Async trait for a duplex byte stream.
#[async_trait]
pub trait Transport: Send {
    /// Read whatever is available into `buf`. `Ok(0)` means the peer closed.
    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write all of `data`.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Close the transport.
    async fn close(&mut self) -> Result<()>;
}

#[async_trait]
impl<S> Transport for S
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.read(buf).await?)
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        self.write_all(data).await?;
        self.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.shutdown().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplex_stream_is_a_transport() {
        let (mut a, mut b) = tokio::io::duplex(64);
        Transport::send(&mut a, b"hello").await.unwrap();
        let mut buf = [0u8; 16];
        let n = Transport::recv(&mut b, &mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"hello");

        Transport::close(&mut a).await.unwrap();
        let n = Transport::recv(&mut b, &mut buf).await.unwrap();
        assert_eq!(n, 0);
    }
}
