//! Server side of the HTTP upgrade handshake.
//!
//! Only `Sec-WebSocket-Key` is consulted. Method, path, version and the other
//! upgrade headers are not validated.

use std::collections::HashMap;

use base64::Engine;
use bytes::{BufMut, Bytes, BytesMut};
use sha1::{Digest, Sha1};

use crate::error::HandshakeError;

/// GUID appended to the client key before hashing (RFC 6455 section 1.3).
pub const WS_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// Header carrying the client nonce.
pub const KEY_HEADER: &str = "Sec-WebSocket-Key";

/// Request headers, name to value, names kept as sent.
pub type Headers = HashMap<String, String>;

/// Parse the header block of an upgrade request.
///
/// The first line is discarded. Every following line is split at its first
/// colon and both halves trimmed; lines without a colon are skipped. A repeated
/// header keeps its last value.
pub fn parse_headers(raw: &[u8]) -> Result<Headers, HandshakeError> {
    let text = std::str::from_utf8(raw).map_err(|_| HandshakeError::InvalidEncoding)?;
    let headers = text
        .split("\r\n")
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect();
    Ok(headers)
}

/// Compute `Sec-WebSocket-Accept` for a client key: base64(sha1(key + GUID)).
pub fn compute_accept_token(key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    hasher.update(WS_GUID.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(hasher.finalize())
}

/// Build the `101 Switching Protocols` response carrying `token`.
pub fn build_handshake_response(token: &str) -> Bytes {
    let mut buf = BytesMut::with_capacity(128);
    buf.put_slice(b"HTTP/1.1 101 Switching Protocols\r\n");
    buf.put_slice(b"Upgrade: websocket\r\n");
    buf.put_slice(b"Connection: Upgrade\r\n");
    buf.put_slice(b"Sec-WebSocket-Accept: ");
    buf.put_slice(token.as_bytes());
    buf.put_slice(b"\r\n\r\n");
    buf.freeze()
}

/// Parse `raw` and, if it carries a key, return the response to send.
pub fn respond(raw: &[u8]) -> Result<Bytes, HandshakeError> {
    let headers = parse_headers(raw)?;
    let key = headers.get(KEY_HEADER).ok_or(HandshakeError::MissingKey)?;
    Ok(build_handshake_response(&compute_accept_token(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_token_rfc_vector() {
        assert_eq!(
            compute_accept_token("dGhlIHNhbXBsZSBub25jZQ=="),
            "s3pPLMBiTxaQ9kYGzzhZRbK+xOo="
        );
    }

    #[test]
    fn accept_token_is_deterministic() {
        assert_eq!(compute_accept_token("abc123"), compute_accept_token("abc123"));
        assert_ne!(compute_accept_token("abc123"), compute_accept_token("abc124"));
    }

    #[test]
    fn parses_single_header() {
        let h = parse_headers(b"GET / HTTP/1.1\r\nSec-WebSocket-Key: abc123\r\n\r\n").unwrap();
        assert_eq!(h.len(), 1);
        assert_eq!(h.get("Sec-WebSocket-Key").map(String::as_str), Some("abc123"));
    }

    #[test]
    fn skips_request_line_and_lines_without_colon() {
        let raw =
            b"GET /chat HTTP/1.1\r\nHost: localhost:8080\r\ngarbage\r\nUpgrade:websocket\r\n\r\n";
        let h = parse_headers(raw).unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(h["Host"], "localhost:8080");
        assert_eq!(h["Upgrade"], "websocket");
    }

    #[test]
    fn request_line_with_colon_is_ignored() {
        let h = parse_headers(b"X: y\r\nA: b\r\n").unwrap();
        assert!(!h.contains_key("X"));
        assert_eq!(h["A"], "b");
    }

    #[test]
    fn non_utf8_request_is_rejected() {
        let err = parse_headers(b"GET / HTTP/1.1\r\nK: \xff\r\n").unwrap_err();
        assert!(matches!(err, HandshakeError::InvalidEncoding));
    }

    #[test]
    fn response_layout_is_exact() {
        let r = build_handshake_response("s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
        assert_eq!(
            &r[..],
            b"HTTP/1.1 101 Switching Protocols\r\n\
              Upgrade: websocket\r\n\
              Connection: Upgrade\r\n\
              Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\
              \r\n"
        );
    }

    #[test]
    fn respond_requires_key() {
        let err = respond(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").unwrap_err();
        assert!(matches!(err, HandshakeError::MissingKey));

        let ok = respond(b"GET / HTTP/1.1\r\nSec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\r\n")
            .unwrap();
        assert!(ok.ends_with(b"Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\r\n"));
    }
}
