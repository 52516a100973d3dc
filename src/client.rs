//! Client-side helpers for probing the server by hand or from tests.
//!
//! Mirrors what a WebSocket client does on the wire: an upgrade request with a
//! random key, and masked frames.

use base64::Engine;
use bytes::{BufMut, Bytes, BytesMut};

use crate::frame::{apply_mask, write_header, OpCode, MASK_BIT};
use crate::handshake::compute_accept_token;

/// Random 16-byte nonce, base64-encoded.
pub fn generate_key() -> String {
    base64::engine::general_purpose::STANDARD.encode(rand::random::<[u8; 16]>())
}

/// Random 4-byte masking key.
pub fn generate_mask() -> [u8; 4] {
    rand::random()
}

/// Build a GET upgrade request.
pub fn build_request(host: &str, path: &str, key: &str) -> Bytes {
    let mut buf = BytesMut::with_capacity(256);
    buf.put_slice(b"GET ");
    buf.put_slice(path.as_bytes());
    buf.put_slice(b" HTTP/1.1\r\n");
    buf.put_slice(b"Host: ");
    buf.put_slice(host.as_bytes());
    buf.put_slice(b"\r\n");
    buf.put_slice(b"Upgrade: websocket\r\n");
    buf.put_slice(b"Connection: Upgrade\r\n");
    buf.put_slice(b"Sec-WebSocket-Key: ");
    buf.put_slice(key.as_bytes());
    buf.put_slice(b"\r\n");
    buf.put_slice(b"Sec-WebSocket-Version: 13\r\n\r\n");
    buf.freeze()
}

/// Check the server's `Sec-WebSocket-Accept` against the key we sent.
pub fn validate_accept(sent_key: &str, received: &str) -> bool {
    compute_accept_token(sent_key) == received
}

/// Encode one masked frame the way a client sends it. FIN is always set.
///
/// Opcodes without an `OpCode` variant are written raw in the low nibble.
pub fn encode_masked_frame(opcode: u8, payload: &[u8], mask: [u8; 4]) -> Bytes {
    let mut buf = BytesMut::with_capacity(payload.len() + 14);
    match OpCode::from_u8(opcode) {
        Some(op) => write_header(&mut buf, op, MASK_BIT, payload.len()),
        None => {
            // Reuse the length encoding, then patch the opcode nibble.
            write_header(&mut buf, OpCode::Continuation, MASK_BIT, payload.len());
            buf[0] |= opcode & 0x0F;
        }
    }
    buf.put_slice(&mask);
    let start = buf.len();
    buf.put_slice(payload);
    apply_mask(&mut buf[start..], mask);
    buf.freeze()
}
