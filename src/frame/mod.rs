//! RFC 6455 frame codec.
//!
//! Handles exactly one frame per buffer: no fragmentation, no extensions.
//! Client frames arrive masked; server frames are always sent unmasked with
//! FIN set and the binary opcode.

mod decoder;
mod encoder;
mod mask;

pub use decoder::decode_frame;
pub use encoder::{encode_frame, write_header};
pub use mask::apply_mask;

use bytes::Bytes;

/// Largest length that fits in the 7-bit length field.
pub const MAX_SHORT_LEN: u64 = 125;

/// Length marker for a 16-bit extended length.
pub const LEN_MARKER_16: u8 = 126;

/// Length marker for a 64-bit extended length.
pub const LEN_MARKER_64: u8 = 127;

/// FIN bit in the first header byte.
pub const FIN_BIT: u8 = 0x80;

/// Mask bit in the second header byte.
pub const MASK_BIT: u8 = 0x80;

/// WebSocket opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    Continuation = 0x0,
    Text = 0x1,
    Binary = 0x2,
    Close = 0x8,
    Ping = 0x9,
    Pong = 0xA,
}

impl OpCode {
    #[inline]
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x0 => Some(OpCode::Continuation),
            0x1 => Some(OpCode::Text),
            0x2 => Some(OpCode::Binary),
            0x8 => Some(OpCode::Close),
            0x9 => Some(OpCode::Ping),
            0xA => Some(OpCode::Pong),
            _ => None,
        }
    }

    #[inline]
    pub fn is_control(self) -> bool {
        (self as u8) >= 0x8
    }
}

/// One decoded frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Low 4 bits of the first header byte.
    pub opcode: u8,
    /// Length declared in the header.
    pub payload_len: u64,
    pub masked: bool,
    /// Unmasked payload. Shorter than `payload_len` when the buffer was truncated.
    pub payload: Bytes,
}

impl Frame {
    pub fn op(&self) -> Option<OpCode> {
        OpCode::from_u8(self.opcode)
    }

    /// Whether the buffer held every byte the header declared.
    pub fn is_complete(&self) -> bool {
        self.payload.len() as u64 == self.payload_len
    }
}
