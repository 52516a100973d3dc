//! Server-side frame encoder.

use bytes::{BufMut, Bytes, BytesMut};

use super::{OpCode, FIN_BIT, LEN_MARKER_16, LEN_MARKER_64, MAX_SHORT_LEN};

/// Write a frame header: FIN plus `opcode`, then the length field.
///
/// `mask_bit` is OR'd into the second byte; servers pass 0.
pub fn write_header(buf: &mut BytesMut, opcode: OpCode, mask_bit: u8, len: usize) {
    buf.put_u8(FIN_BIT | opcode as u8);
    let len = len as u64;
    if len <= MAX_SHORT_LEN {
        buf.put_u8(mask_bit | len as u8);
    } else if len <= u16::MAX as u64 {
        buf.put_u8(mask_bit | LEN_MARKER_16);
        buf.put_u16(len as u16);
    } else {
        buf.put_u8(mask_bit | LEN_MARKER_64);
        buf.put_u64(len);
    }
}

/// Encode `payload` as a single unmasked binary frame (first byte `0x82`).
///
/// Strings are framed as their UTF-8 bytes.
pub fn encode_frame(payload: impl AsRef<[u8]>) -> Bytes {
    let payload = payload.as_ref();
    let mut buf = BytesMut::with_capacity(payload.len() + 10);
    write_header(&mut buf, OpCode::Binary, 0, payload.len());
    buf.put_slice(payload);
    buf.freeze()
}
