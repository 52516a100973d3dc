//! Single-frame decoder.

use bytes::Bytes;

use super::{apply_mask, Frame, LEN_MARKER_16, LEN_MARKER_64, MASK_BIT};

/// Decode one frame from the start of `buf`.
///
/// Returns `None` when `buf` is too short to hold the header: fewer than two
/// bytes, or a truncated extended length or mask key. The payload itself is
/// not checked against the declared length; a short buffer yields whatever
/// payload bytes are present.
pub fn decode_frame(buf: &[u8]) -> Option<Frame> {
    if buf.len() < 2 {
        return None;
    }
    let opcode = buf[0] & 0x0F;
    let masked = buf[1] & MASK_BIT != 0;
    let len_indicator = buf[1] & 0x7F;
    let mut offset = 2;

    let payload_len = match len_indicator {
        LEN_MARKER_16 => {
            let b: [u8; 2] = buf.get(offset..offset + 2)?.try_into().ok()?;
            offset += 2;
            u16::from_be_bytes(b) as u64
        }
        LEN_MARKER_64 => {
            let b: [u8; 8] = buf.get(offset..offset + 8)?.try_into().ok()?;
            offset += 8;
            u64::from_be_bytes(b)
        }
        n => n as u64,
    };

    let mask = if masked {
        let m: [u8; 4] = buf.get(offset..offset + 4)?.try_into().ok()?;
        offset += 4;
        Some(m)
    } else {
        None
    };

    let rest = &buf[offset..];
    let take = usize::try_from(payload_len).map_or(rest.len(), |n| n.min(rest.len()));
    let mut payload = rest[..take].to_vec();
    if let Some(m) = mask {
        apply_mask(&mut payload, m);
    }

    Some(Frame {
        opcode,
        payload_len,
        masked,
        payload: Bytes::from(payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{encode_frame, OpCode};

    fn masked(opcode: u8, payload: &[u8], mask: [u8; 4]) -> Vec<u8> {
        crate::client::encode_masked_frame(opcode, payload, mask).to_vec()
    }

    #[test]
    fn too_short_yields_none() {
        assert_eq!(decode_frame(&[]), None);
        assert_eq!(decode_frame(&[0x82]), None);
    }

    #[test]
    fn truncated_extended_length_yields_none() {
        assert_eq!(decode_frame(&[0x82, 126, 0x01]), None);
        assert_eq!(decode_frame(&[0x82, 127, 0, 0, 0]), None);
    }

    #[test]
    fn truncated_mask_key_yields_none() {
        assert_eq!(decode_frame(&[0x82, 0x84, 0x01, 0x02]), None);
    }

    #[test]
    fn unmasks_with_repeating_key() {
        let mask = [0x01, 0x02, 0x03, 0x04];
        let plain = b"hello world";
        let mut wire = vec![0x82, 0x80 | plain.len() as u8];
        wire.extend_from_slice(&mask);
        wire.extend(plain.iter().enumerate().map(|(i, b)| b ^ mask[i % 4]));

        let frame = decode_frame(&wire).unwrap();
        assert_eq!(frame.op(), Some(OpCode::Binary));
        assert!(frame.masked);
        assert_eq!(frame.payload_len, plain.len() as u64);
        assert_eq!(&frame.payload[..], plain);
    }

    #[test]
    fn unmasked_payload_taken_as_is() {
        let wire = encode_frame("ping");
        let frame = decode_frame(&wire).unwrap();
        assert!(!frame.masked);
        assert_eq!(frame.opcode, 0x2);
        assert_eq!(&frame.payload[..], b"ping");
    }

    #[test]
    fn masked_round_trip_small_payloads() {
        let mask = [0xde, 0xad, 0xbe, 0xef];
        for len in [0usize, 1, 4, 5, 125] {
            let payload: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let frame = decode_frame(&masked(0x2, &payload, mask)).unwrap();
            assert_eq!(frame.opcode, 0x2);
            assert_eq!(&frame.payload[..], &payload[..]);
        }
    }

    #[test]
    fn extended_lengths_decode() {
        let mask = [9, 8, 7, 6];
        for len in [126usize, 65535, 65536] {
            let payload = vec![0x5a; len];
            let frame = decode_frame(&masked(0x2, &payload, mask)).unwrap();
            assert_eq!(frame.payload_len, len as u64);
            assert!(frame.is_complete());
            assert_eq!(&frame.payload[..], &payload[..]);
        }
    }

    #[test]
    fn truncated_payload_is_returned_short() {
        let wire = encode_frame(vec![1u8; 10]);
        let frame = decode_frame(&wire[..6]).unwrap();
        assert_eq!(frame.payload_len, 10);
        assert_eq!(frame.payload.len(), 4);
        assert!(!frame.is_complete());
    }

    #[test]
    fn close_frame_opcode() {
        let frame = decode_frame(&masked(0x8, &[], [1, 2, 3, 4])).unwrap();
        assert_eq!(frame.op(), Some(OpCode::Close));
        assert!(frame.payload.is_empty());
    }
}
