/// XOR `payload` in place with the repeating 4-byte `mask`.
///
/// Applying the same mask twice restores the input.
#[inline]
pub fn apply_mask(payload: &mut [u8], mask: [u8; 4]) {
    for (i, b) in payload.iter_mut().enumerate() {
        *b ^= mask[i & 3];
    }
}
