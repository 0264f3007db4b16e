//! Fixed-width text helpers.
//!
//! Infinity Engine files store names in fixed-size, NUL-padded slots using a
//! single-byte code page. Bytes are mapped one-to-one onto Latin-1 code points
//! so that decoding and re-encoding never loses information.

/// Decode a NUL-padded text slot.
///
/// Decoding stops at the first NUL byte.
pub fn decode(bytes: &[u8]) -> String {
    let end = memchr::memchr(0, bytes).unwrap_or(bytes.len());
    bytes[..end].iter().map(|&b| b as char).collect()
}

/// Encode text into a fixed-width slot of `width` bytes.
///
/// Characters outside Latin-1 are replaced with `?`. Text longer than the
/// slot is truncated; shorter text is padded with NUL bytes.
pub fn encode(text: &str, width: usize) -> Vec<u8> {
    let mut out: Vec<u8> = text
        .chars()
        .take(width)
        .map(|c| if (c as u32) <= 0xFF { c as u32 as u8 } else { b'?' })
        .collect();
    out.resize(width, 0);
    out
}

/// Returns the number of bytes `text` would occupy before padding.
pub fn encoded_len(text: &str) -> usize {
    text.chars().count()
}
