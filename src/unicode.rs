//! # UTF-8 / UTF-16LE transcoding
//!
//! The wire format stores a string as UTF-16LE whenever that form is
//! strictly valid and strictly shorter than the UTF-8 bytes. These
//! functions perform the conversions in both directions; the lossy
//! variants substitute U+FFFD for anything malformed.

use std::char::{decode_utf16, REPLACEMENT_CHARACTER};

/// Strict UTF-8 to UTF-16LE. Returns `None` when `utf8` is not well
/// formed (overlong sequences, surrogate code points, bad continuations).
pub fn utf8_to_utf16le(utf8: &[u8]) -> Option<Vec<u8>> {
    let text = std::str::from_utf8(utf8).ok()?;
    Some(units_to_le_bytes(text.encode_utf16()))
}

/// Lenient UTF-8 to UTF-16LE, substituting U+FFFD for malformed sequences.
pub fn utf8_to_utf16le_lossy(utf8: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(utf8);
    units_to_le_bytes(text.encode_utf16())
}

/// UTF-16LE to UTF-8, substituting U+FFFD for unpaired surrogates.
pub fn utf16le_to_utf8(utf16: &[u8]) -> Vec<u8> {
    let units = utf16
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    let mut out = String::with_capacity(utf16.len());
    for decoded in decode_utf16(units) {
        out.push(decoded.unwrap_or(REPLACEMENT_CHARACTER));
    }
    out.into_bytes()
}

fn units_to_le_bytes<I: Iterator<Item = u16>>(units: I) -> Vec<u8> {
    let mut out = Vec::with_capacity(units.size_hint().0 * 2);
    for unit in units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}
