//! The 26-letter uppercase alphabet every key and mapping is defined over.

pub const ALPHABET_LEN: usize = 26;
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Ordinal of an ASCII letter (case-insensitive), or `None` for anything else.
#[inline]
pub fn ordinal(c: u8) -> Option<usize> {
    match c {
        b'A'..=b'Z' => Some((c - b'A') as usize),
        b'a'..=b'z' => Some((c - b'a') as usize),
        _ => None,
    }
}

/// Uppercase letter for an ordinal in `0..26`.
#[inline]
pub fn letter(ord: usize) -> u8 {
    debug_assert!(ord < ALPHABET_LEN);
    b'A' + ord as u8
}

/// Uppercases and drops spaces and newlines, nothing else.
///
/// This mirrors the scorer's normalization exactly: punctuation and digits
/// survive and will land inside n-gram windows, so callers that want
/// letters-only scoring must pre-clean their text themselves.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\r'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Uppercase letters only, everything else removed.
pub fn letters_only(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
