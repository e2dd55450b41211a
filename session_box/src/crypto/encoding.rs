//! Constant-time token encoding
//!
//! Each input byte becomes two characters, high nibble first, taken from the
//! sixteen consecutive letters `a` through `p`. The character is computed as
//! `b'a' + nibble`: there is no table indexed by secret data and no branch on
//! byte values. All sixteen letters pass unescaped through cookie values,
//! HTML attributes and URL-encoded form bodies, and browsers leave them alone
//! when submitting forms.

pub(crate) const ALPHABET_OFFSET: u8 = b'a';

/// Encode bytes as a token string. The output is always exactly twice as long
/// as the input.
pub fn encode(bytes: &[u8]) -> String {
    let mut token = String::with_capacity(2 * bytes.len());
    for &b in bytes {
        token.push(char::from(ALPHABET_OFFSET + (b >> 4)));
        token.push(char::from(ALPHABET_OFFSET + (b & 0x0f)));
    }
    token
}

/// Whether every byte of `s` lies in the encoding alphabet.
///
/// Scans the whole input no matter where an invalid byte sits.
pub(crate) fn is_encoded(s: &str) -> bool {
    let invalid = s
        .bytes()
        .fold(0u8, |acc, b| acc | (b.wrapping_sub(ALPHABET_OFFSET) & 0xf0));
    invalid == 0
}
