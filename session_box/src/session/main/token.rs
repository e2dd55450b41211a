use crate::crypto::{CryptoError, CryptoProvider, encode};
use crate::session::types::{Token, TokenClass};

/// Draw a fresh token of `class` from the secure random source.
///
/// A failing random source is an error; there is no fallback.
pub(super) fn generate_token(
    crypto: &dyn CryptoProvider,
    class: TokenClass,
) -> Result<Token, CryptoError> {
    let mut bytes = vec![0u8; class.byte_len()];
    crypto.fill_random(&mut bytes)?;
    Ok(Token::from_encoded(encode(&bytes), class))
}
