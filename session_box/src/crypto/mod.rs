mod derivation;
mod encoding;
mod errors;
mod provider;

pub use derivation::{CSRF_LABEL, KeyDerivation};
pub use encoding::encode;
pub use errors::CryptoError;
pub use provider::{CryptoProvider, RingCryptoProvider, SeededCryptoProvider};

pub(crate) use encoding::is_encoded;
