use sonomark_crypto::CryptoError;
use sonomark_ecc::EccError;
use sonomark_wave::WaveError;
use thiserror::Error;

/// Errors surfaced by the embedding/extraction facade.
///
/// Everything lower layers report composes into this type; the core recovers
/// from none of it.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The coded payload does not fit the carrier under the given config.
    /// Raised before any byte of the carrier is touched.
    #[error("coded payload of {coded} bytes exceeds carrier capacity of {capacity} bytes")]
    PayloadTooLarge { coded: usize, capacity: usize },

    /// The carrier holds no embedded header (magic mismatch).
    #[error("no steganographic payload found")]
    NotSteganographic,

    /// The encoding configuration is outside the supported ranges.
    #[error("invalid encoding config: {context}")]
    InvalidConfig { context: &'static str },

    /// The embedded header names a variant this build does not know.
    #[error("unrecognized {field} tag {tag} in embedded header")]
    UnknownTag { field: &'static str, tag: u8 },

    /// The embedded header promises more bytes than the carrier holds.
    #[error("embedded stream truncated: {context}")]
    Truncated { context: &'static str },

    #[error(transparent)]
    Wave(#[from] WaveError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Ecc(#[from] EccError),
}

impl StegoError {
    /// Process exit code for CLI collaborators: 2 invalid input, 3 capacity
    /// exceeded, 4 authentication/decryption failure, 5 uncorrectable
    /// codeword.
    pub fn exit_code(&self) -> i32 {
        match self {
            StegoError::PayloadTooLarge { .. } => 3,
            StegoError::Crypto(_) => 4,
            StegoError::Ecc(EccError::UncorrectableCodeword { .. }) => 5,
            _ => 2,
        }
    }
}
