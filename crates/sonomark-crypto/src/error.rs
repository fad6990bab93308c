use thiserror::Error;

/// Errors from key derivation and payload encryption/decryption.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// A key could not be loaded or generated, typically because the private
    /// key passphrase is wrong.
    #[error("invalid key or key passphrase")]
    InvalidKey,

    /// The ciphertext failed authentication; wrong passphrase or tampering.
    /// Plaintext is never released on this path.
    #[error("ciphertext rejected: authentication failed")]
    AuthenticationFailed,

    /// The caller did not supply the secret this variant needs.
    #[error("missing key material: {0}")]
    MissingKeyMaterial(&'static str),

    /// The header prelude does not have the shape this variant embeds.
    #[error("malformed cipher prelude: expected {expected} bytes, got {actual}")]
    InvalidPrelude { expected: usize, actual: usize },

    /// The configured KDF rejected its parameters or output length.
    #[error("key derivation failed")]
    KdfFailure,
}
