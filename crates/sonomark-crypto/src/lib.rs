//! Key derivation and payload encryption for audio watermarks.
//!
//! The payload handed to the steganographic embedder first passes through one
//! of a closed set of encryptors (none, Fernet-style token, AES-256-CTR with
//! encrypt-then-MAC, RSA-OAEP), keyed either by a passphrase stretched
//! through a configurable KDF (none, PBKDF2-HMAC-SHA256, scrypt) or by an RSA
//! key pair supplied by the caller. Whatever per-encode material decode needs
//! (salts, nonces) is surfaced through [`Encryptor::prelude`] for the header
//! to carry.

mod aes_ctr;
mod encryptor;
mod error;
mod fernet;
mod kdf;
mod rsa_oaep;

pub use aes_ctr::{AesEncryptor, NONCE_LEN};
pub use encryptor::{for_decoding, for_encoding, EncVariant, Encryptor, KeyMaterial};
pub use error::CryptoError;
pub use fernet::FernetEncryptor;
pub use kdf::{KdfCost, KdfVariant, KeyDerivation, SALT_LEN};
pub use rsa_oaep::{generate_keypair, RsaEncryptor, RsaKeyPair, RSA_BITS};
