//! LSB steganography for PCM WAVE audio.
//!
//! A byte payload is encrypted, error-correction coded, prefixed with a
//! self-describing header, and written into the least-significant bits of a
//! WAVE file's data region. The header always uses a fixed one-bit,
//! every-byte schedule, so a decoder holding the right key material needs no
//! out-of-band parameters: it reads the header, rebuilds the cipher and code
//! the header names, and inverts the pipeline.
//!
//! # Example
//!
//! ```no_run
//! use sonomark_stego::{decode_payload, encode_payload, EncodingConfig, KeyMaterial};
//!
//! let config = EncodingConfig::default();
//! let secrets = KeyMaterial::none();
//! encode_payload("track.wav", b"owner:42", &config, &secrets).unwrap();
//! assert_eq!(decode_payload("track.wav", &secrets).unwrap(), b"owner:42");
//! ```

mod bits;
mod config;
mod embed;
mod error;
mod facade;
mod header;

pub use config::EncodingConfig;
pub use error::StegoError;
pub use facade::{
    capacity, decode_payload, embed_payload, encode_payload, encode_payload_to, extract_payload,
    is_steganographic,
};
pub use header::{StegoHeader, HEADER_FIXED_LEN, HEADER_MAGIC};

// The collaborating layers a caller needs to drive the facade.
pub use sonomark_crypto::{
    generate_keypair, CryptoError, EncVariant, KdfCost, KdfVariant, KeyMaterial, RsaKeyPair,
};
pub use sonomark_ecc::{EccError, ErrorCorrection};
pub use sonomark_wave::{WaveError, WaveFile, WaveFormat};
