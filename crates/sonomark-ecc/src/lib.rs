//! Channel coding for embedded payloads.
//!
//! Payload bytes pass through one of a closed set of error-correcting codes
//! before embedding, so flipped carrier bits can be repaired on extraction.
//! The variant and its redundancy parameter travel in the embedded header;
//! dispatch on extraction is a `match` on the recorded tag.

mod error;
mod hamming;
mod reed_solomon;

pub use error::EccError;

/// The closed set of error-correction codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    /// Identity: no redundancy, no protection.
    #[default]
    None,
    /// Hamming SECDED; `redundant_bits` selects the block geometry.
    Hamming,
    /// Reed-Solomon over GF(2^8); `redundant_bits` parity symbols per block.
    ReedSolomon,
}

impl ErrorCorrection {
    pub fn tag(self) -> u8 {
        match self {
            ErrorCorrection::None => 0,
            ErrorCorrection::Hamming => 1,
            ErrorCorrection::ReedSolomon => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ErrorCorrection::None),
            1 => Some(ErrorCorrection::Hamming),
            2 => Some(ErrorCorrection::ReedSolomon),
            _ => None,
        }
    }

    /// Add redundancy to `data` according to the variant and parameter.
    pub fn encode(self, data: &[u8], redundant_bits: u16) -> Result<Vec<u8>, EccError> {
        match self {
            ErrorCorrection::None => Ok(data.to_vec()),
            ErrorCorrection::Hamming => hamming::encode(data, redundant_bits),
            ErrorCorrection::ReedSolomon => reed_solomon::encode(data, redundant_bits),
        }
    }

    /// Strip redundancy, correcting what the code allows.
    ///
    /// Fails with [`EccError::UncorrectableCodeword`] when a block carries
    /// more errors than the variant can repair.
    pub fn decode(self, data: &[u8], redundant_bits: u16) -> Result<Vec<u8>, EccError> {
        match self {
            ErrorCorrection::None => Ok(data.to_vec()),
            ErrorCorrection::Hamming => hamming::decode(data, redundant_bits),
            ErrorCorrection::ReedSolomon => reed_solomon::decode(data, redundant_bits),
        }
    }
}
