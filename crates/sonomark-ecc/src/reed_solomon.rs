//! Reed-Solomon coding over GF(2^8).
//!
//! `redundant_bits = r` parity symbols are appended to each block of up to
//! 255 − r data bytes; up to ⌊r/2⌋ corrupted symbols per block are corrected.
//! The final block keeps its natural (shorter) length, so the payload length
//! never needs separate framing.

use reed_solomon::{Decoder, Encoder};

use crate::error::EccError;

/// Codeword length of the underlying GF(2^8) code.
const CODEWORD_LEN: usize = 255;

fn validate(redundant_bits: u16) -> Result<usize, EccError> {
    let r = redundant_bits as usize;
    if r == 0 || r >= CODEWORD_LEN {
        return Err(EccError::InvalidParameter {
            context: "reed-solomon redundant_bits must be in 1..=254",
        });
    }
    Ok(r)
}

pub fn encode(data: &[u8], redundant_bits: u16) -> Result<Vec<u8>, EccError> {
    let r = validate(redundant_bits)?;
    let encoder = Encoder::new(r);
    let data_len = CODEWORD_LEN - r;

    let mut out = Vec::with_capacity(data.len() + data.len().div_ceil(data_len.max(1)) * r);
    for chunk in data.chunks(data_len) {
        out.extend_from_slice(&encoder.encode(chunk));
    }
    Ok(out)
}

pub fn decode(data: &[u8], redundant_bits: u16) -> Result<Vec<u8>, EccError> {
    let r = validate(redundant_bits)?;
    let decoder = Decoder::new(r);

    let mut out = Vec::with_capacity(data.len());
    for (index, block) in data.chunks(CODEWORD_LEN).enumerate() {
        if block.len() <= r {
            return Err(EccError::Truncated {
                context: "reed-solomon block shorter than its parity",
            });
        }
        let recovered = decoder
            .correct(block, None)
            .map_err(|_| EccError::UncorrectableCodeword { block: index })?;
        out.extend_from_slice(recovered.data());
    }
    Ok(out)
}
