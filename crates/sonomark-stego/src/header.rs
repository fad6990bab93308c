//! The self-describing header prefixed to every embedded stream.
//!
//! Layout, all multi-byte integers big-endian:
//!
//! | field          | width |
//! |----------------|-------|
//! | magic "STG1"   | 4     |
//! | lsb            | 1     |
//! | stride         | 2     |
//! | ec variant     | 1     |
//! | enc variant    | 1     |
//! | redundant_bits | 2     |
//! | prelude_len    | 2     |
//! | coded_len      | 4     |
//! | prelude        | prelude_len |
//!
//! The header itself is always embedded at lsb=1, stride=1 so a decoder can
//! parse it before it knows anything about the configuration; the coded
//! payload that follows uses the parameters the header declares.

use sonomark_crypto::EncVariant;
use sonomark_ecc::ErrorCorrection;

use crate::config::EncodingConfig;
use crate::error::StegoError;

pub const HEADER_MAGIC: [u8; 4] = *b"STG1";

/// Length of the fixed (prelude-less) portion.
pub const HEADER_FIXED_LEN: usize = 17;

/// A fully assembled embedded header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StegoHeader {
    pub lsb: u8,
    pub stride: u16,
    pub error_correction: ErrorCorrection,
    pub encryption: EncVariant,
    pub redundant_bits: u16,
    /// Bytes of coded payload following the header region.
    pub coded_len: u32,
    /// Cipher/KDF material needed to rebuild the decryptor.
    pub prelude: Vec<u8>,
}

impl StegoHeader {
    /// Total serialized length, prelude included.
    pub fn encoded_len(&self) -> usize {
        HEADER_FIXED_LEN + self.prelude.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&HEADER_MAGIC);
        out.push(self.lsb);
        out.extend_from_slice(&self.stride.to_be_bytes());
        out.push(self.error_correction.tag());
        out.push(self.encryption.tag());
        out.extend_from_slice(&self.redundant_bits.to_be_bytes());
        out.extend_from_slice(&(self.prelude.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.coded_len.to_be_bytes());
        out.extend_from_slice(&self.prelude);
        out
    }

    /// The embedding parameters this header declares for its payload.
    pub fn config(&self) -> EncodingConfig {
        EncodingConfig {
            lsb: self.lsb,
            stride: self.stride,
            redundant_bits: self.redundant_bits,
            error_correction: self.error_correction,
            encryption: self.encryption,
            repeat_data: false,
        }
    }
}

/// The fixed portion of a header, parsed before the prelude is available.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeaderFields {
    pub lsb: u8,
    pub stride: u16,
    pub error_correction: ErrorCorrection,
    pub encryption: EncVariant,
    pub redundant_bits: u16,
    pub prelude_len: usize,
    pub coded_len: usize,
}

impl HeaderFields {
    /// Parse the fixed portion. Fails with [`StegoError::NotSteganographic`]
    /// when the magic is absent and [`StegoError::UnknownTag`] on variant
    /// tags this build does not know.
    pub(crate) fn parse(bytes: &[u8]) -> Result<Self, StegoError> {
        debug_assert_eq!(bytes.len(), HEADER_FIXED_LEN);
        if bytes[0..4] != HEADER_MAGIC {
            return Err(StegoError::NotSteganographic);
        }
        let error_correction = ErrorCorrection::from_tag(bytes[7]).ok_or(StegoError::UnknownTag {
            field: "error-correction",
            tag: bytes[7],
        })?;
        let encryption = EncVariant::from_tag(bytes[8]).ok_or(StegoError::UnknownTag {
            field: "encryption",
            tag: bytes[8],
        })?;
        Ok(HeaderFields {
            lsb: bytes[4],
            stride: u16::from_be_bytes([bytes[5], bytes[6]]),
            error_correction,
            encryption,
            redundant_bits: u16::from_be_bytes([bytes[9], bytes[10]]),
            prelude_len: u16::from_be_bytes([bytes[11], bytes[12]]) as usize,
            coded_len: u32::from_be_bytes([bytes[13], bytes[14], bytes[15], bytes[16]]) as usize,
        })
    }

    pub(crate) fn into_header(self, prelude: Vec<u8>) -> StegoHeader {
        StegoHeader {
            lsb: self.lsb,
            stride: self.stride,
            error_correction: self.error_correction,
            encryption: self.encryption,
            redundant_bits: self.redundant_bits,
            coded_len: self.coded_len as u32,
            prelude,
        }
    }
}
