//! The single API surface external collaborators use.
//!
//! Encode: payload → encrypt → error-correct → header-prefixed bit stream →
//! carrier LSBs. Decode is the exact inverse, driven by the embedded header.
//! File-level helpers load, transform in memory, and save atomically, so a
//! failed operation never leaves a half-modified file on disk.

use std::path::Path;

use sonomark_crypto::{for_decoding, for_encoding, KeyMaterial};
use sonomark_wave::WaveFile;

use crate::config::EncodingConfig;
use crate::embed;
use crate::error::StegoError;
use crate::header::{StegoHeader, HEADER_FIXED_LEN};

/// Embed `payload` into an already loaded carrier.
pub fn embed_payload(
    wave: &mut WaveFile,
    payload: &[u8],
    config: &EncodingConfig,
    material: &KeyMaterial,
) -> Result<(), StegoError> {
    config.validate()?;

    let encryptor = for_encoding(config.encryption, material)?;
    let ciphertext = encryptor.encrypt(payload)?;
    let coded = config
        .error_correction
        .encode(&ciphertext, config.redundant_bits)?;
    let coded_len = u32::try_from(coded.len()).map_err(|_| StegoError::InvalidConfig {
        context: "coded payload exceeds 4 GiB",
    })?;

    let header = StegoHeader {
        lsb: config.lsb,
        stride: config.stride,
        error_correction: config.error_correction,
        encryption: config.encryption,
        redundant_bits: config.redundant_bits,
        coded_len,
        prelude: encryptor.prelude(),
    };
    embed::write_into(wave.data_mut(), &header, &coded, config.repeat_data)
}

/// Recover the payload embedded in a loaded carrier.
pub fn extract_payload(wave: &WaveFile, material: &KeyMaterial) -> Result<Vec<u8>, StegoError> {
    let (header, coded) = embed::read_from(wave.data())?;
    let encryptor = for_decoding(header.encryption, &header.prelude, material)?;
    let decoded = header
        .error_correction
        .decode(&coded, header.redundant_bits)?;
    Ok(encryptor.decrypt(&decoded)?)
}

/// Embed `payload` into the WAVE file at `path`, in place.
pub fn encode_payload(
    path: impl AsRef<Path>,
    payload: &[u8],
    config: &EncodingConfig,
    material: &KeyMaterial,
) -> Result<(), StegoError> {
    let path = path.as_ref();
    let mut wave = WaveFile::load(path)?;
    embed_payload(&mut wave, payload, config, material)?;
    wave.save(path, true)?;
    Ok(())
}

/// Embed `payload` into the WAVE file at `input`, writing the result to
/// `output` and leaving `input` untouched.
pub fn encode_payload_to(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    overwrite: bool,
    payload: &[u8],
    config: &EncodingConfig,
    material: &KeyMaterial,
) -> Result<(), StegoError> {
    let mut wave = WaveFile::load(input)?;
    embed_payload(&mut wave, payload, config, material)?;
    wave.save(output, overwrite)?;
    Ok(())
}

/// Recover the payload embedded in the WAVE file at `path`.
pub fn decode_payload(
    path: impl AsRef<Path>,
    material: &KeyMaterial,
) -> Result<Vec<u8>, StegoError> {
    let wave = WaveFile::load(path)?;
    extract_payload(&wave, material)
}

/// Whether the file at `path` carries an embedded header, without decoding.
pub fn is_steganographic(path: impl AsRef<Path>) -> Result<bool, StegoError> {
    let wave = WaveFile::load(path)?;
    Ok(embed::probe(wave.data()))
}

/// Bytes available to the coded payload in `wave` under `config`, after the
/// fixed-schedule header (including the encryption variant's prelude).
pub fn capacity(wave: &WaveFile, config: &EncodingConfig) -> Result<usize, StegoError> {
    config.validate()?;
    let header_len = HEADER_FIXED_LEN + config.encryption.prelude_len();
    Ok(embed::capacity_bytes(
        wave.data().len(),
        header_len,
        config.lsb as u32,
        config.stride as usize,
    ))
}
