#![allow(dead_code)]

use sonomark_stego::WaveFile;

/// Builds a 44.1 kHz 16-bit mono PCM WAVE file whose data region holds
/// `data_len` bytes of a deterministic triangle-ish waveform.
pub fn synth_wav(data_len: usize) -> Vec<u8> {
    let mut samples = Vec::with_capacity(data_len);
    let mut i = 0u32;
    while samples.len() < data_len {
        let value = ((i % 2048) as i32 - 1024) as i16 * 13;
        samples.extend_from_slice(&value.to_le_bytes());
        i += 1;
    }
    samples.truncate(data_len);

    let mut out = Vec::with_capacity(44 + data_len);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&44100u32.to_le_bytes());
    out.extend_from_slice(&88200u32.to_le_bytes()); // sample_rate * block_align
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(data_len as u32).to_le_bytes());
    out.extend_from_slice(&samples);
    if data_len % 2 == 1 {
        out.push(0);
    }

    let riff_size = (out.len() - 8) as u32;
    out[4..8].copy_from_slice(&riff_size.to_le_bytes());
    out
}

/// A parsed ten-second clip, the size the fingerprinting deployment used.
pub fn ten_second_clip() -> WaveFile {
    // 10 s of 16-bit mono at 44.1 kHz.
    WaveFile::parse(&synth_wav(882_000)).expect("synthetic wav")
}

pub fn small_clip(data_len: usize) -> WaveFile {
    WaveFile::parse(&synth_wav(data_len)).expect("synthetic wav")
}
