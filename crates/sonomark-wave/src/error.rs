use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading, validating, or saving a WAVE container.
#[derive(Debug, Error)]
pub enum WaveError {
    /// The RIFF/WAVE magic is absent; this is not a WAVE file at all.
    #[error("not a RIFF/WAVE file")]
    NotWav,

    /// The file carries the WAVE magic but its chunk structure is inconsistent.
    #[error("malformed WAVE file: {context}")]
    MalformedWav { context: &'static str },

    /// The save target already exists and overwriting was not requested.
    #[error("file already exists: {path}")]
    FileExists { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
