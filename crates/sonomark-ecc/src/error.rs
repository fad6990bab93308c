use thiserror::Error;

/// Errors from channel encoding and decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EccError {
    /// A block carries more errors than the code can correct.
    #[error("uncorrectable codeword in block {block}")]
    UncorrectableCodeword { block: usize },

    /// The redundancy parameter does not describe a valid code geometry.
    #[error("invalid error-correction parameter: {context}")]
    InvalidParameter { context: &'static str },

    /// The coded stream is shorter than its own framing requires.
    #[error("truncated code stream: {context}")]
    Truncated { context: &'static str },
}
