use thiserror::Error;

/// Errors produced by the token-to-number conversions.
///
/// Each variant carries the offending token so callers can point at the
/// exact input that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("invalid note name: {0}")]
    InvalidNoteName(String),

    #[error("invalid note octave: {0}")]
    InvalidOctave(String),

    #[error("invalid note duration: {0}")]
    InvalidDuration(String),

    #[error("duration cannot be expressed in whole units: {0}")]
    NonIntegerDuration(String),

    #[error("invalid quantizer input")]
    InvalidQuantizerInput,
}
