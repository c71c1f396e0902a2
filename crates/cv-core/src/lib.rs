//! Core conversions for control-voltage note sequencing
//!
//! This crate turns musical tokens into the exact numbers a fixed-point
//! sequencer needs: note names become 1V/octave CV values, duration tokens
//! become integer counts of the smallest time unit, and CV values become
//! bounded DAC codes.
//!
//! # Examples
//!
//! ```
//! use cv_core::{note_to_cv, duration_to_units, cv_to_code};
//!
//! // "C#2" and "Db2" are the same pitch
//! assert_eq!(note_to_cv("C#2").unwrap(), note_to_cv("Db2").unwrap());
//!
//! // A dotted half note at a 32nd-note resolution
//! assert_eq!(duration_to_units("2.", 32).unwrap(), 24);
//!
//! // Full-scale CV on an 8-bit DAC
//! assert_eq!(cv_to_code(5.0, 5.0, 8).unwrap(), 255);
//! ```
//!
//! # Main Components
//!
//! - **note**: note-name token to CV value (enharmonics fall out of the math)
//! - **duration**: duration token with dot modifiers to integer units
//! - **quantize**: CV value to a clamped DAC code
//! - **ConvertError**: everything that can go wrong, with the offending token

pub mod duration;
pub mod error;
pub mod note;
pub mod quantize;

pub use duration::duration_to_units;
pub use error::ConvertError;
pub use note::{note_to_cv, REST_CV, SEMITONE};
pub use quantize::cv_to_code;
