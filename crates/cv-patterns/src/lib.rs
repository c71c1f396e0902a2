//! Note-pattern compiler for a fixed-point CV sequencer
//!
//! This crate parses a compact textual notation for monophonic note patterns
//! and compiles it into the integer tables a DAC-driven sequencer consumes:
//! quantized control voltages, duration unit counts and bit-packed slide
//! flags.
//!
//! # Examples
//!
//! ```
//! use cv_patterns::parse_pattern;
//!
//! // Two tied half notes of the same pitch merge into one whole note
//! let pattern = parse_pattern("C3/2~C3/2", 32).unwrap();
//! assert_eq!(pattern.notes.len(), 1);
//! assert_eq!(pattern.notes[0].duration, 32);
//! ```
//!
//! # Notation
//!
//! - Notes: `name/duration` tokens separated by whitespace, e.g. `C3/4`
//! - Rests: `-/4`
//! - Dotted durations: `C3/2.`
//! - Legato tie: trailing `~`; equal pitches merge, differing pitches slide
//! - Acciaccatura: parenthesized note at the pattern start, e.g. `(C2)C3/4`
//!
//! # Main Components
//!
//! - [`parse_pattern`]: pattern string to a [`Pattern`]
//! - [`VoltageTable`]: deduplicated DAC codes across patterns
//! - [`HeaderEmitter`]: the `patterns.h` firmware artifact
//! - [`Report`]: summary statistics for a compiled set

pub mod emit;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pattern;
pub mod report;
pub mod span;
pub mod table;

#[cfg(test)]
mod parser_tests;

pub use emit::HeaderEmitter;
pub use error::{ParseError, Result};
pub use lexer::{Lexer, Token};
pub use parser::{parse_pattern, Parser};
pub use pattern::{Note, Pattern, CV_EPSILON};
pub use report::Report;
pub use span::Span;
pub use table::VoltageTable;
