use serde::Serialize;

/// CVs closer than this are considered the same pitch. Legato between equal
/// pitches merges durations instead of emitting a new note.
pub const CV_EPSILON: f64 = 1e-6;

/// One retained note of a parsed pattern.
///
/// `name` is the note-name part of the first token that produced the note;
/// when tied repeats of a pitch collapse into one longer note, the first
/// spelling wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    /// 1V/octave CV value, 0.0 for a rest.
    pub cv: f64,
    /// Length in time units at the pattern's resolution.
    pub duration: u32,
    /// True when this note glides into the next one.
    pub slide: bool,
    /// Display name, e.g. `C3` or `-`.
    pub name: String,
}

/// A fully parsed pattern: an ordered note sequence plus an optional grace
/// note attached to the pattern start.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub notes: Vec<Note>,
    /// CV of the acciaccatura played into the first note, if any.
    pub acciaccatura: Option<f64>,
}

impl Pattern {
    /// Total length of the pattern in time units.
    pub fn total_units(&self) -> u32 {
        self.notes.iter().map(|n| n.duration).sum()
    }
}
