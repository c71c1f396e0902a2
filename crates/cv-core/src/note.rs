use crate::error::ConvertError;

/// One semitone on a 1V/octave scale.
pub const SEMITONE: f64 = 1.0 / 12.0;

/// CV value reserved for rests (no gate).
pub const REST_CV: f64 = 0.0;

/// Semitone offset within the octave for each natural note letter.
fn letter_offset(letter: char) -> Option<f64> {
    let semitones = match letter.to_ascii_uppercase() {
        'C' => 0.0,
        'D' => 2.0,
        'E' => 4.0,
        'F' => 5.0,
        'G' => 7.0,
        'A' => 9.0,
        'B' => 11.0,
        _ => return None,
    };
    Some(semitones * SEMITONE)
}

/// Convert a note-name token like `C4` or `d#5` to a 1V/octave CV value.
///
/// The letter is case-insensitive and internal whitespace is ignored. An
/// optional `#` or `b` immediately after the letter shifts the pitch by one
/// semitone and moves where the octave digits are expected. A token starting
/// with `-` is a rest and maps to [`REST_CV`]. Anything after the octave
/// digits is ignored, so callers may pass tokens with trailing annotations.
///
/// Enharmonic spellings agree by construction: `C#4 == Db4`, `E#4 == F4`,
/// and `B#4` lands on `C5`.
pub fn note_to_cv(token: &str) -> Result<f64, ConvertError> {
    let stripped: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    let mut chars = stripped.chars();

    let first = chars
        .next()
        .ok_or_else(|| ConvertError::InvalidNoteName(token.to_string()))?;
    if first == '-' {
        return Ok(REST_CV);
    }

    let mut cv =
        letter_offset(first).ok_or_else(|| ConvertError::InvalidNoteName(stripped.clone()))?;

    let mut rest = chars.as_str();
    match rest.chars().next() {
        Some('#') => {
            cv += SEMITONE;
            rest = &rest[1..];
        }
        Some('b') | Some('B') => {
            cv -= SEMITONE;
            rest = &rest[1..];
        }
        _ => {}
    }

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ConvertError::InvalidOctave(stripped));
    }
    let octave: u32 = digits
        .parse()
        .map_err(|_| ConvertError::InvalidOctave(stripped.clone()))?;

    Ok(cv + octave as f64)
}
