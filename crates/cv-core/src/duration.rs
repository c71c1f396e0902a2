use crate::error::ConvertError;

/// Tolerance when checking that a duration lands on a whole unit count.
const UNIT_TOLERANCE: f64 = 1e-4;

/// Convert a duration token to an integer count of time units.
///
/// `resolution` is the number of units in a whole note, so with a resolution
/// of 32 (32nd-note units) a whole note `"1"` is 32 units, a half note `"2"`
/// is 16 and a dotted half `"2."` is 24. Each dot adds half of the previous
/// increment: `"2.."` at resolution 32 is 16 + 8 + 4 = 28.
///
/// Divisions that do not land on a whole unit count are rejected, which is
/// how unsupported tuplets (a triplet against a binary resolution, say) fail.
pub fn duration_to_units(token: &str, resolution: u32) -> Result<u32, ConvertError> {
    let digits_end = token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    let (digits, dots) = token.split_at(digits_end);

    let divisor: u32 = digits
        .parse()
        .map_err(|_| ConvertError::InvalidDuration(token.to_string()))?;
    if divisor == 0 || dots.chars().any(|c| c != '.') {
        return Err(ConvertError::InvalidDuration(token.to_string()));
    }

    let mut units = resolution as f64 / divisor as f64;
    let mut increment = units / 2.0;
    for _ in dots.chars() {
        units += increment;
        increment /= 2.0;
    }

    if (units - units.round()).abs() > UNIT_TOLERANCE {
        return Err(ConvertError::NonIntegerDuration(token.to_string()));
    }
    Ok(units.round() as u32)
}
