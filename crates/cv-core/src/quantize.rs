use crate::error::ConvertError;

/// Quantize a CV value to the integer code a DAC should be fed.
///
/// `vref` is the DAC's full-scale voltage and `bits` its resolution, so the
/// result always lies in `0..=2^bits - 1`. Out-of-range values saturate to
/// the nearest endpoint instead of failing: on hardware, pinning the output
/// beats refusing to drive it. Non-finite inputs are still rejected, as are
/// a non-positive reference voltage and a bit resolution outside `1..=32`
/// (no DAC code wider than the return type exists).
pub fn cv_to_code(cv: f64, vref: f64, bits: u32) -> Result<u32, ConvertError> {
    if !cv.is_finite() || !vref.is_finite() || vref <= 0.0 || bits == 0 || bits > 32 {
        return Err(ConvertError::InvalidQuantizerInput);
    }
    let max = (1u64 << bits) as f64;
    let code = (cv / vref * max).clamp(0.0, max - 1.0).round();
    Ok(code as u32)
}
