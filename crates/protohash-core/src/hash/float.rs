//! Canonical textual form of IEEE-754 doubles.
//!
//! The form is value-based: a 32-bit float widened to 64 bits and a 64-bit
//! float denoting exactly the same real number normalize to the same string,
//! while two doubles that print to the same decimal but differ in the last
//! mantissa bit normalize differently.

use crate::hash::error::{HashError, HashResult};

/// Upper bound on mantissa digits. A finite double always terminates well
/// below this; hitting it means the input was not a valid double.
const MAX_MANTISSA_BITS: usize = 1000;

/// Normalize a double to its canonical text.
///
/// Special values map to `NaN`, `Infinity`, `-Infinity`; zero of either
/// sign maps to `+0:`. Every other finite value becomes
/// `sign || decimal(exponent) || ':' || mantissa`, where the mantissa is
/// the binary expansion of the fraction scaled into `(0.5, 1]`.
pub(crate) fn normalize_float(value: f64) -> HashResult<String> {
    if value.is_nan() {
        return Ok("NaN".to_string());
    }
    if value == f64::INFINITY {
        return Ok("Infinity".to_string());
    }
    if value == f64::NEG_INFINITY {
        return Ok("-Infinity".to_string());
    }
    if value == 0.0 {
        // Covers -0.0 as well.
        return Ok("+0:".to_string());
    }

    let mut out = String::new();
    let mut f = value;
    if f < 0.0 {
        out.push('-');
        f = -f;
    } else {
        out.push('+');
    }

    // Scale the fraction into (0.5, 1]. Halving and doubling are exact in
    // binary floating point, so no precision is lost here.
    let mut exponent: i32 = 0;
    while f > 1.0 {
        f /= 2.0;
        exponent += 1;
    }
    while f <= 0.5 {
        f *= 2.0;
        exponent -= 1;
    }
    out.push_str(&exponent.to_string());
    out.push(':');

    if f > 1.0 || f <= 0.5 {
        return Err(HashError::FloatOutOfRange(value));
    }

    // Binary expansion. The first digit carries weight 2^0, so it is `1`
    // only for the exact value 1.0.
    let mut bits = 0;
    while f != 0.0 {
        if f >= 1.0 {
            out.push('1');
            f -= 1.0;
        } else {
            out.push('0');
        }
        bits += 1;
        if bits > MAX_MANTISSA_BITS {
            return Err(HashError::FloatOutOfRange(value));
        }
        f *= 2.0;
    }

    Ok(out)
}
