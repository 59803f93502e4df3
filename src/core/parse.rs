//! Amplitude literal parsing.
//!
//! Accepts `a+bi`, `a-bi`, plain reals and pure imaginaries. `j` works as the
//! imaginary unit too, and one pair of surrounding parentheses is ignored.

use crate::core::errors::{ParseError, ParseFailure};
use num_complex::Complex64;
use std::str::FromStr;

/// Parses a single complex literal.
pub fn parse_complex(input: &str) -> Result<Complex64, ParseFailure> {
    let mut s = input.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        s = inner.trim();
    }
    if s.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let value = Complex64::from_str(s).map_err(|_| ParseFailure::Malformed)?;
    if !value.is_finite() {
        return Err(ParseFailure::NonFinite);
    }
    Ok(value)
}

/// Parses the four amplitude fields, failing on the first bad one.
pub fn parse_amplitudes<S: AsRef<str>>(fields: &[S; 4]) -> Result<[Complex64; 4], ParseError> {
    let mut out = [Complex64::new(0.0, 0.0); 4];
    for (index, field) in fields.iter().enumerate() {
        let raw = field.as_ref();
        out[index] = parse_complex(raw).map_err(|reason| ParseError {
            index,
            input: raw.to_string(),
            reason,
        })?;
    }
    Ok(out)
}
