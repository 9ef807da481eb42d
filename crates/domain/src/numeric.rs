//! Lenient number reading for service-provided text
//!
//! Route services mix bare numbers with unit-suffixed text ("2.5 Km",
//! "312.7"). These helpers read the leading numeric prefix and report
//! `NaN` when there is none, leaving the decision to the caller.

/// Read the leading floating-point number of `text`
///
/// Leading whitespace is skipped, an optional sign, digits with an optional
/// fraction and an optional exponent are consumed, and anything after that
/// is ignored. `Infinity` is recognized. Returns `NaN` when no number starts
/// the text.
#[must_use]
pub fn parse_leading_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if trimmed[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;
    let mut mantissa_digits = integer_digits;

    if bytes.get(end) == Some(&b'.') {
        let fraction_digits = count_digits(&bytes[end + 1..]);
        if mantissa_digits + fraction_digits > 0 {
            end += 1 + fraction_digits;
            mantissa_digits += fraction_digits;
        }
    }

    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent_end..]);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    trimmed[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
