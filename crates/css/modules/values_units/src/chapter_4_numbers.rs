//! CSS Values & Units Level 3 — §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>

/// Parse the whole of `text` as a finite real number.
///
/// Surrounding whitespace is ignored; a leading sign and exponent are accepted.
/// `inf`/`NaN` spellings and anything with trailing characters are rejected.
pub fn parse_numeric(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Whether `text` is a finite number in its entirety.
#[inline]
pub fn is_numeric(text: &str) -> bool {
    parse_numeric(text).is_some()
}

/// Round `value` to `precision` decimal places and print it without trailing zeros.
pub fn format_rounded(value: f64, precision: i32) -> String {
    let factor = 10_f64.powi(precision);
    let rounded = (value * factor).round() / factor;
    // Normalise `-0` so tiny negative results do not print a sign.
    let normalised = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{normalised}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_accepts_signed_and_fractional() {
        assert!(is_numeric("3"));
        assert!(is_numeric("-1.5"));
        assert!(is_numeric("+.25"));
        assert!(is_numeric(" 2 "));
        assert_eq!(parse_numeric("1e2"), Some(100.0));
    }

    #[test]
    fn numeric_rejects_garbage() {
        assert!(!is_numeric("abc"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("3px"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("NaN"));
    }

    #[test]
    fn rounding_trims_trailing_zeros() {
        assert_eq!(format_rounded(1.0, 4), "1");
        assert_eq!(format_rounded(1.2, 4), "1.2");
        assert_eq!(format_rounded(8.916_100_448_256, 4), "8.9161");
        assert_eq!(format_rounded(-0.000_01, 4), "0");
    }
}
