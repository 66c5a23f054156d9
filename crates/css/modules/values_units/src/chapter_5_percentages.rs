//! CSS Values & Units Level 3 — §5 Percentages
//! Spec: <https://www.w3.org/TR/css-values-3/#percentages>

use crate::chapter_4_numbers::format_rounded;

/// Express `size` as a percentage of `reference`, rounded to `precision` places.
///
/// Returns the bare number (no `%` sign), e.g. `percentage(24.0, 16.0, 4) == "150"`.
pub fn percentage(size: f64, reference: f64, precision: i32) -> String {
    format_rounded(size / reference * 100.0, precision)
}
