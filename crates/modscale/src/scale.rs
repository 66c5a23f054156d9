//! Modular scale: exponent to `rem` conversion.
//!
//! The law is `rem = root / document_font_size * ratio ^ exponent`, where `root` is the
//! root font size of the breakpoint the value is resolved at. With `ratio > 1` it is
//! strictly increasing in the exponent, and for a fixed exponent it grows with `root`.
//! Results are rounded to [`REM_PRECISION`] decimal places.

use css_values_units::{format_rounded, parse_numeric};

use crate::breakpoints::{Breakpoint, Breakpoints};
use crate::error::{ConfigError, ConversionError};

/// Decimal places kept in generated `rem` and `%` values.
pub const REM_PRECISION: i32 = 4;

/// Parameters of the scale law shared by every breakpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLaw {
    ratio: f64,
    document_font_size: f64,
}

impl ScaleLaw {
    /// # Errors
    /// Rejects a ratio that is not greater than 1 and a non-positive document font size.
    pub fn new(ratio: f64, document_font_size: f64) -> Result<Self, ConfigError> {
        if !(ratio.is_finite() && ratio > 1.0) {
            return Err(ConfigError::InvalidRatio(ratio));
        }
        if !(document_font_size.is_finite() && document_font_size > 0.0) {
            return Err(ConfigError::InvalidDocumentFontSize(document_font_size));
        }
        Ok(Self {
            ratio,
            document_font_size,
        })
    }

    pub const fn ratio(self) -> f64 {
        self.ratio
    }

    pub const fn document_font_size(self) -> f64 {
        self.document_font_size
    }

    /// Unrounded size in `rem` of step `exponent` at a breakpoint with root size `root`.
    pub fn rem(self, root: f64, exponent: f64) -> f64 {
        root / self.document_font_size * self.ratio.powf(exponent)
    }
}

fn target<'a>(
    breakpoints: &'a Breakpoints,
    name: Option<&str>,
) -> Result<&'a Breakpoint, ConversionError> {
    match name {
        Some(name) => breakpoints
            .find(name)
            .ok_or_else(|| ConversionError::UnknownBreakpoint(name.to_owned())),
        None => Ok(breakpoints.base()),
    }
}

fn convert(
    raw_exponent: &str,
    breakpoints: &Breakpoints,
    name: Option<&str>,
) -> Result<String, ConversionError> {
    let exponent = parse_numeric(raw_exponent)
        .ok_or_else(|| ConversionError::NotNumeric(raw_exponent.trim().to_owned()))?;
    let breakpoint = target(breakpoints, name)?;
    let rem = breakpoints.scale().rem(breakpoint.root, exponent);
    if !rem.is_finite() {
        return Err(ConversionError::OutOfRange(raw_exponent.trim().to_owned()));
    }
    Ok(format!("{}rem", format_rounded(rem, REM_PRECISION)))
}

/// Convert the number in front of an `ms` unit into `rem`.
///
/// Resolves at the named breakpoint, or at the base breakpoint when `name` is `None`.
///
/// # Errors
/// Returns `ConversionError::NotNumeric` for a non-numeric exponent,
/// `ConversionError::UnknownBreakpoint` for a name that is not configured and
/// `ConversionError::OutOfRange` when the result overflows `f64`.
pub fn ms_to_rem(
    raw_exponent: &str,
    breakpoints: &Breakpoints,
    name: Option<&str>,
) -> Result<String, ConversionError> {
    convert(raw_exponent, breakpoints, name)
}

/// Convert the argument of `t-ms(n)` into `rem`. Same law as [`ms_to_rem`].
///
/// # Errors
/// See [`ms_to_rem`].
pub fn step_to_rem(
    raw_exponent: &str,
    breakpoints: &Breakpoints,
    name: Option<&str>,
) -> Result<String, ConversionError> {
    convert(raw_exponent, breakpoints, name)
}
