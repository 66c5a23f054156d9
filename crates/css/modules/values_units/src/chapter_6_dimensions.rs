//! CSS Values & Units Level 3 — §6 Dimensions (Lengths subset)
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>

use crate::ParseError;
use cssparser::{Parser, ParserInput, Token};

/// Supported subset of CSS <length> for breakpoint widths: px, em, rem, plus unitless zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Pixels,
    Ems,
    RootEms,
}

/// A CSS <length> value with unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    /// Pixel value of this length, resolving font-relative units against `font_size_px`.
    ///
    /// Media queries evaluate `em` against the initial font size, so `em` and `rem`
    /// resolve identically here.
    pub fn to_px(self, font_size_px: f32) -> f32 {
        match self.unit {
            LengthUnit::Pixels => self.value,
            LengthUnit::Ems | LengthUnit::RootEms => self.value * font_size_px,
        }
    }
}

/// Parse a CSS <length> (§6.2). Supports px/em/rem and unitless zero per spec.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a supported `<length>`.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    let token = input
        .next()
        .map_err(|_| ParseError::UnexpectedToken)?
        .clone();
    match token {
        Token::Dimension { value, unit, .. } => {
            let unit_kind = match unit.as_ref().to_ascii_lowercase().as_str() {
                "px" => LengthUnit::Pixels,
                "em" => LengthUnit::Ems,
                "rem" => LengthUnit::RootEms,
                _ => return Err(ParseError::UnexpectedToken),
            };
            Ok(Length {
                value,
                unit: unit_kind,
            })
        }
        Token::Number { value, .. } if value == 0.0 => Ok(Length {
            value: 0.0,
            unit: LengthUnit::Pixels,
        }),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Parse a complete string as a single `<length>`.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for non-lengths and `ParseError::TrailingInput`
/// when anything follows the length.
pub fn parse_length_str(text: &str) -> Result<Length, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let length = parse_length(&mut parser)?;
    if parser.is_exhausted() {
        Ok(length)
    } else {
        Err(ParseError::TrailingInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pixel_and_font_relative_widths() {
        assert_eq!(
            parse_length_str("768px"),
            Ok(Length {
                value: 768.0,
                unit: LengthUnit::Pixels
            })
        );
        let ems = parse_length_str("48em").unwrap();
        assert_eq!(ems.unit, LengthUnit::Ems);
        assert!((ems.to_px(16.0) - 768.0).abs() < f32::EPSILON);
    }

    #[test]
    fn accepts_unitless_zero_only() {
        assert_eq!(parse_length_str("0").map(|len| len.value), Ok(0.0));
        assert_eq!(parse_length_str("12"), Err(ParseError::UnexpectedToken));
    }

    #[test]
    fn rejects_unknown_units_and_trailing_input() {
        assert_eq!(parse_length_str("10vw"), Err(ParseError::UnexpectedToken));
        assert_eq!(parse_length_str("10px 2px"), Err(ParseError::TrailingInput));
        assert_eq!(parse_length_str("wide"), Err(ParseError::UnexpectedToken));
    }
}
