//! CSS Values and Units Module Level 3 — the numeric subset used by scale rewrites.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

// Per-chapter modules mirroring the spec table of contents.
pub mod chapter_3_identifiers;
pub mod chapter_4_numbers;
pub mod chapter_5_percentages;
pub mod chapter_6_dimensions;

// Re-exports for ergonomic access from other crates.
pub use chapter_3_identifiers::{camelize, kebab_case};
pub use chapter_4_numbers::{format_rounded, is_numeric, parse_numeric};
pub use chapter_5_percentages::percentage;
pub use chapter_6_dimensions::{Length, LengthUnit, parse_length, parse_length_str};

/// Parse error for Values & Units parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// A complete value was read but input remained.
    TrailingInput,
}
