//! `font-size: <n>ms`.

use css_tree::{Document, NodeId};
use log::debug;

use super::{DeclarationRule, MatchResult, font_size_value, set_value};
use crate::breakpoints::{Breakpoints, strip_parens};
use crate::context::{self, Context};
use crate::error::{Rejection, TransformError};
use crate::scale::ms_to_rem;

/// Rewrites `ms` lengths into `rem` at the breakpoint of the enclosing context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MsUnitRule;

fn is_signed_float(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for letter in unsigned.chars() {
        match letter {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

/// The exponent of a value written as a signed number directly followed by `ms`.
///
/// `"-1.5ms"` yields `Some("-1.5")`; `"1.5 ms"`, `"ms"` or `"1.5ms bold"` yield `None`.
pub fn parse_ms_value(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    let split = trimmed.len().checked_sub(2)?;
    let number = trimmed.get(..split)?;
    let unit = trimmed.get(split..)?;
    (unit.eq_ignore_ascii_case("ms") && is_signed_float(number)).then_some(number)
}

impl DeclarationRule for MsUnitRule {
    type Found = String;

    fn matches(&self, doc: &Document, declaration: NodeId) -> MatchResult<String> {
        match font_size_value(doc, declaration).and_then(parse_ms_value) {
            Some(exponent) => MatchResult::Present(exponent.to_owned()),
            None => MatchResult::Absent,
        }
    }

    fn apply(
        &self,
        doc: &mut Document,
        declaration: NodeId,
        exponent: String,
        breakpoints: &Breakpoints,
    ) -> Result<(), Rejection> {
        let context = context::resolve(doc, declaration)?;
        let target = match &context {
            Context::Root => None,
            Context::AtRule { node, name, params } => {
                if context.responsive().is_none() {
                    return Err(Rejection::excise(
                        *node,
                        TransformError::UnsupportedContext {
                            at_rule: name.clone(),
                        },
                    ));
                }
                let Some(breakpoint) = breakpoints.find_param(params) else {
                    return Err(Rejection::excise(
                        *node,
                        TransformError::InvalidBreakpointReference {
                            param: strip_parens(params).to_owned(),
                            valid: breakpoints.display_names(),
                        },
                    ));
                };
                Some(breakpoint.name.as_str())
            }
        };
        let rem = ms_to_rem(&exponent, breakpoints, target)
            .map_err(|err| Rejection::excise(declaration, err))?;
        debug!("{exponent}ms -> {rem} ({context})");
        set_value(doc, declaration, rem)
    }
}
