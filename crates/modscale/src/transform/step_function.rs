//! `font-size: t-ms(<n>)`.

use css_tree::{Document, NodeId, NodeKind, TreeError};
use css_values_units::is_numeric;
use log::debug;

use super::{DeclarationRule, MatchResult, font_size_value, set_value};
use crate::breakpoints::Breakpoints;
use crate::error::{Rejection, TransformError};
use crate::factory;
use crate::scale::step_to_rem;

const STEP_FUNCTION: &str = "t-ms(";

/// Expands a scale step into a mobile-first value plus one media block per breakpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepFunctionRule;

/// The raw argument of the first `t-ms(...)` call in `value`, trimmed.
///
/// An unterminated call yields everything after the opening parenthesis.
pub fn extract_step_argument(value: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets, so the index is valid in `value` too.
    let start = value.to_ascii_lowercase().find(STEP_FUNCTION)?;
    let after_open = value.get(start + STEP_FUNCTION.len()..)?;
    let argument = after_open
        .split_once(')')
        .map_or(after_open, |(inside, _)| inside);
    Some(argument.trim())
}

impl DeclarationRule for StepFunctionRule {
    type Found = String;

    fn matches(&self, doc: &Document, declaration: NodeId) -> MatchResult<String> {
        let Some(argument) = font_size_value(doc, declaration).and_then(extract_step_argument)
        else {
            return MatchResult::Absent;
        };
        if is_numeric(argument) {
            return MatchResult::Present(argument.to_owned());
        }
        let error = TransformError::InvalidScaleArgument {
            argument: argument.to_owned(),
        };
        // The whole rule goes: a half-rewritten selector would be worse than none.
        MatchResult::Invalid(match doc.parent(declaration) {
            Some(rule) => Rejection::excise(rule, error),
            None => Rejection {
                excise: None,
                error,
            },
        })
    }

    fn apply(
        &self,
        doc: &mut Document,
        declaration: NodeId,
        exponent: String,
        breakpoints: &Breakpoints,
    ) -> Result<(), Rejection> {
        let parent = doc
            .parent(declaration)
            .ok_or(TreeError::NoParent(declaration))?;
        let selector = match doc.kind(parent)? {
            NodeKind::Rule { selector } => selector.clone(),
            NodeKind::AtRule { name, .. } => {
                return Err(Rejection::excise(
                    parent,
                    TransformError::StepOutsideRule {
                        context: format!("@{name}"),
                    },
                ));
            }
            NodeKind::Root | NodeKind::Declaration { .. } | NodeKind::Comment { .. } => {
                return Err(Rejection {
                    excise: None,
                    error: TransformError::StepOutsideRule {
                        context: "the stylesheet root".to_owned(),
                    },
                });
            }
        };

        // All values are computed before the tree is touched.
        let convert = |name: Option<&str>| {
            step_to_rem(&exponent, breakpoints, name).map_err(|err| Rejection::excise(parent, err))
        };
        let base = convert(None)?;
        let responsive = breakpoints
            .responsive()
            .map(|breakpoint| {
                convert(Some(breakpoint.name.as_str())).map(|rem| (breakpoint, rem))
            })
            .collect::<Result<Vec<_>, Rejection>>()?;

        // Inserting right after the rule in descending order leaves the blocks ascending.
        for (breakpoint, rem) in responsive.into_iter().rev() {
            debug!("t-ms({exponent}) -> {rem} at {} for {selector}", breakpoint.value);
            let rule = factory::rule_with_selector(doc, selector.clone());
            let font_size = factory::font_size_decl(doc, rem);
            doc.append_child(rule, font_size)?;
            let block = factory::media_block(doc, &breakpoint.value, rule)?;
            doc.insert_after(parent, block)?;
        }

        debug!("t-ms({exponent}) -> {base} for {selector}");
        set_value(doc, declaration, base)
    }
}
