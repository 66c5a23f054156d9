//! Declaration rewrites.
//!
//! Each rewrite is a [`DeclarationRule`]: a read-only `matches` predicate followed by an
//! `apply` step that mutates the tree. The set of rules is closed ([`Transform`]) and
//! tried in a fixed order; the first rule that does not answer `Absent` owns the
//! declaration.

mod ms_unit;
mod root_size;
mod step_function;

use css_tree::{Document, NodeId, NodeKind};

use crate::breakpoints::Breakpoints;
use crate::error::Rejection;
use crate::factory::FONT_SIZE;

pub use ms_unit::{MsUnitRule, parse_ms_value};
pub use root_size::RootSizeRule;
pub use step_function::{StepFunctionRule, extract_step_argument};

/// Answer of a rule's predicate.
#[derive(Debug)]
pub enum MatchResult<T> {
    /// The declaration is not written in this rule's syntax.
    Absent,
    /// The declaration is this rule's syntax; `T` carries what `apply` needs.
    Present(T),
    /// The declaration is this rule's syntax but malformed. No other rule is tried.
    Invalid(Rejection),
}

/// Shared capability of every rewrite.
pub trait DeclarationRule {
    /// What a successful match hands to `apply`.
    type Found;

    fn matches(&self, doc: &Document, declaration: NodeId) -> MatchResult<Self::Found>;

    /// Rewrite `declaration` in place.
    ///
    /// # Errors
    /// Returns a `Rejection` naming the subtree to remove when the declaration cannot be
    /// rewritten in its context.
    fn apply(
        &self,
        doc: &mut Document,
        declaration: NodeId,
        found: Self::Found,
        breakpoints: &Breakpoints,
    ) -> Result<(), Rejection>;
}

/// Result of offering one declaration to one rule.
#[derive(Debug)]
pub enum Outcome {
    NotApplicable,
    Applied,
    Rejected(Rejection),
}

fn run_rule<R: DeclarationRule>(
    rule: &R,
    doc: &mut Document,
    declaration: NodeId,
    breakpoints: &Breakpoints,
) -> Outcome {
    match rule.matches(doc, declaration) {
        MatchResult::Absent => Outcome::NotApplicable,
        MatchResult::Invalid(rejection) => Outcome::Rejected(rejection),
        MatchResult::Present(found) => match rule.apply(doc, declaration, found, breakpoints) {
            Ok(()) => Outcome::Applied,
            Err(rejection) => Outcome::Rejected(rejection),
        },
    }
}

/// The closed set of rewrites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transform {
    MsUnit(MsUnitRule),
    StepFunction(StepFunctionRule),
    RootSize(RootSizeRule),
}

impl Transform {
    /// Every rewrite, in the order they are offered a declaration.
    pub const ALL: [Self; 3] = [
        Self::MsUnit(MsUnitRule),
        Self::StepFunction(StepFunctionRule),
        Self::RootSize(RootSizeRule),
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::MsUnit(_) => "ms-unit",
            Self::StepFunction(_) => "t-ms step",
            Self::RootSize(_) => "root size",
        }
    }

    pub fn run(self, doc: &mut Document, declaration: NodeId, breakpoints: &Breakpoints) -> Outcome {
        match self {
            Self::MsUnit(rule) => run_rule(&rule, doc, declaration, breakpoints),
            Self::StepFunction(rule) => run_rule(&rule, doc, declaration, breakpoints),
            Self::RootSize(rule) => run_rule(&rule, doc, declaration, breakpoints),
        }
    }
}

/// Value of a `font-size` declaration, or `None` for any other node.
pub(crate) fn font_size_value(doc: &Document, declaration: NodeId) -> Option<&str> {
    match doc.kind(declaration).ok()? {
        NodeKind::Declaration { prop, value, .. } if prop.eq_ignore_ascii_case(FONT_SIZE) => {
            Some(value.as_str())
        }
        _ => None,
    }
}

/// Overwrite the value of a declaration node.
pub(crate) fn set_value(
    doc: &mut Document,
    declaration: NodeId,
    new_value: String,
) -> Result<(), Rejection> {
    if let NodeKind::Declaration { value, .. } = doc.kind_mut(declaration)? {
        *value = new_value;
    }
    Ok(())
}
