//! The page base size: `:root { font-size: ... }`.

use css_tree::{Document, NodeId, NodeKind, TreeError};
use css_values_units::percentage;
use log::debug;

use super::{
    DeclarationRule, MatchResult, extract_step_argument, font_size_value, parse_ms_value,
};
use crate::breakpoints::Breakpoints;
use crate::error::Rejection;
use crate::factory::{self, ROOT_SELECTOR};
use crate::scale::{REM_PRECISION, ScaleLaw};

/// Turns the root font size into per-breakpoint percentages and custom properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RootSizeRule;

fn is_root_selector(selector: &str) -> bool {
    selector.trim().eq_ignore_ascii_case(ROOT_SELECTOR)
}

fn is_root_rule(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::Rule { selector } if is_root_selector(selector))
}

fn root_percentage(root: f64, law: ScaleLaw) -> String {
    format!(
        "{}%",
        percentage(root, law.document_font_size(), REM_PRECISION)
    )
}

impl DeclarationRule for RootSizeRule {
    type Found = ();

    /// Plain `font-size` declarations whose nearest enclosing style rule is `:root`.
    fn matches(&self, doc: &Document, declaration: NodeId) -> MatchResult<()> {
        let Some(value) = font_size_value(doc, declaration) else {
            return MatchResult::Absent;
        };
        if parse_ms_value(value).is_some() || extract_step_argument(value).is_some() {
            return MatchResult::Absent;
        }
        let nearest_rule = doc
            .ancestors(declaration)
            .into_iter()
            .filter_map(|id| doc.kind(id).ok())
            .find(|kind| matches!(kind, NodeKind::Rule { .. }));
        match nearest_rule {
            Some(kind) if is_root_rule(kind) => MatchResult::Present(()),
            _ => MatchResult::Absent,
        }
    }

    fn apply(
        &self,
        doc: &mut Document,
        declaration: NodeId,
        (): (),
        breakpoints: &Breakpoints,
    ) -> Result<(), Rejection> {
        let parent = doc
            .parent(declaration)
            .ok_or(TreeError::NoParent(declaration))?;
        if !is_root_rule(doc.kind(parent)?) {
            debug!("dropping root font-size nested below {ROOT_SELECTOR}");
            doc.remove(declaration)?;
            return Ok(());
        }

        let law = breakpoints.scale();
        for breakpoint in breakpoints.responsive().rev() {
            let rule = factory::root_rule(doc);
            let variable = factory::variable_decl(doc, breakpoint);
            doc.append_child(rule, variable)?;
            let size = factory::font_size_decl(doc, root_percentage(breakpoint.root, law));
            doc.append_child(rule, size)?;
            let block = factory::media_block(doc, &breakpoint.value, rule)?;
            doc.insert_after(parent, block)?;
        }

        for breakpoint in breakpoints.responsive() {
            let variable = factory::variable_decl(doc, breakpoint);
            doc.insert_before(declaration, variable)?;
        }

        let base = root_percentage(breakpoints.base().root, law);
        debug!("{ROOT_SELECTOR} font-size -> {base}");
        let replacement = factory::font_size_decl(doc, base);
        doc.replace_with(declaration, replacement)?;
        Ok(())
    }
}
