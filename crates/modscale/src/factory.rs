//! Builders for the nodes the rewrites generate.
//!
//! Every builder returns a detached node; callers decide where it is inserted.

use css_tree::{Document, NodeId, NodeKind, TreeError};

use crate::breakpoints::Breakpoint;

pub const FONT_SIZE: &str = "font-size";
pub const ROOT_SELECTOR: &str = ":root";

/// `font-size: <value>`.
pub fn font_size_decl(doc: &mut Document, value: impl Into<String>) -> NodeId {
    doc.create(NodeKind::declaration(FONT_SIZE, value))
}

/// `--<breakpoint>: <width>`.
pub fn variable_decl(doc: &mut Document, breakpoint: &Breakpoint) -> NodeId {
    doc.create(NodeKind::declaration(
        breakpoint.custom_property(),
        breakpoint.value.clone(),
    ))
}

/// Empty style rule with the given selector.
pub fn rule_with_selector(doc: &mut Document, selector: impl Into<String>) -> NodeId {
    doc.create(NodeKind::rule(selector))
}

/// Empty `:root` rule.
pub fn root_rule(doc: &mut Document) -> NodeId {
    rule_with_selector(doc, ROOT_SELECTOR)
}

/// `@media (min-width: <min_width>) { <nested_rule> }`.
///
/// # Errors
/// Fails when `nested_rule` has been removed.
pub fn media_block(
    doc: &mut Document,
    min_width: &str,
    nested_rule: NodeId,
) -> Result<NodeId, TreeError> {
    let block = doc.create(NodeKind::at_rule("media", format!("(min-width: {min_width})")));
    doc.append_child(block, nested_rule)?;
    Ok(block)
}
