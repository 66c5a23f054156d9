//! Finding the context a declaration is resolved in.

use core::fmt;

use css_tree::{Document, NodeId, NodeKind, TreeError};

/// The responsive at-rules that scope a declaration to one breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponsiveKind {
    Above,
    Below,
    Only,
}

impl ResponsiveKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "t-above" => Some(Self::Above),
            "t-below" => Some(Self::Below),
            "t-only" => Some(Self::Only),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Above => "t-above",
            Self::Below => "t-below",
            Self::Only => "t-only",
        }
    }
}

/// Nearest enclosing at-rule of a declaration, or the document root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Context {
    Root,
    AtRule {
        node: NodeId,
        name: String,
        params: String,
    },
}

impl Context {
    /// The responsive at-rule kind, if this context is one.
    pub fn responsive(&self) -> Option<ResponsiveKind> {
        match self {
            Self::Root => None,
            Self::AtRule { name, .. } => ResponsiveKind::from_name(name),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => out.write_str("root"),
            Self::AtRule { name, params, .. } => write!(out, "@{name} {params}"),
        }
    }
}

/// Walk up from `declaration` to the first at-rule, skipping style rules on the way.
///
/// # Errors
/// Returns a `TreeError` when the declaration is removed or detached from the document.
pub fn resolve(doc: &Document, declaration: NodeId) -> Result<Context, TreeError> {
    let mut current = doc
        .parent(declaration)
        .ok_or(TreeError::NoParent(declaration))?;
    loop {
        match doc.kind(current)? {
            NodeKind::Root => return Ok(Context::Root),
            NodeKind::AtRule { name, params, .. } => {
                return Ok(Context::AtRule {
                    node: current,
                    name: name.clone(),
                    params: params.clone(),
                });
            }
            NodeKind::Rule { .. } | NodeKind::Declaration { .. } | NodeKind::Comment { .. } => {
                current = doc.parent(current).ok_or(TreeError::NoParent(current))?;
            }
        }
    }
}
