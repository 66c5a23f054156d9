//! Mutable stylesheet object model.
//!
//! A parsed stylesheet is held in an [`indextree::Arena`]; nodes are addressed by
//! [`NodeId`] handles and carry their parent and ordered children inside the arena,
//! so rewrites splice handles instead of juggling parent pointers.

#![forbid(unsafe_code)]

mod printing;

use indextree::{Arena, NodeError};
use thiserror::Error;

pub use indextree::NodeId;

/// Kind of a stylesheet node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// The stylesheet itself. There is exactly one per document.
    Root,
    /// A style rule (`selector { ... }`).
    Rule { selector: String },
    /// An at-rule (`@name params { ... }` or `@name params;`).
    AtRule {
        /// Lowercased at-keyword without the leading `@`.
        name: String,
        /// Raw prelude text, trimmed.
        params: String,
        /// Whitespace authored between the name and `params`, printed verbatim.
        after_name: String,
        /// Whether the at-rule owns a `{}` block.
        has_block: bool,
    },
    /// A `prop: value` declaration.
    Declaration {
        /// Lowercased property name.
        prop: String,
        /// Raw value text (without trailing `!important`).
        value: String,
        important: bool,
    },
    /// A `/* ... */` comment; `text` excludes the delimiters.
    Comment { text: String },
}

impl NodeKind {
    /// Style rule with the given selector.
    pub fn rule(selector: impl Into<String>) -> Self {
        Self::Rule {
            selector: selector.into(),
        }
    }

    /// At-rule that owns a block, with a single space before its prelude.
    pub fn at_rule(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self::AtRule {
            name: name.into(),
            params: params.into(),
            after_name: " ".to_owned(),
            has_block: true,
        }
    }

    /// Plain (non-important) declaration.
    pub fn declaration(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Declaration {
            prop: prop.into(),
            value: value.into(),
            important: false,
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    pub const fn is_declaration(&self) -> bool {
        matches!(self, Self::Declaration { .. })
    }
}

/// A node stored in the document arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssNode {
    pub kind: NodeKind,
    /// 1-based source line, if the node came from parsed text.
    pub line: Option<u32>,
}

/// Errors raised by tree mutation primitives.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("node {0:?} has been removed from the document")]
    Removed(NodeId),
    #[error("node {0:?} has no parent")]
    NoParent(NodeId),
    #[error("the document root cannot be removed or replaced")]
    RootNode,
    #[error("invalid tree operation: {0}")]
    Structure(#[from] NodeError),
}

/// A stylesheet document.
pub struct Document {
    arena: Arena<CssNode>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document holding only the root node.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(CssNode {
            kind: NodeKind::Root,
            line: None,
        });
        Self { arena, root }
    }

    #[inline]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Allocate a detached node. It becomes part of the document once inserted.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        self.create_at(kind, None)
    }

    /// Allocate a detached node with a source line.
    pub fn create_at(&mut self, kind: NodeKind, line: Option<u32>) -> NodeId {
        self.arena.new_node(CssNode { kind, line })
    }

    /// Look up a live node.
    ///
    /// # Errors
    /// Returns `TreeError::Removed` when the handle refers to a removed node.
    pub fn node(&self, id: NodeId) -> Result<&CssNode, TreeError> {
        if id.is_removed(&self.arena) {
            return Err(TreeError::Removed(id));
        }
        self.arena
            .get(id)
            .map(indextree::Node::get)
            .ok_or(TreeError::Removed(id))
    }

    /// # Errors
    /// Returns `TreeError::Removed` when the handle refers to a removed node.
    pub fn kind(&self, id: NodeId) -> Result<&NodeKind, TreeError> {
        self.node(id).map(|node| &node.kind)
    }

    /// # Errors
    /// Returns `TreeError::Removed` when the handle refers to a removed node.
    pub fn kind_mut(&mut self, id: NodeId) -> Result<&mut NodeKind, TreeError> {
        if id.is_removed(&self.arena) {
            return Err(TreeError::Removed(id));
        }
        self.arena
            .get_mut(id)
            .map(|node| &mut node.get_mut().kind)
            .ok_or(TreeError::Removed(id))
    }

    /// Source line of a node, if known.
    pub fn line(&self, id: NodeId) -> Option<u32> {
        self.node(id).ok().and_then(|node| node.line)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        if id.is_removed(&self.arena) {
            return None;
        }
        self.arena.get(id).and_then(indextree::Node::parent)
    }

    /// Children of `id` in document order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        if id.is_removed(&self.arena) {
            return Vec::new();
        }
        id.children(&self.arena).collect()
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        if id.is_removed(&self.arena) {
            return Vec::new();
        }
        id.ancestors(&self.arena).skip(1).collect()
    }

    /// Whether `id` is still reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        !id.is_removed(&self.arena) && id.ancestors(&self.arena).last() == Some(self.root)
    }

    /// Snapshot of every declaration handle in document order.
    pub fn declarations(&self) -> Vec<NodeId> {
        self.root
            .descendants(&self.arena)
            .filter(|id| {
                self.arena
                    .get(*id)
                    .is_some_and(|node| node.get().kind.is_declaration())
            })
            .collect()
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    /// Fails when either handle is removed or the append would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.ensure_live(parent)?;
        self.ensure_live(child)?;
        parent.checked_append(child, &mut self.arena)?;
        Ok(())
    }

    /// Insert `new_node` as the previous sibling of `anchor`.
    ///
    /// # Errors
    /// Fails when a handle is removed or `anchor` has no parent.
    pub fn insert_before(&mut self, anchor: NodeId, new_node: NodeId) -> Result<(), TreeError> {
        self.ensure_sibling_anchor(anchor)?;
        self.ensure_live(new_node)?;
        anchor.checked_insert_before(new_node, &mut self.arena)?;
        Ok(())
    }

    /// Insert `new_node` as the next sibling of `anchor`.
    ///
    /// # Errors
    /// Fails when a handle is removed or `anchor` has no parent.
    pub fn insert_after(&mut self, anchor: NodeId, new_node: NodeId) -> Result<(), TreeError> {
        self.ensure_sibling_anchor(anchor)?;
        self.ensure_live(new_node)?;
        anchor.checked_insert_after(new_node, &mut self.arena)?;
        Ok(())
    }

    /// Remove `id` together with its whole subtree.
    ///
    /// # Errors
    /// Fails for the document root or an already removed node.
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        if id == self.root {
            return Err(TreeError::RootNode);
        }
        self.ensure_live(id)?;
        id.remove_subtree(&mut self.arena);
        Ok(())
    }

    /// Put `new_node` where `old` was and remove `old` with its subtree.
    ///
    /// # Errors
    /// Fails for the document root, removed handles or a parentless `old`.
    pub fn replace_with(&mut self, old: NodeId, new_node: NodeId) -> Result<(), TreeError> {
        if old == self.root {
            return Err(TreeError::RootNode);
        }
        self.insert_before(old, new_node)?;
        old.remove_subtree(&mut self.arena);
        Ok(())
    }

    /// Create a node and append it to `parent` in one step.
    ///
    /// # Errors
    /// Fails when `parent` has been removed.
    pub fn append_new(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, TreeError> {
        let child = self.create(kind);
        self.append_child(parent, child)?;
        Ok(child)
    }

    fn ensure_live(&self, id: NodeId) -> Result<(), TreeError> {
        if id.is_removed(&self.arena) {
            Err(TreeError::Removed(id))
        } else {
            Ok(())
        }
    }

    fn ensure_sibling_anchor(&self, anchor: NodeId) -> Result<(), TreeError> {
        self.ensure_live(anchor)?;
        if self.parent(anchor).is_none() {
            return Err(TreeError::NoParent(anchor));
        }
        Ok(())
    }
}
