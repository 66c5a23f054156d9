use core::fmt;

use super::{Document, NodeKind};
use indextree::NodeId;

use serde_json::{Value, json};

const INDENT: &str = "  ";

fn write_indent(out: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str(INDENT)?;
    }
    Ok(())
}

fn write_block(
    doc: &Document,
    out: &mut fmt::Formatter<'_>,
    id: NodeId,
    depth: usize,
) -> fmt::Result {
    out.write_str(" {\n")?;
    for child in id.children(&doc.arena) {
        write_node(doc, out, child, depth + 1)?;
    }
    write_indent(out, depth)?;
    out.write_str("}\n")
}

fn write_node(
    doc: &Document,
    out: &mut fmt::Formatter<'_>,
    id: NodeId,
    depth: usize,
) -> fmt::Result {
    let Some(node) = doc.arena.get(id) else {
        return Ok(());
    };
    match &node.get().kind {
        NodeKind::Root => {
            for child in id.children(&doc.arena) {
                write_node(doc, out, child, depth)?;
            }
            Ok(())
        }
        NodeKind::Rule { selector } => {
            write_indent(out, depth)?;
            out.write_str(selector)?;
            write_block(doc, out, id, depth)
        }
        NodeKind::AtRule {
            name,
            params,
            after_name,
            has_block,
        } => {
            write_indent(out, depth)?;
            write!(out, "@{name}")?;
            if !params.is_empty() {
                write!(out, "{after_name}{params}")?;
            }
            if *has_block {
                write_block(doc, out, id, depth)
            } else {
                out.write_str(";\n")
            }
        }
        NodeKind::Declaration {
            prop,
            value,
            important,
        } => {
            write_indent(out, depth)?;
            write!(out, "{prop}: {value}")?;
            if *important {
                out.write_str(" !important")?;
            }
            out.write_str(";\n")
        }
        NodeKind::Comment { text } => {
            write_indent(out, depth)?;
            writeln!(out, "/*{text}*/")
        }
    }
}

fn node_to_json(doc: &Document, id: NodeId) -> Value {
    let Some(node) = doc.arena.get(id) else {
        return Value::Null;
    };
    let children: Vec<Value> = id
        .children(&doc.arena)
        .map(|child| node_to_json(doc, child))
        .collect();
    match &node.get().kind {
        NodeKind::Root => json!({ "type": "root", "children": children }),
        NodeKind::Rule { selector } => json!({
            "type": "rule",
            "selector": selector,
            "line": node.get().line,
            "children": children,
        }),
        NodeKind::AtRule {
            name,
            params,
            has_block,
            ..
        } => json!({
            "type": "atrule",
            "name": name,
            "params": params,
            "line": node.get().line,
            "children": if *has_block { Value::Array(children) } else { Value::Null },
        }),
        NodeKind::Declaration {
            prop,
            value,
            important,
        } => json!({
            "type": "decl",
            "prop": prop,
            "value": value,
            "important": important,
            "line": node.get().line,
        }),
        NodeKind::Comment { text } => json!({
            "type": "comment",
            "text": text,
            "line": node.get().line,
        }),
    }
}

impl Document {
    /// JSON snapshot of the tree, useful for debugging rewrites.
    pub fn to_json(&self) -> Value {
        node_to_json(self, self.root)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(self, out, self.root, 0)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(out, "Document")?;
        fmt::Display::fmt(self, out)
    }
}
