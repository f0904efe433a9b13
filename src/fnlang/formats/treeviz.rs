//! Treeviz formatter for AST nodes
//!
//! One line per node, `<prefix><connector> <NodeType>: <label>`, with nesting
//! encoded as 2 columns per level. Labels are truncated to 30 characters.
//!
//! ```text
//! FunctionDef: add -> int
//! ├─ Argument: x: int
//! ├─ Argument: y: int
//! └─ Call: add/2
//!   ├─ Variable: x
//!   └─ Variable: y
//! ```

use super::registry::{FormatError, Formatter};
use crate::fnlang::ast::{FunctionDef, Node};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(def: &FunctionDef) -> String {
    let root = Node::from(def);
    let mut result = format!("{}: {}\n", root.node_type(), truncate(&root.to_string(), 30));
    append_children(&mut result, &root.children(), "");
    result
}

fn append_node(result: &mut String, node: Node<'_>, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let label = truncate(&node.to_string(), 30);

    result.push_str(&format!("{}{} {}: {}\n", prefix, connector, node.node_type(), label));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, &node.children(), &new_prefix);
}

fn append_children(result: &mut String, children: &[Node<'_>], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, *child, prefix, is_last);
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "ast-treeviz"
    }

    fn serialize(&self, def: &FunctionDef) -> Result<String, FormatError> {
        Ok(to_treeviz_str(def))
    }

    fn description(&self) -> &str {
        "One line per AST node"
    }
}
