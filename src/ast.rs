//! Abstract syntax tree produced by the Lispy parser.
//!
//! Nodes are labelled with the grammar rule(s) that produced them rather than
//! being typed per rule. A node that merely wraps a single child covering the
//! same text is collapsed into that child, with both labels kept in its tag
//! (`expr|number`).
//!
//! ## Shape
//!
//! - A bare number: tag contains `number`, no children.
//! - A parenthesized expression: `(`, operator, one or more operands, `)`.
//! - The root (`lispy`): operator followed by one or more operands.
//!
//! Trees are owned, acyclic and never mutated after construction.

use std::fmt;

use serde::Serialize;

/// Separator between rule names inside a collapsed tag.
const TAG_SEPARATOR: char = '|';

// ============================================================================
// TAG
// ============================================================================

/// Label naming the grammar rule(s) that produced a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Joins an outer rule label onto the tag of the node it wraps.
    pub fn nested(outer: &Tag, inner: &Tag) -> Self {
        Self(format!("{}{}{}", outer.0, TAG_SEPARATOR, inner.0))
    }

    /// Returns true if `rule` is one of the labels in this tag.
    pub fn is(&self, rule: &str) -> bool {
        self.0.split(TAG_SEPARATOR).any(|label| label == rule)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

// ============================================================================
// POSITION
// ============================================================================

/// Where a node starts in the input line. `row` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub offset: usize,
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, row: usize, column: usize) -> Self {
        Self {
            offset,
            row,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

// ============================================================================
// NODE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AstNode {
    pub tag: Tag,
    /// Exact text matched by this node.
    pub contents: String,
    pub position: Position,
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// Builds a node with no children.
    pub fn leaf(tag: impl Into<Tag>, contents: impl Into<String>, position: Position) -> Self {
        Self {
            tag: tag.into(),
            contents: contents.into(),
            position,
            children: Vec::new(),
        }
    }

    /// Builds an inner node. Its contents are the children's contents joined
    /// by single spaces, which is what the parser would have matched for
    /// normalized input.
    pub fn branch(tag: impl Into<Tag>, position: Position, children: Vec<AstNode>) -> Self {
        let contents = children
            .iter()
            .map(|c| c.contents.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            tag: tag.into(),
            contents,
            position,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstNode::node_count).sum::<usize>()
    }

    /// Visits every node depth-first, parents before children, passing the
    /// depth of each node (the receiver is depth 0).
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&AstNode, usize),
    {
        self.walk_at(visit, 0);
    }

    fn walk_at<F>(&self, visit: &mut F, depth: usize)
    where
        F: FnMut(&AstNode, usize),
    {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(visit, depth + 1);
        }
    }

    /// Renders the tree one node per line, indented by depth.
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |node, depth| {
            out.push_str(&"  ".repeat(depth));
            out.push_str(&format!(
                "{} '{}' @{} offset={} children={}\n",
                node.tag,
                node.contents,
                node.position,
                node.position.offset,
                node.children.len()
            ));
        });
        out
    }
}
