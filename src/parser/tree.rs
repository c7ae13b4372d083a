// Concrete parse tree produced by the parser

use std::fmt;

/// Labels of the non-terminal nodes the parser builds.
pub mod labels {
    pub const CODE: &str = "CODE";
    pub const VDECL: &str = "VDECL";
    pub const ASSIGN: &str = "ASSIGN";
    pub const EXPR: &str = "EXPR";
    pub const TERM: &str = "TERM";
    pub const FACTOR: &str = "FACTOR";
    pub const COND: &str = "COND";
    pub const IFSTMT: &str = "IFSTMT";
    pub const WHILESTMT: &str = "WHILESTMT";
    pub const BLOCK: &str = "BLOCK";
    pub const CDECL: &str = "CDECL";
    pub const ODECL: &str = "ODECL";
    pub const FDECL: &str = "FDECL";
    pub const ARGS: &str = "ARGS";
    pub const RETURN: &str = "RETURN";
    pub const RHS: &str = "RHS";
}

/// A node of the parse tree: a label plus its owned children, in the order
/// the grammar consumed them.
///
/// Non-terminals are labeled with the rule name, terminal leaves with the
/// matched lexeme. An omitted optional production leaves no child behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTreeNode {
    label: String,
    children: Vec<ParseTreeNode>,
}

impl ParseTreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<ParseTreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn push(&mut self, child: ParseTreeNode) {
        self.children.push(child);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[ParseTreeNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ParseTreeNode::node_count).sum::<usize>()
    }

    /// Height of the subtree; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ParseTreeNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Pre-order traversal yielding `(depth, node)`, root at depth 0.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![(0, self)],
        }
    }

    /// Compact single-line rendering: `(LABEL child ...)` for inner nodes,
    /// the bare label for leaves.
    pub fn sexpr(&self) -> String {
        let mut out = String::new();
        self.write_sexpr(&mut out);
        out
    }

    fn write_sexpr(&self, out: &mut String) {
        if self.is_leaf() {
            out.push_str(&self.label);
            return;
        }
        out.push('(');
        out.push_str(&self.label);
        for child in &self.children {
            out.push(' ');
            child.write_sexpr(out);
        }
        out.push(')');
    }
}

/// Iterator returned by [`ParseTreeNode::preorder`].
pub struct Preorder<'a> {
    stack: Vec<(usize, &'a ParseTreeNode)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, &'a ParseTreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// One label per line, indented two spaces per level.
impl fmt::Display for ParseTreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, node) in self.preorder() {
            writeln!(f, "{:indent$}{}", "", node.label, indent = depth * 2)?;
        }
        Ok(())
    }
}
