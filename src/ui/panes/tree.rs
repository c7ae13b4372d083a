//! Parse tree pane with collapsible subtrees
//!
//! Nodes are identified by their pre-order index in the full tree, so ids stay
//! stable while subtrees are folded and unfolded.

use crate::parser::tree::ParseTreeNode;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashSet;

/// One visible line of the tree pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: usize,
    pub depth: usize,
    pub label: String,
    pub has_children: bool,
    pub collapsed: bool,
}

/// Flatten `tree` into the rows left visible by `collapsed`.
pub fn visible_rows(tree: &ParseTreeNode, collapsed: &FxHashSet<usize>) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    // Depth of the collapsed ancestor whose subtree is being skipped
    let mut hidden_below: Option<usize> = None;

    for (id, (depth, node)) in tree.preorder().enumerate() {
        match hidden_below {
            Some(limit) if depth > limit => continue,
            _ => hidden_below = None,
        }

        let is_collapsed = !node.is_leaf() && collapsed.contains(&id);
        if is_collapsed {
            hidden_below = Some(depth);
        }

        rows.push(TreeRow {
            id,
            depth,
            label: node.label().to_string(),
            has_children: !node.is_leaf(),
            collapsed: is_collapsed,
        });
    }

    rows
}

/// Render the parse tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[TreeRow],
    selected: usize,
    node_count: usize,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Parse Tree ({} nodes) ", node_count))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = super::scroll_to_show(*scroll, selected, visible_height);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, row)| {
            let marker = match (row.has_children, row.collapsed) {
                (true, true) => "▸ ",
                (true, false) => "▾ ",
                (false, _) => "  ",
            };
            let label_style = if row.has_children {
                Style::default()
                    .fg(DEFAULT_THEME.rule)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };

            let line = Line::from(vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(row.label.as_str(), label_style),
            ]);
            if idx == selected {
                line.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn labels(rows: &[TreeRow]) -> Vec<&str> {
        rows.iter().map(|row| row.label.as_str()).collect()
    }

    #[test]
    fn test_all_rows_visible_by_default() {
        let tree = parse_source("int x; class A { }").unwrap();
        let rows = visible_rows(&tree, &FxHashSet::default());

        assert_eq!(rows.len(), tree.node_count());
        assert_eq!(
            labels(&rows),
            vec!["CODE", "VDECL", "int", "x", "CDECL", "class", "A", "ODECL"]
        );
    }

    #[test]
    fn test_collapsed_subtree_is_hidden() {
        let tree = parse_source("int x; class A { }").unwrap();
        let mut collapsed = FxHashSet::default();
        collapsed.insert(1); // VDECL

        let rows = visible_rows(&tree, &collapsed);

        assert_eq!(labels(&rows), vec!["CODE", "VDECL", "CDECL", "class", "A", "ODECL"]);
        assert!(rows[1].collapsed);
        assert_eq!(rows[2].id, 4);
    }

    #[test]
    fn test_collapsing_a_leaf_has_no_effect() {
        let tree = parse_source("int x;").unwrap();
        let mut collapsed = FxHashSet::default();
        collapsed.insert(2); // "int"

        let rows = visible_rows(&tree, &collapsed);
        assert_eq!(rows.len(), 4);
        assert!(!rows[2].collapsed);
    }
}
