//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with highlighting and the selected token's line marked
//! - [`tokens`]: The token stream, one row per token
//! - [`tree`]: The parse tree with collapsible subtrees
//! - [`status`]: Status bar with keybindings and parse summary
//!
//! Each pane module exports a primary `render_*` function that takes its
//! scroll offset by `&mut` and keeps the selection in view.

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::{render_tree_pane, visible_rows, TreeRow};

/// Smallest change to `scroll` that keeps row `selected` inside a window of
/// `height` rows.
pub(crate) fn scroll_to_show(scroll: usize, selected: usize, height: usize) -> usize {
    if selected < scroll {
        selected
    } else if selected >= scroll + height {
        selected + 1 - height
    } else {
        scroll
    }
}
