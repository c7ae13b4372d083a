//! Main TUI application state and logic

use crate::parser::lexer::Token;
use crate::parser::tree::ParseTreeNode;
use crate::ui::panes::{self, TreeRow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code that was parsed
    pub source_code: String,

    pub tokens: Vec<Token>,
    pub tree: ParseTreeNode,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Selected token index; its line is marked in the source pane
    pub token_cursor: usize,

    /// Selected row among the visible tree rows
    pub tree_cursor: usize,

    /// Pre-order ids of folded tree nodes
    pub collapsed: FxHashSet<usize>,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub token_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(source_code: String, tokens: Vec<Token>, tree: ParseTreeNode) -> Self {
        App {
            source_code,
            tokens,
            tree,
            focused_pane: FocusedPane::Tree,
            token_cursor: 0,
            tree_cursor: 0,
            collapsed: FxHashSet::default(),
            source_scroll: 0,
            token_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message: String::from("Parsed successfully"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            let rows = panes::visible_rows(&self.tree, &self.collapsed);
            terminal.draw(|f| self.render(f, &rows))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key, &rows);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame, rows: &[TreeRow]) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left column: Source (top) | Tokens (bottom); right column: Tree
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        let current_line = self
            .tokens
            .get(self.token_cursor)
            .map_or(0, |token| token.line);

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            current_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tokens_pane(
            frame,
            left_rows[1],
            &self.tokens,
            self.token_cursor,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        panes::render_tree_pane(
            frame,
            columns[1],
            rows,
            self.tree_cursor,
            self.tree.node_count(),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.tokens.len(),
            self.tree.node_count(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent, rows: &[TreeRow]) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.move_cursor(-1, rows.len()),
            KeyCode::Down => self.move_cursor(1, rows.len()),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.focused_pane == FocusedPane::Tree {
                    self.toggle_fold(rows);
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize, visible_tree_rows: usize) {
        match self.focused_pane {
            FocusedPane::Source => {
                // Step between tokens on different lines
                let line = self.tokens.get(self.token_cursor).map_or(0, |t| t.line);
                let next = if delta < 0 {
                    self.tokens[..self.token_cursor.min(self.tokens.len())]
                        .iter()
                        .rposition(|t| t.line < line)
                } else {
                    self.tokens
                        .iter()
                        .position(|t| t.line > line)
                };
                if let Some(idx) = next {
                    self.token_cursor = idx;
                }
            }
            FocusedPane::Tokens => {
                self.token_cursor = step(self.token_cursor, delta, self.tokens.len());
            }
            FocusedPane::Tree => {
                self.tree_cursor = step(self.tree_cursor, delta, visible_tree_rows);
            }
        }
    }

    fn toggle_fold(&mut self, rows: &[TreeRow]) {
        let Some(row) = rows.get(self.tree_cursor) else {
            return;
        };
        if !row.has_children {
            return;
        }
        if self.collapsed.remove(&row.id) {
            self.status_message = format!("Expanded {}", row.label);
        } else {
            self.collapsed.insert(row.id);
            self.status_message = format!("Collapsed {}", row.label);
        }
    }
}

/// Move `current` by `delta`, clamped to `0..len`.
fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}
