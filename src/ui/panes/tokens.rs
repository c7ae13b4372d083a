//! Token stream pane: one row per token with line, category and lexeme

use crate::parser::lexer::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the token pane, keeping `selected` in view
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
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
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = super::scroll_to_show(*scroll, selected, visible_height);

    let lines: Vec<Line> = tokens
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, token)| {
            let row_style = if idx == selected {
                Style::default().bg(DEFAULT_THEME.current_line_bg)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(
                    format!("{:4} ", token.line),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<10}", token.kind.name()),
                    Style::default().fg(DEFAULT_THEME.primary),
                ),
                Span::styled(token.lexeme.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
            ])
            .style(row_style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
