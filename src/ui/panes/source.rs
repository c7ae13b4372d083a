//! Source code pane rendering with syntax highlighting
//!
//! Displays the MiniJava program with line numbers, basic highlighting, and
//! the line of the currently selected token marked.
//!
//! Highlighting reuses the real lexer on each line, so what is colored as a
//! keyword is exactly what the parser sees as one. Lines the lexer cannot
//! handle on their own (e.g. the middle of a multi-line string) are shown
//! unstyled.

use crate::parser::lexer::{Lexer, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Syntax highlighting for a single source line
fn highlight_source_code(line: &str) -> Line<'_> {
    let Ok(tokens) = Lexer::new(line).tokenize() else {
        return Line::raw(line);
    };

    let mut spans = Vec::new();
    let mut cursor = 0;

    for token in &tokens {
        // Whitespace and comments between tokens
        if token.offset > cursor {
            spans.push(gap_span(&line[cursor..token.offset]));
        }
        spans.push(Span::styled(&line[token.offset..token.end()], token_style(token.kind)));
        cursor = token.end();
    }
    if cursor < line.len() {
        spans.push(gap_span(&line[cursor..]));
    }

    Line::from(spans)
}

fn gap_span(text: &str) -> Span<'_> {
    if text.trim_start().starts_with("//") {
        Span::styled(text, Style::default().fg(DEFAULT_THEME.comment))
    } else {
        Span::raw(text)
    }
}

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::TypeKeyword => Style::default().fg(DEFAULT_THEME.type_name),
        TokenKind::If
        | TokenKind::Else
        | TokenKind::While
        | TokenKind::Return
        | TokenKind::Class => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::IntLiteral | TokenKind::BoolLiteral => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        TokenKind::StringLiteral | TokenKind::CharLiteral => {
            Style::default().fg(DEFAULT_THEME.string)
        }
        TokenKind::LParen | TokenKind::RParen | TokenKind::LBrace | TokenKind::RBrace => {
            Style::default().fg(DEFAULT_THEME.primary) // Brackets
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: usize,
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
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders

    // Keep the current line on screen
    let current_idx = current_line.saturating_sub(1);
    if current_idx < *scroll {
        *scroll = current_idx;
    } else if current_idx >= *scroll + visible_height {
        *scroll = current_idx + 1 - visible_height;
    }
    *scroll = (*scroll).min(lines.len().saturating_sub(visible_height));

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content_line = highlight_source_code(line);
            if is_current {
                let background = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(background);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content_line.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
