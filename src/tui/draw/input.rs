//! Input bar and key hints.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::{App, Mode};
use super::super::theme::Palette;

const HINTS: &str =
    " Tab/Alt+1..4 modes · Enter submit · Ctrl+S speak · Ctrl+Y copy · Ctrl+T theme · Ctrl+B sidebar · Ctrl+C quit";

fn title(app: &App) -> &'static str {
    if app.is_busy() {
        return " Working... Esc to cancel ";
    }
    match app.mode {
        Mode::Image => " Image path ",
        Mode::Speech => " Audio path ",
        Mode::Doubt => " Your question ",
        Mode::History => " ↑/↓ select · Enter expand/collapse ",
    }
}

fn placeholder(mode: Mode) -> &'static str {
    match mode {
        Mode::Image => "e.g. ~/Pictures/homework.png",
        Mode::Speech => "e.g. question.wav",
        Mode::Doubt => "Ask anything you are stuck on...",
        Mode::History => "",
    }
}

/// Tail of `input` that fits in `width` columns, leaving one column for the cursor.
fn visible_tail(input: &str, width: usize) -> &str {
    let room = width.saturating_sub(1);
    let count = input.chars().count();
    if count <= room {
        return input;
    }
    let skip = count - room;
    let start = input.char_indices().nth(skip).map(|(i, _)| i).unwrap_or(input.len());
    &input[start..]
}

pub(super) fn draw_input(f: &mut Frame, app: &App, area: Rect, pal: &Palette) {
    let border = if app.mode == Mode::History {
        pal.muted
    } else {
        pal.accent
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(title(app), Style::default().fg(pal.muted)));
    let inner = block.inner(area);

    let line = if app.input.is_empty() {
        Line::from(Span::styled(placeholder(app.mode), Style::default().fg(pal.muted)))
    } else {
        Line::from(Span::styled(
            visible_tail(&app.input, inner.width as usize).to_string(),
            Style::default().fg(pal.fg),
        ))
    };
    f.render_widget(Paragraph::new(line).block(block), area);

    if app.mode != Mode::History && inner.width > 0 && inner.height > 0 {
        let typed = visible_tail(&app.input, inner.width as usize).chars().count() as u16;
        f.set_cursor_position(Position::new(
            inner.x + typed.min(inner.width - 1),
            inner.y,
        ));
    }
}

pub(super) fn draw_hints(f: &mut Frame, area: Rect, pal: &Palette) {
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(HINTS, Style::default().fg(pal.muted)))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::visible_tail;

    #[test]
    fn short_input_is_shown_whole() {
        assert_eq!(visible_tail("abc", 10), "abc");
    }

    #[test]
    fn long_input_shows_the_tail() {
        assert_eq!(visible_tail("abcdefghij", 5), "ghij");
    }

    #[test]
    fn tail_respects_char_boundaries() {
        assert_eq!(visible_tail("नमस्ते", 3), "ते");
    }
}
