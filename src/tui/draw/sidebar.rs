//! Sidebar: mode list with the active mode highlighted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::{App, Mode};
use super::super::theme::Palette;

pub(super) fn draw_sidebar(f: &mut Frame, app: &App, area: Rect, pal: &Palette) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(pal.muted));

    let mut lines = vec![Line::from("")];
    for (i, mode) in Mode::ALL.iter().enumerate() {
        let active = *mode == app.mode;
        let style = if active {
            Style::default()
                .fg(pal.bg)
                .bg(pal.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(pal.fg)
        };
        let mut label = format!(" {}", mode.label());
        if *mode == Mode::History && !app.history.is_empty() {
            label.push_str(&format!(" ({})", app.history.len()));
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", label), style),
            Span::styled(format!("Alt+{}", i + 1), Style::default().fg(pal.muted)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Ctrl+B hide",
        Style::default().fg(pal.muted),
    )));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
