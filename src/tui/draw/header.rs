//! Header: branding, activity spinner, model, and theme indicator.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::app::DISPLAY_NAME;

use super::super::app::App;
use super::super::theme::{self, Palette};

const LOGO: &str = "◆";

pub(super) fn draw_header(f: &mut Frame, app: &App, area: Rect, pal: &Palette) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(pal.muted));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let logo = match app.request {
        Some(ref req) => super::spinner_frame(req.started_at),
        None => LOGO,
    };
    let left = Line::from(vec![
        Span::styled(format!(" {} ", logo), Style::default().fg(pal.accent)),
        Span::styled(
            DISPLAY_NAME,
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        ),
    ]);

    let speaking = if app.speaking { "♪ speaking  " } else { "" };
    let right_text = format!(
        "{}{}  {} ",
        speaking,
        app.model_id,
        theme::indicator(app.theme)
    );
    let right_width = (right_text.chars().count() as u16).min(inner.width / 2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_width)])
        .split(inner);

    f.render_widget(Paragraph::new(left), chunks[0]);
    let right = Line::from(vec![
        Span::styled(speaking, Style::default().fg(pal.accent_secondary)),
        Span::styled(app.model_id.clone(), Style::default().fg(pal.muted)),
        Span::raw("  "),
        Span::styled(
            format!("{} ", theme::indicator(app.theme)),
            Style::default().fg(pal.accent_secondary),
        ),
    ]);
    f.render_widget(Paragraph::new(right).right_aligned(), chunks[1]);
}
