//! TUI rendering: header, sidebar, mode panel, input bar.

mod header;
mod input;
mod panel;
mod sidebar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::time::Instant;

use super::app::App;
use super::constants::{HEADER_HEIGHT, INPUT_HEIGHT, SIDEBAR_WIDTH, SPINNER, SPINNER_FRAME_MS};
use super::theme::{self, Palette};

/// Spinner frame for a request started at `started_at`.
pub(crate) fn spinner_frame(started_at: Instant) -> &'static str {
    let frame = started_at.elapsed().as_millis() / SPINNER_FRAME_MS;
    SPINNER[frame as usize % SPINNER.len()]
}

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let pal = theme::palette(app.theme);
    f.render_widget(
        Block::default().style(Style::default().bg(pal.bg).fg(pal.fg)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    header::draw_header(f, app, rows[0], &pal);

    let body = if app.sidebar_open {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
            .split(rows[1]);
        sidebar::draw_sidebar(f, app, cols[0], &pal);
        cols[1]
    } else {
        rows[1]
    };
    panel::draw_panel(f, app, body, &pal);
    input::draw_input(f, app, rows[2], &pal);
    input::draw_hints(f, rows[3], &pal);

    draw_toast(f, app, area, &pal);
}

/// Toast: top right, below header. Opaque background so it's visible over the panel.
fn draw_toast(f: &mut Frame, app: &mut App, area: Rect, pal: &Palette) {
    let Some(ref toast) = app.toast else {
        return;
    };
    if toast.until <= Instant::now() {
        app.toast = None;
        return;
    }
    let text = format!(" {} ", toast.text);
    let width = (text.chars().count() as u16 + 2).min(area.width);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width).saturating_sub(1),
        y: area.y + HEADER_HEIGHT,
        width,
        height: 3u16.min(area.height.saturating_sub(HEADER_HEIGHT)),
    };
    f.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(pal.accent))
        .style(Style::default().bg(pal.bg));
    let para = Paragraph::new(Line::from(text))
        .block(block)
        .style(Style::default().fg(pal.accent).bg(pal.bg));
    f.render_widget(para, toast_area);
}
