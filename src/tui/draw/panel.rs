//! Main panel: per-mode instructions, in-flight progress, answers, and the history list.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::history::{EntryKind, HistoryEntry};
use crate::core::solution;

use super::super::app::{App, Mode};
use super::super::theme::Palette;

/// Wrap flattened solution text to `width`, one block per paragraph with a blank line between.
pub(crate) fn wrap_solution(flattened: &str, width: usize, indent: &str) -> Vec<String> {
    let options = textwrap::Options::new(width.max(1))
        .initial_indent(indent)
        .subsequent_indent(indent);
    let mut out = Vec::new();
    for (i, para) in solution::paragraphs(flattened).enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        if para.trim().is_empty() {
            continue;
        }
        out.extend(
            textwrap::wrap(para, &options)
                .into_iter()
                .map(|cow| cow.into_owned()),
        );
    }
    out
}

fn wrapped(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|cow| Line::from(Span::styled(cow.into_owned(), style)))
        .collect()
}

fn solution_lines(entry: &HistoryEntry, width: usize, indent: &str, pal: &Palette) -> Vec<Line<'static>> {
    wrap_solution(&entry.display_solution(), width, indent)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(pal.fg))))
        .collect()
}

fn instructions(app: &App, mode: Mode, width: usize, pal: &Palette) -> Vec<Line<'static>> {
    let muted = Style::default().fg(pal.muted);
    let text = match mode {
        Mode::Image => "Type the path to a photo of your problem and press Enter.",
        Mode::Speech => "Type the path to a recording of your question and press Enter.",
        Mode::Doubt => "Type your question below and press Enter.",
        Mode::History => "",
    };
    let mut lines = wrapped(text, width, muted);
    if mode == Mode::Speech {
        let lang = app.language();
        lines.push(Line::from(vec![
            Span::styled("Language: ", muted),
            Span::styled(
                format!("{} ({})", lang.name, lang.code),
                Style::default()
                    .fg(pal.accent_secondary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   ←/→ to change", muted),
        ]));
    }
    lines
}

fn heading(entry: &HistoryEntry) -> String {
    match entry.kind {
        EntryKind::Image => entry.question.clone(),
        EntryKind::Speech => format!("Heard: {}", entry.question),
        EntryKind::Doubt => format!("Q: {}", entry.question),
    }
}

fn mode_lines(app: &App, mode: Mode, width: usize, pal: &Palette) -> Vec<Line<'static>> {
    let mut lines = instructions(app, mode, width, pal);
    lines.push(Line::from(""));

    if let Some(ref req) = app.request
        && req.mode == mode
    {
        let progress = req.progress.as_deref().unwrap_or("Thinking...");
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", super::spinner_frame(req.started_at)),
                Style::default().fg(pal.accent),
            ),
            Span::styled(progress.to_string(), Style::default().fg(pal.muted)),
            Span::styled("   Esc to cancel", Style::default().fg(pal.muted)),
        ]));
        if !req.partial.is_empty() {
            lines.push(Line::from(""));
            for l in wrap_solution(&solution::flatten(&req.partial), width, "") {
                lines.push(Line::from(Span::styled(l, Style::default().fg(pal.fg))));
            }
        }
        return lines;
    }

    let Some(out) = app.output(mode) else {
        return lines;
    };
    if let Some(ref err) = out.error {
        lines.extend(wrapped(err, width, Style::default().fg(pal.error)));
    }
    if let Some(ref entry) = out.result {
        lines.extend(wrapped(
            &heading(entry),
            width,
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::from(""));
        lines.extend(solution_lines(entry, width, "", pal));
        lines.push(Line::from(""));
        let hint = if app.speaking {
            "♪ Speaking... Ctrl+S to stop · Ctrl+Y copy"
        } else {
            "Ctrl+S read aloud · Ctrl+Y copy"
        };
        lines.push(Line::from(Span::styled(hint, Style::default().fg(pal.muted))));
    }
    lines
}

/// History list lines and the line index of the selected entry.
fn history_lines(app: &App, width: usize, pal: &Palette) -> (Vec<Line<'static>>, usize) {
    if app.history.is_empty() {
        let lines = wrapped(
            "No questions yet this session. Answers from Image, Speech and Doubt appear here.",
            width,
            Style::default().fg(pal.muted),
        );
        return (lines, 0);
    }
    let mut lines = Vec::new();
    let mut selected_line = 0;
    for (i, entry) in app.history.entries().iter().enumerate() {
        let selected = i == app.history_selected;
        let expanded = app.history_expanded == Some(i);
        if selected {
            selected_line = lines.len();
        }
        let base = if selected {
            Style::default().bg(pal.selection_bg).fg(pal.fg)
        } else {
            Style::default().fg(pal.fg)
        };
        let marker = if expanded { "▾ " } else { "▸ " };
        let prefix = format!("{}[{}] ", marker, entry.kind.label());
        let time = entry.asked_at.format(" %H:%M").to_string();
        let room = width.saturating_sub(prefix.chars().count() + time.chars().count());
        let mut question: String = entry.question.chars().take(room).collect();
        if entry.question.chars().count() > room && room > 0 {
            question.pop();
            question.push('…');
        }
        lines.push(Line::from(vec![
            Span::styled(prefix, base.fg(pal.accent_secondary)),
            Span::styled(question, base),
            Span::styled(time, base.fg(pal.muted)),
        ]));
        if expanded {
            lines.push(Line::from(""));
            lines.extend(solution_lines(entry, width, "    ", pal));
            lines.push(Line::from(""));
        }
    }
    (lines, selected_line)
}

pub(super) fn draw_panel(f: &mut Frame, app: &mut App, area: Rect, pal: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(pal.muted))
        .title(Span::styled(
            format!(" {} ", app.mode.label()),
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    let width = inner.width as usize;
    let visible = inner.height as usize;

    let lines = match app.mode {
        Mode::History => {
            let (lines, selected_line) = history_lines(app, width, pal);
            // Keep the selected entry on screen.
            let top = app.scroll as usize;
            if selected_line < top {
                app.scroll = selected_line as u16;
            } else if visible > 0 && selected_line >= top + visible {
                app.scroll = (selected_line + 1 - visible) as u16;
            }
            lines
        }
        mode => mode_lines(app, mode, width, pal),
    };

    let max_scroll = lines.len().saturating_sub(visible) as u16;
    app.scroll = app.scroll.min(max_scroll);

    f.render_widget(
        Paragraph::new(lines).block(block).scroll((app.scroll, 0)),
        area,
    );
}
