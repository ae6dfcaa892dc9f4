//! TUI application state: active mode, per-mode results, history selection, speech.


use std::time::{Duration, Instant};

use crate::core::history::{HistoryEntry, SessionHistory};
use crate::core::languages::{self, SpeechLanguage};
use crate::core::persistence::Theme;
use crate::core::speech::{Speaker, SpeechError};

/// Sidebar modes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Image,
    Speech,
    History,
    Doubt,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Image, Mode::Speech, Mode::History, Mode::Doubt];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Image => "Image",
            Mode::Speech => "Speech",
            Mode::History => "History",
            Mode::Doubt => "Doubt",
        }
    }

    fn position(self) -> usize {
        Mode::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    /// Next (or previous) mode, wrapping around.
    pub fn cycled(self, forward: bool) -> Mode {
        let n = Mode::ALL.len();
        let i = self.position();
        let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
        Mode::ALL[next]
    }

    /// Slot in `App::outputs`; `None` for History, which has no input.
    pub(crate) fn output_slot(self) -> Option<usize> {
        match self {
            Mode::Image => Some(0),
            Mode::Speech => Some(1),
            Mode::Doubt => Some(2),
            Mode::History => None,
        }
    }
}

/// Last answer (or error) shown in an input mode's panel.
#[derive(Default)]
pub struct ModeOutput {
    pub result: Option<HistoryEntry>,
    pub error: Option<String>,
}

/// A request in flight: which panel it belongs to and what has streamed so far.
pub struct RequestState {
    pub mode: Mode,
    pub progress: Option<String>,
    /// Raw streamed answer text (flattened when drawn).
    pub partial: String,
    pub started_at: Instant,
}

/// Short-lived message in the top right corner.
pub struct Toast {
    pub text: String,
    pub until: Instant,
}

pub struct App {
    pub(crate) mode: Mode,
    pub(crate) theme: Theme,
    pub(crate) sidebar_open: bool,
    pub(crate) history: SessionHistory,
    /// Text in the input bar (a file path in Image/Speech, the question in Doubt).
    pub(crate) input: String,
    /// Index into `languages::languages()`.
    pub(crate) language_index: usize,
    pub(crate) outputs: [ModeOutput; 3],
    pub(crate) request: Option<RequestState>,
    pub(crate) history_selected: usize,
    pub(crate) history_expanded: Option<usize>,
    /// Lines scrolled in the main panel.
    pub(crate) scroll: u16,
    pub(crate) toast: Option<Toast>,
    /// True while speech is playing; refreshed once per loop tick.
    pub(crate) speaking: bool,
    pub(crate) model_id: String,
    speaker: Box<dyn Speaker>,
}

impl App {
    pub fn new(theme: Theme, language: &str, model_id: String, speaker: Box<dyn Speaker>) -> Self {
        Self {
            mode: Mode::Image,
            theme,
            sidebar_open: true,
            history: SessionHistory::new(),
            input: String::new(),
            language_index: languages::index_of(language),
            outputs: Default::default(),
            request: None,
            history_selected: 0,
            history_expanded: None,
            scroll: 0,
            toast: None,
            speaking: false,
            model_id,
            speaker,
        }
    }

    pub fn language(&self) -> &'static SpeechLanguage {
        &languages::languages()[self.language_index]
    }

    /// Switch mode. Leaving a mode stops any speech in progress.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.stop_speech();
        log::debug!("Mode {} -> {}", self.mode.label(), mode.label());
        self.mode = mode;
        self.input.clear();
        self.scroll = 0;
    }

    pub fn cycle_mode(&mut self, forward: bool) {
        self.set_mode(self.mode.cycled(forward));
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Move the speech language selection. Returns the new language.
    pub fn cycle_language(&mut self, forward: bool) -> &'static SpeechLanguage {
        self.language_index = languages::cycle(self.language_index, forward);
        self.language()
    }

    pub fn output(&self, mode: Mode) -> Option<&ModeOutput> {
        mode.output_slot().map(|i| &self.outputs[i])
    }

    fn output_mut(&mut self, mode: Mode) -> Option<&mut ModeOutput> {
        let i = mode.output_slot()?;
        Some(&mut self.outputs[i])
    }

    pub fn is_busy(&self) -> bool {
        self.request.is_some()
    }

    /// Mark a request as started for `mode`; clears that panel's previous error.
    pub fn start_request(&mut self, mode: Mode) {
        if let Some(out) = self.output_mut(mode) {
            out.error = None;
        }
        self.request = Some(RequestState {
            mode,
            progress: None,
            partial: String::new(),
            started_at: Instant::now(),
        });
        self.scroll = 0;
    }

    pub fn set_progress(&mut self, msg: String) {
        if let Some(ref mut req) = self.request {
            req.progress = Some(msg);
        }
    }

    pub fn append_chunk(&mut self, chunk: &str) {
        if let Some(ref mut req) = self.request {
            req.partial.push_str(chunk);
        }
    }

    /// Record a successful answer in the history and show it in its panel.
    pub fn finish_ok(&mut self, entry: HistoryEntry) {
        let Some(req) = self.request.take() else {
            return;
        };
        let at = self.history.record(entry.clone());
        // Keep the History selection on the same entry when a doubt is inserted above it.
        if self.history.len() > 1 {
            if self.history_selected >= at {
                self.history_selected += 1;
            }
            if let Some(i) = self.history_expanded.as_mut()
                && *i >= at
            {
                *i += 1;
            }
        }
        if let Some(out) = self.output_mut(req.mode) {
            out.result = Some(entry);
            out.error = None;
        }
    }

    /// Show a failed request in its panel in place of the previous answer.
    /// Failed requests are not recorded.
    pub fn finish_err(&mut self, message: String) {
        let Some(req) = self.request.take() else {
            return;
        };
        if let Some(out) = self.output_mut(req.mode) {
            out.result = None;
            out.error = Some(message);
        }
    }

    pub fn select_history(&mut self, down: bool) {
        let len = self.history.len();
        if len == 0 {
            return;
        }
        self.history_selected = if down {
            (self.history_selected + 1).min(len - 1)
        } else {
            self.history_selected.saturating_sub(1)
        };
    }

    /// Expand the selected entry, or collapse it when it is already expanded.
    /// Either way the previously displayed solution stops being spoken.
    pub fn toggle_history_expanded(&mut self) {
        if self.history.get(self.history_selected).is_none() {
            return;
        }
        self.stop_speech();
        self.history_expanded = match self.history_expanded {
            Some(i) if i == self.history_selected => None,
            _ => Some(self.history_selected),
        };
    }

    /// The solution currently on screen, if any.
    pub fn displayed_entry(&self) -> Option<&HistoryEntry> {
        match self.mode {
            Mode::History => self.history_expanded.and_then(|i| self.history.get(i)),
            mode => self.output(mode).and_then(|o| o.result.as_ref()),
        }
    }

    /// Speak the displayed solution, or stop if already speaking.
    pub fn toggle_speech(&mut self) -> Result<(), SpeechError> {
        if self.speaker.is_speaking() {
            self.stop_speech();
            return Ok(());
        }
        let Some(text) = self.displayed_entry().map(HistoryEntry::display_solution) else {
            return Ok(());
        };
        self.speaker.speak(&text)?;
        self.speaking = true;
        Ok(())
    }

    pub fn stop_speech(&mut self) {
        self.speaker.stop();
        self.speaking = false;
    }

    pub fn refresh_speaking(&mut self) {
        self.speaking = self.speaker.is_speaking();
    }

    pub fn show_toast(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            until: Instant::now() + Duration::from_secs(2),
        });
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }
}
