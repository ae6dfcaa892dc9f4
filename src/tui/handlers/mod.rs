//! Event handlers for the TUI: keyboard shortcuts and mode input.

mod input;
mod spawn;

use crossterm::event::{KeyEvent, KeyEventKind};
use std::sync::Arc;
use std::sync::mpsc;
use tokio_util::sync::CancellationToken;

use tokio::runtime::Runtime;

use crate::core::config::Config;
use crate::core::history::HistoryEntry;
use crate::core::llm::ChatError;
use crate::core::persistence;

use super::app::App;
use super::constants::{ERROR_PREFIX, ERROR_SUFFIX};
use super::shortcuts::Shortcut;

/// Holds receivers for a request in progress (progress lines, streamed content, final result).
pub struct PendingRequest {
    pub progress_rx: mpsc::Receiver<String>,
    pub stream_rx: mpsc::Receiver<String>,
    pub result_rx: mpsc::Receiver<Result<HistoryEntry, ChatError>>,
    /// Token to cancel the in-flight request.
    pub cancel_token: CancellationToken,
}

/// Result of handling an event: continue the loop or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Context passed to handle_key.
pub(crate) struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub config: &'a Arc<Config>,
    pub pending: &'a mut Option<PendingRequest>,
    pub rt: &'a Arc<Runtime>,
}

/// Drain a pending request's channels into the app. Returns true once the request is done.
pub(crate) fn poll_pending(app: &mut App, pending: &PendingRequest) -> bool {
    while let Ok(msg) = pending.progress_rx.try_recv() {
        app.set_progress(msg);
    }
    while let Ok(chunk) = pending.stream_rx.try_recv() {
        app.append_chunk(&chunk);
    }
    match pending.result_rx.try_recv() {
        Ok(result) => {
            apply_result(app, result);
            true
        }
        Err(mpsc::TryRecvError::Empty) => false,
        Err(mpsc::TryRecvError::Disconnected) => {
            apply_result(app, Err(ChatError::Other("request thread stopped".into())));
            true
        }
    }
}

/// Show the outcome of a finished request.
pub(crate) fn apply_result(app: &mut App, result: Result<HistoryEntry, ChatError>) {
    match result {
        Ok(entry) => {
            log::info!("Answered {} question", entry.kind.label());
            app.finish_ok(entry);
        }
        Err(ChatError::Cancelled) => app.finish_err("Request cancelled.".to_string()),
        Err(e) => {
            log::warn!("Request failed: {}", e);
            app.finish_err(format!("{}{}{}", ERROR_PREFIX, e, ERROR_SUFFIX));
        }
    }
}

/// Apply a global shortcut. Returns `Break` only for Quit.
pub(crate) fn handle_shortcut(
    shortcut: Shortcut,
    app: &mut App,
    pending: &mut Option<PendingRequest>,
) -> HandleResult {
    match shortcut {
        Shortcut::Quit => return HandleResult::Break,
        Shortcut::NextMode => app.cycle_mode(true),
        Shortcut::PrevMode => app.cycle_mode(false),
        Shortcut::SelectMode(mode) => app.set_mode(mode),
        Shortcut::ToggleSidebar => app.toggle_sidebar(),
        Shortcut::ToggleTheme => {
            let theme = app.toggle_theme();
            if let Err(e) = persistence::save_theme(theme) {
                log::warn!("Could not save theme: {}", e);
            }
        }
        Shortcut::ToggleSpeech => {
            if let Err(e) = app.toggle_speech() {
                log::warn!("Speech failed: {}", e);
                app.show_toast(format!("Speech failed: {}", e));
            }
        }
        Shortcut::Copy => copy_displayed(app),
        Shortcut::Cancel => {
            if let Some(p) = pending.as_ref() {
                log::info!("Cancelling request");
                p.cancel_token.cancel();
            }
        }
    }
    HandleResult::Continue
}

fn copy_displayed(app: &mut App) {
    let Some(text) = app.displayed_entry().map(HistoryEntry::display_solution) else {
        return;
    };
    match arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
        Ok(()) => app.show_toast("Copied"),
        Err(e) => {
            log::warn!("Clipboard unavailable: {}", e);
            app.show_toast("Copy failed");
        }
    }
}

/// Handle a key event. Returns Break when the app should exit.
pub(crate) fn handle_key(key: KeyEvent, ctx: HandleKeyContext<'_>) -> HandleResult {
    let HandleKeyContext {
        app,
        config,
        pending,
        rt,
    } = ctx;

    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }
    if let Some(shortcut) = Shortcut::match_key(&key) {
        return handle_shortcut(shortcut, app, pending);
    }
    input::handle_mode_input(key.code, key.modifiers, app, config, pending, rt);
    HandleResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::EntryKind;
    use crate::tui::app::Mode;
    use crate::tui::test_support::test_app;

    fn pending_with(
        result: Option<Result<HistoryEntry, ChatError>>,
        progress: &[&str],
        chunks: &[&str],
    ) -> PendingRequest {
        let (progress_tx, progress_rx) = mpsc::channel();
        let (stream_tx, stream_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        for p in progress {
            progress_tx.send(p.to_string()).unwrap();
        }
        for c in chunks {
            stream_tx.send(c.to_string()).unwrap();
        }
        if let Some(r) = result {
            result_tx.send(r).unwrap();
        } else {
            // Keep the sender alive so the channel reads as empty, not disconnected.
            std::mem::forget(result_tx);
        }
        PendingRequest {
            progress_rx,
            stream_rx,
            result_rx,
            cancel_token: CancellationToken::new(),
        }
    }

    #[test]
    fn quit_breaks_the_loop() {
        let (mut app, _) = test_app();
        let mut pending = None;
        assert_eq!(
            handle_shortcut(Shortcut::Quit, &mut app, &mut pending),
            HandleResult::Break
        );
    }

    #[test]
    fn mode_shortcuts_switch_modes() {
        let (mut app, _) = test_app();
        let mut pending = None;
        handle_shortcut(Shortcut::NextMode, &mut app, &mut pending);
        assert_eq!(app.mode, Mode::Speech);
        handle_shortcut(Shortcut::SelectMode(Mode::Doubt), &mut app, &mut pending);
        assert_eq!(app.mode, Mode::Doubt);
        handle_shortcut(Shortcut::PrevMode, &mut app, &mut pending);
        assert_eq!(app.mode, Mode::History);
    }

    #[test]
    fn sidebar_toggles() {
        let (mut app, _) = test_app();
        let mut pending = None;
        handle_shortcut(Shortcut::ToggleSidebar, &mut app, &mut pending);
        assert!(!app.sidebar_open);
    }

    #[test]
    fn cancel_fires_the_token() {
        let (mut app, _) = test_app();
        let mut pending = Some(pending_with(None, &[], &[]));
        handle_shortcut(Shortcut::Cancel, &mut app, &mut pending);
        assert!(pending.unwrap().cancel_token.is_cancelled());
    }

    #[test]
    fn poll_applies_progress_chunks_and_result() {
        let (mut app, _) = test_app();
        app.start_request(Mode::Doubt);
        let p = pending_with(None, &["Calling API..."], &["**Step", " 1**"]);
        assert!(!poll_pending(&mut app, &p));
        let req = app.request.as_ref().unwrap();
        assert_eq!(req.progress.as_deref(), Some("Calling API..."));
        assert_eq!(req.partial, "**Step 1**");

        let done = pending_with(
            Some(Ok(HistoryEntry::new(EntryKind::Doubt, "q", "**Step 1**"))),
            &[],
            &[],
        );
        assert!(poll_pending(&mut app, &done));
        assert!(!app.is_busy());
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn errors_use_the_apology_message() {
        let (mut app, _) = test_app();
        app.start_request(Mode::Doubt);
        apply_result(&mut app, Err(ChatError::ApiMessage("quota".into())));
        let err = app.output(Mode::Doubt).unwrap().error.clone().unwrap();
        assert_eq!(
            err,
            "Sorry, I encountered an error: API error: quota. Please try again."
        );
        assert!(app.history.is_empty());
    }

    #[test]
    fn dropped_request_thread_is_reported() {
        let (mut app, _) = test_app();
        app.start_request(Mode::Image);
        let (_, progress_rx) = mpsc::channel();
        let (_, stream_rx) = mpsc::channel();
        let (_, result_rx) = mpsc::channel();
        let p = PendingRequest {
            progress_rx,
            stream_rx,
            result_rx,
            cancel_token: CancellationToken::new(),
        };
        assert!(poll_pending(&mut app, &p));
        assert!(app.output(Mode::Image).unwrap().error.is_some());
    }
}
