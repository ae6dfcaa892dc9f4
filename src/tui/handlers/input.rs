//! Mode-local keys: typing into the input bar, submitting, language and history navigation.

use crossterm::event::{KeyCode, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::core::assistant::Submission;
use crate::core::config::Config;
use crate::core::persistence;

use super::super::app::{App, Mode};
use super::super::constants::SCROLL_LINES_PAGE;
use super::PendingRequest;
use super::spawn;

/// Paths dropped into a terminal are often quoted.
fn unquote(s: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(q).and_then(|r| r.strip_suffix(q)) {
            return inner;
        }
    }
    s
}

/// Build the submission for the current mode from the input bar. `None` when there is
/// nothing to submit (empty input, or History mode).
pub(crate) fn submission_from_input(app: &App) -> Option<Submission> {
    let text = app.input.trim();
    if text.is_empty() {
        return None;
    }
    match app.mode {
        Mode::Image => Some(Submission::Image(PathBuf::from(unquote(text)))),
        Mode::Speech => Some(Submission::Speech {
            audio: PathBuf::from(unquote(text)),
            language: app.language().code.clone(),
        }),
        Mode::Doubt => Some(Submission::Doubt(text.to_string())),
        Mode::History => None,
    }
}

/// Handle keys that are not global shortcuts.
pub(crate) fn handle_mode_input(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    app: &mut App,
    config: &Arc<Config>,
    pending: &mut Option<PendingRequest>,
    rt: &Arc<Runtime>,
) {
    match (app.mode, key_code) {
        (_, KeyCode::PageUp) => app.scroll_up(SCROLL_LINES_PAGE),
        (_, KeyCode::PageDown) => app.scroll_down(SCROLL_LINES_PAGE),
        (Mode::History, KeyCode::Up) => app.select_history(false),
        (Mode::History, KeyCode::Down) => app.select_history(true),
        (Mode::History, KeyCode::Enter) => app.toggle_history_expanded(),
        (Mode::History, _) => {}
        (Mode::Speech, KeyCode::Left | KeyCode::Right) => {
            let lang = app.cycle_language(key_code == KeyCode::Right);
            if let Err(e) = persistence::save_last_language(&lang.code) {
                log::warn!("Could not save language: {}", e);
            }
        }
        (_, KeyCode::Up) => app.scroll_up(1),
        (_, KeyCode::Down) => app.scroll_down(1),
        (_, KeyCode::Enter) => {
            if pending.is_some() {
                return;
            }
            let Some(submission) = submission_from_input(app) else {
                return;
            };
            log::info!("Submitting {} question", submission.kind().label());
            app.input.clear();
            app.start_request(app.mode);
            *pending = Some(spawn::spawn_request(
                rt,
                Arc::clone(config),
                app.model_id.clone(),
                submission,
            ));
        }
        (_, KeyCode::Backspace) => {
            app.input.pop();
        }
        (_, KeyCode::Char(c)) => {
            // Modified keys are shortcuts or terminal noise, not text.
            if key_modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
                return;
            }
            app.input.push(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::test_app;

    #[test]
    fn empty_input_submits_nothing() {
        let (mut app, _) = test_app();
        app.set_mode(Mode::Doubt);
        app.input = "   ".into();
        assert_eq!(submission_from_input(&app), None);
    }

    #[test]
    fn doubt_is_trimmed() {
        let (mut app, _) = test_app();
        app.set_mode(Mode::Doubt);
        app.input = "  what is a prime?  ".into();
        assert_eq!(
            submission_from_input(&app),
            Some(Submission::Doubt("what is a prime?".into()))
        );
    }

    #[test]
    fn image_path_is_unquoted() {
        let (mut app, _) = test_app();
        app.input = "'/tmp/my photo.png'".into();
        assert_eq!(
            submission_from_input(&app),
            Some(Submission::Image(PathBuf::from("/tmp/my photo.png")))
        );
    }

    #[test]
    fn speech_uses_selected_language() {
        let (mut app, _) = test_app();
        app.set_mode(Mode::Speech);
        app.input = "q.wav".into();
        let lang = app.cycle_language(true).code.clone();
        assert_eq!(
            submission_from_input(&app),
            Some(Submission::Speech {
                audio: PathBuf::from("q.wav"),
                language: lang,
            })
        );
    }

    #[test]
    fn history_mode_has_no_submission() {
        let (mut app, _) = test_app();
        app.set_mode(Mode::History);
        app.input = "anything".into();
        assert_eq!(submission_from_input(&app), None);
    }
}
