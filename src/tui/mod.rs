//! TUI (Text User Interface) for the learning assistant: Image, Speech, History, Doubt.

mod app;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod theme;

#[cfg(test)]
mod test_support;

use crossterm::event::{self, Event};
use crossterm::execute;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::core::config::Config;
use crate::core::persistence;
use crate::core::speech::CommandSpeaker;

use app::App;
use draw::draw;
use handlers::{HandleResult, PendingRequest};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = execute!(
            std::io::stdout(),
            crossterm::event::PopKeyboardEnhancementFlags
        );
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for model requests.
pub fn run(config: Arc<Config>) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Kitty keyboard protocol: Alt+digit and Ctrl+key arrive as single events with modifiers.
    let _ = execute!(
        io::stdout(),
        crossterm::event::PushKeyboardEnhancementFlags(
            crossterm::event::KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        )
    );

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );

    let theme = persistence::load_theme().unwrap_or_default();
    let speaker = CommandSpeaker::from_config(config.tts_command.as_deref());
    let mut app = App::new(
        theme,
        &config.language,
        config.model_id.clone(),
        Box::new(speaker),
    );
    let mut pending: Option<PendingRequest> = None;
    log::info!(
        "{} {} TUI started (theme {}, language {})",
        crate::core::app::NAME,
        crate::core::app::VERSION,
        theme.as_str(),
        config.language
    );

    loop {
        if let Some(ref p) = pending
            && handlers::poll_pending(&mut app, p)
        {
            pending = None;
        }
        app.refresh_speaking();

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if event::poll(Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS))?
            && let Event::Key(key) = event::read()?
        {
            let result = handlers::handle_key(
                key,
                handlers::HandleKeyContext {
                    app: &mut app,
                    config: &config,
                    pending: &mut pending,
                    rt: &rt,
                },
            );
            if result == HandleResult::Break {
                break;
            }
        }
    }

    if let Some(p) = pending.take() {
        p.cancel_token.cancel();
    }
    app.stop_speech();
    log::info!("TUI exited");
    terminal.show_cursor()?;
    Ok(())
}
