//! Application run modes: logger init, one-shot questions, TUI launch.

use std::io::{self, Write};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::Args;
use crate::core;
use crate::core::assistant::{self, Submission};
use crate::core::config::Config;
use crate::core::history::{EntryKind, HistoryEntry};
use crate::core::solution;
use crate::core::speech::{CommandSpeaker, Speaker};

/// Initialize env_logger. In TUI mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()));

    if args.is_tui()
        && let Some(path) = core::paths::log_file()
    {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = logger.try_init();
}

/// Plain-text rendering of an answered question for stdout.
pub fn render_entry(entry: &HistoryEntry) -> String {
    let heading = match entry.kind {
        EntryKind::Image => entry.question.clone(),
        EntryKind::Speech | EntryKind::Doubt => format!("Q: {}", entry.question),
    };
    let body = solution::paragraphs(&entry.display_solution())
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{}\n\n{}", heading, body)
}

/// Answer one submission and print it. Ctrl+C cancels the request.
pub async fn run_submission(
    args: &Args,
    config: &Config,
    submission: Submission,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = args.model.as_deref().unwrap_or(&config.model_id);
    let show_progress = !args.quiet && !args.json;

    let cancel_token = CancellationToken::new();
    let ctrl_c_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let options = core::llm::RequestOptions {
        on_progress: show_progress.then(|| {
            Box::new(|s: &str| {
                let _ = writeln!(io::stderr(), "{}", s);
                let _ = io::stderr().flush();
            }) as core::llm::OnProgress
        }),
        on_content_chunk: None,
        cancel_token: Some(cancel_token),
    };

    let entry = assistant::solve(config, model, &submission, &options).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!("{}", render_entry(&entry));
    }

    if args.speak {
        let mut speaker = CommandSpeaker::from_config(config.tts_command.as_deref());
        let spoken = speaker.speak(&entry.display_solution()).and_then(|()| speaker.wait());
        if let Err(e) = spoken {
            log::warn!("Speech failed: {}", e);
            eprintln!("Warning: {}", e);
        }
    }
    Ok(())
}

/// Launch the TUI in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(config);
    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(config)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("TUI panic: {}", msg);
            }
            return Err(
                Box::new(io::Error::other("TUI thread panicked")) as Box<dyn std::error::Error>
            );
        }
    }
    Ok(())
}
