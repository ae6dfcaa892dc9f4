//! # Explore - learning assistant
//!
//! Entry point for the terminal learning assistant: explains problems from images,
//! spoken questions, and typed doubts, either one-shot on the command line or in an
//! interactive TUI.

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use crate::cli::{Args, Commands, ConfigSubcommand};
use crate::core::assistant::Submission;
use crate::core::config::Config;

fn load_config_or_exit() -> Config {
    core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

fn exit_on_error<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    match &args.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Args::command();
            cli::generate(*shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
            return;
        }
        Some(Commands::Config { subcommand }) => {
            match subcommand {
                Some(ConfigSubcommand::SetApiKey { key }) => {
                    core::cli::run_config_set_api_key(key.clone())
                }
                None => core::cli::run_config(),
            }
            return;
        }
        Some(Commands::Languages) => {
            core::cli::run_languages();
            return;
        }
        Some(Commands::Split { file }) => {
            exit_on_error(core::cli::run_split(file.as_deref(), args.json));
            return;
        }
        Some(Commands::Flatten { file }) => {
            exit_on_error(core::cli::run_flatten(file.as_deref()));
            return;
        }
        _ => {}
    }

    let submission = match (&args.command, &args.prompt) {
        (Some(Commands::Image { path }), _) => Some(Submission::Image(path.clone())),
        (Some(Commands::Speech { audio, language }), _) => Some(Submission::Speech {
            audio: audio.clone(),
            language: language.clone().unwrap_or_default(),
        }),
        (_, Some(prompt)) => {
            let text = if prompt == "-" {
                core::cli::read_input(None).unwrap_or_else(|e| {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                })
            } else {
                prompt.clone()
            };
            if text.trim().is_empty() {
                eprintln!("Error: {}", core::llm::ChatError::EmptyQuestion);
                std::process::exit(1);
            }
            Some(Submission::Doubt(text))
        }
        _ => None,
    };

    let config = load_config_or_exit();

    let result = match submission {
        Some(Submission::Speech { audio, language }) => {
            // An omitted language uses the configured default.
            let language = if language.is_empty() {
                config.language.clone()
            } else {
                language
            };
            run::run_submission(&args, &config, Submission::Speech { audio, language }).await
        }
        Some(submission) => run::run_submission(&args, &config, submission).await,
        None => run::launch_tui(config).await,
    };
    exit_on_error(result);
}
