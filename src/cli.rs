//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  explore                            Launch the interactive learning assistant
  explore -p \"what is a prime?\"      Ask a doubt, print the answer
  echo \"why is the sky blue\" | explore -p -
  explore image homework.png         Explain the problem in a photo
  explore speech question.wav -l ta-IN --speak
  explore split answer.txt --json    Split a saved model reply (offline)
  explore flatten answer.md          Strip markdown from a reply (offline)
  explore config set-api-key         Store the Gemini API key (reads stdin)
  explore completions bash           Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "A learning assistant that explains problems step by step",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Ask a single doubt then exit (without opening the TUI)
    #[arg(
        short = 'p',
        long,
        help = "Ask a question and print the answer (use '-' to read from stdin)"
    )]
    pub prompt: Option<String>,

    /// Override model for one-shot questions
    #[arg(short = 'm', long, global = true, help = "Model ID (e.g. gemini-2.0-flash)")]
    pub model: Option<String>,

    /// Read the answer aloud and wait for it to finish
    #[arg(long, global = true)]
    pub speak: bool,

    /// Print the history entry as JSON (raw solution text)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a picture of a problem and explain the solution
    Image {
        /// Image file (png, jpeg, gif or webp, under 4 MiB)
        path: PathBuf,
    },
    /// Transcribe a spoken question, then answer it
    Speech {
        /// Audio file (wav, mp3, aiff, aac, ogg or flac, under 4 MiB)
        audio: PathBuf,
        /// Spoken language code (see `explore languages`)
        #[arg(short = 'l', long)]
        language: Option<String>,
    },
    /// Split a model reply into title and solution (no API key needed)
    Split {
        /// Input file, or '-' / omitted for stdin
        file: Option<String>,
    },
    /// Strip markdown emphasis and bullets from text (no API key needed)
    Flatten {
        /// Input file, or '-' / omitted for stdin
        file: Option<String>,
    },
    /// List speech languages
    Languages,
    /// Show config paths, model, and API key status
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Store the API key in the config directory (reads stdin when omitted)
    SetApiKey { key: Option<String> },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when the TUI will be launched (no subcommand, no prompt).
    pub fn is_tui(&self) -> bool {
        self.command.is_none() && self.prompt.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_launches_tui() {
        let args = Args::parse_from(["explore"]);
        assert!(args.is_tui());
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn verbosity_flags() {
        assert_eq!(Args::parse_from(["explore", "-v"]).log_level(), "info");
        assert_eq!(Args::parse_from(["explore", "-vv"]).log_level(), "debug");
        assert_eq!(Args::parse_from(["explore", "-q", "-vv"]).log_level(), "error");
    }

    #[test]
    fn speech_subcommand_with_global_flags() {
        let args = Args::parse_from(["explore", "speech", "q.wav", "-l", "ta-IN", "--speak"]);
        assert!(args.speak);
        assert!(!args.is_tui());
        match args.command {
            Some(Commands::Speech { audio, language }) => {
                assert_eq!(audio, PathBuf::from("q.wav"));
                assert_eq!(language.as_deref(), Some("ta-IN"));
            }
            _ => panic!("expected speech subcommand"),
        }
    }

    #[test]
    fn config_set_api_key_parses() {
        let args = Args::parse_from(["explore", "config", "set-api-key", "abc"]);
        assert!(matches!(
            args.command,
            Some(Commands::Config {
                subcommand: Some(ConfigSubcommand::SetApiKey { key: Some(_) })
            })
        ));
    }
}
