//! CLI-only commands: config info, API key storage, languages, and the offline text tools.
//!
//! These run without opening the TUI and produce plain text output.

use std::io::{self, Read};
use std::path::Path;

use serde_json::json;

use crate::core::api_key;
use crate::core::config::{self, ConfigError, KeySource};
use crate::core::languages;
use crate::core::paths;
use crate::core::persistence;
use crate::core::solution;

/// Read a whole input: a file path, or stdin for `-` or no argument.
pub fn read_input(source: Option<&str>) -> io::Result<String> {
    match source {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(Path::new(path)),
    }
}

/// Run the `config` command: display paths, model, and API key status.
pub fn run_config() {
    let config_dir = paths::config_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let log_file = paths::log_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let key_file = api_key::credentials_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let theme = persistence::load_theme().unwrap_or_default();

    println!("Config:    {}", config_dir);
    println!("Key file:  {}", key_file);
    println!("Log file:  {}", log_file);
    match config::load() {
        Ok(c) => {
            let source = match c.key_source {
                KeySource::Environment => "from GEMINI_API_KEY",
                KeySource::ConfigFile => "from config file",
            };
            println!("Model:     {}", c.model_id);
            println!("Endpoint:  {}", c.base_url);
            println!("Language:  {}", c.language);
            println!("API key:   set ({})", source);
        }
        Err(ConfigError::MissingApiKey) => {
            println!("Model:     {}", config::DEFAULT_MODEL);
            println!("Endpoint:  {}", config::DEFAULT_BASE_URL);
            println!("Language:  {}", languages::DEFAULT_LANGUAGE);
            println!("API key:   not set");
        }
    }
    println!("Theme:     {}", theme.as_str());
}

/// Run the `config set-api-key` command: store the key in the config directory.
/// Reads the key from stdin when none is given.
pub fn run_config_set_api_key(key: Option<String>) {
    let key = match key {
        Some(k) if !k.trim().is_empty() => k.trim().to_string(),
        _ => match read_input(None) {
            Ok(buf) if !buf.trim().is_empty() => buf.trim().to_string(),
            Ok(_) => {
                eprintln!("Error: no API key provided");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
        },
    };

    match api_key::store_api_key(&key) {
        Ok(path) => println!("API key saved to {}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run the `languages` command: one `code  name` line per speech language.
pub fn run_languages() {
    for lang in languages::languages() {
        let marker = if lang.code == languages::DEFAULT_LANGUAGE {
            " (default)"
        } else {
            ""
        };
        println!("{:<6} {}{}", lang.code, lang.name, marker);
    }
}

/// Format a split result for the `split` command.
pub fn format_split(raw: &str, as_json: bool) -> String {
    let parsed = solution::split(raw);
    if as_json {
        json!({ "title": parsed.title, "solution": parsed.solution }).to_string()
    } else {
        format!("Title: {}\nSolution: {}", parsed.title, parsed.solution)
    }
}

/// Run the `split` command on a file or stdin.
pub fn run_split(source: Option<&str>, as_json: bool) -> io::Result<()> {
    let raw = read_input(source)?;
    println!("{}", format_split(&raw, as_json));
    Ok(())
}

/// Run the `flatten` command on a file or stdin.
pub fn run_flatten(source: Option<&str>) -> io::Result<()> {
    let raw = read_input(source)?;
    println!("{}", solution::flatten(&raw));
    Ok(())
}
