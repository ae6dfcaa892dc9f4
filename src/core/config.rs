//! Runtime configuration from the environment (.env), the stored API key, and saved preferences.

use std::env;

use async_openai::config::OpenAIConfig;

use crate::core::{api_key, languages, persistence};

/// Gemini's OpenAI-compatible endpoint (no trailing slash; the client appends the path).
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
const MODEL_ENV: &str = "GEMINI_MODEL";
const LANGUAGE_ENV: &str = "EXPLORE_LANGUAGE";
const TTS_COMMAND_ENV: &str = "EXPLORE_TTS_COMMAND";

/// Where the API key came from, for `explore config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    ConfigFile,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_config: OpenAIConfig,
    pub model_id: String,
    pub base_url: String,
    /// Default speech language code (e.g. "hi-IN").
    pub language: String,
    /// Text-to-speech command line; `None` uses the platform default.
    pub tts_command: Option<Vec<String>>,
    pub key_source: KeySource,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "GEMINI_API_KEY is not set (add it to .env or run `explore config set-api-key`)"
    )]
    MissingApiKey,
}

/// Load configuration from the environment. Returns an error if no API key is available.
pub fn load() -> Result<Config, ConfigError> {
    resolve(
        |name| env::var(name).ok(),
        api_key::load_api_key,
        persistence::load_last_language,
    )
}

/// Resolve configuration from injected sources (environment lookup, stored key, saved language).
pub(crate) fn resolve(
    lookup: impl Fn(&str) -> Option<String>,
    stored_key: impl FnOnce() -> Option<String>,
    last_language: impl FnOnce() -> Option<String>,
) -> Result<Config, ConfigError> {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let (api_key, key_source) = match non_empty(API_KEY_ENV) {
        Some(key) => (key, KeySource::Environment),
        None => (
            stored_key().ok_or(ConfigError::MissingApiKey)?,
            KeySource::ConfigFile,
        ),
    };

    let base_url = non_empty(BASE_URL_ENV)
        .map(|u| u.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let model_id = non_empty(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let language = last_language()
        .or_else(|| non_empty(LANGUAGE_ENV))
        .and_then(|code| languages::find(&code).map(|l| l.code.clone()))
        .unwrap_or_else(|| languages::DEFAULT_LANGUAGE.to_string());

    let tts_command = non_empty(TTS_COMMAND_ENV).map(|cmd| {
        cmd.split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>()
    });

    log::info!(
        "Config: model={} base_url={} language={} key from {:?}",
        model_id,
        base_url,
        language,
        key_source
    );

    let openai_config = OpenAIConfig::new()
        .with_api_base(base_url.clone())
        .with_api_key(api_key);

    Ok(Config {
        openai_config,
        model_id,
        base_url,
        language,
        tts_command,
        key_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_key_everywhere_is_an_error() {
        let err = resolve(env_of(&[]), || None, || None).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn defaults_apply_with_env_key() {
        let config = resolve(env_of(&[("GEMINI_API_KEY", "k")]), || None, || None).unwrap();
        assert_eq!(config.model_id, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.language, "hi-IN");
        assert_eq!(config.key_source, KeySource::Environment);
        assert!(config.tts_command.is_none());
    }

    #[test]
    fn stored_key_is_used_when_env_is_blank() {
        let config = resolve(
            env_of(&[("GEMINI_API_KEY", "  ")]),
            || Some("stored".to_string()),
            || None,
        )
        .unwrap();
        assert_eq!(config.key_source, KeySource::ConfigFile);
    }

    #[test]
    fn overrides_are_read_from_env() {
        let config = resolve(
            env_of(&[
                ("GEMINI_API_KEY", "k"),
                ("GEMINI_BASE_URL", "http://localhost:8080/v1/"),
                ("GEMINI_MODEL", "gemini-2.0-flash"),
                ("EXPLORE_LANGUAGE", "ta-in"),
                ("EXPLORE_TTS_COMMAND", "espeak-ng -v ta"),
            ]),
            || None,
            || None,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model_id, "gemini-2.0-flash");
        assert_eq!(config.language, "ta-IN");
        assert_eq!(
            config.tts_command,
            Some(vec!["espeak-ng".to_string(), "-v".to_string(), "ta".to_string()])
        );
    }

    #[test]
    fn saved_language_wins_over_env() {
        let config = resolve(
            env_of(&[("GEMINI_API_KEY", "k"), ("EXPLORE_LANGUAGE", "ta-IN")]),
            || None,
            || Some("en-US".to_string()),
        )
        .unwrap();
        assert_eq!(config.language, "en-US");
    }

    #[test]
    fn unknown_language_falls_back_to_default() {
        let config = resolve(
            env_of(&[("GEMINI_API_KEY", "k"), ("EXPLORE_LANGUAGE", "klingon")]),
            || None,
            || None,
        )
        .unwrap();
        assert_eq!(config.language, "hi-IN");
    }
}
