//! Speech input languages.
//!
//! Loaded from `config/speech-languages.json` (embedded at compile time, validated by build.rs).

use std::sync::OnceLock;

use serde::Deserialize;

/// Default speech language (BCP-47 code).
pub const DEFAULT_LANGUAGE: &str = "hi-IN";

/// A language the transcriber is told to expect.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SpeechLanguage {
    pub code: String,
    pub name: String,
}

fn load_languages() -> Vec<SpeechLanguage> {
    let json = include_str!("../../config/speech-languages.json");
    serde_json::from_str(json).expect("speech-languages.json must be valid")
}

static LANGUAGES: OnceLock<Vec<SpeechLanguage>> = OnceLock::new();

/// All supported speech languages, in menu order.
pub fn languages() -> &'static [SpeechLanguage] {
    LANGUAGES.get_or_init(load_languages)
}

/// Find a language by code (case-insensitive).
pub fn find(code: &str) -> Option<&'static SpeechLanguage> {
    let code = code.trim();
    languages().iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

/// Index of a language in [`languages`], falling back to the default language.
pub fn index_of(code: &str) -> usize {
    let code = code.trim();
    languages()
        .iter()
        .position(|l| l.code.eq_ignore_ascii_case(code))
        .or_else(|| languages().iter().position(|l| l.code == DEFAULT_LANGUAGE))
        .unwrap_or(0)
}

/// Step through the language list, wrapping at both ends.
pub fn cycle(index: usize, forward: bool) -> usize {
    let len = languages().len();
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
