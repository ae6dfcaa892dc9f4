//! Build script: validates speech-languages.json at compile time.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let config_path: PathBuf = [&manifest_dir, "config", "speech-languages.json"]
        .iter()
        .collect();
    println!("cargo:rerun-if-changed={}", config_path.display());
    let json = std::fs::read_to_string(&config_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. speech-languages.json must exist and be valid.",
            config_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    struct SpeechLanguageEntry {
        code: String,
        name: String,
    }
    let entries: Vec<SpeechLanguageEntry> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "speech-languages.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    if entries.is_empty() {
        panic!("speech-languages.json must list at least one language");
    }
    for entry in &entries {
        if entry.code.trim().is_empty() || entry.name.trim().is_empty() {
            panic!("speech-languages.json has an entry with an empty code or name");
        }
    }
    if !entries.iter().any(|e| e.code == "hi-IN") {
        panic!("speech-languages.json must contain the default language hi-IN");
    }
}
