//! Submission pipeline: load the input, ask the model, and build the history entry.

use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::history::{EntryKind, HistoryEntry};
use crate::core::languages;
use crate::core::llm::{self, ChatError, RequestOptions};
use crate::core::media;

/// A question as submitted from one of the input modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Image file of the problem (stands in for a camera capture).
    Image(PathBuf),
    /// Recorded spoken question and the language it is spoken in.
    Speech { audio: PathBuf, language: String },
    /// Typed question.
    Doubt(String),
}

impl Submission {
    pub fn kind(&self) -> EntryKind {
        match self {
            Submission::Image(_) => EntryKind::Image,
            Submission::Speech { .. } => EntryKind::Speech,
            Submission::Doubt(_) => EntryKind::Doubt,
        }
    }
}

/// Run a submission end to end. The returned entry holds the raw solution text;
/// callers record it in the session history and display its flattened form.
pub async fn solve(
    config: &Config,
    model: &str,
    submission: &Submission,
    options: &RequestOptions,
) -> Result<HistoryEntry, ChatError> {
    match submission {
        Submission::Image(path) => {
            let image = media::load_image(path)?;
            options.progress("Analyzing image...");
            let parsed = llm::analyze_image(config, model, &image, options).await?;
            Ok(HistoryEntry::new(
                EntryKind::Image,
                parsed.title,
                parsed.solution,
            ))
        }
        Submission::Speech { audio, language } => {
            let language = &languages::languages()[languages::index_of(language)];
            let clip = media::load_audio(audio)?;
            options.progress(&format!("Listening ({})...", language.name));
            let transcript = llm::transcribe_audio(config, model, &clip, language, options).await?;
            options.progress(&format!("Heard: {}", transcript));
            let answer = llm::analyze_text(config, model, &transcript, options).await?;
            Ok(HistoryEntry::new(EntryKind::Speech, transcript, answer))
        }
        Submission::Doubt(question) => {
            let question = question.trim();
            if question.is_empty() {
                return Err(ChatError::EmptyQuestion);
            }
            let answer = llm::analyze_text(config, model, question, options).await?;
            Ok(HistoryEntry::new(EntryKind::Doubt, question, answer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config;
    use crate::core::media::MediaError;

    fn test_config() -> Config {
        config::resolve(
            |name| (name == config::API_KEY_ENV).then(|| "test-key".to_string()),
            || None,
            || None,
        )
        .unwrap()
    }

    #[test]
    fn submission_kinds() {
        assert_eq!(Submission::Image("a.png".into()).kind(), EntryKind::Image);
        assert_eq!(
            Submission::Speech {
                audio: "a.wav".into(),
                language: "en-US".into()
            }
            .kind(),
            EntryKind::Speech
        );
        assert_eq!(Submission::Doubt("q".into()).kind(), EntryKind::Doubt);
    }

    #[tokio::test]
    async fn blank_doubt_is_rejected_before_any_request() {
        let config = test_config();
        let result = solve(
            &config,
            "m",
            &Submission::Doubt("  \n ".into()),
            &RequestOptions::default(),
        )
        .await;
        assert!(matches!(result, Err(ChatError::EmptyQuestion)));
    }

    #[tokio::test]
    async fn missing_image_is_a_media_error() {
        let config = test_config();
        let dir = tempfile::tempdir().unwrap();
        let result = solve(
            &config,
            "m",
            &Submission::Image(dir.path().join("nope.png")),
            &RequestOptions::default(),
        )
        .await;
        assert!(matches!(result, Err(ChatError::Media(MediaError::Io(_, _)))));
    }

    #[tokio::test]
    async fn unsupported_audio_is_a_media_error() {
        let config = test_config();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "just text").unwrap();
        let result = solve(
            &config,
            "m",
            &Submission::Speech {
                audio: path,
                language: "hi-IN".into(),
            },
            &RequestOptions::default(),
        )
        .await;
        assert!(matches!(
            result,
            Err(ChatError::Media(MediaError::UnsupportedAudio(_)))
        ));
    }
}
