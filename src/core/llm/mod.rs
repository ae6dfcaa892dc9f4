//! Model requests: image analysis, doubt answering, and speech transcription.
//!
//! All three go through one OpenAI-compatible streaming endpoint (Gemini by default).

mod error;
mod prompts;
mod stream;

use async_openai::Client;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::languages::SpeechLanguage;
use crate::core::media::{AudioUpload, ImageUpload};
use crate::core::solution::{self, ParsedSolution};

pub use error::{ChatError, map_api_error};

/// Callback for progress updates during a request (e.g. "Calling API...").
pub type OnProgress = Box<dyn Fn(&str) + Send + Sync>;

/// Callback for each streamed content chunk (text only).
pub type OnContentChunk = Box<dyn Fn(&str) + Send + Sync>;

/// Progress/streaming hooks and cancellation for one request.
#[derive(Default)]
pub struct RequestOptions {
    pub on_progress: Option<OnProgress>,
    pub on_content_chunk: Option<OnContentChunk>,
    pub cancel_token: Option<CancellationToken>,
}

impl RequestOptions {
    pub(crate) fn progress(&self, msg: &str) {
        if let Some(ref cb) = self.on_progress {
            cb(msg);
        }
    }
}

/// Ask the model to title and explain an image, then split its answer.
pub async fn analyze_image(
    config: &Config,
    model: &str,
    image: &ImageUpload,
    options: &RequestOptions,
) -> Result<ParsedSolution, ChatError> {
    let client = Client::with_config(config.openai_config.clone());
    log::info!(
        "Analyzing {} image ({} bytes) with {}",
        image.mime_type,
        image.size_bytes(),
        model
    );
    let body = json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": prompts::IMAGE_PROMPT },
                { "type": "image_url", "image_url": { "url": image.data_url() } },
            ],
        }],
        "stream": true,
    });
    let raw = stream::collect_answer(&client, body, options).await?;
    Ok(solution::split(&raw))
}

/// Ask the model for a step-by-step answer to a typed or transcribed question.
/// Returns the raw answer text.
pub async fn analyze_text(
    config: &Config,
    model: &str,
    question: &str,
    options: &RequestOptions,
) -> Result<String, ChatError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ChatError::EmptyQuestion);
    }
    let client = Client::with_config(config.openai_config.clone());
    log::info!("Answering question ({} chars) with {}", question.len(), model);
    let body = json!({
        "model": model,
        "messages": [{ "role": "user", "content": prompts::doubt_prompt(question) }],
        "stream": true,
    });
    stream::collect_answer(&client, body, options).await
}

/// Transcribe a spoken question. Fails with `EmptyTranscript` when nothing was recognized.
pub async fn transcribe_audio(
    config: &Config,
    model: &str,
    audio: &AudioUpload,
    language: &SpeechLanguage,
    options: &RequestOptions,
) -> Result<String, ChatError> {
    let client = Client::with_config(config.openai_config.clone());
    log::info!(
        "Transcribing {} audio ({} bytes, {}) with {}",
        audio.format,
        audio.size_bytes(),
        language.code,
        model
    );
    let body = json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": prompts::transcription_prompt(language) },
                {
                    "type": "input_audio",
                    "input_audio": { "data": audio.to_base64(), "format": audio.format },
                },
            ],
        }],
        "stream": true,
    });
    // Transcripts are not streamed to the caller; only the answer that follows is.
    let quiet = RequestOptions {
        on_progress: None,
        on_content_chunk: None,
        cancel_token: options.cancel_token.clone(),
    };
    let transcript = stream::collect_answer(&client, body, &quiet).await?;
    let transcript = transcript.trim();
    if transcript.is_empty() {
        return Err(ChatError::EmptyTranscript);
    }
    Ok(transcript.to_string())
}
