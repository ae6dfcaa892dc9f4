//! Chat and API error types.

use crate::core::media::MediaError;

/// Errors from a model request, including the input checks made before sending it.
#[derive(Debug)]
pub enum ChatError {
    ApiAuth(String),
    ApiMessage(String),
    /// The image or audio file could not be used.
    Media(MediaError),
    /// The typed question was empty or whitespace.
    EmptyQuestion,
    /// The transcriber returned no text for the audio clip.
    EmptyTranscript,
    /// The request was cancelled by the user.
    Cancelled,
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::ApiAuth(msg) => write!(f, "{}", msg),
            ChatError::ApiMessage(msg) => write!(f, "API error: {}", msg),
            ChatError::Media(e) => write!(f, "{}", e),
            ChatError::EmptyQuestion => write!(f, "empty question"),
            ChatError::EmptyTranscript => write!(f, "no speech was recognized in the audio"),
            ChatError::Cancelled => write!(f, "Request cancelled"),
            ChatError::Other(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Media(e) => Some(e),
            ChatError::Other(e) => e.source(),
            ChatError::ApiAuth(_)
            | ChatError::ApiMessage(_)
            | ChatError::EmptyQuestion
            | ChatError::EmptyTranscript
            | ChatError::Cancelled => None,
        }
    }
}

impl From<MediaError> for ChatError {
    fn from(e: MediaError) -> Self {
        ChatError::Media(e)
    }
}

/// Map async-openai or API errors into ChatError.
pub fn map_api_error<E>(e: E) -> ChatError
where
    E: std::fmt::Display + Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    let s = e.to_string();
    if s.contains("API_KEY_INVALID")
        || s.contains("API key not valid")
        || (s.contains("401") && s.to_lowercase().contains("unauthorized"))
    {
        return ChatError::ApiAuth(
            "API error: the API key was rejected. Check GEMINI_API_KEY in .env or run `explore config set-api-key`.".to_string(),
        );
    }
    if s.contains("\"error\"")
        && let Some((_, rest)) = s.split_once("\"message\":")
        && let Some((_, rest)) = rest.split_once('"')
        && let Some((msg, _)) = rest.split_once('"')
    {
        return ChatError::ApiMessage(msg.to_string());
    }
    ChatError::Other(e.into())
}
