//! Streaming chat completion: chunk parsing, size limit, cancellation.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use futures::StreamExt;
use serde_json::Value;

use super::{ChatError, RequestOptions, map_api_error};

/// Max content size (2MB) to prevent unbounded memory growth from malformed streams.
pub(super) const MAX_CONTENT_BYTES: usize = 2 * 1024 * 1024;

/// Text delta carried by a streaming chunk, or the provider error it reports.
pub(super) fn chunk_text(chunk: &Value) -> Result<Option<&str>, ChatError> {
    if let Some(err) = chunk.get("error") {
        let msg = err
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        return Err(ChatError::ApiMessage(msg.to_string()));
    }
    Ok(chunk
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice["delta"]["content"].as_str())
        .filter(|s| !s.is_empty()))
}

/// Send a streaming request and return the full answer text.
///
/// Each content delta is forwarded to `on_content_chunk`. The request and every chunk read
/// race against the cancellation token, if any.
pub(super) async fn collect_answer(
    client: &Client<OpenAIConfig>,
    body: Value,
    options: &RequestOptions,
) -> Result<String, ChatError> {
    let cancel_token = options.cancel_token.as_ref();
    if cancel_token.is_some_and(|t| t.is_cancelled()) {
        return Err(ChatError::Cancelled);
    }

    if let Some(ref progress) = options.on_progress {
        progress("Calling API...");
    }

    let chat_api = client.chat();
    let stream_future = chat_api.create_stream_byot::<_, Value>(body);

    let stream_result = if let Some(token) = cancel_token {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                return Err(ChatError::Cancelled);
            }
            result = stream_future => result,
        }
    } else {
        stream_future.await
    };

    let mut stream = stream_result.map_err(map_api_error)?;
    let mut full_content = String::new();

    loop {
        let chunk_opt = if let Some(token) = cancel_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return Err(ChatError::Cancelled);
                }
                chunk = stream.next() => chunk,
            }
        } else {
            stream.next().await
        };

        let Some(chunk_result) = chunk_opt else { break };
        let chunk = chunk_result.map_err(map_api_error)?;

        let Some(content) = chunk_text(&chunk)? else {
            continue;
        };
        if full_content.len() + content.len() > MAX_CONTENT_BYTES {
            log::warn!("Answer exceeded {} bytes, truncating", MAX_CONTENT_BYTES);
            break;
        }
        full_content.push_str(content);
        if let Some(ref cb) = options.on_content_chunk {
            cb(content);
        }
    }

    log::debug!("Answer complete ({} bytes)", full_content.len());
    Ok(full_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chunk_text_reads_delta_content() {
        let chunk = json!({"choices": [{"index": 0, "delta": {"content": "Title: "}}]});
        assert_eq!(chunk_text(&chunk).unwrap(), Some("Title: "));
    }

    #[test]
    fn chunk_text_skips_empty_and_role_only_deltas() {
        let role_only = json!({"choices": [{"delta": {"role": "assistant"}}]});
        assert_eq!(chunk_text(&role_only).unwrap(), None);
        let empty = json!({"choices": [{"delta": {"content": ""}}]});
        assert_eq!(chunk_text(&empty).unwrap(), None);
        let no_choices = json!({"choices": []});
        assert_eq!(chunk_text(&no_choices).unwrap(), None);
    }

    #[test]
    fn chunk_text_surfaces_provider_error() {
        let chunk = json!({"error": {"message": "quota exceeded"}});
        match chunk_text(&chunk) {
            Err(ChatError::ApiMessage(msg)) => assert_eq!(msg, "quota exceeded"),
            other => panic!("expected ApiMessage, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let config = OpenAIConfig::new()
            .with_api_base("http://127.0.0.1:9")
            .with_api_key("unused");
        let client = Client::with_config(config);
        let token = tokio_util::sync::CancellationToken::new();
        token.cancel();
        let options = RequestOptions {
            cancel_token: Some(token),
            ..Default::default()
        };
        let result = collect_answer(&client, json!({"model": "m"}), &options).await;
        assert!(matches!(result, Err(ChatError::Cancelled)));
    }
}
