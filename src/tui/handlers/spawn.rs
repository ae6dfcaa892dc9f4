//! Spawns assistant requests in a background thread with progress/stream/result channels.

use std::sync::Arc;
use std::sync::mpsc;

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::assistant::{self, Submission};
use crate::core::config::Config;
use crate::core::llm;

use super::PendingRequest;

/// Spawn a request for `submission`. Returns a PendingRequest with channels for progress,
/// streamed content, and the final entry.
pub fn spawn_request(
    rt: &Arc<Runtime>,
    config: Arc<Config>,
    model_id: String,
    submission: Submission,
) -> PendingRequest {
    let (progress_tx, progress_rx) = mpsc::channel();
    let (stream_tx, stream_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();
    let cancel_token = CancellationToken::new();
    let cancel_token_clone = cancel_token.clone();
    let rt_clone = Arc::clone(rt);

    std::thread::spawn(move || {
        let on_progress: llm::OnProgress = Box::new(move |s| {
            let _ = progress_tx.send(s.to_string());
        });
        let on_content_chunk: llm::OnContentChunk = Box::new(move |s| {
            let _ = stream_tx.send(s.to_string());
        });
        let options = llm::RequestOptions {
            on_progress: Some(on_progress),
            on_content_chunk: Some(on_content_chunk),
            cancel_token: Some(cancel_token_clone),
        };
        let result = rt_clone.block_on(assistant::solve(
            config.as_ref(),
            &model_id,
            &submission,
            &options,
        ));
        let _ = result_tx.send(result);
    });

    PendingRequest {
        progress_rx,
        stream_rx,
        result_rx,
        cancel_token,
    }
}
