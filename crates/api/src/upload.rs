//! Streaming upload client.
//!
//! Drives a single PDF upload through the `/upload` endpoint and
//! consumes the newline-delimited JSON stream the server answers with.
//! Each complete line is one progress event; the final event either
//! reports completion or carries an error. Cancellation is cooperative
//! and observed between chunk reads only — never mid-line.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::fmt::Display;
use tokio_util::sync::CancellationToken;
use vectorgo_core::{AppError, AppResult};

use crate::client::{error_message, ApiClient};
use crate::progress::ProgressReporter;
use crate::types::ProcessingResult;

/// Status value marking the terminal success event.
const COMPLETED_STATUS: &str = "completed";

/// One file to upload, plus optional chunking parameters forwarded to
/// the server as form fields.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File name reported to the server and echoed in the result
    pub file_name: String,

    /// Raw file contents
    pub bytes: Vec<u8>,

    /// Words per chunk (server default when unset)
    pub chunk_size: Option<u32>,

    /// Words to advance between chunks (server default when unset)
    pub chunk_stride: Option<u32>,
}

impl UploadRequest {
    /// Create an upload request with required fields.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            chunk_size: None,
            chunk_stride: None,
        }
    }

    /// Set the chunk size in words.
    pub fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Set the chunk stride in words.
    pub fn with_chunk_stride(mut self, chunk_stride: u32) -> Self {
        self.chunk_stride = Some(chunk_stride);
        self
    }
}

/// One line of the progress stream. Field presence decides the meaning:
/// `error` wins, then a `completed` status, then any other status.
#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(rename = "chunkSize", default)]
    chunk_size: Option<u32>,
    #[serde(rename = "chunkStride", default)]
    chunk_stride: Option<u32>,
}

impl ApiClient {
    /// Upload one file and follow its progress stream to the end.
    ///
    /// At most one attempt per call; no retries. Non-terminal status
    /// events are forwarded to `progress` in arrival order. Returns the
    /// terminal [`ProcessingResult`] on success, `AppError::UploadCancelled`
    /// when `cancel` fires first, `AppError::Api` when the server rejects
    /// the request outright, and `AppError::Upload` for an explicit error
    /// event, a transport failure mid-stream, or a stream that ends
    /// without a completion event.
    pub async fn upload(
        &self,
        request: UploadRequest,
        progress: &ProgressReporter,
        cancel: CancellationToken,
    ) -> AppResult<ProcessingResult> {
        tracing::info!(
            file = %request.file_name,
            size = request.bytes.len(),
            "Uploading file"
        );

        let mut form = Form::new().part(
            "file",
            Part::bytes(request.bytes).file_name(request.file_name.clone()),
        );
        if let Some(chunk_size) = request.chunk_size {
            form = form.text("chunkSize", chunk_size.to_string());
        }
        if let Some(chunk_stride) = request.chunk_stride {
            form = form.text("chunkStride", chunk_stride.to_string());
        }

        let response = self
            .http
            .post(self.endpoint("/upload"))
            .headers(self.tokens.auth_headers())
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("failed to send upload request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        match consume_stream(response.bytes_stream(), progress, &cancel).await? {
            Some(result) => {
                tracing::info!(file = %result.filename, "Upload completed");
                Ok(result)
            }
            None => Err(AppError::Upload(
                "stream ended without completion status".to_string(),
            )),
        }
    }
}

/// Consume the NDJSON progress stream until it ends, an error event
/// arrives, or `cancel` fires.
///
/// Chunks are processed strictly in arrival order and lines
/// left-to-right within a chunk, so progress events surface exactly as
/// the server emitted them. A trailing line without a terminating
/// newline is buffered until the next chunk (or the end of the stream)
/// completes it.
async fn consume_stream<S, E>(
    stream: S,
    progress: &ProgressReporter,
    cancel: &CancellationToken,
) -> AppResult<Option<ProcessingResult>>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    tokio::pin!(stream);

    let mut buffer = String::new();
    let mut completed: Option<ProcessingResult> = None;

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Upload cancelled");
                return Err(AppError::UploadCancelled);
            }
            next = stream.next() => next,
        };

        let Some(chunk) = next else { break };
        let chunk = chunk.map_err(|e| AppError::Upload(format!("stream error: {}", e)))?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(newline) = buffer.find('\n') {
            let line: String = buffer.drain(..=newline).collect();
            if let Some(result) = interpret_line(line.trim(), progress)? {
                completed = Some(result);
            }
        }
    }

    // The server may not terminate the final line; flush whatever is
    // still buffered through the same per-line path.
    if let Some(result) = interpret_line(buffer.trim(), progress)? {
        completed = Some(result);
    }

    Ok(completed)
}

/// Parse and act on one complete line.
///
/// Returns the terminal result if this line carried one. Lines that are
/// not valid JSON are logged and skipped uniformly; the stream stays
/// usable.
fn interpret_line(
    line: &str,
    progress: &ProgressReporter,
) -> AppResult<Option<ProcessingResult>> {
    if line.is_empty() {
        return Ok(None);
    }

    let event: StreamEvent = match serde_json::from_str(line) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "Skipping malformed progress line");
            return Ok(None);
        }
    };

    if let Some(message) = event.error {
        return Err(AppError::Upload(message));
    }

    match event.status {
        Some(status) if status == COMPLETED_STATUS => {
            let filename = event
                .filename
                .ok_or_else(|| AppError::Upload("completion event missing filename".to_string()))?;
            Ok(Some(ProcessingResult {
                status,
                filename,
                chunk_size: event.chunk_size.unwrap_or_default(),
                chunk_stride: event.chunk_stride.unwrap_or_default(),
            }))
        }
        Some(status) => {
            progress.emit(&status);
            Ok(None)
        }
        None => {
            tracing::warn!("Progress line carried neither status nor error");
            Ok(None)
        }
    }
}
