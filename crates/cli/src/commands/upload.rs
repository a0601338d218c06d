//! Upload command handler.
//!
//! Wires the streaming upload client to the shared upload state store:
//! progress events from the stream update the store, a subscriber prints
//! them, and Ctrl-C cancels the in-flight request cooperatively.

use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vectorgo_api::{ApiClient, ProgressReporter, UploadRequest};
use vectorgo_core::{AppConfig, AppError, AppResult};
use vectorgo_store::UploadStore;

/// Upload a PDF and follow its processing progress
#[derive(Args, Debug)]
pub struct UploadCommand {
    /// Path to the PDF file
    pub file: PathBuf,

    /// Words per chunk (server default when omitted)
    #[arg(long)]
    pub chunk_size: Option<u32>,

    /// Words to advance between chunks (server default when omitted)
    #[arg(long)]
    pub chunk_stride: Option<u32>,

    /// Output the final result as JSON
    #[arg(long)]
    pub json: bool,
}

impl UploadCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let file_name = self
            .file
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Config(format!("not a file path: {}", self.file.display()))
            })?;
        let bytes = tokio::fs::read(&self.file).await?;

        let mut request = UploadRequest::new(file_name.clone(), bytes);
        if let Some(chunk_size) = self.chunk_size {
            request = request.with_chunk_size(chunk_size);
        }
        if let Some(chunk_stride) = self.chunk_stride {
            request = request.with_chunk_stride(chunk_stride);
        }

        let store = Arc::new(UploadStore::new());
        store.subscribe(Arc::new(|state| {
            if state.uploading {
                eprintln!("{}", state.progress);
            }
        }));

        let cancel = CancellationToken::new();
        store.start_upload(file_name, cancel.clone());

        // Ctrl-C maps to cooperative cancellation of the stream read.
        let ctrlc_store = Arc::clone(&store);
        let ctrlc = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                ctrlc_store.cancel_upload();
            }
        });

        let progress_store = Arc::clone(&store);
        let progress = ProgressReporter::new(Arc::new(move |status: &str| {
            progress_store.update_progress(status);
        }));

        let client = ApiClient::new(config);
        let result = client.upload(request, &progress, cancel).await;
        ctrlc.abort();

        match result {
            Ok(done) => {
                store.complete_upload();
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&done)?);
                } else {
                    println!(
                        "Processed {} (chunk size {}, stride {})",
                        done.filename, done.chunk_size, done.chunk_stride
                    );
                }
                Ok(())
            }
            Err(AppError::UploadCancelled) => {
                store.reset();
                println!("Upload cancelled.");
                Ok(())
            }
            Err(err) => {
                store.reset();
                Err(err)
            }
        }
    }
}
