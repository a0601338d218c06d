//! HTTP client crate for the VectorGo service.
//!
//! This crate provides the bearer-token session store, the plain REST
//! operations (search, stats, reset, delete, health), and the streaming
//! upload client that consumes the server's newline-delimited JSON
//! progress stream.
//!
//! # Example
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use vectorgo_api::{ApiClient, ProgressReporter, UploadRequest};
//! use vectorgo_core::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(&AppConfig::default());
//! let request = UploadRequest::new("paper.pdf", std::fs::read("paper.pdf")?);
//! let result = client
//!     .upload(request, &ProgressReporter::noop(), CancellationToken::new())
//!     .await?;
//! println!("indexed {}", result.filename);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod progress;
pub mod session;
pub mod types;
pub mod upload;

// Re-export main types
pub use client::ApiClient;
pub use progress::{ProgressCallback, ProgressReporter};
pub use session::TokenStore;
pub use types::{
    CollectionStats, DeleteOutcome, ProcessingResult, ResetOutcome, SearchResult, ServiceHealth,
};
pub use upload::UploadRequest;
