//! Wire types for the VectorGo HTTP API.
//!
//! Key casing follows the server: the upload result uses camelCase, the
//! stats endpoint snake_case.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Terminal result of a completed upload, as reported by the final
/// event of the progress stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub status: String,
    pub filename: String,
    #[serde(rename = "chunkSize")]
    pub chunk_size: u32,
    #[serde(rename = "chunkStride")]
    pub chunk_stride: u32,
}

/// Search response. Columnar layout: one inner sequence per query, and
/// the client always sends exactly one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub ids: Vec<Vec<String>>,
    pub documents: Vec<Vec<String>>,
    pub metadatas: Vec<Vec<serde_json::Value>>,
    pub distances: Vec<Vec<f32>>,
}

impl SearchResult {
    /// Number of hits for the (single) query.
    pub fn hit_count(&self) -> usize {
        self.ids.first().map_or(0, |ids| ids.len())
    }

    /// True when the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.hit_count() == 0
    }
}

/// Collection statistics from `GET /stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_chunks: u64,
    pub total_files: u64,
    pub files: Vec<String>,
    pub file_chunk_counts: HashMap<String, u64>,
}

/// Acknowledgement from `POST /reset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub status: String,
    #[serde(default)]
    pub collection: Option<String>,
}

/// Acknowledgement from `DELETE /files/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub status: String,
    pub filename: String,
}

/// Service identity from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Credentials sent to `POST /login`.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Token returned by a successful login.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}
