//! Progress reporting for streaming uploads.
//!
//! Surfaces the server's non-terminal status events to a caller without
//! blocking the stream consumer. Events are forwarded in arrival order
//! and never concurrently for a single upload.

use std::sync::Arc;

/// Callback invoked with each non-terminal status string.
pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Reporter that forwards status events through an optional callback.
#[derive(Clone)]
pub struct ProgressReporter {
    callback: Option<ProgressCallback>,
}

impl ProgressReporter {
    /// Create a reporter with a callback.
    pub fn new(callback: ProgressCallback) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// Create a no-op reporter (no events forwarded).
    pub fn noop() -> Self {
        Self { callback: None }
    }

    /// Emit one status event.
    pub fn emit(&self, status: &str) {
        tracing::debug!(status, "Upload progress");
        if let Some(callback) = &self.callback {
            callback(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_reporter_forwards_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter = ProgressReporter::new(Arc::new(move |status: &str| {
            sink.lock().unwrap().push(status.to_string());
        }));

        reporter.emit("chunking");
        reporter.emit("embedding");

        assert_eq!(*seen.lock().unwrap(), vec!["chunking", "embedding"]);
    }

    #[test]
    fn test_noop_reporter() {
        let reporter = ProgressReporter::noop();
        reporter.emit("ignored"); // Should not panic
    }
}
