//! Observer-backed container for in-flight upload state.

use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Listener invoked with a state snapshot after every transition.
pub type Listener = Arc<dyn Fn(&UploadState) + Send + Sync>;

/// Handle for removing a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Snapshot of the upload currently in flight, if any.
///
/// Invariant: `cancel` is present exactly while `uploading` is true.
#[derive(Debug, Clone, Default)]
pub struct UploadState {
    pub uploading: bool,
    pub file_name: String,
    pub progress: String,
    pub cancel: Option<CancellationToken>,
}

impl UploadState {
    /// True when the state equals the idle initial state.
    pub fn is_idle(&self) -> bool {
        !self.uploading
            && self.file_name.is_empty()
            && self.progress.is_empty()
            && self.cancel.is_none()
    }
}

struct Inner {
    state: UploadState,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

/// Shared store tracking at most one in-flight upload.
///
/// Transitions serialize through a mutex, so readers always observe a
/// fully-formed state. Listeners run after the lock is released; a
/// listener may call back into the store without deadlocking.
pub struct UploadStore {
    inner: Mutex<Inner>,
}

impl UploadStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: UploadState::default(),
                listeners: Vec::new(),
                next_listener: 0,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("upload store mutex poisoned")
    }

    /// Register a listener. It is immediately invoked with the current
    /// state, then again after every transition.
    pub fn subscribe(&self, listener: Listener) -> ListenerId {
        let (id, snapshot) = {
            let mut inner = self.lock();
            let id = ListenerId(inner.next_listener);
            inner.next_listener += 1;
            inner.listeners.push((id, Arc::clone(&listener)));
            (id, inner.state.clone())
        };
        listener(&snapshot);
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: ListenerId) {
        self.lock().listeners.retain(|(other, _)| *other != id);
    }

    /// Current state, cloned.
    pub fn snapshot(&self) -> UploadState {
        self.lock().state.clone()
    }

    /// Mark an upload as started and record its cancellation handle.
    pub fn start_upload(&self, file_name: impl Into<String>, cancel: CancellationToken) {
        let file_name = file_name.into();
        self.transition(|state| {
            state.uploading = true;
            state.file_name = file_name;
            state.progress = "Starting upload...".to_string();
            state.cancel = Some(cancel);
            true
        });
    }

    /// Replace the progress text. A no-op while no upload is in flight.
    pub fn update_progress(&self, message: impl Into<String>) {
        let message = message.into();
        self.transition(|state| {
            if !state.uploading {
                return false;
            }
            state.progress = message;
            true
        });
    }

    /// Restore the idle initial state.
    pub fn complete_upload(&self) {
        self.reset();
    }

    /// Restore the idle initial state.
    pub fn reset(&self) {
        self.transition(|state| {
            *state = UploadState::default();
            true
        });
    }

    /// Signal the in-flight upload to abort (if any), then restore the
    /// idle state. Idempotent; safe to call while idle.
    pub fn cancel_upload(&self) {
        let (cancel, snapshot, listeners) = {
            let mut inner = self.lock();
            let cancel = inner.state.cancel.take();
            inner.state = UploadState::default();
            (cancel, inner.state.clone(), listener_arcs(&inner))
        };

        if let Some(cancel) = cancel {
            tracing::info!("Cancelling in-flight upload");
            cancel.cancel();
        }

        notify(&listeners, &snapshot);
    }

    /// Run one state transition and, if it reports a change, notify
    /// listeners with the new snapshot outside the lock.
    fn transition(&self, apply: impl FnOnce(&mut UploadState) -> bool) {
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            if !apply(&mut inner.state) {
                return;
            }
            (inner.state.clone(), listener_arcs(&inner))
        };
        notify(&listeners, &snapshot);
    }
}

impl Default for UploadStore {
    fn default() -> Self {
        Self::new()
    }
}

fn listener_arcs(inner: &Inner) -> Vec<Listener> {
    inner
        .listeners
        .iter()
        .map(|(_, listener)| Arc::clone(listener))
        .collect()
}

fn notify(listeners: &[Listener], snapshot: &UploadState) {
    for listener in listeners {
        listener(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn recording_listener() -> (Listener, Arc<Mutex<Vec<UploadState>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let listener: Listener = Arc::new(move |state: &UploadState| {
            sink.lock().unwrap().push(state.clone());
        });
        (listener, seen)
    }

    #[test]
    fn test_round_trip_restores_initial_state() {
        let store = UploadStore::new();
        store.start_upload("a.pdf", CancellationToken::new());
        store.update_progress("parsing");
        store.complete_upload();

        let state = store.snapshot();
        assert!(state.is_idle());
        assert_eq!(state.file_name, "");
        assert_eq!(state.progress, "");
        assert!(!state.uploading);
        assert!(state.cancel.is_none());
    }

    #[test]
    fn test_start_upload_sets_initial_progress() {
        let store = UploadStore::new();
        store.start_upload("a.pdf", CancellationToken::new());

        let state = store.snapshot();
        assert!(state.uploading);
        assert_eq!(state.file_name, "a.pdf");
        assert_eq!(state.progress, "Starting upload...");
        assert!(state.cancel.is_some());
    }

    #[test]
    fn test_update_progress_while_idle_is_noop() {
        let store = UploadStore::new();
        let (listener, seen) = recording_listener();
        store.subscribe(listener);
        let subscribed_calls = seen.lock().unwrap().len();

        store.update_progress("should vanish");

        assert!(store.snapshot().is_idle());
        // No notification either.
        assert_eq!(seen.lock().unwrap().len(), subscribed_calls);
    }

    #[test]
    fn test_cancel_upload_fires_token_and_resets() {
        let store = UploadStore::new();
        let token = CancellationToken::new();
        store.start_upload("a.pdf", token.clone());

        store.cancel_upload();

        assert!(token.is_cancelled());
        assert!(store.snapshot().is_idle());
    }

    #[test]
    fn test_cancel_upload_is_idempotent() {
        let store = UploadStore::new();
        store.cancel_upload();
        store.cancel_upload();
        assert!(store.snapshot().is_idle());

        let token = CancellationToken::new();
        store.start_upload("a.pdf", token.clone());
        store.cancel_upload();
        store.cancel_upload();
        assert!(token.is_cancelled());
        assert!(store.snapshot().is_idle());
    }

    #[test]
    fn test_cancel_handle_present_iff_uploading() {
        let store = UploadStore::new();
        assert!(store.snapshot().cancel.is_none());

        store.start_upload("a.pdf", CancellationToken::new());
        let state = store.snapshot();
        assert_eq!(state.uploading, state.cancel.is_some());

        store.complete_upload();
        let state = store.snapshot();
        assert_eq!(state.uploading, state.cancel.is_some());
    }

    #[test]
    fn test_subscriber_sees_current_state_immediately() {
        let store = UploadStore::new();
        store.start_upload("a.pdf", CancellationToken::new());

        let (listener, seen) = recording_listener();
        store.subscribe(listener);

        let states = seen.lock().unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].file_name, "a.pdf");
    }

    #[test]
    fn test_transitions_notify_in_order() {
        let store = UploadStore::new();
        let (listener, seen) = recording_listener();
        store.subscribe(listener);

        store.start_upload("a.pdf", CancellationToken::new());
        store.update_progress("chunking");
        store.update_progress("embedding");
        store.complete_upload();

        let progress: Vec<String> = seen
            .lock()
            .unwrap()
            .iter()
            .map(|state| state.progress.clone())
            .collect();
        assert_eq!(
            progress,
            vec!["", "Starting upload...", "chunking", "embedding", ""]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = UploadStore::new();
        let (listener, seen) = recording_listener();
        let id = store.subscribe(listener);
        store.unsubscribe(id);

        store.start_upload("a.pdf", CancellationToken::new());

        // Only the immediate subscription callback was delivered.
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_listener_may_reenter_store() {
        let store = Arc::new(UploadStore::new());
        let reentrant = Arc::clone(&store);
        store.subscribe(Arc::new(move |state: &UploadState| {
            if state.uploading {
                // Reading back in from a notification must not deadlock.
                let _ = reentrant.snapshot();
            }
        }));

        store.start_upload("a.pdf", CancellationToken::new());
        store.complete_upload();
    }
}
