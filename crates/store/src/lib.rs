//! Upload state store for VectorGo clients.
//!
//! A single shared mutable state value with observer-style
//! subscriptions: every transition runs alone, and registered listeners
//! are notified synchronously with a fully-formed snapshot after each
//! one. The bundled CLI drives this from the upload stream client's
//! progress callbacks; any other frontend can subscribe the same way.

mod store;

pub use store::{Listener, ListenerId, UploadState, UploadStore};
