//! Document storage and selection
//!
//! Holds the shared reference document (frameworks, methodologies, metrics)
//! and the registry of subject documents, one per analyzed industry. Subject
//! documents are discovered by filename convention and loaded lazily on
//! first selection.

pub mod store;

pub use store::{DocumentStore, StoreError, StoreResult, REFERENCE_FILE, SUBJECT_SUFFIX};
