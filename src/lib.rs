//! BPMLens — business process management industry insight engine
//!
//! Answers questions about structured industry-analysis documents (Porter's
//! Five Forces, Balanced Scorecard, value chain) by matching the question
//! against a fixed, ordered pattern table and rendering a templated markdown
//! answer from the matched document subtree. Unmatched questions fall back
//! to a generic substring search across the whole document.
//!
//! # Architecture
//!
//! - [`document`]: reference document plus a lazily loaded registry of
//!   subject documents, with section accessors that blend both.
//! - [`search`]: generic recursive substring search over JSON trees.
//! - [`qa`]: the ordered dispatch table, per-topic answer renderers, and the
//!   search fallback.
//! - [`ingest`]: heuristic conversion of uploaded CSV/workbook tables into
//!   the nested document shape.
//! - [`http`]: axum upload/query surface with per-session active documents.
//! - [`console`]: blocking numbered-menu loop for interactive analysis.
//!
//! # Example
//!
//! ```rust
//! use bpmlens::document::DocumentStore;
//! use bpmlens::qa::QaEngine;
//!
//! // An empty data directory yields a store with nothing registered;
//! // questions then receive the fixed guidance message.
//! let store = DocumentStore::open("no_such_dir");
//! let engine = QaEngine::new();
//! let answer = engine.answer(&store, "how big is the market?");
//! assert!(answer.contains("select an industry"));
//! ```

#![warn(clippy::all)]

pub mod console;
pub mod document;
pub mod http;
pub mod ingest;
pub mod qa;
pub mod search;

// Re-export main types for convenience
pub use document::{DocumentStore, StoreError, StoreResult};
pub use ingest::{convert, normalize_csv, normalize_workbook};
pub use qa::{QaEngine, Topic};
pub use search::{search, search_across_document, SearchHit};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
