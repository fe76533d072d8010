//! HTTP upload and query surface
//!
//! Serves the embedded explorer page and a small JSON API: upload (single
//! and batch) with tabular conversion, per-session active-document
//! selection, deletion, and free-text section search over the active
//! document.

pub mod handler;
pub mod server;

pub use server::{router, AppState, HttpServer, MAX_UPLOAD_BYTES, REFERENCE_DOCUMENT};
