//! HTTP server for the document explorer
//!
//! Holds the upload directory, the reference-document path, and the
//! per-session active-file map. The router is built separately from the
//! listener so tests can drive it with `tower::ServiceExt`.

use axum::{
    extract::DefaultBodyLimit,
    response::{Html, IntoResponse},
    routing::{delete, get, post},
    Router,
};
use rust_embed::RustEmbed;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use super::handler;

/// Upload size cap.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Name under which the built-in reference document is exposed to clients.
/// It is always listed, always selectable, and never deletable.
pub const REFERENCE_DOCUMENT: &str = "principles.json";

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

async fn index_handler() -> impl IntoResponse {
    match Assets::get("index.html") {
        Some(asset) => {
            Html(String::from_utf8_lossy(asset.data.as_ref()).to_string()).into_response()
        }
        None => (axum::http::StatusCode::NOT_FOUND, "missing UI asset").into_response(),
    }
}

/// Shared server state.
pub struct AppState {
    uploads_dir: PathBuf,
    reference_path: PathBuf,
    /// Active document per client session. Sessions that never selected or
    /// uploaded anything fall back to the reference document.
    sessions: RwLock<HashMap<String, String>>,
}

impl AppState {
    pub fn new(uploads_dir: impl Into<PathBuf>, reference_path: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
            reference_path: reference_path.into(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn uploads_dir(&self) -> &PathBuf {
        &self.uploads_dir
    }

    /// The active document name for a session.
    pub async fn active_file(&self, session: &str) -> String {
        self.sessions
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_else(|| REFERENCE_DOCUMENT.to_string())
    }

    /// Set the active document for a session.
    pub async fn set_active(&self, session: &str, filename: &str) {
        self.sessions
            .write()
            .await
            .insert(session.to_string(), filename.to_string());
    }

    /// Reset every session pointing at `filename` back to the reference
    /// document. Used after a delete.
    pub async fn reset_sessions_for(&self, filename: &str) {
        let mut sessions = self.sessions.write().await;
        for active in sessions.values_mut() {
            if active == filename {
                *active = REFERENCE_DOCUMENT.to_string();
            }
        }
    }

    /// On-disk path of a named document.
    pub fn document_path(&self, filename: &str) -> PathBuf {
        if filename == REFERENCE_DOCUMENT {
            self.reference_path.clone()
        } else {
            self.uploads_dir.join(filename)
        }
    }

    /// Uploaded document names, sorted. The reference document is not listed
    /// here; handlers prepend it so it always appears first.
    pub fn uploaded_files(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.uploads_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        let mut files: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".json"))
            .collect();
        files.sort();
        files
    }

    /// Load a named document, absorbing failures into `None`.
    pub fn load_document(&self, filename: &str) -> Option<Value> {
        let path = self.document_path(filename);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("failed to read {:?}: {}", path, e);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("failed to parse {:?}: {}", path, e);
                None
            }
        }
    }
}

/// Build the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/status", get(handler::status))
        .route("/api/files", get(handler::list_files))
        .route("/api/files/:name/select", post(handler::select_file))
        .route("/api/files/:name", delete(handler::delete_file))
        .route("/api/upload", post(handler::upload))
        .route("/api/upload-batch", post(handler::upload_batch))
        .route("/api/query", post(handler::query))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP server managing the explorer API and static assets.
pub struct HttpServer {
    state: Arc<AppState>,
    port: u16,
}

impl HttpServer {
    /// Create a new HTTP server.
    pub fn new(state: Arc<AppState>, port: u16) -> Self {
        Self { state, port }
    }

    /// Start the HTTP server.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(self.state.uploads_dir())?;

        let app = router(Arc::clone(&self.state));
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!(
            "document explorer available at http://localhost:{}",
            self.port
        );

        axum::serve(listener, app).await?;

        Ok(())
    }
}
