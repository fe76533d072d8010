//! HTTP handlers for the document explorer API

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

use super::server::{AppState, REFERENCE_DOCUMENT};
use crate::ingest;
use crate::search;

/// Extensions accepted by the upload surface.
const ALLOWED_EXTENSIONS: [&str; 4] = ["json", "csv", "xlsx", "xls"];

/// Session identity comes from an `x-session-id` header; clients that do not
/// send one share the default session.
fn session_id(headers: &HeaderMap) -> String {
    headers
        .get("x-session-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or("default")
        .to_string()
}

fn extension(filename: &str) -> String {
    filename.rsplit('.').next().unwrap_or("").to_lowercase()
}

fn allowed_file(filename: &str) -> bool {
    filename.contains('.') && ALLOWED_EXTENSIONS.contains(&extension(filename).as_str())
}

/// Reduce an uploaded filename to a safe basename: path components are
/// stripped and anything outside `[A-Za-z0-9._-]` is mapped to `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();
    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Handler for system status
pub async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "documents": {
            "uploaded": state.uploaded_files().len(),
        }
    }))
}

/// List selectable documents and the caller's active document.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let session = session_id(&headers);
    let mut files = vec![REFERENCE_DOCUMENT.to_string()];
    files.extend(state.uploaded_files());
    Json(json!({
        "files": files,
        "active": state.active_file(&session).await,
    }))
}

/// Make a named document the session's active document.
pub async fn select_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> axum::response::Response {
    let session = session_id(&headers);
    let known = name == REFERENCE_DOCUMENT || state.uploaded_files().contains(&name);
    if !known {
        return error_response(StatusCode::NOT_FOUND, &format!("file {name} not found"));
    }
    state.set_active(&session, &name).await;
    Json(json!({ "active": name })).into_response()
}

/// Delete an uploaded document. The reference document is protected;
/// sessions pointing at the deleted file fall back to it.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    if name == REFERENCE_DOCUMENT {
        return error_response(StatusCode::FORBIDDEN, "cannot delete the reference document");
    }
    if !state.uploaded_files().contains(&name) {
        return error_response(StatusCode::NOT_FOUND, &format!("file {name} not found"));
    }

    if let Err(e) = fs::remove_file(state.document_path(&name)) {
        warn!("failed to delete {}: {}", name, e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "delete failed");
    }
    state.reset_sessions_for(&name).await;
    info!("deleted uploaded document {}", name);
    Json(json!({ "deleted": name })).into_response()
}

/// Store one uploaded file: JSON is validated and kept as-is, tabular files
/// are converted and persisted as JSON under the derived name. Returns the
/// stored document name.
fn process_upload(state: &AppState, filename: &str, bytes: &[u8]) -> Result<String, String> {
    let filename = sanitize_filename(filename);
    if !allowed_file(&filename) {
        return Err(format!(
            "only {} files are allowed",
            ALLOWED_EXTENSIONS.join(", ")
        ));
    }
    // The reference document name is reserved; an upload under it would
    // shadow the built-in document.
    if filename == REFERENCE_DOCUMENT || ingest::file_stem(&filename) == ingest::file_stem(REFERENCE_DOCUMENT) {
        return Err(format!("{REFERENCE_DOCUMENT} is a reserved name"));
    }

    let stored = match extension(&filename).as_str() {
        "json" => {
            if serde_json::from_slice::<Value>(bytes).is_err() {
                return Err("invalid JSON file".to_string());
            }
            if let Err(e) = fs::write(state.document_path(&filename), bytes) {
                warn!("failed to store {}: {}", filename, e);
                return Err("failed to store file".to_string());
            }
            filename
        }
        _ => {
            let Some(document) = ingest::convert(bytes, &filename) else {
                return Err("conversion failed".to_string());
            };
            let stored = format!("{}.json", ingest::file_stem(&filename));
            let pretty = serde_json::to_vec_pretty(&document)
                .map_err(|e| format!("failed to encode converted document: {e}"))?;
            if let Err(e) = fs::write(state.document_path(&stored), pretty) {
                warn!("failed to store {}: {}", stored, e);
                return Err("failed to store file".to_string());
            }
            stored
        }
    };

    info!("stored uploaded document {}", stored);
    Ok(stored)
}

/// Single-file upload. The stored document becomes the session's active one.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> axum::response::Response {
    let session = session_id(&headers);

    while let Ok(Some(field)) = multipart.next_field().await {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return error_response(StatusCode::BAD_REQUEST, &format!("upload failed: {e}"))
            }
        };

        return match process_upload(&state, &filename, &bytes) {
            Ok(stored) => {
                state.set_active(&session, &stored).await;
                Json(json!({ "stored": stored, "active": stored })).into_response()
            }
            Err(message) => error_response(StatusCode::BAD_REQUEST, &message),
        };
    }

    error_response(StatusCode::BAD_REQUEST, "no file selected")
}

/// Batch upload. Files are processed independently; the last success becomes
/// the session's active document and per-file outcomes are reported.
pub async fn upload_batch(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> axum::response::Response {
    let session = session_id(&headers);
    let mut outcomes = Vec::new();
    let mut last_stored: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                outcomes.push(json!({ "file": filename, "error": e.to_string() }));
                continue;
            }
        };

        match process_upload(&state, &filename, &bytes) {
            Ok(stored) => {
                last_stored = Some(stored.clone());
                outcomes.push(json!({ "file": filename, "stored": stored }));
            }
            Err(message) => {
                outcomes.push(json!({ "file": filename, "error": message }));
            }
        }
    }

    if outcomes.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "no files selected");
    }

    if let Some(stored) = &last_stored {
        state.set_active(&session, stored).await;
    }

    Json(json!({
        "processed": outcomes.len(),
        "active": last_stored,
        "results": outcomes,
    }))
    .into_response()
}

/// Free-text search request against the active document.
#[derive(Deserialize)]
pub struct QueryRequest {
    pub term: String,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Search the session's active document section by section. Blank terms and
/// unreadable documents yield an empty mapping.
pub async fn query(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<QueryRequest>,
) -> impl IntoResponse {
    let session = session_id(&headers);

    if request.term.trim().is_empty() {
        return Json(Value::Object(Map::new()));
    }

    let active = state.active_file(&session).await;
    let Some(document) = state.load_document(&active) else {
        return Json(Value::Object(Map::new()));
    };

    let scope = request
        .scope
        .as_deref()
        .filter(|scope| !scope.is_empty() && *scope != "all");
    let results = search::search_sections(&document, &request.term, scope);

    let mut body = Map::new();
    for (section, hits) in results {
        body.insert(
            section,
            serde_json::to_value(hits).unwrap_or(Value::Array(Vec::new())),
        );
    }
    Json(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("my data (v2).csv"), "my_data__v2_.csv");
        assert_eq!(sanitize_filename("C:\\temp\\report.xlsx"), "report.xlsx");
        assert_eq!(sanitize_filename(""), "upload");
    }

    #[test]
    fn extension_gate() {
        assert!(allowed_file("data.json"));
        assert!(allowed_file("Data.XLSX"));
        assert!(!allowed_file("script.sh"));
        assert!(!allowed_file("noext"));
    }
}
