//! File-backed document store with a lazily loaded subject registry
//!
//! Subject documents live in a data directory as `<name>_industry.json`
//! files. Discovery registers each subject without reading it; the file is
//! parsed on first selection and the resulting document is cached for the
//! process lifetime. The single reference document (`principles.json`) is
//! loaded eagerly because every blended accessor consults it.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Filename of the shared reference document inside the data directory.
pub const REFERENCE_FILE: &str = "principles.json";

/// Filename suffix marking a subject document.
pub const SUBJECT_SUFFIX: &str = "_industry.json";

/// Message carried by the `{"error": …}` value accessors return when no
/// subject is selected or its data is unavailable.
pub const NO_SELECTION: &str = "No industry selected or data not available";

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File contents are not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Registry entry for one subject: registered at discovery, loaded at first
/// selection. A load failure stores an empty document, which accessors treat
/// as unavailable.
enum SubjectSlot {
    Registered,
    Loaded(Arc<Value>),
}

/// Document store holding the reference document and the subject registry.
pub struct DocumentStore {
    data_dir: PathBuf,
    reference: Value,
    subjects: IndexMap<String, SubjectSlot>,
    current: Option<String>,
}

impl DocumentStore {
    /// Open a store over the given data directory, loading the reference
    /// document and discovering subject files. Missing or unreadable files
    /// are absorbed: the store comes up with whatever was readable.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        let reference = read_document(&data_dir.join(REFERENCE_FILE));

        let mut store = Self {
            data_dir,
            reference,
            subjects: IndexMap::new(),
            current: None,
        };
        store.discover_subjects();
        info!(
            "document store opened with {} subject(s)",
            store.subjects.len()
        );
        store
    }

    /// Scan the data directory for `*_industry.json` files and register each
    /// as a not-yet-loaded subject. Registration order is sorted filename
    /// order so menus and listings are stable across runs.
    fn discover_subjects(&mut self) {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("cannot read data directory {:?}: {}", self.data_dir, e);
                return;
            }
        };

        let mut filenames: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(SUBJECT_SUFFIX))
            .collect();
        filenames.sort();

        for filename in filenames {
            let stem = filename.trim_end_matches(SUBJECT_SUFFIX);
            let display = stem.replace('_', " ");
            self.subjects.insert(display, SubjectSlot::Registered);
        }
    }

    /// Subject names in registration order, in display form.
    pub fn list_subjects(&self) -> Vec<String> {
        self.subjects.keys().cloned().collect()
    }

    /// The shared reference document.
    pub fn reference(&self) -> &Value {
        &self.reference
    }

    /// Name of the currently selected subject, if any.
    pub fn current_subject(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Select a subject by name. Lookup is case- and whitespace-insensitive
    /// (lowercased, spaces mapped to underscores). The subject document is
    /// loaded on first selection and cached afterwards; repeated selection is
    /// idempotent. Unknown names return `false` and leave the current
    /// selection unchanged.
    pub fn select_subject(&mut self, name: &str) -> bool {
        let normalized = normalize_subject(name);
        let Some(key) = self
            .subjects
            .keys()
            .find(|key| normalize_subject(key) == normalized)
            .cloned()
        else {
            return false;
        };

        if matches!(self.subjects[&key], SubjectSlot::Registered) {
            let filename = format!("{normalized}{SUBJECT_SUFFIX}");
            let document = read_document(&self.data_dir.join(&filename));
            debug!("loaded subject document {}", filename);
            self.subjects[&key] = SubjectSlot::Loaded(Arc::new(document));
        }

        self.current = Some(key);
        true
    }

    /// The currently selected subject document, if one is selected and its
    /// data loaded non-empty. An empty document (the absorbed-failure shape)
    /// counts as unavailable.
    pub fn current_document(&self) -> Option<&Value> {
        let name = self.current.as_deref()?;
        match self.subjects.get(name)? {
            SubjectSlot::Loaded(doc) if doc.as_object().is_some_and(|m| !m.is_empty()) => {
                Some(doc.as_ref())
            }
            _ => None,
        }
    }

    fn no_selection() -> Value {
        json!({ "error": NO_SELECTION })
    }

    /// Industry overview: name, description, market size, segments, drivers
    /// and challenges of the selected subject.
    pub fn overview(&self) -> Value {
        let Some(doc) = self.current_document() else {
            return Self::no_selection();
        };
        let overview = &doc["industry_overview"];
        json!({
            "name": doc["industry_name"],
            "description": overview["description"],
            "market_size": overview["market_size"],
            "key_segments": overview["key_segments"],
            "drivers": overview["industry_drivers"],
            "challenges": overview["challenges"],
        })
    }

    /// Porter's Five Forces analysis blended with the framework description
    /// from the reference document.
    pub fn porter_forces(&self) -> Value {
        let Some(doc) = self.current_document() else {
            return Self::no_selection();
        };

        let mut forces = Map::new();
        if let Some(analysis) = doc["porter_five_forces_analysis"].as_object() {
            for (force, details) in analysis {
                forces.insert(
                    force.clone(),
                    json!({
                        "level": details["level"],
                        "factors": details["factors"],
                        "process_implications": details["process_implications"],
                    }),
                );
            }
        }

        json!({
            "framework_description": self.framework_description("Porter's Five Forces"),
            "forces": forces,
        })
    }

    /// Balanced Scorecard analysis blended with the framework description
    /// from the reference document.
    pub fn balanced_scorecard(&self) -> Value {
        let Some(doc) = self.current_document() else {
            return Self::no_selection();
        };

        let mut perspectives = Map::new();
        if let Some(analysis) = doc["balanced_scorecard_analysis"].as_object() {
            for (perspective, details) in analysis {
                perspectives.insert(
                    perspective.clone(),
                    json!({
                        "objectives": details["key_objectives"],
                        "metrics": details["key_metrics"],
                        "maturity_assessment": details["process_maturity_assessment"],
                    }),
                );
            }
        }

        json!({
            "framework_description": self.framework_description("Balanced Scorecard"),
            "perspectives": perspectives,
        })
    }

    /// Process optimization recommendations grouped by horizon.
    pub fn recommendations(&self) -> Value {
        let Some(doc) = self.current_document() else {
            return Self::no_selection();
        };
        let recs = &doc["process_optimization_recommendations"];
        json!({
            "short_term": recs["short_term_improvements"],
            "medium_term": recs["medium_term_transformations"],
            "long_term": recs["long_term_strategic_innovations"],
        })
    }

    /// Value chain analysis blended with the framework description from the
    /// reference document.
    pub fn value_chain(&self) -> Value {
        let Some(doc) = self.current_document() else {
            return Self::no_selection();
        };
        json!({
            "framework_description": self.framework_description("Value Chain Analysis"),
            "activities": doc["value_chain_analysis"],
        })
    }

    /// Competitive landscape subtree of the selected subject.
    pub fn competitive_landscape(&self) -> Value {
        match self.current_document() {
            Some(doc) => doc["competitive_landscape"].clone(),
            None => Self::no_selection(),
        }
    }

    /// Business process analysis subtree of the selected subject.
    pub fn business_processes(&self) -> Value {
        match self.current_document() {
            Some(doc) => doc["business_process_analysis"].clone(),
            None => Self::no_selection(),
        }
    }

    /// Core principles, methodologies and maturity models from the reference
    /// document. Available without a subject selection.
    pub fn principles(&self) -> Value {
        json!({
            "core_principles": self.reference["core_principles"],
            "methodologies": self.reference["methodologies"],
            "maturity_models": self.reference["maturity_models"],
        })
    }

    /// Performance metrics by category from the reference document.
    pub fn performance_metrics(&self) -> Value {
        json!({ "metrics_by_category": self.reference["performance_metrics"] })
    }

    /// Implementation best practices and common challenges from the
    /// reference document.
    pub fn implementation_practices(&self) -> Value {
        json!({
            "best_practices": self.reference["implementation_best_practices"],
            "common_challenges": self.reference["common_challenges"],
        })
    }

    /// Technology enablers from the reference document.
    pub fn technology_enablers(&self) -> Value {
        json!({ "enablers": self.reference["technology_enablers"] })
    }

    /// Look up a framework by name in the reference document's `frameworks`
    /// list. Absent entries yield an empty description rather than an error.
    fn framework_description(&self, name: &str) -> String {
        self.reference["frameworks"]
            .as_array()
            .and_then(|frameworks| {
                frameworks
                    .iter()
                    .find(|f| f["name"].as_str() == Some(name))
            })
            .and_then(|f| f["description"].as_str())
            .unwrap_or("")
            .to_string()
    }
}

/// Normalized lookup form of a subject name: lowercased, spaces mapped to
/// underscores.
pub fn normalize_subject(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Read a JSON document, absorbing failures into an empty document so a
/// missing or corrupt file degrades instead of propagating.
fn read_document(path: &Path) -> Value {
    match try_read_document(path) {
        Ok(value) => value,
        Err(e) => {
            warn!("failed to load {:?}: {}", path, e);
            Value::Object(Map::new())
        }
    }
}

fn try_read_document(path: &Path) -> StoreResult<Value> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn seed_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(REFERENCE_FILE),
            serde_json::to_vec(&json!({
                "frameworks": [
                    {"name": "Porter's Five Forces", "description": "Five competitive forces."}
                ]
            }))
            .unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("electric_vehicle_industry.json"),
            serde_json::to_vec(&json!({
                "industry_name": "Electric Vehicle",
                "industry_overview": {
                    "description": "Battery-powered road transport.",
                    "market_size": {"global_value": "$500B"}
                },
                "porter_five_forces_analysis": {
                    "industry_rivalry": {
                        "level": "High",
                        "factors": [],
                        "process_implications": []
                    }
                }
            }))
            .unwrap(),
        )
        .unwrap();
        dir
    }

    #[test]
    fn discovers_subjects_in_sorted_order() {
        let dir = seed_dir();
        fs::write(dir.path().join("airline_industry.json"), b"{}").unwrap();
        let store = DocumentStore::open(dir.path());
        assert_eq!(
            store.list_subjects(),
            vec!["airline".to_string(), "electric vehicle".to_string()]
        );
    }

    #[test]
    fn select_is_normalized_and_idempotent() {
        let dir = seed_dir();
        let mut store = DocumentStore::open(dir.path());

        assert!(store.select_subject("Electric Vehicle"));
        assert!(store.select_subject("  electric vehicle "));
        assert_eq!(store.current_subject(), Some("electric vehicle"));
        assert!(store.current_document().is_some());
    }

    #[test]
    fn unknown_subject_leaves_selection_unchanged() {
        let dir = seed_dir();
        let mut store = DocumentStore::open(dir.path());

        assert!(store.select_subject("electric vehicle"));
        assert!(!store.select_subject("fusion reactors"));
        assert_eq!(store.current_subject(), Some("electric vehicle"));
    }

    #[test]
    fn accessors_return_error_value_without_selection() {
        let dir = seed_dir();
        let store = DocumentStore::open(dir.path());

        let overview = store.overview();
        assert_eq!(overview["error"].as_str(), Some(NO_SELECTION));
        assert_eq!(store.porter_forces()["error"].as_str(), Some(NO_SELECTION));
    }

    #[test]
    fn blended_accessor_pulls_framework_description() {
        let dir = seed_dir();
        let mut store = DocumentStore::open(dir.path());
        store.select_subject("electric vehicle");

        let porter = store.porter_forces();
        assert_eq!(
            porter["framework_description"].as_str(),
            Some("Five competitive forces.")
        );
        assert!(porter["forces"]["industry_rivalry"].is_object());

        // Framework missing from the reference document blends to empty.
        let scorecard = store.balanced_scorecard();
        assert_eq!(scorecard["framework_description"].as_str(), Some(""));
    }

    #[test]
    fn unreadable_subject_degrades_to_unavailable() {
        let dir = seed_dir();
        fs::write(dir.path().join("broken_industry.json"), b"not json").unwrap();
        let mut store = DocumentStore::open(dir.path());

        assert!(store.select_subject("broken"));
        assert!(store.current_document().is_none());
        assert_eq!(store.overview()["error"].as_str(), Some(NO_SELECTION));
    }
}
