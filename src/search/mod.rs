//! Generic substring search over JSON document trees
//!
//! The walk recurses through mappings and sequences and records a hit for
//! every string leaf containing the lowercased query as a substring. Hits
//! carry a dot/bracket path locating the value; paths are display-only
//! diagnostics, not stable identifiers.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// One located string match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Dot/bracket path of the matched value within the searched tree.
    pub path: String,
    /// The matched string value.
    pub content: String,
    /// Immediate parent key, or `"List item"` for sequence elements.
    pub context: String,
}

/// Fixed searchable sections of a subject document, as
/// `(section label, document key)` pairs in presentation order.
pub const SUBJECT_SECTIONS: [(&str, &str); 7] = [
    ("industry_overview", "industry_overview"),
    ("competitive_landscape", "competitive_landscape"),
    ("value_chain", "value_chain_analysis"),
    ("business_processes", "business_process_analysis"),
    ("porter_five_forces", "porter_five_forces_analysis"),
    ("balanced_scorecard", "balanced_scorecard_analysis"),
    ("recommendations", "process_optimization_recommendations"),
];

/// Search a tree for string leaves containing `query` (case-insensitive).
/// Containers recurse and never match directly; non-string scalars never
/// match. The tree is read-only throughout.
pub fn search(tree: &Value, query: &str) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    let needle = query.to_lowercase();
    walk(tree, "", &needle, &mut hits);
    hits
}

fn walk(value: &Value, path: &str, needle: &str, hits: &mut Vec<SearchHit>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match child {
                    Value::String(s) => {
                        if s.to_lowercase().contains(needle) {
                            hits.push(SearchHit {
                                path: child_path,
                                content: s.clone(),
                                context: key.clone(),
                            });
                        }
                    }
                    Value::Object(_) | Value::Array(_) => walk(child, &child_path, needle, hits),
                    _ => {}
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let child_path = format!("{path}[{index}]");
                match item {
                    Value::String(s) => {
                        if s.to_lowercase().contains(needle) {
                            hits.push(SearchHit {
                                path: child_path,
                                content: s.clone(),
                                context: "List item".to_string(),
                            });
                        }
                    }
                    Value::Object(_) | Value::Array(_) => walk(item, &child_path, needle, hits),
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

/// Search each fixed section of a subject document independently, returning
/// hits keyed by section label in presentation order. Sections with no hits
/// are omitted.
pub fn search_across_document(
    document: &Value,
    query: &str,
) -> IndexMap<&'static str, Vec<SearchHit>> {
    let mut results = IndexMap::new();
    for (label, key) in SUBJECT_SECTIONS {
        let hits = search(&document[key], query);
        if !hits.is_empty() {
            results.insert(label, hits);
        }
    }
    results
}

/// Search the top-level sections of an arbitrary document, optionally
/// restricted to one section. A blank term yields an empty result. Used by
/// the web query surface, where the active document's own top-level keys
/// define the section set.
pub fn search_sections(
    document: &Value,
    term: &str,
    scope: Option<&str>,
) -> IndexMap<String, Vec<SearchHit>> {
    let mut results = IndexMap::new();
    let term = term.trim();
    if term.is_empty() {
        return results;
    }

    if let Some(map) = document.as_object() {
        for (section, subtree) in map {
            if scope.is_some_and(|s| s != section) {
                continue;
            }
            let hits = search(subtree, term);
            if !hits.is_empty() {
                results.insert(section.clone(), hits);
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_string_leaves_with_paths() {
        let tree = json!({
            "overview": {
                "description": "Battery supply chains are strained.",
                "segments": [
                    {"name": "Sedans", "description": "Battery sedans"},
                    "battery vans"
                ]
            }
        });

        let hits = search(&tree, "battery");
        let paths: Vec<&str> = hits.iter().map(|h| h.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "overview.description",
                "overview.segments[0].description",
                "overview.segments[1]",
            ]
        );
        assert_eq!(hits[0].context, "description");
        assert_eq!(hits[2].context, "List item");
    }

    #[test]
    fn empty_query_matches_every_string_leaf() {
        let tree = json!({
            "a": "one",
            "b": {"c": "two", "d": 7},
            "e": ["three", false, null]
        });
        assert_eq!(search(&tree, "").len(), 3);
    }

    #[test]
    fn tree_without_string_leaves_yields_nothing() {
        let tree = json!({"a": 1, "b": [2.5, true, null], "c": {"d": 42}});
        assert!(search(&tree, "any").is_empty());
    }

    #[test]
    fn search_does_not_mutate_the_tree() {
        let tree = json!({"a": ["x", {"b": "y"}], "c": {"d": ["z"]}});
        let before = tree.clone();
        let _ = search(&tree, "z");
        assert_eq!(tree, before);
    }

    #[test]
    fn empty_and_degenerate_trees_are_tolerated() {
        assert!(search(&json!({}), "x").is_empty());
        assert!(search(&json!([]), "x").is_empty());
        assert!(search(&json!(null), "x").is_empty());
        assert!(search(&json!("bare string"), "bare").is_empty());
    }

    #[test]
    fn sections_with_no_hits_are_omitted() {
        let doc = json!({
            "industry_overview": {"description": "solar adoption"},
            "competitive_landscape": {"market_concentration": "high"},
            "value_chain_analysis": {},
        });

        let results = search_across_document(&doc, "solar");
        assert_eq!(results.len(), 1);
        assert!(results.contains_key("industry_overview"));
    }

    #[test]
    fn scoped_section_search() {
        let doc = json!({
            "core_principles": [{"name": "Customer focus", "description": "Outside-in design"}],
            "methodologies": [{"name": "Lean", "description": "Customer value first"}],
        });

        let all = search_sections(&doc, "customer", None);
        assert_eq!(all.len(), 2);

        let scoped = search_sections(&doc, "customer", Some("methodologies"));
        assert_eq!(scoped.len(), 1);
        assert!(scoped.contains_key("methodologies"));

        assert!(search_sections(&doc, "   ", None).is_empty());
    }
}
