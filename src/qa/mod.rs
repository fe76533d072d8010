//! Question routing and answering
//!
//! The engine matches a question against a fixed ordered pattern table and
//! renders the first matching topic from the selected subject document. When
//! nothing matches it falls back to a substring search across the whole
//! document, and finally to a fixed "no information" response.

pub mod patterns;
pub mod render;
pub mod report;

pub use patterns::{Force, Horizon, Perspective, Topic};

use crate::document::DocumentStore;
use crate::search;
use regex::Regex;
use std::fmt::Write;

/// Guidance returned when a question arrives with no subject selected.
pub const NO_SELECTION_GUIDANCE: &str =
    "No industry selected or data not available. Please select an industry first.";

/// Maximum number of hits quoted per section in the fallback answer.
const FALLBACK_HITS_PER_SECTION: usize = 3;

/// Question answering engine holding the compiled dispatch table.
pub struct QaEngine {
    table: Vec<(Regex, Topic)>,
}

impl QaEngine {
    /// Create an engine with the fixed dispatch table compiled once.
    pub fn new() -> Self {
        Self {
            table: patterns::dispatch_table(),
        }
    }

    /// Route a question to its topic: first pattern matching anywhere in the
    /// lowercased question wins; later entries are never consulted.
    pub fn route(&self, question: &str) -> Option<Topic> {
        let question = question.to_lowercase();
        self.table
            .iter()
            .find(|(pattern, _)| pattern.is_match(&question))
            .map(|(_, topic)| *topic)
    }

    /// Answer a question about the currently selected subject.
    pub fn answer(&self, store: &DocumentStore, question: &str) -> String {
        let (Some(industry), Some(document)) = (
            store.current_subject().map(str::to_string),
            store.current_document(),
        ) else {
            return NO_SELECTION_GUIDANCE.to_string();
        };

        if let Some(topic) = self.route(question) {
            return render::render(topic, store, &industry);
        }

        // No pattern matched: fall back to a whole-document substring search.
        let results = search::search_across_document(document, &question.to_lowercase());
        if !results.is_empty() {
            let mut answer = format!(
                "Based on my analysis of the {industry} industry, here's what I found about '{question}':\n\n"
            );
            for (section, hits) in &results {
                let _ = writeln!(answer, "From {}:", render::humanize(section));
                for hit in hits.iter().take(FALLBACK_HITS_PER_SECTION) {
                    let _ = writeln!(answer, "- {}", hit.content);
                }
                answer.push('\n');
            }
            return answer;
        }

        format!(
            "I don't have specific information to answer your question about '{question}' \
             for the {industry} industry. Please try asking in a different way or \
             ask about another aspect of the industry."
        )
    }
}

impl Default for QaEngine {
    fn default() -> Self {
        Self::new()
    }
}
