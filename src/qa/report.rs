//! Comprehensive analysis report
//!
//! Walks every section of the selected subject document and emits one
//! plain-text report, section by section, in the order the console presents
//! them. Used by the console's "run comprehensive analysis" action.

use crate::document::DocumentStore;
use crate::qa::render::{humanize, title_case};
use serde_json::Value;
use std::fmt::Write;

const RULE_WIDTH: usize = 80;

fn banner(out: &mut String, title: &str, fill: char) {
    let rule: String = std::iter::repeat(fill).take(RULE_WIDTH).collect();
    let centered = format!(" {title} ");
    let pad = RULE_WIDTH.saturating_sub(centered.len());
    let left = pad / 2;
    let right = pad - left;
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(
        out,
        "{}{}{}",
        fill.to_string().repeat(left),
        centered,
        fill.to_string().repeat(right)
    );
    let _ = writeln!(out, "{rule}\n");
}

fn section(out: &mut String, title: &str) {
    banner(out, title, '-');
}

fn subsection(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n--- {title} ---\n");
}

fn text(value: &Value) -> &str {
    value.as_str().unwrap_or("")
}

fn items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Render the full report for the current selection. Returns the no-data
/// guidance line when nothing is selected.
pub fn comprehensive(store: &DocumentStore) -> String {
    let Some(industry) = store.current_subject().map(str::to_string) else {
        return crate::qa::NO_SELECTION_GUIDANCE.to_string();
    };

    let mut out = String::new();
    banner(
        &mut out,
        &format!("BPM Analysis for the {} Industry", title_case(&industry)),
        '=',
    );

    let overview = store.overview();
    section(&mut out, "Industry Overview");
    let _ = writeln!(out, "Industry: {}", text(&overview["name"]));
    let _ = writeln!(out, "Description: {}", text(&overview["description"]));
    let market = &overview["market_size"];
    let _ = writeln!(
        out,
        "Market Size: {} with {} growth",
        text(&market["global_value"]),
        text(&market["projected_growth"])
    );

    subsection(&mut out, "Key Segments");
    for segment in items(&overview["key_segments"]) {
        let _ = writeln!(
            out,
            "- {}: {}",
            text(&segment["name"]),
            text(&segment["description"])
        );
        let _ = writeln!(out, "  Market share: {}", text(&segment["market_share"]));
        let _ = writeln!(out, "  Growth rate: {}", text(&segment["growth_rate"]));
    }

    subsection(&mut out, "Industry Drivers");
    for driver in items(&overview["drivers"]) {
        let _ = writeln!(
            out,
            "- {}: {}",
            text(&driver["factor"]),
            text(&driver["impact"])
        );
    }

    subsection(&mut out, "Challenges");
    for challenge in items(&overview["challenges"]) {
        let _ = writeln!(
            out,
            "- {}: {}",
            text(&challenge["challenge"]),
            text(&challenge["impact"])
        );
    }

    let porter = store.porter_forces();
    section(&mut out, "Porter's Five Forces Analysis");
    if let Some(forces) = porter["forces"].as_object() {
        for (force, details) in forces {
            subsection(&mut out, &humanize(force));
            let _ = writeln!(out, "Level: {}", text(&details["level"]));

            out.push_str("\nKey Factors:\n");
            for factor in items(&details["factors"]) {
                let _ = writeln!(
                    out,
                    "- {}: {}",
                    text(&factor["factor"]),
                    text(&factor["impact"])
                );
            }

            out.push_str("\nProcess Implications:\n");
            for implication in items(&details["process_implications"]) {
                let _ = writeln!(out, "- {}", text(implication));
            }
        }
    }

    let scorecard = store.balanced_scorecard();
    section(&mut out, "Balanced Scorecard Analysis");
    if let Some(perspectives) = scorecard["perspectives"].as_object() {
        for (perspective, details) in perspectives {
            subsection(&mut out, &humanize(perspective));

            out.push_str("Key Objectives:\n");
            for objective in items(&details["objectives"]) {
                let _ = writeln!(out, "- {}", text(objective));
            }

            out.push_str("\nKey Metrics:\n");
            for metric in items(&details["metrics"]) {
                let _ = writeln!(
                    out,
                    "- {}: {}",
                    text(&metric["metric"]),
                    text(&metric["industry_benchmark"])
                );
            }

            out.push_str("\nProcess Maturity:\n");
            let _ = writeln!(
                out,
                "Current state: {}",
                text(&details["maturity_assessment"]["current_state"])
            );
        }
    }

    let recommendations = store.recommendations();
    section(&mut out, "Process Optimization Recommendations");
    for (heading, key) in [
        ("Short-Term Improvements (0-6 months)", "short_term"),
        ("Medium-Term Transformations (6-18 months)", "medium_term"),
        ("Long-Term Strategic Innovations (18+ months)", "long_term"),
    ] {
        subsection(&mut out, heading);
        for rec in items(&recommendations[key]) {
            let _ = writeln!(
                out,
                "- {}: {}",
                text(&rec["area"]),
                text(&rec["recommendation"])
            );
        }
    }

    let value_chain = store.value_chain();
    section(&mut out, "Value Chain Analysis");
    if let Some(activities) = value_chain["activities"].as_object() {
        for (activity, details) in activities {
            subsection(&mut out, &humanize(activity));

            if !details["key_processes"].is_null() {
                out.push_str("Key Processes:\n");
                for process in items(&details["key_processes"]) {
                    let _ = writeln!(out, "- {}", text(&process["name"]));
                }
            }
            if !details["process_implications"].is_null() {
                out.push_str("\nProcess Implications:\n");
                for implication in items(&details["process_implications"]) {
                    let _ = writeln!(out, "- {}", text(implication));
                }
            }
        }
    }

    let landscape = store.competitive_landscape();
    section(&mut out, "Competitive Landscape");
    let _ = writeln!(
        out,
        "Market Concentration: {}",
        text(&landscape["market_concentration"])
    );

    subsection(&mut out, "Key Players");
    for player in items(&landscape["key_players"]) {
        let _ = writeln!(
            out,
            "- {} ({} market share)",
            text(&player["name"]),
            text(&player["market_share"])
        );
        let _ = writeln!(out, "  Headquarters: {}", text(&player["headquarters"]));
        out.push_str("  Key strengths:\n");
        for strength in items(&player["key_strengths"]) {
            let _ = writeln!(out, "    - {}", text(strength));
        }
    }

    subsection(&mut out, "New Entrants");
    for entrant in items(&landscape["new_entrants"]) {
        let _ = writeln!(
            out,
            "- {} (Focus: {})",
            text(&entrant["name"]),
            text(&entrant["focus"])
        );
    }

    let processes = store.business_processes();
    section(&mut out, "Business Process Analysis");
    if let Some(areas) = processes.as_object() {
        for (area, details) in areas {
            subsection(&mut out, &humanize(area));
            let _ = writeln!(out, "Maturity Level: {}", text(&details["maturity_level"]));
            let _ = writeln!(
                out,
                "Automation Level: {}",
                text(&details["automation_level"])
            );

            out.push_str("\nKey Processes:\n");
            for process in items(&details["key_processes"]) {
                let _ = writeln!(
                    out,
                    "- {}: {}",
                    text(&process["name"]),
                    text(&process["description"])
                );
            }

            out.push_str("\nKey Challenges:\n");
            for challenge in items(&details["key_challenges"]) {
                let _ = writeln!(out, "- {}", text(&challenge["challenge"]));
            }
        }
    }

    out
}
