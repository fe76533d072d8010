//! Per-topic answer renderers
//!
//! Each renderer walks a known subtree of the selected subject document (or
//! the reference document) and emits markdown text: headers from entity
//! names, bullet lists from string sequences, nested bullets for
//! sub-objects. Missing optional fields are skipped silently; every renderer
//! returns a string.

use crate::document::DocumentStore;
use crate::qa::patterns::{Force, Horizon, Perspective, Topic};
use serde_json::{Map, Value};
use std::fmt::Write;

/// Render the answer for a routed topic.
pub fn render(topic: Topic, store: &DocumentStore, industry: &str) -> String {
    match topic {
        Topic::MarketSize => market_size(store, industry),
        Topic::KeyPlayers => key_players(store, industry),
        Topic::IndustryChallenges => industry_challenges(store, industry),
        Topic::IndustryDrivers => industry_drivers(store, industry),
        Topic::PorterFiveForces => porter(store, industry),
        Topic::PorterForce(force) => porter_force(store, industry, force),
        Topic::BalancedScorecard => balanced_scorecard(store, industry),
        Topic::ScorecardPerspective(perspective) => {
            scorecard_perspective(store, industry, perspective)
        }
        Topic::Recommendations => recommendations(store, industry),
        Topic::RecommendationHorizon(horizon) => {
            recommendation_horizon(store, industry, horizon)
        }
        Topic::ValueChain => value_chain(store, industry),
        Topic::CorePrinciples => core_principles(store),
        Topic::Methodologies => methodologies(store),
        Topic::TechnologyEnablers => technology_enablers(store),
        Topic::PerformanceMetrics => performance_metrics(store),
        Topic::ImplementationPractices => implementation_practices(store),
        Topic::BpmChallenges => bpm_challenges(store),
    }
}

/// Word-capitalize a phrase: first letter of each word uppercased, the rest
/// lowercased.
pub fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display form of a snake_case document key.
pub fn humanize(key: &str) -> String {
    title_case(&key.replace('_', " "))
}

fn text(value: &Value) -> &str {
    value.as_str().unwrap_or("")
}

fn items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Render a sequence element that may be a plain string or something richer.
fn item_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn market_size(store: &DocumentStore, industry: &str) -> String {
    let overview = store.overview();
    let market = &overview["market_size"];

    let mut out = format!(
        "# Market Size and Growth for the {} Industry\n\n",
        title_case(industry)
    );
    let _ = write!(
        out,
        "The global {} industry is valued at {} with a projected growth rate of {}.\n\n",
        industry,
        text(&market["global_value"]),
        text(&market["projected_growth"]),
    );

    out.push_str("## Key Markets\n");
    for market in items(&market["key_markets"]) {
        let _ = writeln!(out, "- {}", item_text(market));
    }

    out.push_str("\n## Market Segments\n");
    for segment in items(&overview["key_segments"]) {
        let _ = writeln!(
            out,
            "- {}: {}",
            text(&segment["name"]),
            text(&segment["description"])
        );
        let _ = writeln!(out, "  - Market share: {}", text(&segment["market_share"]));
        let _ = writeln!(out, "  - Growth rate: {}\n", text(&segment["growth_rate"]));
    }

    out
}

fn key_players(store: &DocumentStore, industry: &str) -> String {
    let landscape = store.competitive_landscape();

    let mut out = format!(
        "# Competitive Landscape of the {} Industry\n\n",
        title_case(industry)
    );
    let _ = write!(
        out,
        "The {} industry has {} market concentration.\n\n",
        industry,
        text(&landscape["market_concentration"])
    );

    out.push_str("## Key Players\n");
    for player in items(&landscape["key_players"]) {
        let _ = writeln!(
            out,
            "### {} ({})",
            text(&player["name"]),
            text(&player["headquarters"])
        );
        let _ = writeln!(out, "- Market share: {}", text(&player["market_share"]));
        out.push_str("- Key strengths:\n");
        for strength in items(&player["key_strengths"]) {
            let _ = writeln!(out, "  - {}", item_text(strength));
        }
        out.push_str("- Key weaknesses:\n");
        for weakness in items(&player["key_weaknesses"]) {
            let _ = writeln!(out, "  - {}", item_text(weakness));
        }
        out.push('\n');
    }

    out.push_str("## New Entrants\n");
    for entrant in items(&landscape["new_entrants"]) {
        let _ = writeln!(out, "### {}", text(&entrant["name"]));
        let _ = writeln!(out, "- Focus: {}", text(&entrant["focus"]));
        let _ = writeln!(out, "- Funding: {}", text(&entrant["funding"]));
        let _ = writeln!(out, "- Strengths: {}", text(&entrant["strengths"]));
        let _ = writeln!(out, "- Challenges: {}\n", text(&entrant["challenges"]));
    }

    out.push_str("## Strategic Partnerships\n");
    for partnership in items(&landscape["strategic_partnerships"]) {
        let partners: Vec<String> = items(&partnership["partners"])
            .iter()
            .map(item_text)
            .collect();
        let _ = writeln!(
            out,
            "- {}: {}",
            partners.join(", "),
            text(&partnership["focus"])
        );
    }

    out
}

fn industry_challenges(store: &DocumentStore, industry: &str) -> String {
    let overview = store.overview();

    let mut out = format!(
        "# Key Challenges in the {} Industry\n\n",
        title_case(industry)
    );
    for challenge in items(&overview["challenges"]) {
        let _ = writeln!(out, "## {}", text(&challenge["challenge"]));
        let _ = writeln!(out, "{}", text(&challenge["description"]));
        let _ = writeln!(out, "Impact: {}\n", text(&challenge["impact"]));
    }

    // Per-process-area challenges from the business process analysis.
    out.push_str("# Process-Specific Challenges\n\n");
    let processes = store.business_processes();
    if let Some(areas) = processes.as_object() {
        for (area, details) in areas {
            let challenges = &details["key_challenges"];
            if challenges.is_null() {
                continue;
            }
            let _ = writeln!(out, "## {}", humanize(area));
            for challenge in items(challenges) {
                let _ = writeln!(out, "### {}", text(&challenge["challenge"]));
                let _ = writeln!(out, "{}", text(&challenge["description"]));
                out.push_str("Process implications:\n");
                for implication in items(&challenge["process_implications"]) {
                    let _ = writeln!(out, "- {}", item_text(implication));
                }
                out.push('\n');
            }
        }
    }

    out
}

fn industry_drivers(store: &DocumentStore, industry: &str) -> String {
    let overview = store.overview();

    let mut out = format!("# Key Drivers in the {} Industry\n\n", title_case(industry));
    for driver in items(&overview["drivers"]) {
        let _ = writeln!(out, "## {}", text(&driver["factor"]));
        let _ = writeln!(out, "{}", text(&driver["description"]));
        let _ = writeln!(out, "Impact: {}\n", text(&driver["impact"]));
    }
    out
}

fn porter(store: &DocumentStore, industry: &str) -> String {
    let analysis = store.porter_forces();

    let mut out = format!(
        "# Porter's Five Forces Analysis for the {} Industry\n\n",
        title_case(industry)
    );
    let _ = write!(out, "{}\n\n", text(&analysis["framework_description"]));

    if let Some(forces) = analysis["forces"].as_object() {
        for (force, details) in forces {
            let _ = writeln!(out, "## {}", humanize(force));
            let _ = write!(out, "Level: {}\n\n", text(&details["level"]));

            out.push_str("### Key Factors\n");
            for factor in items(&details["factors"]) {
                let _ = writeln!(
                    out,
                    "- **{}**: {}",
                    text(&factor["factor"]),
                    text(&factor["description"])
                );
                let _ = writeln!(out, "  - Impact: {}", text(&factor["impact"]));
            }

            out.push_str("\n### Process Implications\n");
            for implication in items(&details["process_implications"]) {
                let _ = writeln!(out, "- {}", item_text(implication));
            }
            out.push('\n');
        }
    }

    out
}

fn porter_force(store: &DocumentStore, industry: &str, force: Force) -> String {
    let analysis = store.porter_forces();
    let key = force.key();

    let Some(details) = analysis["forces"].get(key) else {
        return format!(
            "I don't have information about {key} for the {industry} industry."
        );
    };

    let mut out = format!(
        "# {} in the {} Industry\n\n",
        humanize(key),
        title_case(industry)
    );
    let _ = write!(out, "Level: {}\n\n", text(&details["level"]));

    out.push_str("## Key Factors\n");
    for factor in items(&details["factors"]) {
        let _ = writeln!(out, "### {}", text(&factor["factor"]));
        let _ = writeln!(out, "{}", text(&factor["description"]));
        let _ = writeln!(out, "Impact: {}\n", text(&factor["impact"]));
    }

    out.push_str("## Process Implications\n");
    for implication in items(&details["process_implications"]) {
        let _ = writeln!(out, "- {}", item_text(implication));
    }

    out
}

fn balanced_scorecard(store: &DocumentStore, industry: &str) -> String {
    let analysis = store.balanced_scorecard();

    let mut out = format!(
        "# Balanced Scorecard Analysis for the {} Industry\n\n",
        title_case(industry)
    );
    let _ = write!(out, "{}\n\n", text(&analysis["framework_description"]));

    if let Some(perspectives) = analysis["perspectives"].as_object() {
        for (perspective, details) in perspectives {
            let _ = write!(out, "## {}\n\n", humanize(perspective));
            out.push_str(&perspective_body(details, 3));
        }
    }

    out
}

fn scorecard_perspective(store: &DocumentStore, industry: &str, perspective: Perspective) -> String {
    let analysis = store.balanced_scorecard();
    let key = perspective.key();

    let Some(details) = analysis["perspectives"].get(key) else {
        return format!(
            "I don't have information about {key} for the {industry} industry."
        );
    };

    let mut out = format!(
        "# {} for the {} Industry\n\n",
        humanize(key),
        title_case(industry)
    );
    out.push_str(&perspective_body(details, 2));
    out
}

/// Shared body of a scorecard perspective. `depth` sets the heading level of
/// the inner sections (the full scorecard nests one level deeper than the
/// single-perspective answer).
fn perspective_body(details: &Value, depth: usize) -> String {
    let heading = "#".repeat(depth);
    let mut out = String::new();

    let _ = writeln!(out, "{heading} Key Objectives");
    for objective in items(&details["objectives"]) {
        let _ = writeln!(out, "- {}", item_text(objective));
    }

    let _ = writeln!(out, "\n{heading} Key Metrics");
    for metric in items(&details["metrics"]) {
        let _ = writeln!(out, "{heading}# {}", text(&metric["metric"]));
        let _ = writeln!(out, "{}", text(&metric["description"]));
        let _ = writeln!(
            out,
            "Industry benchmark: {}",
            text(&metric["industry_benchmark"])
        );
        let _ = writeln!(
            out,
            "Process implications: {}\n",
            text(&metric["process_implications"])
        );
    }

    let _ = writeln!(out, "{heading} Process Maturity Assessment");
    let maturity = &details["maturity_assessment"];
    let _ = writeln!(out, "Current state: {}\n", text(&maturity["current_state"]));

    out.push_str("Challenges:\n");
    for challenge in items(&maturity["challenges"]) {
        let _ = writeln!(out, "- {}", item_text(challenge));
    }

    out.push_str("\nImprovement opportunities:\n");
    for opportunity in items(&maturity["improvement_opportunities"]) {
        let _ = writeln!(out, "- {}", item_text(opportunity));
    }
    out.push('\n');

    out
}

fn recommendations(store: &DocumentStore, industry: &str) -> String {
    let recs = store.recommendations();

    let mut out = format!(
        "# Process Optimization Recommendations for the {} Industry\n\n",
        title_case(industry)
    );
    for horizon in [Horizon::ShortTerm, Horizon::MediumTerm, Horizon::LongTerm] {
        let _ = write!(out, "## {}\n\n", horizon.heading());
        out.push_str(&recommendation_list(&recs[horizon.key()], 3));
    }
    out
}

fn recommendation_horizon(store: &DocumentStore, industry: &str, horizon: Horizon) -> String {
    let recs = store.recommendations();
    let entries = &recs[horizon.key()];

    if entries.is_null() {
        return format!(
            "I don't have {} recommendations for the {} industry.",
            horizon.key(),
            industry
        );
    }

    let mut out = format!(
        "# {} for the {} Industry\n\n",
        horizon.heading(),
        title_case(industry)
    );
    out.push_str(&recommendation_list(entries, 2));
    out
}

fn recommendation_list(entries: &Value, depth: usize) -> String {
    let heading = "#".repeat(depth);
    let mut out = String::new();

    for rec in items(entries) {
        let _ = writeln!(
            out,
            "{heading} {}: {}",
            text(&rec["area"]),
            text(&rec["recommendation"])
        );
        let _ = writeln!(out, "{}\n", text(&rec["description"]));

        out.push_str("Benefits:\n");
        for benefit in items(&rec["benefits"]) {
            let _ = writeln!(out, "- {}", item_text(benefit));
        }

        out.push_str("\nImplementation approach:\n");
        for step in items(&rec["implementation_approach"]) {
            let _ = writeln!(out, "- {}", item_text(step));
        }

        out.push_str("\nKey performance indicators:\n");
        for kpi in items(&rec["key_performance_indicators"]) {
            let _ = writeln!(out, "- {}", item_text(kpi));
        }
        out.push('\n');
    }

    out
}

/// Shape of one value-chain activity attribute, decided once per attribute
/// before rendering.
enum AttrShape<'a> {
    /// Sequence of plain values, rendered as flat bullets.
    StringList(&'a [Value]),
    /// Sequence of `{name, description}` records, rendered as bold-name
    /// bullets.
    RichItemList(&'a [Value]),
    /// Nested mapping, rendered one level deep with sub-headers.
    NestedMap(&'a Map<String, Value>),
    /// Anything else, rendered as a labeled paragraph.
    Scalar(&'a Value),
}

fn classify(value: &Value) -> AttrShape<'_> {
    match value {
        Value::Array(list)
            if !list.is_empty()
                && list
                    .iter()
                    .all(|item| item.get("name").is_some() && item.get("description").is_some()) =>
        {
            AttrShape::RichItemList(list)
        }
        Value::Array(list) => AttrShape::StringList(list),
        Value::Object(map) => AttrShape::NestedMap(map),
        other => AttrShape::Scalar(other),
    }
}

fn value_chain(store: &DocumentStore, industry: &str) -> String {
    let analysis = store.value_chain();

    let mut out = format!(
        "# Value Chain Analysis for the {} Industry\n\n",
        title_case(industry)
    );
    let _ = write!(out, "{}\n\n", text(&analysis["framework_description"]));

    let Some(activities) = analysis["activities"].as_object() else {
        return out;
    };

    for (activity, details) in activities {
        let _ = write!(out, "## {}\n\n", humanize(activity));

        let Some(attrs) = details.as_object() else {
            continue;
        };
        for (attr, value) in attrs {
            let _ = writeln!(out, "### {}", humanize(attr));
            match classify(value) {
                AttrShape::StringList(list) => {
                    for item in list {
                        let _ = writeln!(out, "- {}", item_text(item));
                    }
                    out.push('\n');
                }
                AttrShape::RichItemList(list) => {
                    for item in list {
                        let _ = writeln!(
                            out,
                            "- **{}**: {}",
                            text(&item["name"]),
                            text(&item["description"])
                        );
                    }
                    out.push('\n');
                }
                AttrShape::NestedMap(map) => {
                    for (sub, sub_value) in map {
                        let _ = writeln!(out, "#### {}", humanize(sub));
                        match sub_value {
                            Value::Array(list) => {
                                for item in list {
                                    let _ = writeln!(out, "- {}", item_text(item));
                                }
                            }
                            other => {
                                let _ = writeln!(out, "{}", item_text(other));
                            }
                        }
                        out.push('\n');
                    }
                }
                AttrShape::Scalar(value) => {
                    let _ = write!(out, "{}\n\n", item_text(value));
                }
            }
        }
    }

    out
}

fn core_principles(store: &DocumentStore) -> String {
    let principles = store.principles();

    let mut out = String::from("# Core Business Process Management Principles\n\n");
    for principle in items(&principles["core_principles"]) {
        let _ = writeln!(out, "## {}", text(&principle["name"]));
        let _ = write!(out, "{}\n\n", text(&principle["description"]));

        out.push_str("Benefits:\n");
        for benefit in items(&principle["benefits"]) {
            let _ = writeln!(out, "- {}", item_text(benefit));
        }

        out.push_str("\nImplementation strategies:\n");
        for strategy in items(&principle["implementation_strategies"]) {
            let _ = writeln!(out, "- {}", item_text(strategy));
        }
        out.push('\n');
    }
    out
}

fn methodologies(store: &DocumentStore) -> String {
    let principles = store.principles();

    let mut out = String::from("# Business Process Management Methodologies\n\n");
    for methodology in items(&principles["methodologies"]) {
        let _ = writeln!(out, "## {}", text(&methodology["name"]));
        let _ = write!(out, "{}\n\n", text(&methodology["description"]));

        out.push_str("Key concepts:\n");
        for concept in items(&methodology["key_concepts"]) {
            let _ = writeln!(out, "- {}", item_text(concept));
        }

        out.push_str("\nTools:\n");
        for tool in items(&methodology["tools"]) {
            let _ = writeln!(out, "- {}", item_text(tool));
        }

        // Methodology-specific optional sections.
        if let Some(wastes) = methodology["types_of_waste"].as_array() {
            out.push_str("\nTypes of waste:\n");
            for waste in wastes {
                let _ = writeln!(out, "- {}", item_text(waste));
            }
        }
        if let Some(steps) = methodology["steps"].as_array() {
            out.push_str("\nImplementation steps:\n");
            for step in steps {
                let _ = writeln!(out, "- {}", item_text(step));
            }
        }

        let _ = write!(
            out,
            "\nBPM application: {}\n\n",
            text(&methodology["bpm_application"])
        );
    }
    out
}

fn technology_enablers(store: &DocumentStore) -> String {
    let enablers = store.technology_enablers();

    let mut out = String::from("# Business Process Management Technology Enablers\n\n");
    for enabler in items(&enablers["enablers"]) {
        let _ = writeln!(out, "## {}", text(&enabler["name"]));
        let _ = write!(out, "{}\n\n", text(&enabler["description"]));

        out.push_str("Capabilities:\n");
        for capability in items(&enabler["capabilities"]) {
            let _ = writeln!(out, "- {}", item_text(capability));
        }

        out.push_str("\nExamples:\n");
        for example in items(&enabler["examples"]) {
            let _ = writeln!(out, "- {}", item_text(example));
        }
        out.push('\n');
    }
    out
}

fn performance_metrics(store: &DocumentStore) -> String {
    let metrics = store.performance_metrics();

    let mut out = String::from("# Business Process Management Performance Metrics\n\n");
    for category in items(&metrics["metrics_by_category"]) {
        let _ = write!(out, "## {} Metrics\n\n", text(&category["category"]));

        for metric in items(&category["metrics"]) {
            let _ = writeln!(out, "### {}", text(&metric["name"]));
            let _ = writeln!(out, "{}", text(&metric["description"]));
            let _ = write!(out, "Calculation: {}\n\n", text(&metric["calculation"]));

            out.push_str("Improvement strategies:\n");
            for strategy in items(&metric["improvement_strategies"]) {
                let _ = writeln!(out, "- {}", item_text(strategy));
            }
            out.push('\n');
        }
    }
    out
}

fn implementation_practices(store: &DocumentStore) -> String {
    let practices = store.implementation_practices();

    let mut out =
        String::from("# Business Process Management Implementation Best Practices\n\n");
    for phase in items(&practices["best_practices"]) {
        let _ = write!(out, "## {}\n\n", text(&phase["phase"]));
        for practice in items(&phase["practices"]) {
            let _ = writeln!(out, "- {}", item_text(practice));
        }
        out.push('\n');
    }
    out
}

fn bpm_challenges(store: &DocumentStore) -> String {
    let practices = store.implementation_practices();

    let mut out = String::from("# Common Challenges in Business Process Management\n\n");
    for challenge in items(&practices["common_challenges"]) {
        let _ = writeln!(out, "## {}", text(&challenge["challenge"]));
        let _ = write!(out, "{}\n\n", text(&challenge["description"]));

        out.push_str("Mitigation strategies:\n");
        for strategy in items(&challenge["mitigation_strategies"]) {
            let _ = writeln!(out, "- {}", item_text(strategy));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_word_capitalizes() {
        assert_eq!(title_case("electric vehicle"), "Electric Vehicle");
        assert_eq!(title_case("BPM and KPIs"), "Bpm And Kpis");
        assert_eq!(humanize("threat_of_new_entrants"), "Threat Of New Entrants");
    }

    #[test]
    fn classify_picks_rich_items_only_when_uniform() {
        let rich = serde_json::json!([
            {"name": "A", "description": "a"},
            {"name": "B", "description": "b"}
        ]);
        assert!(matches!(classify(&rich), AttrShape::RichItemList(_)));

        let mixed = serde_json::json!([{"name": "A", "description": "a"}, "plain"]);
        assert!(matches!(classify(&mixed), AttrShape::StringList(_)));

        let empty = serde_json::json!([]);
        assert!(matches!(classify(&empty), AttrShape::StringList(_)));

        assert!(matches!(
            classify(&serde_json::json!({"k": "v"})),
            AttrShape::NestedMap(_)
        ));
        assert!(matches!(
            classify(&serde_json::json!("scalar")),
            AttrShape::Scalar(_)
        ));
    }
}
