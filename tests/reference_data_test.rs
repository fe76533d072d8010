//! Schema tests for the shipped seed documents
//!
//! The answer renderers walk fixed field names; these tests pin the shipped
//! data files to that contract so a data edit cannot silently hollow out the
//! answers.

use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

fn load(name: &str) -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name);
    let bytes = fs::read(&path).unwrap_or_else(|e| panic!("cannot read {path:?}: {e}"));
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("cannot parse {path:?}: {e}"))
}

fn assert_fields(entry: &Value, fields: &[&str], what: &str) {
    for field in fields {
        assert!(
            entry.get(field).is_some(),
            "{what} entry missing field {field}: {entry}"
        );
    }
}

fn assert_unique_names(entries: &[Value], key: &str, what: &str) {
    let names: Vec<&str> = entries.iter().filter_map(|e| e[key].as_str()).collect();
    let unique: HashSet<&&str> = names.iter().collect();
    assert_eq!(names.len(), unique.len(), "duplicate {what} names");
}

#[test]
fn reference_document_has_every_top_level_section() {
    let reference = load("principles.json");
    for section in [
        "core_principles",
        "methodologies",
        "frameworks",
        "maturity_models",
        "performance_metrics",
        "implementation_best_practices",
        "common_challenges",
        "technology_enablers",
    ] {
        assert!(
            reference.get(section).is_some(),
            "missing top-level section {section}"
        );
    }
}

#[test]
fn core_principles_are_complete() {
    let reference = load("principles.json");
    let principles = reference["core_principles"].as_array().unwrap();
    assert_eq!(principles.len(), 7, "expected 7 core principles");

    for principle in principles {
        assert_fields(
            principle,
            &["name", "description", "benefits", "implementation_strategies"],
            "core principle",
        );
        assert!(!principle["benefits"].as_array().unwrap().is_empty());
        assert!(!principle["implementation_strategies"]
            .as_array()
            .unwrap()
            .is_empty());
    }
    assert_unique_names(principles, "name", "core principle");
}

#[test]
fn methodologies_are_complete() {
    let reference = load("principles.json");
    let methodologies = reference["methodologies"].as_array().unwrap();
    assert!(!methodologies.is_empty());

    for methodology in methodologies {
        assert_fields(
            methodology,
            &["name", "description", "key_concepts", "tools", "bpm_application"],
            "methodology",
        );
        assert!(!methodology["key_concepts"].as_array().unwrap().is_empty());
        assert!(!methodology["tools"].as_array().unwrap().is_empty());
    }
    assert_unique_names(methodologies, "name", "methodology");
}

#[test]
fn frameworks_cover_the_blended_accessors() {
    let reference = load("principles.json");
    let frameworks = reference["frameworks"].as_array().unwrap();

    for framework in frameworks {
        assert_fields(
            framework,
            &["name", "description", "components", "bpm_application"],
            "framework",
        );
        assert!(!framework["components"].as_array().unwrap().is_empty());
    }

    // The blended accessors look these up by exact name.
    let names: Vec<&str> = frameworks.iter().filter_map(|f| f["name"].as_str()).collect();
    for required in ["Porter's Five Forces", "Balanced Scorecard", "Value Chain Analysis"] {
        assert!(names.contains(&required), "missing framework {required}");
    }
}

#[test]
fn maturity_models_have_levels_or_dimensions() {
    let reference = load("principles.json");
    let models = reference["maturity_models"].as_array().unwrap();
    assert!(!models.is_empty());

    for model in models {
        assert_fields(model, &["name", "description", "bpm_application"], "maturity model");
        assert!(
            model.get("levels").is_some() || model.get("dimensions").is_some(),
            "maturity model {} needs levels or dimensions",
            model["name"]
        );
        if let Some(levels) = model["levels"].as_array() {
            assert!(!levels.is_empty());
            let first = &levels[0];
            assert!(first.get("level").is_some() || first.get("name").is_some());
            assert!(first.get("description").is_some());
        }
    }
}

#[test]
fn performance_metrics_are_categorized() {
    let reference = load("principles.json");
    let categories = reference["performance_metrics"].as_array().unwrap();
    assert!(!categories.is_empty());

    for category in categories {
        assert_fields(category, &["category", "metrics"], "metric category");
        let metrics = category["metrics"].as_array().unwrap();
        assert!(!metrics.is_empty());
        for metric in metrics {
            assert_fields(
                metric,
                &["name", "description", "calculation", "improvement_strategies"],
                "metric",
            );
            assert!(!metric["improvement_strategies"].as_array().unwrap().is_empty());
        }
    }
}

#[test]
fn practices_challenges_and_enablers_are_complete() {
    let reference = load("principles.json");

    for phase in reference["implementation_best_practices"].as_array().unwrap() {
        assert_fields(phase, &["phase", "practices"], "practice phase");
        assert!(!phase["practices"].as_array().unwrap().is_empty());
    }

    for challenge in reference["common_challenges"].as_array().unwrap() {
        assert_fields(
            challenge,
            &["challenge", "description", "mitigation_strategies"],
            "common challenge",
        );
        assert!(!challenge["mitigation_strategies"].as_array().unwrap().is_empty());
    }

    let enablers = reference["technology_enablers"].as_array().unwrap();
    for enabler in enablers {
        assert_fields(
            enabler,
            &["name", "description", "capabilities", "examples"],
            "technology enabler",
        );
        assert!(!enabler["capabilities"].as_array().unwrap().is_empty());
        assert!(!enabler["examples"].as_array().unwrap().is_empty());
    }
    assert_unique_names(enablers, "name", "technology enabler");
}

#[test]
fn subject_document_matches_the_renderer_contract() {
    let subject = load("electric_vehicle_industry.json");

    for section in [
        "industry_name",
        "industry_overview",
        "porter_five_forces_analysis",
        "balanced_scorecard_analysis",
        "process_optimization_recommendations",
        "value_chain_analysis",
        "competitive_landscape",
        "business_process_analysis",
    ] {
        assert!(subject.get(section).is_some(), "missing section {section}");
    }

    let overview = &subject["industry_overview"];
    assert!(overview["market_size"]["global_value"].is_string());
    assert!(overview["market_size"]["projected_growth"].is_string());

    let forces = subject["porter_five_forces_analysis"].as_object().unwrap();
    for force in [
        "threat_of_new_entrants",
        "bargaining_power_of_suppliers",
        "bargaining_power_of_buyers",
        "threat_of_substitutes",
        "industry_rivalry",
    ] {
        let details = forces.get(force).unwrap_or_else(|| panic!("missing force {force}"));
        assert!(details["level"].is_string());
        assert!(details["factors"].is_array());
        assert!(details["process_implications"].is_array());
    }

    let perspectives = subject["balanced_scorecard_analysis"].as_object().unwrap();
    for perspective in [
        "financial_perspective",
        "customer_perspective",
        "internal_process_perspective",
        "learning_and_growth_perspective",
    ] {
        let details = perspectives
            .get(perspective)
            .unwrap_or_else(|| panic!("missing perspective {perspective}"));
        assert!(details["key_objectives"].is_array());
        assert!(details["key_metrics"].is_array());
        assert!(details["process_maturity_assessment"].is_object());
    }

    let recommendations = &subject["process_optimization_recommendations"];
    for horizon in [
        "short_term_improvements",
        "medium_term_transformations",
        "long_term_strategic_innovations",
    ] {
        assert!(
            recommendations[horizon].is_array(),
            "missing horizon {horizon}"
        );
    }
}

#[test]
fn shipped_data_answers_questions_end_to_end() {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let mut store = bpmlens::DocumentStore::open(&data_dir);
    assert!(store.select_subject("electric vehicle"));

    let engine = bpmlens::QaEngine::new();

    let answer = engine.answer(&store, "how big is the market?");
    assert!(answer.contains("$500 billion"), "answer was: {answer}");

    let answer = engine.answer(&store, "how strong is supplier power?");
    assert!(answer.contains("Battery Cell Concentration"));

    let answer = engine.answer(&store, "what methodologies should we use?");
    assert!(answer.contains("Six Sigma"));
    assert!(answer.contains("Types of waste:"));
}
