//! Interactive console menu
//!
//! Blocking read-eval loop over stdin: pick an industry, then run analyses
//! or ask free-text questions. Every action completes (including all
//! rendering) before the next prompt.

use crate::document::DocumentStore;
use crate::qa::{report, QaEngine};
use std::io::{self, BufRead, Write};

const ACTIONS: [&str; 11] = [
    "Run comprehensive analysis",
    "View industry overview",
    "Analyze Porter's Five Forces",
    "Analyze Balanced Scorecard",
    "View process optimization recommendations",
    "Analyze value chain",
    "View competitive landscape",
    "View business process analysis",
    "Ask a specific question",
    "Change industry",
    "Exit",
];

fn print_header(title: &str) {
    let rule = "=".repeat(80);
    println!("\n{rule}");
    println!("{:=^80}", format!(" {title} "));
    println!("{rule}\n");
}

fn print_section(title: &str) {
    let rule = "-".repeat(80);
    println!("\n{rule}");
    println!("{:-^80}", format!(" {title} "));
    println!("{rule}\n");
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

/// Present numbered options and read a choice. Returns `None` on EOF.
fn choose(stdin: &io::Stdin, prompt: &str, options: &[String]) -> io::Result<Option<usize>> {
    println!("{prompt}");
    for (index, option) in options.iter().enumerate() {
        println!("{}. {}", index + 1, option);
    }

    let mut line = String::new();
    loop {
        eprint!("\nEnter your choice (number): ");
        io::stderr().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None); // EOF
        }

        if let Ok(choice) = line.trim().parse::<usize>() {
            if (1..=options.len()).contains(&choice) {
                return Ok(Some(choice - 1));
            }
        }
        println!("Invalid choice. Please try again.");
    }
}

/// Read one free-text line. Returns `None` on EOF.
fn read_line(stdin: &io::Stdin, prompt: &str) -> io::Result<Option<String>> {
    eprint!("{prompt}");
    io::stderr().flush()?;

    let mut line = String::new();
    if stdin.lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Run the interactive console over a document store.
pub fn run(store: &mut DocumentStore) -> io::Result<()> {
    let engine = QaEngine::new();
    let stdin = io::stdin();

    print_header("BPM Industry Insight - Interactive Mode");

    let subjects = store.list_subjects();
    if subjects.is_empty() {
        println!("Error: No industry data files found.");
        return Ok(());
    }

    let Some(choice) = choose(&stdin, "Select an industry to analyze:", &subjects)? else {
        return Ok(());
    };
    if !store.select_subject(&subjects[choice]) {
        println!("Error: Industry '{}' not found.", subjects[choice]);
        return Ok(());
    }
    println!("\nIndustry '{}' selected.\n", subjects[choice]);

    let actions: Vec<String> = ACTIONS.iter().map(|a| a.to_string()).collect();

    loop {
        print_section("Available Actions");
        let Some(action) = choose(&stdin, "What would you like to do?", &actions)? else {
            break;
        };

        match ACTIONS[action] {
            "Run comprehensive analysis" => {
                println!("{}", report::comprehensive(store));
            }
            "View industry overview" => {
                print_section("Industry Overview");
                print_json(&store.overview());
            }
            "Analyze Porter's Five Forces" => {
                print_section("Porter's Five Forces Analysis");
                print_json(&store.porter_forces());
            }
            "Analyze Balanced Scorecard" => {
                print_section("Balanced Scorecard Analysis");
                print_json(&store.balanced_scorecard());
            }
            "View process optimization recommendations" => {
                print_section("Process Optimization Recommendations");
                print_json(&store.recommendations());
            }
            "Analyze value chain" => {
                print_section("Value Chain Analysis");
                print_json(&store.value_chain());
            }
            "View competitive landscape" => {
                print_section("Competitive Landscape");
                print_json(&store.competitive_landscape());
            }
            "View business process analysis" => {
                print_section("Business Process Analysis");
                print_json(&store.business_processes());
            }
            "Ask a specific question" => {
                print_section("Ask a Question");
                println!("You can ask about the industry, BPM principles, or specific analyses.");
                println!("Examples:");
                println!("- What are the key challenges in the industry?");
                println!("- How strong is the bargaining power of suppliers?");
                println!("- What are the recommended short-term process improvements?");
                println!("- What are the core BPM principles?");

                let Some(question) = read_line(&stdin, "\nEnter your question: ")? else {
                    break;
                };
                print_section("Answer");
                println!("{}", engine.answer(store, &question));
            }
            "Change industry" => {
                let Some(choice) = choose(&stdin, "Select an industry to analyze:", &subjects)?
                else {
                    break;
                };
                if store.select_subject(&subjects[choice]) {
                    println!("\nIndustry '{}' selected.\n", subjects[choice]);
                } else {
                    println!("Error: Industry '{}' not found.", subjects[choice]);
                }
            }
            _ => {
                println!("\nThank you for using BPM Industry Insight. Goodbye!");
                break;
            }
        }
    }

    Ok(())
}
