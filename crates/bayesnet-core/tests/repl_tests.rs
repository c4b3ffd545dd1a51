use std::io::Cursor;

use bayesnet_compiler::{compile, CompileOptions};
use bayesnet_core::repl::{GOODBYE, INVALID_INPUT, WELCOME};
use bayesnet_core::{OutputFormat, Repl, SessionConfig};
use bayesnet_ir::parse::parse_network;
use bayesnet_model::Network;
use bayesnet_sampling::{InferenceMethod, SamplerConfig};

fn two_node() -> Network {
    let def = parse_network(include_str!("fixtures/two_node.bn")).unwrap();
    compile(&def, &CompileOptions::default()).unwrap()
}

fn seeded() -> SessionConfig {
    SessionConfig {
        sampler: SamplerConfig {
            seed: Some(5),
            ..SamplerConfig::default()
        },
        ..SessionConfig::default()
    }
}

fn run_dialogue(input: &str, config: &SessionConfig) -> String {
    let mut repl = Repl::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    repl.run("two_node.bn", two_node(), config).unwrap();
    String::from_utf8(repl.into_output()).unwrap()
}

fn weight_of(output: &str, prefix: &str) -> f64 {
    let line = output
        .lines()
        .find_map(|l| l.split_once(prefix).map(|(_, rest)| rest))
        .unwrap_or_else(|| panic!("no line containing {prefix:?} in:\n{output}"));
    line.trim().parse().unwrap()
}

#[test]
fn test_full_dialogue() {
    let output = run_dialogue("1\n20000\np(b)\nquit\n", &seeded());

    assert!(output.starts_with(WELCOME));
    assert!(output.contains("The Bayesian network being analyzed is: two_node.bn"));
    assert!(output.contains("The nodes in the network are:\na\nb\n"));
    assert!(output.contains("1. Direct sampling (no evidence)"));
    assert!(output.contains("Enter the number of samples: "));
    assert!(output.trim_end().ends_with(GOODBYE));

    let p = weight_of(&output, "p(b=true) = ");
    assert!((p - 0.45).abs() < 0.02, "P(b) = {p}");
    assert!(output.contains("p(b=false) = "));
}

#[test]
fn test_rendered_lines_follow_network_order() {
    let output = run_dialogue("1\n1000\np(b, a)\nquit\n", &seeded());
    let lines: Vec<&str> = output
        .lines()
        .filter_map(|l| l.find("p(a=").map(|i| &l[i..]))
        .collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("p(a=true, b=true) = "));
    assert!(lines[1].starts_with("p(a=true, b=false) = "));
    assert!(lines[2].starts_with("p(a=false, b=true) = "));
    assert!(lines[3].starts_with("p(a=false, b=false) = "));
}

#[test]
fn test_evidence_is_rendered_after_pipe() {
    let config = SessionConfig {
        method: Some(InferenceMethod::LikelihoodWeighting),
        samples: Some(20_000),
        ..seeded()
    };
    let output = run_dialogue("p(a|b)\nquit\n", &config);
    let p = weight_of(&output, "p(a=true | b) = ");
    assert!((p - 0.889).abs() < 0.03, "P(a|b) = {p}");
    assert!(!output.contains("Choose an inference method"));
    assert!(!output.contains("Enter the number of samples"));
}

#[test]
fn test_direct_sampling_refuses_evidence() {
    let output = run_dialogue("1\n100\np(a|b)\nquit\n", &seeded());
    assert!(output.contains("Error: Your query cannot contain evidence\n"));
}

#[test]
fn test_rejection_sampling_requires_evidence() {
    let output = run_dialogue("2\n100\np(a)\nquit\n", &seeded());
    assert!(output.contains("Error: Your query must contain evidence\n"));
}

#[test]
fn test_malformed_queries_are_invalid_input() {
    let output = run_dialogue("1\n100\np(a\nfoo\np(a)b\nquit\n", &seeded());
    assert_eq!(output.matches(INVALID_INPUT).count(), 3);
}

#[test]
fn test_prompts_repeat_until_valid() {
    let output = run_dialogue("x\n9\n3\n0\nmany\n500\nquit\n", &seeded());
    assert_eq!(output.matches("Choose an inference method: ").count(), 3);
    assert_eq!(output.matches("Enter the number of samples: ").count(), 3);
    assert_eq!(output.matches("Enter a query").count(), 1);
}

#[test]
fn test_end_of_input_exits() {
    let output = run_dialogue("1\n100\np(a)\n", &seeded());
    assert!(output.contains("p(a=true) = "));
    assert!(output.trim_end().ends_with(GOODBYE));

    let output = run_dialogue("", &seeded());
    assert!(output.trim_end().ends_with(GOODBYE));
    assert!(!output.contains("Enter a query"));
}

#[test]
fn test_json_output() {
    let config = SessionConfig {
        method: Some(InferenceMethod::Rejection),
        samples: Some(5_000),
        output: OutputFormat::Json,
        ..seeded()
    };
    let output = run_dialogue("p(a|!b)\nquit\n", &config);
    let line = output
        .lines()
        .find_map(|l| l.find('{').map(|i| &l[i..]))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(line).unwrap();

    assert_eq!(value["query"], "p(a|!b)");
    assert_eq!(value["variables"], serde_json::json!(["a"]));
    assert_eq!(value["evidence"]["b"], false);
    assert_eq!(value["attempts"], 5_000);
    let events = value["distribution"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["assignment"]["a"], true);
    let total: f64 = events.iter().map(|e| e["weight"].as_f64().unwrap()).sum();
    assert!((total - 1.0).abs() < 1e-9);
}
