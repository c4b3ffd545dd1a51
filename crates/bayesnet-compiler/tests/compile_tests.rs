use bayesnet_compiler::{compile, CompileError, CompileOptions, RootPriors};
use bayesnet_ir::parse::{parse_network, parse_network_json};
use bayesnet_ir::types::{NetworkDef, VariableDef};
use bayesnet_model::Assignment;

fn bits(s: &str) -> Assignment {
    Assignment::from_bits(s.chars().map(|c| c == '1').collect())
}

fn sprinkler() -> NetworkDef {
    parse_network(include_str!("fixtures/sprinkler.bn")).unwrap()
}

#[test]
fn test_compile_preserves_declaration_order() {
    let network = compile(&sprinkler(), &CompileOptions::default()).unwrap();
    let names: Vec<&str> = network.names().collect();
    assert_eq!(names, vec!["cloudy", "sprinkler", "rain", "wetgrass"]);
}

#[test]
fn test_parents_resolve_to_ids() {
    let network = compile(&sprinkler(), &CompileOptions::default()).unwrap();
    let wet = network.variable(3).unwrap();
    assert_eq!(wet.parents(), &[1, 2]);
    assert!(network.variable(0).unwrap().is_root());
}

#[test]
fn test_rows_follow_enumeration_order() {
    let network = compile(&sprinkler(), &CompileOptions::default()).unwrap();
    let cpt = network.variable(3).unwrap().cpt();
    assert_eq!(cpt.weight(&bits("11")).unwrap(), 0.99);
    assert_eq!(cpt.weight(&bits("10")).unwrap(), 0.9);
    assert_eq!(cpt.weight(&bits("01")).unwrap(), 0.9);
    assert_eq!(cpt.weight(&bits("00")).unwrap(), 0.0);
}

#[test]
fn test_lookup_uses_current_parent_values() {
    let mut network = compile(&sprinkler(), &CompileOptions::default()).unwrap();
    network.set_value(1, false).unwrap();
    network.set_value(2, true).unwrap();
    // sprinkler false, rain true -> row "01"
    assert_eq!(network.probability(3).unwrap(), 0.9);
    network.set_value(2, false).unwrap();
    assert_eq!(network.probability(3).unwrap(), 0.0);
}

#[test]
fn test_root_prior_true_only_by_default() {
    let def = NetworkDef {
        variables: vec![VariableDef::root("a", 0.7)],
    };
    let network = compile(&def, &CompileOptions::default()).unwrap();
    let cpt = network.variable(0).unwrap().cpt();
    assert_eq!(cpt.weight(&bits("1")).unwrap(), 0.7);
    assert_eq!(cpt.weight(&bits("0")).unwrap(), 0.0);
    assert_eq!(network.probability(0).unwrap(), 0.7);
}

#[test]
fn test_root_prior_complement() {
    let def = NetworkDef {
        variables: vec![VariableDef::root("a", 0.7)],
    };
    let options = CompileOptions {
        root_priors: RootPriors::Complement,
    };
    let network = compile(&def, &options).unwrap();
    let cpt = network.variable(0).unwrap().cpt();
    assert_eq!(cpt.weight(&bits("1")).unwrap(), 0.7);
    assert!((cpt.weight(&bits("0")).unwrap() - 0.3).abs() < 1e-12);
    assert_eq!(network.probability(0).unwrap(), 0.7);
}

#[test]
fn test_invalid_definition_is_rejected() {
    let def = NetworkDef {
        variables: vec![VariableDef::conditional("b", &["a"], vec![0.8, 0.1])],
    };
    let result = compile(&def, &CompileOptions::default());
    match result {
        Err(CompileError::Validation(errors)) => assert_eq!(errors.len(), 1),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_compile_options_from_json() {
    let options: CompileOptions = serde_json::from_str(r#"{ "root_priors": "complement" }"#).unwrap();
    assert_eq!(options.root_priors, RootPriors::Complement);
    let options: CompileOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options.root_priors, RootPriors::TrueOnly);
}

#[test]
fn test_json_definition_compiles() {
    let def = parse_network_json(include_str!("fixtures/two_node.json")).unwrap();
    let network = compile(&def, &CompileOptions::default()).unwrap();
    assert_eq!(network.find("b"), Some(1));
}
