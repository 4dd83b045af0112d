/// Golden scenario test: replays the frozen token scripts and asserts
/// the display and history match the recorded values.
///
/// Fixtures must NEVER be edited to match new behavior.
/// If this fails, calculator semantics have changed.

use std::fs;

use serde::Deserialize;

use calc_engine::engine::Calculator;
use calc_engine::hashing::canonical_hash;
use calc_engine::tokens::Token;
use calc_engine::ENGINE_VERSION;

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    tokens: String,
    display: String,
    history: Vec<String>,
}

fn load_scenarios(path: &str) -> Vec<Scenario> {
    let data = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));
    serde_json::from_str(&data).expect("Failed to parse scenarios JSON")
}

fn run(script: &str) -> Calculator {
    let tokens = Token::parse_script(script)
        .unwrap_or_else(|e| panic!("bad script {:?}: {}", script, e));
    let mut calc = Calculator::new();
    calc.apply_sequence(&tokens);
    calc
}

#[test]
fn golden_scenarios_match() {
    let scenarios = load_scenarios("tests/golden/scenarios.json");
    assert!(!scenarios.is_empty());

    let mut failures = Vec::new();
    for scenario in &scenarios {
        let view = run(&scenario.tokens).view();
        if view.display != scenario.display || view.history != scenario.history {
            failures.push(format!(
                "[{}] tokens={:?}\n  display: got {:?}, expected {:?}\n  history: got {:?}, expected {:?}",
                scenario.name,
                scenario.tokens,
                view.display,
                scenario.display,
                view.history,
                scenario.history
            ));
        }
    }
    assert!(failures.is_empty(), "GOLDEN SCENARIOS FAILED:\n{}", failures.join("\n"));
}

#[test]
fn golden_replay_is_deterministic() {
    for scenario in load_scenarios("tests/golden/scenarios.json") {
        let h1 = canonical_hash(run(&scenario.tokens).state());
        let h2 = canonical_hash(run(&scenario.tokens).state());
        assert_eq!(
            h1, h2,
            "DETERMINISM FAILURE in {}: two replays produced different hashes",
            scenario.name
        );
    }
}

#[test]
fn scenario_seven_plus_three() {
    let view = run("7 + 3 =").view();
    assert_eq!(view.display, "10");
    assert_eq!(view.history.first().map(String::as_str), Some("7 + 3 = 10"));
}

#[test]
fn scenario_square_of_nine() {
    let view = run("9 x²").view();
    assert_eq!(view.display, "81");
    assert_eq!(view.history.first().map(String::as_str), Some("x²(9) = 81"));
}

#[test]
fn scenario_chained_fold_does_not_crash() {
    let mut calc = run("1 2 3 + 4 +");
    assert_eq!(calc.view().display, "127");

    calc.apply_token(Token::Equals);
    let after_first = calc.view();
    assert_eq!(after_first.display, "254");

    let result = calc.apply_token(Token::Equals);
    assert!(!result.accepted);
    assert_eq!(calc.view(), after_first);
}

#[test]
fn scenario_sqrt_of_zero() {
    assert_eq!(run("0 √").view().display, "0");
    assert_eq!(run("√").view().history, vec!["√(0) = 0"]);
}

#[test]
fn engine_version_is_one() {
    assert_eq!(ENGINE_VERSION, 1, "ENGINE_VERSION is part of the canonical hash");
}
