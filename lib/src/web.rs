//! # Browser interface
//!
//! Defines the wasm entry point that runs a simulation from a JSON-like input object.
use crate::catalog::CATALOG;
use crate::deck::Deck;
use crate::environment::GameRules;
use crate::mulligan::ProducerCount;
use crate::policy::PlayPolicy;
use crate::report::Report;
use crate::simulation::{Simulation, SimulationConfig};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[derive(Debug, Serialize, Deserialize)]
enum Error {
  BadDeckList(String),
  EmptyDeckList,
}

fn default_turns() -> usize {
  10
}

/// Input format expected from the browser
#[derive(Debug, Serialize, Deserialize)]
struct Input {
  /// The deck list
  pub code: String,
  /// The number of games to play
  pub runs: usize,
  #[serde(default = "default_turns")]
  pub turns: usize,
  #[serde(default)]
  pub seed: Option<u64>,
  /// Card names to play as soon as they are legal
  #[serde(default)]
  pub priority: Vec<String>,
}

/// Output format returned to the browser
#[derive(Debug, Serialize, Deserialize)]
struct Output {
  pub report: Report,
  pub deck_size: usize,
  pub commander: Option<String>,
  pub unknown_cards: Vec<String>,
  pub dropped_runs: usize,
}

/// Runs a simulation given input
/// Assumes that input deserializes into a valid `Input`, and returns a serialized `Output`
/// # Example
///
///  ```js
///  const input = {code: "40 Forest", runs: 1000};
///  const output = require('rampant').rampant_run(input);
///  console.log(output.report.turns);
///  ```
#[wasm_bindgen]
pub fn rampant_run(input: &JsValue) -> JsValue {
  let input: Input = match input.into_serde() {
    Err(e) => {
      return JsValue::from_str(&format!("Error deserializing simulation inputs: {:#?}", e));
    }
    Ok(v) => v,
  };
  let result = match run_impl(&input) {
    Err(e) => {
      return JsValue::from_str(&format!("Error running simulation for input: {:#?}", e));
    }
    Ok(v) => v,
  };
  JsValue::from_serde(&result).unwrap_or_else(|e| JsValue::from_str(&e.to_string()))
}

fn run_impl(input: &Input) -> Result<Output, Error> {
  let deck = Deck::from_list(&input.code, &CATALOG)
    .map_err(|e| Error::BadDeckList(e.to_string()))?;
  if deck.is_empty() {
    return Err(Error::EmptyDeckList);
  }
  let mulligan = ProducerCount::default();
  let sim = Simulation::from_config(&SimulationConfig {
    run_count: input.runs,
    turn_count: input.turns,
    deck: &deck,
    mulligan: &mulligan,
    policy: PlayPolicy::with_priority(input.priority.clone()),
    rules: GameRules::default(),
    seed: input.seed,
  });
  Ok(Output {
    report: sim.report(),
    deck_size: deck.len(),
    commander: deck.commander.as_ref().map(|c| c.name.clone()),
    unknown_cards: deck.unknown.clone(),
    dropped_runs: sim.dropped,
  })
}

#[cfg(test)]
mod tests {
  use crate::web::*;

  fn input(code: &str) -> Input {
    Input {
      code: code.to_string(),
      runs: 20,
      turns: 5,
      seed: Some(1),
      priority: Vec::new(),
    }
  }

  #[test]
  fn forests_only() {
    let output = run_impl(&input("40 Forest\nSB: 1 Azusa, Lost but Seeking")).unwrap();
    assert_eq!(output.deck_size, 40);
    assert_eq!(output.commander, Some("Azusa, Lost but Seeking".to_string()));
    assert_eq!(output.report.games, 20);
    assert_eq!(output.report.turns.len(), 5);
    assert_eq!(output.dropped_runs, 0);
  }

  #[test]
  fn unknown_cards_are_reported() {
    let output = run_impl(&input("30 Forest\n10 Storm Crow")).unwrap();
    assert_eq!(output.unknown_cards, vec!["Storm Crow".to_string()]);
  }

  #[test]
  fn empty_and_bad_lists() {
    match run_impl(&input("# nothing")) {
      Err(Error::EmptyDeckList) => {}
      other => panic!("unexpected {:?}", other),
    }
    match run_impl(&input("Forest Forest")) {
      Err(Error::BadDeckList(_)) => {}
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn input_defaults() {
    let input: Input = serde_json::from_str(r#"{"code": "40 Forest", "runs": 3}"#).unwrap();
    assert_eq!(input.turns, 10);
    assert!(input.seed.is_none());
  }
}
