//! # Simulation driver
//!
//! Plays many independent games of one deck and keeps what each game left behind.
use crate::deck::Deck;
use crate::environment::{Environment, GameRules};
use crate::error::Error;
use crate::mulligan::Mulligan;
use crate::policy::PlayPolicy;
use crate::records::GameRecord;
use crate::report::Report;
use crate::turn::run_turn;
use rand::prelude::*;
use rand::rngs::SmallRng;

pub struct SimulationConfig<'a, 'b, M: Mulligan> {
  pub run_count: usize,
  pub turn_count: usize,
  pub deck: &'a Deck,
  pub mulligan: &'b M,
  pub policy: PlayPolicy,
  pub rules: GameRules,
  /// Fixes every game's random choices; None seeds from entropy
  pub seed: Option<u64>,
}

#[derive(Debug, Default)]
pub struct Simulation {
  pub games: Vec<GameRecord>,
  /// Iterations thrown away after reaching an inconsistent state
  pub dropped: usize,
  pub turn_count: usize,
  pub card_names: Vec<String>,
}

impl Simulation {
  pub fn from_config<M: Mulligan>(config: &SimulationConfig<M>) -> Self {
    let mut rng = match config.seed {
      Some(seed) => SmallRng::seed_from_u64(seed),
      None => SmallRng::from_entropy(),
    };
    let library = config.deck.library();
    let mut games = Vec::with_capacity(config.run_count);
    let mut dropped = 0;
    for iteration in 0..config.run_count {
      let env = Environment::new(
        library.clone(),
        config.rules,
        config.policy.clone(),
        SmallRng::seed_from_u64(rng.gen()),
      )
      .with_commander(config.deck.commander.clone());
      match play_game(env, config.mulligan, config.turn_count) {
        Ok(record) => games.push(record),
        Err(e) => {
          warn!("Dropping iteration {}: {}", iteration, e);
          dropped += 1;
        }
      }
    }
    debug!(
      "Simulated {} games of {} turns, dropped {}",
      games.len(),
      config.turn_count,
      dropped
    );
    Simulation {
      games,
      dropped,
      turn_count: config.turn_count,
      card_names: config.deck.card_names(),
    }
  }

  pub fn report(&self) -> Report {
    Report::from_records(&self.games, self.turn_count, &self.card_names)
  }
}

/// Shuffles, deals the opening hand and plays up to `turn_count` turns.
/// The game ends early once a turn starts with an empty library.
pub fn play_game<M: Mulligan>(
  mut env: Environment,
  mulligan: &M,
  turn_count: usize,
) -> Result<GameRecord, Error> {
  env.shuffle_library();
  mulligan.deal_opening_hand(&mut env);
  for _ in 0..turn_count {
    if env.library.is_empty() {
      debug!("Library empty before turn {}, ending the game", env.turn + 1);
      break;
    }
    run_turn(&mut env)?;
  }
  Ok(env.into_record())
}

#[cfg(test)]
mod tests {
  use crate::card::Card;
  use crate::catalog::CATALOG;
  use crate::deck::Deck;
  use crate::effect::Effect;
  use crate::mana::{Mana, ManaColor};
  use crate::mulligan::{Never, ProducerCount};
  use crate::simulation::*;

  fn forests(count: usize) -> Deck {
    Deck::from_cards(vec![card!("Forest"); count])
  }

  /// A land that refunds its land play and returns another copy of itself to hand,
  /// so two copies keep each other looping forever
  fn looper() -> Card {
    Card {
      name: "Looper".to_string(),
      resource_yield: vec![Mana::Concrete(ManaColor::Green)],
      is_resource_source: true,
      play_effects: vec![
        Effect::IncreaseResourcePlays(1),
        Effect::Bounce("Looper".to_string()),
      ],
      ..Card::default()
    }
  }

  static KEEP_SEVEN: Never = Never {
    starting_hand_size: 7,
  };

  fn never_config(deck: &Deck, run_count: usize) -> SimulationConfig<'_, 'static, Never> {
    SimulationConfig {
      run_count,
      turn_count: 10,
      deck,
      mulligan: &KEEP_SEVEN,
      policy: PlayPolicy::default(),
      rules: GameRules::default(),
      seed: Some(11),
    }
  }

  #[test]
  fn forty_forests_curve_out() {
    let deck = forests(40);
    let sim = Simulation::from_config(&SimulationConfig {
      run_count: 50,
      turn_count: 10,
      deck: &deck,
      mulligan: &ProducerCount::default(),
      policy: PlayPolicy::default(),
      rules: GameRules::default(),
      seed: Some(42),
    });
    assert_eq!(sim.games.len(), 50);
    assert_eq!(sim.dropped, 0);
    for game in &sim.games {
      assert_eq!(game.mana_by_turn(), (1..=10).collect::<Vec<_>>());
      assert_eq!(game.mulligans, 0);
    }
    let report = sim.report();
    assert_eq!(report.turns[9].mana.mean, 10.0);
    assert_eq!(report.turns[9].mana.stddev, 0.0);
  }

  #[test]
  fn short_library_ends_the_game() {
    let deck = forests(9);
    let sim = Simulation::from_config(&SimulationConfig {
      run_count: 3,
      turn_count: 10,
      deck: &deck,
      mulligan: &Never::default(),
      policy: PlayPolicy::default(),
      rules: GameRules::default(),
      seed: Some(1),
    });
    for game in &sim.games {
      // 7 in hand, 2 draws, then the library is empty
      assert_eq!(game.turns.len(), 2);
      assert_eq!(game.drawn.len(), 9);
    }
    assert_eq!(sim.report().turns[2].games, 0);
  }

  #[test]
  fn seeded_runs_repeat() {
    let deck = decklist!(include_str!("decks/green_ramp"));
    let run = |seed| {
      Simulation::from_config(&SimulationConfig {
        run_count: 20,
        turn_count: 8,
        deck: &deck,
        mulligan: &ProducerCount::default(),
        policy: PlayPolicy::default(),
        rules: GameRules::default(),
        seed: Some(seed),
      })
      .games
    };
    assert_eq!(run(7), run(7));
  }

  #[test]
  fn commander_joins_the_opening_hand() {
    let deck = decklist!("40 Forest\nSB: 1 Omnath, Locus of Mana");
    let sim = Simulation::from_config(&SimulationConfig {
      run_count: 5,
      turn_count: 3,
      deck: &deck,
      mulligan: &Never::default(),
      policy: PlayPolicy::default(),
      rules: GameRules::default(),
      seed: Some(3),
    });
    for game in &sim.games {
      // cast on turn 3 with three forests
      assert!(game
        .played
        .contains(&("Omnath, Locus of Mana".to_string(), 3)));
    }
    assert!(sim.card_names.contains(&"Omnath, Locus of Mana".to_string()));
  }

  #[test]
  fn unknown_cards_are_inert() {
    let mut library = vec![card!("Forest"); 30];
    library.extend(vec![Card::filler("Mystery Card"); 10]);
    let deck = Deck::from_cards(library);
    let sim = Simulation::from_config(&SimulationConfig {
      run_count: 10,
      turn_count: 5,
      deck: &deck,
      mulligan: &ProducerCount::default(),
      policy: PlayPolicy::default(),
      rules: GameRules::default(),
      seed: None,
    });
    for game in &sim.games {
      assert!(game.played.iter().all(|(name, _)| name == "Forest"));
    }
    assert!(CATALOG.card_from_name("Mystery Card").is_none());
  }

  #[test]
  fn runaway_games_are_dropped() {
    let deck = Deck::from_cards(vec![looper(); 20]);
    let sim = Simulation::from_config(&never_config(&deck, 3));
    assert!(sim.games.is_empty());
    assert_eq!(sim.dropped, 3);
    assert_eq!(sim.report().games, 0);
  }

  #[test]
  fn only_runaway_games_are_dropped() {
    // games that see both loopers never finish a turn, the rest play out normally
    let mut library = vec![card!("Forest"); 38];
    library.extend(vec![looper(); 2]);
    let deck = Deck::from_cards(library);
    let sim = Simulation::from_config(&never_config(&deck, 200));
    assert!(sim.dropped > 0);
    assert!(!sim.games.is_empty());
    assert_eq!(sim.dropped + sim.games.len(), 200);
    for game in &sim.games {
      assert_eq!(game.turns.len(), 10);
    }
  }
}
