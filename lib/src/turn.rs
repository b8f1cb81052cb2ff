//! # Turn engine
//!
//! One turn is a fixed sequence of phases, run by `run_turn` against an `Environment`.
use crate::card::Card;
use crate::effect::Effect;
use crate::environment::Environment;
use crate::error::Error;
use crate::mana::Mana;
use crate::records::{TurnRecord, TurnTrace};

/// Upper bound on plays in one cast phase
const MAX_PLAYS_PER_TURN: usize = 1000;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
  /// Every turn effect in play is applied, in battlefield order
  Untap,
  /// Expired transient cards leave the hand, then one card is drawn
  Draw,
  /// Every card in play produces, in battlefield order
  Generate,
  /// Cards are played until nothing in hand is legal
  Cast,
  /// The hand is discarded down to the hand size limit
  Cleanup,
  /// Cards that do not survive leave play
  Attrition,
}

impl Phase {
  pub const ORDER: [Phase; 6] = [
    Phase::Untap,
    Phase::Draw,
    Phase::Generate,
    Phase::Cast,
    Phase::Cleanup,
    Phase::Attrition,
  ];
}

/// Plays the next turn of `env` and returns its resource totals.
/// An `Err` means the game reached a state it should not be in and must be thrown away.
pub fn run_turn(env: &mut Environment) -> Result<TurnRecord, Error> {
  env.begin_turn();
  let mut discarded = Vec::new();
  for phase in Phase::ORDER.iter() {
    trace!("turn {} {:?}", env.turn, phase);
    match phase {
      Phase::Untap => untap(env),
      Phase::Draw => draw(env),
      Phase::Generate => generate(env),
      Phase::Cast => cast(env)?,
      Phase::Cleanup => discarded = cleanup(env),
      Phase::Attrition => attrition(env),
    }
  }
  let record = TurnRecord {
    turn: env.turn,
    mana_generated: env.mana_generated(),
    mana_left: env.mana_pool.len(),
  };
  if env.rules.trace {
    let trace = snapshot(env, &record, discarded);
    env.record.traces.push(trace);
  }
  env.record.turns.push(record.clone());
  Ok(record)
}

fn untap(env: &mut Environment) {
  // effects attached during this phase wait for the next turn
  let effects: Vec<Effect> = env
    .battlefield
    .iter()
    .flat_map(|card| card.turn_effects.iter().cloned())
    .collect();
  for effect in &effects {
    effect.apply(env);
  }
}

fn draw(env: &mut Environment) {
  let turn = env.turn;
  env
    .hand
    .retain(|card| card.token_turn.map_or(true, |t| t >= turn));
  env.draw(1);
}

fn generate(env: &mut Environment) {
  for i in 0..env.battlefield.len() {
    env.generate_resources(i);
  }
}

fn cast(env: &mut Environment) -> Result<(), Error> {
  let mut stalled: Vec<Card> = Vec::new();
  let mut plays = 0;
  loop {
    let legal = env.legal_plays();
    if legal.is_empty() {
      break;
    }
    plays += 1;
    if plays > MAX_PLAYS_PER_TURN {
      return Err(Error::Inconsistent(format!(
        "more than {} plays on turn {}",
        MAX_PLAYS_PER_TURN, env.turn
      )));
    }
    let choice = env
      .policy
      .choose_next_play(&env.hand, &legal, &mut env.rng)
      .filter(|choice| legal.contains(choice))
      .ok_or_else(|| Error::Inconsistent("play policy chose no legal card".to_string()))?;
    let card = env.hand.remove(choice);
    if let Err((card, e)) = env.resolve(card, false) {
      debug!("{}", e);
      stalled.push(card);
    }
  }
  env.hand.append(&mut stalled);
  Ok(())
}

fn cleanup(env: &mut Environment) -> Vec<String> {
  let limit = env.rules.hand_size_limit;
  if env.hand.len() <= limit {
    return Vec::new();
  }
  let mut doomed = env.policy.choose_discards(&env.hand, env.hand.len() - limit);
  doomed.sort_unstable_by(|a, b| b.cmp(a));
  doomed
    .into_iter()
    .map(|i| env.hand.remove(i).name)
    .collect()
}

fn attrition(env: &mut Environment) {
  let battlefield = std::mem::take(&mut env.battlefield);
  for mut card in battlefield {
    if card.survives() {
      env.battlefield.push(card);
    } else if card.is_commander {
      card.cost.extend(vec![Mana::Generic; 2]);
      env.hand.push(card);
    }
  }
}

fn snapshot(env: &Environment, record: &TurnRecord, discarded: Vec<String>) -> TurnTrace {
  let names = |cards: &[Card]| cards.iter().map(|c| c.name.clone()).collect::<Vec<_>>();
  TurnTrace {
    turn: record.turn,
    drawn: env
      .record
      .drawn
      .iter()
      .filter(|(_, turn)| *turn == record.turn)
      .map(|(name, _)| name.clone())
      .collect(),
    battlefield: names(&env.battlefield),
    hand: names(&env.hand),
    discarded,
    mana_generated: record.mana_generated,
    mana_left: record.mana_left,
  }
}

#[cfg(test)]
mod tests {
  use crate::card::Card;
  use crate::effect::{Effect, Filter, Hook, Zone};
  use crate::environment::{Environment, GameRules};
  use crate::mana::{Mana, ManaColor};
  use crate::policy::PlayPolicy;
  use crate::turn::*;
  use rand::rngs::SmallRng;
  use rand::SeedableRng;

  fn env(library: Vec<Card>, rules: GameRules) -> Environment {
    Environment::new(
      library,
      rules,
      PlayPolicy::default(),
      SmallRng::seed_from_u64(9),
    )
  }

  #[test]
  fn forests_ramp_one_per_turn() {
    let mut env = env(vec![card!("Forest"); 40], GameRules::default());
    env.draw(7);
    for turn in 1..=10 {
      let record = run_turn(&mut env).unwrap();
      assert_eq!(record.turn, turn);
      assert_eq!(record.mana_generated, turn);
      assert_eq!(record.mana_left, turn);
    }
    assert_eq!(env.battlefield.len(), 10);
    assert_eq!(env.record.turns.len(), 10);
  }

  #[test]
  fn turn_effects_from_cards_entering_mid_turn_wait() {
    let mut env = env(vec![card!("Forest"); 10], GameRules::default());
    env.battlefield.push(Card {
      name: "Engine".to_string(),
      turn_effects: vec![Effect::CastFree(1)],
      ..Card::default()
    });
    env.hand.push(Card {
      name: "Map".to_string(),
      turn_effects: vec![Effect::IncreaseResourcePlays(1)],
      ..Card::default()
    });
    env.hand.extend(vec![card!("Forest"); 3]);
    // Map enters during the untap phase, its extra play starts next turn
    let first = run_turn(&mut env).unwrap();
    assert_eq!(first.mana_generated, 1);
    assert!(env.battlefield.iter().any(|c| c.name == "Map"));
    let second = run_turn(&mut env).unwrap();
    assert_eq!(second.mana_generated, 3);
  }

  #[test]
  fn non_survivors_leave_the_same_turn() {
    let mut env = env(vec![card!("Forest"); 10], GameRules::default());
    env.hand.push(Card {
      name: "Ritual".to_string(),
      survival_chance: 0.0,
      play_effects: vec![Effect::AddMana(Mana::Concrete(ManaColor::Red))],
      ..Card::default()
    });
    let record = run_turn(&mut env).unwrap();
    assert_eq!(record.mana_generated, 2);
    assert_eq!(env.battlefield.len(), 1);
    assert_eq!(env.battlefield[0].name, "Forest");
    assert_eq!(env.record.played.len(), 2);
  }

  #[test]
  fn commander_returns_costing_more() {
    let mut env = env(vec![card!("Forest"); 10], GameRules::default());
    env.hand.push(Card {
      name: "Leader".to_string(),
      survival_chance: 0.0,
      is_commander: true,
      ..Card::default()
    });
    run_turn(&mut env).unwrap();
    let leader = env.hand.iter().find(|c| c.name == "Leader").unwrap();
    assert_eq!(leader.cost, vec![Mana::Generic; 2]);
    run_turn(&mut env).unwrap();
    let leader = env.hand.iter().find(|c| c.name == "Leader").unwrap();
    assert_eq!(leader.cost.len(), 4);
  }

  #[test]
  fn cleanup_discards_to_limit() {
    let rules = GameRules {
      trace: true,
      ..GameRules::default()
    };
    let mut env = env(vec![Card::filler("Blank"); 20], rules);
    env.draw(9);
    run_turn(&mut env).unwrap();
    assert_eq!(env.hand.len(), 7);
    let trace = &env.record.traces[0];
    assert_eq!(trace.discarded.len(), 3);
    assert_eq!(trace.drawn, vec!["Blank".to_string()]);
    assert_eq!(trace.hand.len(), 7);
  }

  #[test]
  fn turn_effects_granted_in_play_wait() {
    let mut env = env(vec![card!("Forest"); 10], GameRules::default());
    env.battlefield.push(card!("Forest"));
    env.battlefield.push(Card {
      name: "Blessing".to_string(),
      turn_effects: vec![Effect::Grant {
        filter: Filter::ResourceSources,
        hook: Hook::Turn,
        zone: Zone::Battlefield,
        effect: Box::new(Effect::AddMana(Mana::Concrete(ManaColor::Red))),
      }],
      ..Card::default()
    });
    // the old forest and the one played this turn
    let first = run_turn(&mut env).unwrap();
    assert_eq!(first.mana_generated, 2);
    assert_eq!(env.battlefield[0].turn_effects.len(), 1);
    assert!(env.battlefield[2].turn_effects.is_empty());
    // the granted effect fires once, then three forests produce
    let second = run_turn(&mut env).unwrap();
    assert_eq!(second.mana_generated, 4);
    assert_eq!(env.battlefield[0].turn_effects.len(), 2);
    assert_eq!(env.battlefield[2].turn_effects.len(), 1);
  }

  #[test]
  fn expired_draw_spells_are_purged() {
    let mut env = env(vec![card!("Forest"); 10], GameRules::default());
    env.battlefield.push(Card {
      name: "Wand".to_string(),
      turn_effects: vec![Effect::AddDrawSpell(5)],
      ..Card::default()
    });
    env.begin_turn();
    env.hand.push(Card::draw_spell(5, env.turn));
    run_turn(&mut env).unwrap();
    // last turn's spell is gone, the one made during untap is kept
    let spells: Vec<usize> = env.hand.iter().filter_map(|c| c.token_turn).collect();
    assert_eq!(spells, vec![env.turn]);
  }
}
