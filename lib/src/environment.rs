//! # Game state
//!
//! `Environment` owns every zone of one game: the library, the hand and the battlefield, plus
//! the resource pool and the per-turn counters that effects adjust.
use crate::card::Card;
use crate::effect::ManaEffect;
use crate::error::Error;
use crate::mana::Mana;
use crate::policy::PlayPolicy;
use crate::records::GameRecord;
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::collections::VecDeque;

/// Table rules shared by every game of a simulation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
  /// Resource sources that may be played each turn before effects
  pub resource_plays_per_turn: usize,
  /// Hand size at the end of the cleanup phase
  pub hand_size_limit: usize,
  /// Keep a per-turn snapshot of the zones in the game record
  pub trace: bool,
}

impl Default for GameRules {
  fn default() -> Self {
    Self {
      resource_plays_per_turn: 1,
      hand_size_limit: 7,
      trace: false,
    }
  }
}

pub struct Environment {
  /// Front is the top of the library
  pub library: VecDeque<Card>,
  pub hand: Vec<Card>,
  pub battlefield: Vec<Card>,
  /// Set aside until the opening hand is kept
  pub commander: Option<Card>,
  pub mana_pool: Vec<Mana>,
  pub resource_plays: usize,
  pub turn: usize,
  pub use_delay: bool,
  pub draw_multiplier: usize,
  pub rules: GameRules,
  pub policy: PlayPolicy,
  pub rng: SmallRng,
  pub record: GameRecord,
  mana_generated: usize,
}

impl Environment {
  /// Returns a game at turn 0 with `library` in the given order and an empty hand
  pub fn new(library: Vec<Card>, rules: GameRules, policy: PlayPolicy, rng: SmallRng) -> Self {
    Self {
      library: library.into(),
      hand: Vec::new(),
      battlefield: Vec::new(),
      commander: None,
      mana_pool: Vec::new(),
      resource_plays: 0,
      turn: 0,
      use_delay: true,
      draw_multiplier: 1,
      rules,
      policy,
      rng,
      record: GameRecord::default(),
      mana_generated: 0,
    }
  }

  pub fn with_commander(mut self, commander: Option<Card>) -> Self {
    self.commander = commander.map(|mut card| {
      card.is_commander = true;
      card
    });
    self
  }

  pub fn shuffle_library(&mut self) {
    self.library.make_contiguous().shuffle(&mut self.rng);
  }

  /// Moves the commander, if still set aside, into hand
  pub fn add_commander_to_hand(&mut self) {
    if let Some(commander) = self.commander.take() {
      self.hand.push(commander);
    }
  }

  /// Resets the per-turn counters and advances the turn number
  pub fn begin_turn(&mut self) {
    self.turn += 1;
    self.mana_pool.clear();
    self.resource_plays = self.rules.resource_plays_per_turn;
    self.draw_multiplier = 1;
    self.use_delay = true;
    self.mana_generated = 0;
  }

  /// Draws up to `n` cards from the top of the library and returns how many were drawn
  pub fn draw(&mut self, n: usize) -> usize {
    if n > self.library.len() {
      debug!(
        "{}",
        Error::ExhaustedLibrary {
          requested: n,
          available: self.library.len()
        }
      );
    }
    let count = n.min(self.library.len());
    for card in self.library.drain(..count) {
      self.record.drawn.push((card.name.clone(), self.turn));
      self.hand.push(card);
    }
    count
  }

  /// Adds a unit to the pool. Effect mana counts as generated.
  pub fn add_mana(&mut self, mana: Mana) {
    self.mana_generated += 1;
    self.mana_pool.push(mana);
  }

  /// Units generated so far this turn
  pub fn mana_generated(&self) -> usize {
    self.mana_generated
  }

  pub fn record_play(&mut self, name: &str) {
    self.record.played.push((name.to_string(), self.turn));
  }

  /// Lets the battlefield card at `index` produce, returns what it added to the pool.
  ///
  /// A card with a pending delay only counts it down unless delays are ignored this turn,
  /// in which case the delay is cleared and the card produces.
  pub fn generate_resources(&mut self, index: usize) -> Vec<Mana> {
    let use_delay = self.use_delay;
    let card = match self.battlefield.get_mut(index) {
      Some(card) => card,
      None => return Vec::new(),
    };
    if card.delay > 0 {
      if use_delay {
        card.delay -= 1;
        return Vec::new();
      }
      card.delay = 0;
    }
    let effects: Vec<ManaEffect> = self
      .battlefield
      .iter()
      .flat_map(|c| c.mana_effects.iter().cloned())
      .collect();
    let producer = &self.battlefield[index];
    let mut produced = producer.resource_yield.clone();
    for effect in &effects {
      effect.apply(producer, &mut produced, &mut self.rng);
    }
    self.mana_generated += produced.len();
    self.mana_pool.extend(produced.iter().cloned());
    produced
  }

  /// Hand indices of the cards that can be played right now
  pub fn legal_plays(&self) -> Vec<usize> {
    self
      .hand
      .iter()
      .enumerate()
      .filter(|(_, card)| card.can_play(self))
      .map(|(i, _)| i)
      .collect()
  }

  /// Plays `card`, puts it into play and lets it produce immediately.
  /// On failure the card is handed back untouched.
  pub fn resolve(&mut self, card: Card, free: bool) -> Result<Vec<Mana>, (Card, Error)> {
    if let Err(e) = card.play(self, free) {
      return Err((card, e));
    }
    self.battlefield.push(card);
    let index = self.battlefield.len() - 1;
    Ok(self.generate_resources(index))
  }

  /// Puts one policy-chosen non-source card from hand into play for free.
  /// Returns false if the hand has nothing to cast.
  pub fn cast_free(&mut self) -> bool {
    let candidates: Vec<usize> = self
      .hand
      .iter()
      .enumerate()
      .filter(|(_, card)| !card.is_filler && !card.is_resource_source)
      .map(|(i, _)| i)
      .collect();
    let choice = match self
      .policy
      .choose_next_play(&self.hand, &candidates, &mut self.rng)
    {
      Some(choice) => choice,
      None => return false,
    };
    let card = self.hand.remove(choice);
    if let Err((card, e)) = self.resolve(card, true) {
      warn!("free cast failed: {}", e);
      self.hand.push(card);
      return false;
    }
    true
  }

  /// Consumes the game and returns its record
  pub fn into_record(self) -> GameRecord {
    self.record
  }
}
