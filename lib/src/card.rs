//! # Card model
//!
//! A `Card` is a plain record: what it costs, what it produces, how long it stays in play, and
//! the effects it carries. Cards live in exactly one zone of an `Environment` at a time and
//! move between zones by value.
use crate::effect::{Effect, ManaEffect};
use crate::environment::Environment;
use crate::error::Error;
use crate::mana::Mana;
use crate::matcher::{can_pay, pay};

/// Name given to the transient cards created by `Effect::AddDrawSpell`
pub const DRAW_SPELL: &str = "Draw Spell";

fn always_survives() -> f64 {
  1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
  pub name: String,
  /// One required unit per entry
  #[serde(default, with = "crate::mana::symbols")]
  pub cost: Vec<Mana>,
  /// Units added to the pool each time the card produces
  #[serde(rename = "yield", default, with = "crate::mana::symbols")]
  pub resource_yield: Vec<Mana>,
  /// Production opportunities to skip before the card first produces
  #[serde(default)]
  pub delay: usize,
  /// Chance of staying in play at the end of each turn. Any nonzero value survives.
  #[serde(default = "always_survives")]
  pub survival_chance: f64,
  /// Played through the per-turn resource play allowance instead of paying its cost
  #[serde(default)]
  pub is_resource_source: bool,
  #[serde(default)]
  pub is_commander: bool,
  #[serde(default)]
  pub mana_effects: Vec<ManaEffect>,
  /// Applied once per turn while in play
  #[serde(default)]
  pub turn_effects: Vec<Effect>,
  /// Applied once when the card resolves
  #[serde(default)]
  pub play_effects: Vec<Effect>,
  /// Stand-in for names the catalog does not know; never played
  #[serde(default)]
  pub is_filler: bool,
  /// Set on transient cards; they are purged from hand after this turn
  #[serde(default)]
  pub token_turn: Option<usize>,
}

impl Default for Card {
  fn default() -> Self {
    Self {
      name: String::new(),
      cost: Vec::new(),
      resource_yield: Vec::new(),
      delay: 0,
      survival_chance: always_survives(),
      is_resource_source: false,
      is_commander: false,
      mana_effects: Vec::new(),
      turn_effects: Vec::new(),
      play_effects: Vec::new(),
      is_filler: false,
      token_turn: None,
    }
  }
}

impl Card {
  /// Returns an inert card with the given name
  pub fn filler(name: &str) -> Self {
    Self {
      name: name.to_string(),
      survival_chance: 0.0,
      is_filler: true,
      ..Self::default()
    }
  }

  /// Returns the transient "Draw Spell" created on `turn`
  pub fn draw_spell(cost: usize, turn: usize) -> Self {
    Self {
      name: DRAW_SPELL.to_string(),
      cost: vec![Mana::Generic; cost],
      survival_chance: 0.0,
      play_effects: vec![Effect::DrawCards(1)],
      token_turn: Some(turn),
      ..Self::default()
    }
  }

  /// Returns true if the card adds units to the pool when it produces
  pub fn is_producer(&self) -> bool {
    !self.resource_yield.is_empty()
  }

  /// Returns true if the card stays in play at end of turn
  pub fn survives(&self) -> bool {
    self.survival_chance > 0.0
  }

  /// Returns true if the card can be played from hand right now
  pub fn can_play(&self, env: &Environment) -> bool {
    if self.is_filler {
      false
    } else if self.is_resource_source {
      env.resource_plays > 0
    } else {
      can_pay(&env.mana_pool, &self.cost)
    }
  }

  /// Pays for the card (unless `free`), applies its play effects and records the play.
  /// The caller owns moving the card into play.
  pub fn play(&self, env: &mut Environment, free: bool) -> Result<(), Error> {
    if !free {
      if !self.can_play(env) {
        return Err(Error::UnpayableCost(self.name.clone()));
      }
      if self.is_resource_source {
        env.resource_plays -= 1;
      } else {
        pay(&mut env.mana_pool, &self.cost)?;
      }
    }
    for effect in &self.play_effects {
      effect.apply(env);
    }
    env.record_play(&self.name);
    Ok(())
  }
}

/// Returns a clone of the catalog card with this name, panicking if there is none
#[macro_export]
macro_rules! card {
  ($card_name:expr) => {
    $crate::catalog::CATALOG
      .card_from_name($card_name)
      .cloned()
      .unwrap_or_else(|| panic!("Cannot find card named \"{}\"", $card_name))
  };
}
