//! # Card effects
//!
//! Effects are plain data attached to cards. `Effect` covers both the per-turn hooks and the
//! on-resolution hooks; `ManaEffect` rewrites the yield of a producer while the card carrying
//! it is in play. Effects talk to the game only by mutating it and are never deduplicated:
//! a card carrying the same effect twice applies it twice.
use crate::card::Card;
use crate::environment::Environment;
use crate::mana::Mana;
use rand::prelude::*;

/// Selects which cards a `Grant` effect attaches to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
  Any,
  ResourceSources,
}

impl Filter {
  pub fn matches(self, card: &Card) -> bool {
    match self {
      Self::Any => true,
      Self::ResourceSources => card.is_resource_source,
    }
  }
}

/// Which hook of the target card a `Grant` appends to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hook {
  Play,
  Turn,
}

impl Default for Hook {
  fn default() -> Self {
    Self::Play
  }
}

/// Where a `Grant` looks for cards
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
  /// Hand and library
  Unplayed,
  Battlefield,
  Everywhere,
}

impl Default for Zone {
  fn default() -> Self {
    Self::Unplayed
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
  /// Draw n cards, scaled by the turn's draw multiplier
  DrawCards(usize),
  /// Draw the top card of the library if it is a resource source
  DrawSourceIfTop,
  IncreaseResourcePlays(usize),
  /// Add one unit to the pool
  AddMana(Mana),
  /// Put a transient "Draw Spell" costing n generic into hand
  AddDrawSpell(usize),
  /// Append `effect` to the `hook` effects of every matching card in `zone`.
  /// A turn effect granted to a card in play first fires on the next Untap phase.
  Grant {
    filter: Filter,
    #[serde(default)]
    hook: Hook,
    #[serde(default)]
    zone: Zone,
    effect: Box<Effect>,
  },
  /// The first (or every) card in play with this name produces again
  Untap { name: String, all: bool },
  /// Return the first card in play with this name to hand
  Bounce(String),
  /// Remove the first card in play with this name
  Destroy(String),
  /// Card draw effects draw double for the rest of the turn
  DoubleDraws,
  /// Delay counters resolve immediately for the rest of the turn
  IgnoreDelay,
  /// Put up to n non-source cards from hand into play without paying for them
  CastFree(usize),
  /// Every card in play named `from` becomes a resource source named `into`
  Transform {
    from: String,
    into: String,
    #[serde(with = "crate::mana::symbols")]
    resource_yield: Vec<Mana>,
  },
}

impl Effect {
  pub fn apply(&self, env: &mut Environment) {
    match self {
      Self::DrawCards(n) => {
        let count = n * env.draw_multiplier;
        env.draw(count);
      }
      Self::DrawSourceIfTop => {
        let on_top = env
          .library
          .front()
          .map_or(false, |card| card.is_resource_source);
        if on_top {
          env.draw(1);
        }
      }
      Self::IncreaseResourcePlays(n) => env.resource_plays += n,
      Self::AddMana(mana) => env.add_mana(mana.clone()),
      Self::AddDrawSpell(cost) => {
        let spell = Card::draw_spell(*cost, env.turn);
        env.hand.push(spell);
      }
      Self::Grant {
        filter,
        hook,
        zone,
        effect,
      } => {
        let unplayed = *zone != Zone::Battlefield;
        let in_play = *zone != Zone::Unplayed;
        let hand = env.hand.iter_mut().filter(|_| unplayed);
        let library = env.library.iter_mut().filter(|_| unplayed);
        let battlefield = env.battlefield.iter_mut().filter(|_| in_play);
        for card in hand.chain(library).chain(battlefield) {
          if filter.matches(card) {
            match hook {
              Hook::Play => card.play_effects.push((**effect).clone()),
              Hook::Turn => card.turn_effects.push((**effect).clone()),
            }
          }
        }
      }
      Self::Untap { name, all } => {
        let matching: Vec<usize> = env
          .battlefield
          .iter()
          .enumerate()
          .filter(|(_, card)| card.name == *name)
          .map(|(i, _)| i)
          .collect();
        let take = if *all { matching.len() } else { 1 };
        for i in matching.into_iter().take(take) {
          env.generate_resources(i);
        }
      }
      Self::Bounce(name) => {
        if let Some(i) = env.battlefield.iter().position(|c| c.name == *name) {
          let card = env.battlefield.remove(i);
          env.hand.push(card);
        }
      }
      Self::Destroy(name) => {
        if let Some(i) = env.battlefield.iter().position(|c| c.name == *name) {
          env.battlefield.remove(i);
        }
      }
      Self::DoubleDraws => env.draw_multiplier = 2,
      Self::IgnoreDelay => env.use_delay = false,
      Self::CastFree(n) => {
        for _ in 0..*n {
          if !env.cast_free() {
            break;
          }
        }
      }
      Self::Transform {
        from,
        into,
        resource_yield,
      } => {
        for card in env.battlefield.iter_mut().filter(|c| c.name == *from) {
          card.name = into.clone();
          card.resource_yield = resource_yield.clone();
          card.is_resource_source = true;
        }
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ManaEffect {
  /// Add `mana` whenever a card named `name` produces
  BonusFrom { name: String, mana: Mana },
  /// A producing resource source adds one more copy of one of its units
  DoubleSource,
  /// Every production is doubled
  DoubleAll,
}

impl ManaEffect {
  pub fn apply<R: Rng>(&self, producer: &Card, produced: &mut Vec<Mana>, rng: &mut R) {
    match self {
      Self::BonusFrom { name, mana } => {
        if producer.name == *name {
          produced.push(mana.clone());
        }
      }
      Self::DoubleSource => {
        if producer.is_resource_source && !producer.resource_yield.is_empty() {
          if let Some(extra) = produced.choose(rng).cloned() {
            produced.push(extra);
          }
        }
      }
      Self::DoubleAll => {
        let copy = produced.clone();
        produced.extend(copy);
      }
    }
  }
}
