//! # Play and discard policy
//!
//! `choose_next_play` walks an ordered list of rules and returns a card matching the first
//! rule that any legal card satisfies:
//! 1. cards with mana effects
//! 2. cards named in the priority list, earliest entry first
//! 3. producers, fewest delay first
//! 4. cards with play effects
//! 5. cards with turn effects
//! 6. filler (cards with no effects and no yield)
//!
//! Ties are broken uniformly at random. If no rule matches, a random legal card is returned.
use crate::card::Card;
use rand::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Rule {
  ManaEffects,
  Priority,
  Producers,
  PlayEffects,
  TurnEffects,
  Filler,
}

const RULES: [Rule; 6] = [
  Rule::ManaEffects,
  Rule::Priority,
  Rule::Producers,
  Rule::PlayEffects,
  Rule::TurnEffects,
  Rule::Filler,
];

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayPolicy {
  /// Card names to play as soon as they are legal, most important first
  pub priority: Vec<String>,
}

impl PlayPolicy {
  pub fn with_priority(priority: Vec<String>) -> Self {
    Self { priority }
  }

  fn priority_of(&self, card: &Card) -> Option<usize> {
    self.priority.iter().position(|name| *name == card.name)
  }

  fn matches(&self, rule: Rule, card: &Card) -> bool {
    match rule {
      Rule::ManaEffects => !card.mana_effects.is_empty(),
      Rule::Priority => self.priority_of(card).is_some(),
      Rule::Producers => card.is_producer(),
      Rule::PlayEffects => !card.play_effects.is_empty(),
      Rule::TurnEffects => !card.turn_effects.is_empty(),
      Rule::Filler => {
        card.mana_effects.is_empty()
          && card.play_effects.is_empty()
          && card.turn_effects.is_empty()
          && !card.is_producer()
      }
    }
  }

  /// Lower is better
  fn rank(&self, rule: Rule, card: &Card) -> usize {
    match rule {
      Rule::Priority => self.priority_of(card).unwrap_or(usize::MAX),
      Rule::Producers => card.delay,
      _ => 0,
    }
  }

  /// Returns the hand index of the next card to play, drawn from `legal`.
  /// Returns None only when `legal` is empty.
  pub fn choose_next_play<R: Rng>(
    &self,
    hand: &[Card],
    legal: &[usize],
    rng: &mut R,
  ) -> Option<usize> {
    for &rule in RULES.iter() {
      let candidates: Vec<usize> = legal
        .iter()
        .copied()
        .filter(|&i| self.matches(rule, &hand[i]))
        .collect();
      let best = match candidates.iter().map(|&i| self.rank(rule, &hand[i])).min() {
        Some(best) => best,
        None => continue,
      };
      let tied: Vec<usize> = candidates
        .into_iter()
        .filter(|&i| self.rank(rule, &hand[i]) == best)
        .collect();
      return tied.choose(rng).copied();
    }
    legal.choose(rng).copied()
  }

  /// Returns up to `count` hand indices to discard, least valuable first
  pub fn choose_discards(&self, hand: &[Card], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..hand.len()).collect();
    order.sort_by_key(|&i| discard_value(&hand[i]));
    order.truncate(count);
    order
  }
}

/// Effects plus yield minus cost. Filler goes first and the commander never goes.
pub fn discard_value(card: &Card) -> i64 {
  if card.is_filler {
    return i64::MIN;
  }
  if card.is_commander {
    return i64::MAX;
  }
  let effects = card.mana_effects.len() + card.turn_effects.len() + card.play_effects.len();
  (effects + card.resource_yield.len()) as i64 - card.cost.len() as i64
}
