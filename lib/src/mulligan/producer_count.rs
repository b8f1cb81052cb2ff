use crate::card::Card;
use crate::environment::Environment;
use crate::mulligan::Mulligan;

const STARTING_HAND_SIZE: usize = 7;

/// Minimum number of producers for a keepable hand, indexed by hand size
pub const MIN_PRODUCERS: [usize; 8] = [0, 1, 1, 1, 2, 2, 2, 2];

/// ProducerCount keeps a hand once it holds enough cards with a yield for its size,
/// or any card from `always_keep`. Each rejected hand is set aside and the next hand
/// is one card smaller; the set-aside cards go back into the library once a hand is kept.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProducerCount {
  pub starting_hand_size: usize,
  /// Card names that make any hand keepable
  pub always_keep: Vec<String>,
}

impl ProducerCount {
  pub fn new() -> Self {
    Self {
      starting_hand_size: STARTING_HAND_SIZE,
      always_keep: vec!["Recycling".to_string()],
    }
  }

  pub fn with_always_keep(always_keep: Vec<String>) -> Self {
    Self {
      always_keep,
      ..Self::new()
    }
  }

  /// Returns true if `hand` should be sent back
  pub fn should_mulligan(&self, hand: &[Card]) -> bool {
    if hand
      .iter()
      .any(|card| self.always_keep.iter().any(|name| *name == card.name))
    {
      return false;
    }
    let producers = hand.iter().filter(|card| card.is_producer()).count();
    let needed = MIN_PRODUCERS[hand.len().min(MIN_PRODUCERS.len() - 1)];
    producers < needed
  }
}

impl Default for ProducerCount {
  fn default() -> Self {
    Self::new()
  }
}

impl Mulligan for ProducerCount {
  fn deal_opening_hand(&self, env: &mut Environment) -> usize {
    let mut hand_size = self.starting_hand_size;
    let mut set_aside = Vec::new();
    let mut mulligans = 0;
    env.draw(hand_size);
    while hand_size > 0 && self.should_mulligan(&env.hand) {
      mulligans += 1;
      hand_size -= 1;
      set_aside.append(&mut env.hand);
      // only the kept hand counts as drawn
      env.record.drawn.clear();
      env.draw(hand_size);
    }
    if mulligans > 0 {
      debug!("kept a {} card hand after {} mulligans", hand_size, mulligans);
    }
    env.library.extend(set_aside);
    env.shuffle_library();
    env.add_commander_to_hand();
    env.record.mulligans = mulligans;
    mulligans
  }
}
