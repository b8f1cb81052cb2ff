use crate::environment::Environment;
use crate::mulligan::Mulligan;

const STARTING_HAND_SIZE: usize = 7;

/// Never represents the mulligan strategy wherein the
/// player always keeps their initially drawn starting hand
#[derive(Debug, Serialize, Deserialize)]
pub struct Never {
  pub starting_hand_size: usize,
}

impl Never {
  pub fn new() -> Self {
    Self {
      starting_hand_size: STARTING_HAND_SIZE,
    }
  }
}

impl Default for Never {
  fn default() -> Self {
    Self::new()
  }
}

impl Mulligan for Never {
  fn deal_opening_hand(&self, env: &mut Environment) -> usize {
    env.draw(self.starting_hand_size);
    env.add_commander_to_hand();
    env.record.mulligans = 0;
    0
  }
}
