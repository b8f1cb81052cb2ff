use crate::environment::Environment;

/// The base trait for any mulligan type
pub trait Mulligan {
  /// Deals the opening hand into `env.hand`, adds the commander once the hand is kept
  /// and returns the number of mulligans taken
  ///
  /// # Arguments
  ///
  /// * `env` - A game at turn 0 with a shuffled library and an empty hand
  fn deal_opening_hand(&self, env: &mut Environment) -> usize;
}
