//! # Mulligan strategies
//!
//! The `mulligan` module defines a `Mulligan` trait and the strategies used to deal
//! an opening hand.

mod mulligan;
mod never;
mod producer_count;

pub use mulligan::Mulligan;
pub use never::Never;
pub use producer_count::{ProducerCount, MIN_PRODUCERS};
