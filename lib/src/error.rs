//! # Simulation errors
use std::error;
use std::fmt;

#[derive(Debug)]
pub enum Error {
  /// The card's cost or the per-turn resource play limit cannot be satisfied right now
  UnpayableCost(String),
  /// The catalog has no card with this name
  UnknownCard(String),
  /// A draw asked for more cards than the library holds
  ExhaustedLibrary { requested: usize, available: usize },
  /// A deck list line that does not match `<quantity> <name>` or `SB: <quantity> <name>`
  BadDeckList(String),
  /// An engine invariant broke; the current iteration is discarded
  Inconsistent(String),
  Io(std::io::Error),
  Bincode(bincode::Error),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnpayableCost(name) => write!(f, "cannot pay for \"{}\"", name),
      Self::UnknownCard(name) => write!(f, "no card named \"{}\" in the catalog", name),
      Self::ExhaustedLibrary {
        requested,
        available,
      } => write!(
        f,
        "tried to draw {} cards with {} left in the library",
        requested, available
      ),
      Self::BadDeckList(line) => write!(f, "cannot parse deck list line: {}", line),
      Self::Inconsistent(msg) => write!(f, "inconsistent game state: {}", msg),
      Self::Io(e) => write!(f, "io error: {}", e),
      Self::Bincode(e) => write!(f, "bincode error: {}", e),
    }
  }
}

impl error::Error for Error {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Bincode(e) => Some(e),
      _ => None,
    }
  }
}

impl From<std::io::Error> for Error {
  fn from(error: std::io::Error) -> Self {
    Self::Io(error)
  }
}

impl From<bincode::Error> for Error {
  fn from(error: bincode::Error) -> Self {
    Self::Bincode(error)
  }
}
