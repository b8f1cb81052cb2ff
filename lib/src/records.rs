//! # Game records
//!
//! What a finished game leaves behind, and a gzip + bincode container to keep many of them
//! on disk between runs.
use crate::error::Error;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::prelude::*;

/// Per-turn resource totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
  pub turn: usize,
  /// Units generated during the turn, effect mana included
  pub mana_generated: usize,
  /// Units left in the pool when the turn ended
  pub mana_left: usize,
}

/// Snapshot of the zones at the end of a turn, kept only when tracing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnTrace {
  pub turn: usize,
  pub drawn: Vec<String>,
  pub battlefield: Vec<String>,
  pub hand: Vec<String>,
  pub discarded: Vec<String>,
  pub mana_generated: usize,
  pub mana_left: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
  /// (card name, turn drawn); the opening hand is turn 0
  pub drawn: Vec<(String, usize)>,
  /// (card name, turn played)
  pub played: Vec<(String, usize)>,
  pub turns: Vec<TurnRecord>,
  pub mulligans: usize,
  pub traces: Vec<TurnTrace>,
}

impl GameRecord {
  /// Units generated on each turn of the game, in turn order
  pub fn mana_by_turn(&self) -> Vec<usize> {
    self.turns.iter().map(|t| t.mana_generated).collect()
  }
}

/// Writes `records` as gzip-compressed bincode
pub fn write_records<W: Write>(writer: W, records: &[GameRecord]) -> Result<(), Error> {
  let mut encoder = GzEncoder::new(writer, Compression::default());
  bincode::serialize_into(&mut encoder, records)?;
  encoder.finish()?;
  Ok(())
}

/// Reads records written by `write_records`
pub fn read_records<R: Read>(reader: R) -> Result<Vec<GameRecord>, Error> {
  let mut decoder = GzDecoder::new(reader);
  let mut bytes = Vec::new();
  decoder.read_to_end(&mut bytes)?;
  Ok(bincode::deserialize(&bytes)?)
}

#[cfg(test)]
mod tests {
  use crate::records::*;

  #[test]
  fn records_survive_disk_format() {
    let record = GameRecord {
      drawn: vec![("Forest".to_string(), 0), ("Island".to_string(), 1)],
      played: vec![("Forest".to_string(), 1)],
      turns: vec![TurnRecord {
        turn: 1,
        mana_generated: 1,
        mana_left: 1,
      }],
      mulligans: 1,
      traces: Vec::new(),
    };
    let mut buf = Vec::new();
    write_records(&mut buf, &[record.clone(), GameRecord::default()]).unwrap();
    let records = read_records(&buf[..]).unwrap();
    assert_eq!(records, vec![record, GameRecord::default()]);
  }

  #[test]
  fn garbage_is_an_error() {
    assert!(read_records(&b"not a gzip stream"[..]).is_err());
  }
}
