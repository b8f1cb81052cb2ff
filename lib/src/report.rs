//! # Aggregate statistics over many games
use crate::records::GameRecord;
use std::collections::HashMap;
use std::fmt;

/// Median, mean and population standard deviation of a sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
  pub median: f64,
  pub mean: f64,
  pub stddev: f64,
}

impl Summary {
  /// Returns the summary of `values`, all zeros for an empty sample
  pub fn from_values(values: &[f64]) -> Self {
    if values.is_empty() {
      return Self::default();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
      (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
      sorted[mid]
    };
    Self {
      median,
      mean,
      stddev: variance.sqrt(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnSummary {
  pub turn: usize,
  /// Games that reached this turn
  pub games: usize,
  /// Units generated on this turn
  pub mana: Summary,
  /// Mean units left unspent at the end of this turn
  pub mean_excess: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
  pub games: usize,
  pub turns: Vec<TurnSummary>,
  /// Most units generated on any single turn of any game
  pub max_mana: usize,
  pub cards_drawn: Summary,
  pub mulligans_per_game: f64,
  /// (card name, times played per game), least played first
  pub plays_per_game: Vec<(String, f64)>,
}

impl Report {
  /// Summarizes `records` over the first `turn_count` turns. Every name in `card_names`
  /// is listed in `plays_per_game`, even if it was never played.
  pub fn from_records(records: &[GameRecord], turn_count: usize, card_names: &[String]) -> Self {
    let games = records.len();
    let mut turns = Vec::with_capacity(turn_count);
    for turn in 1..=turn_count {
      let reached: Vec<_> = records
        .iter()
        .filter_map(|r| r.turns.iter().find(|t| t.turn == turn))
        .collect();
      let mana: Vec<f64> = reached.iter().map(|t| t.mana_generated as f64).collect();
      let excess: f64 = reached.iter().map(|t| t.mana_left as f64).sum();
      turns.push(TurnSummary {
        turn,
        games: reached.len(),
        mana: Summary::from_values(&mana),
        mean_excess: if reached.is_empty() {
          0.0
        } else {
          excess / reached.len() as f64
        },
      });
    }
    let max_mana = records
      .iter()
      .flat_map(|r| r.turns.iter().map(|t| t.mana_generated))
      .max()
      .unwrap_or(0);
    let drawn: Vec<f64> = records.iter().map(|r| r.drawn.len() as f64).collect();
    let mulligans: usize = records.iter().map(|r| r.mulligans).sum();
    let mut plays: HashMap<&str, usize> = card_names.iter().map(|n| (n.as_str(), 0)).collect();
    for record in records {
      for (name, _) in &record.played {
        *plays.entry(name.as_str()).or_insert(0) += 1;
      }
    }
    let per_game = |count: usize| {
      if games == 0 {
        0.0
      } else {
        count as f64 / games as f64
      }
    };
    let mut plays_per_game: Vec<(String, f64)> = plays
      .into_iter()
      .map(|(name, count)| (name.to_string(), per_game(count)))
      .collect();
    plays_per_game.sort_by(|a, b| {
      a.1
        .partial_cmp(&b.1)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
    });
    Self {
      games,
      turns,
      max_mana,
      cards_drawn: Summary::from_values(&drawn),
      mulligans_per_game: per_game(mulligans),
      plays_per_game,
    }
  }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for t in &self.turns {
      writeln!(
        f,
        "Turn {}: {:.2} median, {:.2} mean, and {:.2} stddev with {:.2} mean excess",
        t.turn, t.mana.median, t.mana.mean, t.mana.stddev, t.mean_excess
      )?;
    }
    writeln!(f, "Max: {:.2}", self.max_mana as f64)?;
    writeln!(f)?;
    writeln!(
      f,
      "{:.2} median cards drawn, {:.2} mean, and {:.2} stddev",
      self.cards_drawn.median, self.cards_drawn.mean, self.cards_drawn.stddev
    )?;
    writeln!(f, "{:.2} mulligans per game", self.mulligans_per_game)?;
    writeln!(f)?;
    for (name, plays) in &self.plays_per_game {
      writeln!(f, "{:<32} was played {:.2} times per game", name, plays)?;
    }
    Ok(())
  }
}
