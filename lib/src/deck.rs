use crate::card::Card;
use crate::catalog::Catalog;
use crate::error::Error;
use regex::Regex;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
  /// Main deck cards, sorted by name
  pub cards: Vec<DeckCard>,
  /// Set aside at the start of the game and added to the kept opening hand
  pub commander: Option<Card>,
  /// Number of main deck cards
  pub card_count: usize,
  /// Deck list names the catalog did not know; they are played as filler
  pub unknown: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckCard {
  pub card: Card,
  pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DeckBuilder {
  pub cards: BTreeMap<String, DeckCard>,
  pub commander: Option<Card>,
  pub unknown: Vec<String>,
}

impl DeckBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds `count` copies of `card`, merging with copies already added under the same name
  pub fn insert_count(mut self, card: Card, count: usize) -> Self {
    self
      .cards
      .entry(card.name.clone())
      .or_insert(DeckCard { card, count: 0 })
      .count += count;
    self
  }

  pub fn commander(mut self, mut card: Card) -> Self {
    if let Some(previous) = &self.commander {
      warn!(
        "Replacing commander \"{}\" with \"{}\"",
        previous.name, card.name
      );
    }
    card.is_commander = true;
    self.commander = Some(card);
    self
  }

  pub fn build(self) -> Deck {
    let cards: Vec<DeckCard> = self.cards.into_iter().map(|(_, v)| v).collect();
    let card_count = cards.iter().map(|dc| dc.count).sum();
    Deck {
      cards,
      commander: self.commander,
      card_count,
      unknown: self.unknown,
    }
  }
}

impl Deck {
  pub fn new() -> Self {
    DeckBuilder::new().build()
  }

  pub fn from_cards<I>(cards: I) -> Self
  where
    I: IntoIterator<Item = Card>,
  {
    let mut b = DeckBuilder::new();
    for card in cards {
      b = b.insert_count(card, 1);
    }
    b.build()
  }

  /// Returns one owned copy of every main deck card, in deck order
  pub fn library(&self) -> Vec<Card> {
    let mut result = Vec::with_capacity(self.card_count);
    for deck_card in &self.cards {
      for _ in 0..deck_card.count {
        result.push(deck_card.card.clone());
      }
    }
    result
  }

  /// Names of every distinct card in the deck, commander included
  pub fn card_names(&self) -> Vec<String> {
    let mut names: Vec<String> = self.cards.iter().map(|dc| dc.card.name.clone()).collect();
    if let Some(commander) = &self.commander {
      if !names.contains(&commander.name) {
        names.push(commander.name.clone());
      }
    }
    names
  }

  pub fn card_count_from_name(&self, name: &str) -> Option<&DeckCard> {
    self.cards.iter().find(|dc| dc.card.name == name)
  }

  pub fn len(&self) -> usize {
    self.card_count
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Parses a deck list of `<quantity> <name>` lines. A `SB: <quantity> <name>` line names
  /// the commander. Blank lines and `#` comments are skipped. Names the catalog does not
  /// know become filler cards and are listed in `unknown`.
  pub fn from_list(list: &str, catalog: &Catalog) -> Result<Self, Error> {
    lazy_static! {
      static ref DECK_LINE_REGEX: Regex =
        Regex::new(r"^(?P<sb>SB:\s*)?(?P<amount>\d+)x?\s+(?P<name>[^#]+?)\s*(?:#.*)?$")
          .expect("Failed to compile DECK_LINE_REGEX regex");
    }
    let mut builder = DeckBuilder::new();
    for line in list.lines() {
      let trimmed = line.trim();
      if trimmed.is_empty() || trimmed.starts_with('#') {
        continue;
      }
      let caps = DECK_LINE_REGEX
        .captures(trimmed)
        .ok_or_else(|| Error::BadDeckList(line.to_string()))?;
      let amount = caps["amount"]
        .parse::<usize>()
        .map_err(|_| Error::BadDeckList(line.to_string()))?;
      let name = caps["name"].trim();
      let card = match catalog.get(name) {
        Ok(card) => card.clone(),
        Err(e) => {
          warn!("{}, playing it as filler", e);
          if !builder.unknown.iter().any(|n| n == name) {
            builder.unknown.push(name.to_string());
          }
          Card::filler(name)
        }
      };
      builder = if caps.name("sb").is_some() {
        builder.commander(card)
      } else {
        builder.insert_count(card, amount)
      };
    }
    Ok(builder.build())
  }
}

impl Default for Deck {
  fn default() -> Self {
    Self::new()
  }
}

#[macro_export]
macro_rules! decklist {
  ($list:expr) => {
    $crate::deck::Deck::from_list($list, &$crate::catalog::CATALOG)
      .unwrap_or_else(|e| panic!("Bad deck list: {}", e))
  };
}
