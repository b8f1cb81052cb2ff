//! # Card catalog
//!
//! The catalog maps card names to card definitions. The built-in catalog is compiled in from
//! `data/catalog.json` and exposed as `CATALOG`.
use crate::card::Card;
use crate::error::Error;
use std::ops::Deref;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Catalog {
  pub cards: Vec<Card>,
}

impl Catalog {
  /// Returns a new catalog of cards
  pub fn from_cards(mut cards: Vec<Card>) -> Self {
    // sort for binary_search used in card_from_name
    cards.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Self { cards }
  }

  /// Parses a `{"cards": [...]}` document
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    let catalog: Self = serde_json::from_str(json)?;
    Ok(Self::from_cards(catalog.cards))
  }

  /// Returns a card from the card name, ignoring case
  pub fn card_from_name(&self, name: &str) -> Option<&Card> {
    let name_lowercase = name.to_lowercase();
    let res = self
      .cards
      .binary_search_by(|probe| probe.name.to_lowercase().cmp(&name_lowercase));
    res.map(|idx| &self.cards[idx]).ok()
  }

  pub fn get(&self, name: &str) -> Result<&Card, Error> {
    self
      .card_from_name(name)
      .ok_or_else(|| Error::UnknownCard(name.to_string()))
  }
}

impl Deref for Catalog {
  type Target = [Card];

  fn deref(&self) -> &Self::Target {
    &self.cards
  }
}

/// Returns the built-in catalog
pub fn builtin_catalog() -> Result<Catalog, serde_json::Error> {
  Catalog::from_json(include_str!("../data/catalog.json"))
}

lazy_static! {
  pub static ref CATALOG: Catalog = builtin_catalog().expect("builtin_catalog() failed");
}
