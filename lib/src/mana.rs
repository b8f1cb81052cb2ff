//! # Resource units and costs
//!
//! A `Mana` is one unit of the renewable resource. The same type is used on both sides of a
//! payment: a card's yield is a list of produced units, a card's cost is a list of required units.
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// ManaColor represents a [color](https://mtg.gamepedia.com/Color), plus colorless
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ManaColor {
  #[serde(rename = "W")]
  White,
  #[serde(rename = "U")]
  Blue,
  #[serde(rename = "B")]
  Black,
  #[serde(rename = "R")]
  Red,
  #[serde(rename = "G")]
  Green,
  #[serde(rename = "C")]
  Colorless,
}

impl ManaColor {
  pub const ALL_COLORS: [ManaColor; 5] = [
    ManaColor::White,
    ManaColor::Blue,
    ManaColor::Black,
    ManaColor::Red,
    ManaColor::Green,
  ];

  pub fn from_char(c: char) -> Option<Self> {
    match c.to_ascii_uppercase() {
      'W' => Some(Self::White),
      'U' => Some(Self::Blue),
      'B' => Some(Self::Black),
      'R' => Some(Self::Red),
      'G' => Some(Self::Green),
      'C' => Some(Self::Colorless),
      _ => None,
    }
  }

  pub fn to_char(self) -> char {
    match self {
      Self::White => 'W',
      Self::Blue => 'U',
      Self::Black => 'B',
      Self::Red => 'R',
      Self::Green => 'G',
      Self::Colorless => 'C',
    }
  }
}

/// A single resource unit, either produced or required
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mana {
  /// Exactly one color (or colorless)
  Concrete(ManaColor),
  /// Any unit at all; as a requirement this is the `{1}` of a cost
  Generic,
  /// Any one of several colors, kept sorted and deduplicated
  OneOf(Vec<ManaColor>),
}

impl Mana {
  /// Returns a OneOf unit over `colors`, collapsing to Concrete for a single color
  pub fn one_of(colors: &[ManaColor]) -> Self {
    let mut colors = colors.to_vec();
    colors.sort();
    colors.dedup();
    if colors.len() == 1 {
      Self::Concrete(colors[0])
    } else {
      Self::OneOf(colors)
    }
  }

  /// `{W/U/B/R/G}`
  pub fn any_color() -> Self {
    Self::one_of(&ManaColor::ALL_COLORS)
  }
}

/// Returns true if the `produced` unit can pay for the `required` unit
pub fn compatible(produced: &Mana, required: &Mana) -> bool {
  match (produced, required) {
    (_, Mana::Generic) => true,
    (Mana::Generic, _) => false,
    (Mana::Concrete(have), Mana::Concrete(want)) => have == want,
    (Mana::OneOf(have), Mana::Concrete(want)) => have.contains(want),
    (Mana::Concrete(have), Mana::OneOf(want)) => want.contains(have),
    (Mana::OneOf(have), Mana::OneOf(want)) => have.iter().any(|c| want.contains(c)),
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseManaError(pub String);

impl fmt::Display for ParseManaError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "bad mana symbol \"{}\"", self.0)
  }
}

impl FromStr for Mana {
  type Err = ParseManaError;

  /// Parses the inside of one brace symbol: `G`, `C`, `1`, `X`, `G/W`, `W/U/B/R/G`
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim().trim_start_matches('{').trim_end_matches('}');
    match s {
      "1" | "X" | "x" => return Ok(Self::Generic),
      _ => {}
    }
    let mut colors = Vec::new();
    for part in s.split(|c| c == '/' || c == '\\') {
      let mut chars = part.trim().chars();
      match (chars.next().and_then(ManaColor::from_char), chars.next()) {
        (Some(color), None) => colors.push(color),
        _ => return Err(ParseManaError(s.to_string())),
      }
    }
    Ok(Self::one_of(&colors))
  }
}

impl fmt::Display for Mana {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Concrete(color) => write!(f, "{}", color.to_char()),
      Self::Generic => write!(f, "1"),
      Self::OneOf(colors) => {
        let parts: Vec<String> = colors.iter().map(|c| c.to_char().to_string()).collect();
        write!(f, "{}", parts.join("/"))
      }
    }
  }
}

impl TryFrom<String> for Mana {
  type Error = ParseManaError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Mana> for String {
  fn from(mana: Mana) -> Self {
    mana.to_string()
  }
}

/// Parses a brace-notation cost or yield such as `{3}{G}{G/W}` into individual units.
/// A number `n` expands into `n` generic units.
pub fn parse_mana(mana_str: &str) -> Result<Vec<Mana>, ParseManaError> {
  let mut units = Vec::new();
  let mut sigil = String::new();
  let mut in_symbol = false;
  for c in mana_str.chars() {
    match c {
      '{' => {
        sigil.clear();
        in_symbol = true;
      }
      '}' => {
        if !in_symbol {
          return Err(ParseManaError(mana_str.to_string()));
        }
        in_symbol = false;
        if let Ok(count) = sigil.parse::<usize>() {
          units.extend(std::iter::repeat(Mana::Generic).take(count));
        } else {
          units.push(sigil.parse()?);
        }
      }
      c if c.is_whitespace() && !in_symbol => {}
      c if in_symbol => sigil.push(c),
      _ => return Err(ParseManaError(mana_str.to_string())),
    }
  }
  if in_symbol {
    return Err(ParseManaError(mana_str.to_string()));
  }
  Ok(units)
}

/// Formats units back into brace notation, folding generic units into a single number
pub fn format_mana(units: &[Mana]) -> String {
  let generic = units.iter().filter(|m| **m == Mana::Generic).count();
  let mut out = String::new();
  if generic > 0 {
    out.push_str(&format!("{{{}}}", generic));
  }
  for unit in units.iter().filter(|m| **m != Mana::Generic) {
    out.push_str(&format!("{{{}}}", unit));
  }
  out
}

/// serde adapter that stores a `Vec<Mana>` as a brace-notation string
pub mod symbols {
  use super::{format_mana, parse_mana, Mana};
  use serde::de::Error;
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(units: &[Mana], serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&format_mana(units))
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Mana>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    parse_mana(&s).map_err(D::Error::custom)
  }
}
