//! # Commander Deck Mana Engine Simulator
//!
//! rampant plays a deck's early turns many times over to measure how much mana it produces
//! turn by turn. Cards are data: a cost, a yield, a delay before producing, a chance to stay in
//! play, and lists of effects that fire each turn, on resolution, or whenever mana is produced.
//! A fixed play policy decides what to cast, and a report summarizes the games.

#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate bincode;
extern crate flate2;
extern crate rand;
extern crate regex;
extern crate wasm_bindgen;

#[macro_use]
pub mod card;
#[macro_use]
pub mod deck;
pub mod bipartite;
pub mod catalog;
pub mod effect;
pub mod environment;
pub mod error;
pub mod mana;
pub mod matcher;
pub mod mulligan;
pub mod policy;
pub mod records;
pub mod report;
pub mod simulation;
pub mod turn;
pub mod web;

pub use crate::error::Error;
pub use crate::web::rampant_run;
