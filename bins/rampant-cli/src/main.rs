#[macro_use]
extern crate log;
extern crate rampant;

use clap::Parser;
use rampant::catalog::{Catalog, CATALOG};
use rampant::deck::Deck;
use rampant::environment::GameRules;
use rampant::mulligan::ProducerCount;
use rampant::policy::PlayPolicy;
use rampant::records::{write_records, GameRecord};
use rampant::simulation::{Simulation, SimulationConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rampant")]
#[command(about = "Simulates the mana a commander deck produces over its first turns", long_about = None)]
struct Args {
  /// Deck list, one `<quantity> <name>` per line, `SB: 1 <name>` for the commander
  deck: PathBuf,

  /// Number of games to play
  #[arg(short, long, default_value = "5000")]
  iterations: usize,

  /// Number of turns per game
  #[arg(short, long, default_value = "10")]
  turns: usize,

  /// Play a single game and print what happened each turn
  #[arg(short, long)]
  example: bool,

  /// Seed for reproducible runs
  #[arg(long)]
  seed: Option<u64>,

  /// Card catalog JSON to use instead of the built-in one
  #[arg(long)]
  catalog: Option<PathBuf>,

  /// Card names to play as soon as they are legal, most important first
  #[arg(short, long)]
  priority: Vec<String>,

  /// Write every game record here as gzipped bincode
  #[arg(long)]
  records: Option<PathBuf>,
}

fn print_trace(game: &GameRecord) {
  println!("Opening hand after {} mulligans:", game.mulligans);
  for (name, _) in game.drawn.iter().filter(|(_, turn)| *turn == 0) {
    println!("  {}", name);
  }
  for trace in &game.traces {
    println!("Turn {}", trace.turn);
    println!("  drew: {}", trace.drawn.join(", "));
    println!("  in play: {}", trace.battlefield.join(", "));
    println!("  in hand: {}", trace.hand.join(", "));
    if !trace.discarded.is_empty() {
      println!("  discarded: {}", trace.discarded.join(", "));
    }
    println!(
      "  generated {} mana, {} left over",
      trace.mana_generated, trace.mana_left
    );
  }
  println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let _ = env_logger::try_init();
  let args = Args::parse();

  let custom_catalog = match &args.catalog {
    Some(path) => {
      info!("Loading catalog @ {}", path.display());
      Some(Catalog::from_json(&std::fs::read_to_string(path)?)?)
    }
    None => None,
  };
  let catalog: &Catalog = custom_catalog.as_ref().unwrap_or(&*CATALOG);

  info!("Loading deck list @ {}", args.deck.display());
  let list = std::fs::read_to_string(&args.deck)?;
  let deck = Deck::from_list(&list, catalog)?;
  if !deck.unknown.is_empty() {
    println!("Playing as filler: {}", deck.unknown.join(", "));
  }

  let rules = GameRules {
    trace: args.example,
    ..GameRules::default()
  };
  let mulligan = ProducerCount::default();
  let sim = Simulation::from_config(&SimulationConfig {
    run_count: if args.example { 1 } else { args.iterations },
    turn_count: args.turns,
    deck: &deck,
    mulligan: &mulligan,
    policy: PlayPolicy::with_priority(args.priority.clone()),
    rules,
    seed: args.seed,
  });
  if args.example {
    for game in &sim.games {
      print_trace(game);
    }
  }
  print!("{}", sim.report());
  if sim.dropped > 0 {
    warn!("{} games were dropped", sim.dropped);
  }

  if let Some(path) = &args.records {
    info!("Writing {} game records @ {}", sim.games.len(), path.display());
    write_records(BufWriter::new(File::create(path)?), &sim.games)?;
  }
  Ok(())
}
