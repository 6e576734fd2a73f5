//! Grid Wargame - Entry Point
//!
//! Runs a match on a fixed turn clock and reads orders from stdin while
//! the clock ticks. With `--turns` it instead fires that many turns
//! back to back and prints the final state as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use grid_wargame::assistant::{apply_tool_call, render_map, Briefing};
use grid_wargame::core::error::{Result, WarError};
use grid_wargame::core::{Direction, GameConfig, Side};
use grid_wargame::orders::OrderRequest;
use grid_wargame::simulation::{run_turns, IntervalScheduler, WorldStore};

/// Grid Wargame - queued-order grid battles
#[derive(Parser, Debug)]
#[command(name = "grid-wargame")]
#[command(about = "Run a two-sided grid wargame on a fixed turn clock")]
struct Args {
    /// TOML config file (defaults are used for anything it leaves out)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between turns
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Fire this many turns without a timer, print the state, and exit
    #[arg(long)]
    turns: Option<u64>,
}

/// One line of console input
#[derive(Debug, PartialEq)]
enum Command {
    Order(OrderRequest),
    Tool(Side, String),
    State,
    Map,
    Brief(Side),
    Reset,
    Help,
    Quit,
}

fn parse_side(word: Option<&str>) -> Result<Side> {
    match word.map(str::to_ascii_lowercase).as_deref() {
        Some("blue") | None => Ok(Side::Blue),
        Some("red") => Ok(Side::Red),
        Some(other) => Err(WarError::InvalidOrder(format!("unknown side '{}'", other))),
    }
}

// The console also takes long names; the wire format only the short ones
fn console_direction(word: Option<&str>) -> String {
    let word = word.unwrap_or_default().to_ascii_lowercase();
    let long = match word.as_str() {
        "north" => Some(Direction::North),
        "south" => Some(Direction::South),
        "east" => Some(Direction::East),
        "west" => Some(Direction::West),
        _ => None,
    };
    long.map(|d| d.short_name().to_string()).unwrap_or(word)
}

fn parse_number<T: std::str::FromStr>(word: Option<&str>, what: &str) -> Result<T> {
    word.and_then(|w| w.parse().ok())
        .ok_or_else(|| WarError::InvalidOrder(format!("expected {}", what)))
}

fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    let mut words = rest.split_whitespace();

    match head {
        // move <unit> <dir> <tiles>
        "move" | "m" => {
            let unit = words
                .next()
                .ok_or_else(|| WarError::InvalidOrder("usage: move <unit> <dir> <tiles>".into()))?;
            let direction = console_direction(words.next());
            let tiles = parse_number(words.next(), "tile count")?;
            Ok(Command::Order(OrderRequest::movement(unit, &direction, tiles)))
        }
        // goto <unit> <x> <y>
        "goto" | "g" => {
            let unit = words
                .next()
                .ok_or_else(|| WarError::InvalidOrder("usage: goto <unit> <x> <y>".into()))?;
            let x = parse_number(words.next(), "x coordinate")?;
            let y = parse_number(words.next(), "y coordinate")?;
            Ok(Command::Order(OrderRequest::move_to(unit, x, y)))
        }
        "order" => Ok(Command::Order(OrderRequest::from_json(rest)?)),
        // tool <side> <arguments json>
        "tool" => {
            let (side, json) = rest.trim().split_once(' ').unwrap_or((rest, ""));
            Ok(Command::Tool(parse_side(Some(side))?, json.to_string()))
        }
        "state" | "s" => Ok(Command::State),
        "map" => Ok(Command::Map),
        "brief" => Ok(Command::Brief(parse_side(words.next())?)),
        "reset" => Ok(Command::Reset),
        "help" | "h" => Ok(Command::Help),
        "quit" | "q" => Ok(Command::Quit),
        other => Err(WarError::InvalidOrder(format!("unknown command '{}'", other))),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  move <unit> <n|s|e|w> <tiles>  - Queue a move (e.g. move B0 s 3)");
    println!("  goto <unit> <x> <y>            - Queue a move_to");
    println!("  order <json>                   - Queue an order in wire format");
    println!("  tool <side> <json>             - Apply issue_orders tool arguments");
    println!("  state                          - Print the full state as JSON");
    println!("  map                            - Draw the map");
    println!("  brief [blue|red]               - Print an assistant briefing");
    println!("  reset                          - Restart the match");
    println!("  quit                           - Exit");
}

fn execute(store: &WorldStore, command: Command) -> Result<bool> {
    match command {
        Command::Order(request) => {
            let receipt = store.submit(&request)?;
            println!("{} queued ({} pending)", receipt.unit.id, receipt.queue_length);
        }
        Command::Tool(side, json) => {
            for outcome in apply_tool_call(store, side, &json)? {
                println!("{}", serde_json::to_string(&outcome)?);
            }
        }
        Command::State => {
            println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
        }
        Command::Map => {
            let snapshot = store.snapshot();
            println!("Turn {}", snapshot.turn);
            println!("{}", render_map(&snapshot));
            if let Some(winner) = snapshot.winner {
                println!("Winner: {:?}", winner);
            }
        }
        Command::Brief(side) => {
            println!("{}", Briefing::from_snapshot(&store.snapshot(), side).summary());
        }
        Command::Reset => {
            store.reset();
            println!("Match reset.");
        }
        Command::Help => print_help(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(ms) = args.tick_ms {
        config.tick_interval_ms = ms;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let store = Arc::new(WorldStore::new(&config));

    // Headless run
    if let Some(turns) = args.turns {
        let reports = run_turns(store.as_ref(), turns);
        let resolved = reports.iter().filter(|r| r.resolved).count();
        tracing::info!("Resolved {} of {} requested turns", resolved, turns);
        println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
        return Ok(());
    }

    tracing::info!("Grid Wargame starting...");
    let scheduler = IntervalScheduler::spawn(store.clone(), config.tick_interval());

    println!("\n=== GRID WARGAME ===");
    print_help();
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let outcome = parse_command(&line).and_then(|command| execute(&store, command));
        match outcome {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                tracing::warn!("Rejected: {}", e);
                println!("Error: {}", e);
            }
        }
    }

    scheduler.shutdown().await;
    Ok(())
}
