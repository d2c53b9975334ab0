#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that lets a player walk the Labyrinth maze.

mod layout_transfer;
mod session;

use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use labyrinth_world::MazeEngine;
use layout_transfer::LayoutSnapshot;
use log::{info, LevelFilter};
use session::Session;

/// Walk a maze one message at a time.
#[derive(Debug, Parser)]
#[command(name = "labyrinth", version)]
struct CliArgs {
    /// Layout transfer string (`maze:v1:<columns>x<rows>:<payload>`) seeding the maze.
    #[arg(long, conflicts_with = "layout_file")]
    layout: Option<String>,
    /// File containing a layout transfer string.
    #[arg(long, value_name = "PATH")]
    layout_file: Option<PathBuf>,
    /// Log filter applied before `RUST_LOG` overrides.
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
    /// Print the layout transfer string of the maze after all messages.
    #[arg(long)]
    export: bool,
    /// Messages to process in order; stdin is read line by line when empty.
    messages: Vec<String>,
}

/// Entry point for the Labyrinth command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    let engine = load_engine(&args)?;
    let (rows, columns) = engine.dimensions();
    info!("maze ready with {rows} rows and {columns} columns");

    let mut session = Session::new(engine);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.messages.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read message from stdin")?;
            reply(&mut session, &line, &mut out)?;
        }
    } else {
        for message in &args.messages {
            reply(&mut session, message, &mut out)?;
        }
    }

    if args.export {
        let encoded = LayoutSnapshot::from_engine(session.engine())
            .encode()
            .context("failed to encode layout")?;
        writeln!(out, "{encoded}").context("failed to write layout")?;
    }

    Ok(())
}

fn load_engine(args: &CliArgs) -> Result<MazeEngine> {
    let encoded = match (&args.layout, &args.layout_file) {
        (Some(layout), _) => layout.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read layout file {}", path.display()))?,
        (None, None) => {
            info!("no layout provided, using the default maze");
            return Ok(MazeEngine::default());
        }
    };

    let snapshot = LayoutSnapshot::decode(&encoded).context("failed to decode layout string")?;
    MazeEngine::new(&snapshot.cells).context("layout does not describe a playable maze")
}

fn reply(session: &mut Session, message: &str, out: &mut impl Write) -> Result<()> {
    for line in session.respond(message) {
        writeln!(out, "{line}").context("failed to write reply")?;
    }
    Ok(())
}
