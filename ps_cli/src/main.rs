//! Terminal frontend for a pool play tournament.
//!
//! Reads commands line by line, applies them to the tournament and autosaves
//! the snapshot file after every change.

use anyhow::{Context, Result, bail};
use log::info;
use pico_args::Arguments;
use ps_cli::{
    config::{CliConfig, CliOverrides},
    session::{Reply, Session, Start},
};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

const HELP: &str = "\
Run a pool play tournament from the terminal

USAGE:
  ps_cli [OPTIONS]

OPTIONS:
  --file PATH           Snapshot file  [default: env TOURNAMENT_FILE or tournament.json]
  --seed N              Seed for pool draws, schedules and tie-breaks  [default: env TOURNAMENT_SEED or random]

FLAGS:
  --new                 Start an empty tournament instead of loading the file
  --demo                Start the 20-team demo tournament
  --no-autosave         Only write the file on 'save'
  -h, --help            Print help information

ENVIRONMENT:
  TOURNAMENT_FILE       Snapshot file path
  TOURNAMENT_SEED       Random seed (unsigned integer)
  TOURNAMENT_AUTOSAVE   Autosave after changes  [default: true]
  RUST_LOG              Log filter  [default: warn]
";

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = CliOverrides {
        file: pargs.opt_value_from_str::<_, PathBuf>("--file")?,
        seed: pargs.opt_value_from_str("--seed")?,
        no_autosave: pargs.contains("--no-autosave"),
    };
    let start = if pargs.contains("--demo") {
        Start::Demo
    } else if pargs.contains("--new") {
        Start::New
    } else {
        Start::Resume
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {:?}. Use --help for usage", remaining);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .init();

    let config = CliConfig::from_env(overrides)?;
    config.validate()?;
    info!(
        "Using {} (autosave: {}, seed: {:?})",
        config.file.display(),
        config.autosave,
        config.seed
    );

    let mut session = Session::open(&config, start)?;
    run(&mut session)
}

fn run(session: &mut Session) -> Result<()> {
    let manager = session.manager();
    println!(
        "{} teams, {} games in {} pools. Type 'help' for commands.",
        manager.registry().len(),
        manager.games().len(),
        manager.config().pool_count
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read command")?;
        if read == 0 {
            break;
        }

        match session.handle_line(&line) {
            Reply::Quit => break,
            Reply::Text(text) if text.is_empty() => {}
            Reply::Text(text) => println!("{text}"),
        }
    }

    Ok(())
}
