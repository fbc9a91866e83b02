//! Hot-seat terminal chess.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chess_terminal::{
    parse_args, print_usage, render_row, CliCommand, CliOptions, Flow, Session, StatsLedger,
    TerminalConfig,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn load_config(options: &CliOptions) -> Result<TerminalConfig> {
    let cwd = env::current_dir().context("cannot determine the working directory")?;
    let mut config = TerminalConfig::discover(options.config.as_deref(), &cwd)?;
    config.apply_overrides(options);
    Ok(config)
}

fn init_tracing(config: &TerminalConfig) -> Result<()> {
    let filter = match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(spec) if !spec.is_empty() => EnvFilter::try_new(spec),
        _ => EnvFilter::try_new(&config.log_filter),
    }
    .with_context(|| format!("invalid log filter {:?}", config.log_filter))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn show_stats(name: Option<&str>, stats_path: &Path) -> Result<()> {
    let ledger = StatsLedger::load(stats_path)?;
    match name {
        Some(name) => match ledger.get(name) {
            Some(record) => print!("{}", render_row(name, record)),
            None => println!("No games recorded for {name}."),
        },
        None if ledger.is_empty() => println!("No games recorded yet. Play one first!"),
        None => print!("{}", ledger.render_table()),
    }
    Ok(())
}

fn record_result(session: &Session, outcome: chess_rules::GameOutcome) -> Result<()> {
    let config = session.config();
    let path = &config.stats_path;
    let mut ledger = StatsLedger::load(path)?;
    ledger.record_game(
        &config.white_name,
        &config.black_name,
        outcome,
        chrono::Utc::now(),
    );
    ledger
        .save(path)
        .with_context(|| format!("game result not saved to {}", path.display()))?;
    info!(path = %path.display(), "stats updated");
    Ok(())
}

fn play(config: TerminalConfig) -> Result<()> {
    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    println!("Type `help` for commands.\n");
    loop {
        print!("{}", session.view());
        print!("{}", session.prompt());
        stdout.flush().context("failed to write to stdout")?;

        let line = match lines.next() {
            Some(line) => line.context("failed to read from stdin")?,
            None => {
                warn!("input closed before the game finished");
                return Ok(());
            }
        };

        let flow = session.handle_line(&line);
        for message in session.take_messages() {
            println!("{message}");
        }
        match flow {
            Flow::Continue => {}
            Flow::Quit => {
                println!("Game abandoned; no result recorded.");
                return Ok(());
            }
            Flow::Finished(outcome) => {
                print!("{}", session.view());
                return record_result(&session, outcome);
            }
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            std::process::exit(2);
        }
    };

    match command {
        CliCommand::Help => {
            print_usage();
            Ok(())
        }
        CliCommand::Stats { name, options } => {
            let config = load_config(&options)?;
            init_tracing(&config)?;
            show_stats(name.as_deref(), &config.stats_path)
        }
        CliCommand::Play(options) => {
            let config = load_config(&options)?;
            init_tracing(&config)?;
            info!(white = %config.white_name, black = %config.black_name, "new game");
            play(config)
        }
    }
}
