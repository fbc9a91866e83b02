//! Command-line arguments.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),
    #[error("unknown argument: {0}")]
    Unknown(String),
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub white_name: Option<String>,
    pub black_name: Option<String>,
    pub stats_path: Option<PathBuf>,
    pub ascii: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Start a hot-seat game (the default).
    Play(CliOptions),
    /// Print one player's record, or the whole ledger.
    Stats {
        name: Option<String>,
        options: CliOptions,
    },
    Help,
}

pub fn print_usage() {
    println!("Terminal chess for two players at one keyboard");
    println!();
    println!("Usage:");
    println!("  chess_terminal [play] [options]");
    println!("  chess_terminal stats [name] [options]");
    println!("  chess_terminal help");
    println!();
    println!("Options:");
    println!("  --config <path>   Read settings from this TOML file");
    println!("  --white <name>    Name of the white player");
    println!("  --black <name>    Name of the black player");
    println!("  --stats <path>    Win/loss/draw ledger (JSON)");
    println!("  --ascii           Draw the board with ASCII letters");
    println!();
    println!("Examples:");
    println!("  chess_terminal --white alice --black bob");
    println!("  chess_terminal stats alice");
}

/// Parse the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<CliCommand, CliError> {
    let (subcommand, rest) = match args.first().map(String::as_str) {
        Some("play") => ("play", &args[1..]),
        Some("stats") => ("stats", &args[1..]),
        Some("help" | "--help" | "-h") => return Ok(CliCommand::Help),
        _ => ("play", args),
    };

    let mut options = CliOptions::default();
    let mut positional = Vec::new();
    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].as_str();
        let mut value = || {
            i += 1;
            rest.get(i)
                .cloned()
                .ok_or_else(|| CliError::MissingValue(arg.to_string()))
        };
        match arg {
            "--config" | "-c" => options.config = Some(PathBuf::from(value()?)),
            "--white" | "-w" => options.white_name = Some(value()?),
            "--black" | "-b" => options.black_name = Some(value()?),
            "--stats" | "-s" => options.stats_path = Some(PathBuf::from(value()?)),
            "--ascii" => options.ascii = true,
            "--help" | "-h" => return Ok(CliCommand::Help),
            other if other.starts_with('-') => return Err(CliError::Unknown(other.to_string())),
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    match subcommand {
        "stats" => {
            if positional.len() > 1 {
                return Err(CliError::Unknown(positional[1].clone()));
            }
            Ok(CliCommand::Stats {
                name: positional.pop(),
                options,
            })
        }
        _ => match positional.first() {
            Some(extra) => Err(CliError::Unknown(extra.clone())),
            None => Ok(CliCommand::Play(options)),
        },
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
