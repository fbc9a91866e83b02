//! Terminal front end for the chess rules engine.
//!
//! This crate provides:
//! - Command-line and config-file handling
//! - Parsing of typed moves and side-channel commands (draw, resign, ...)
//! - Text rendering of the board
//! - The line-driven hot-seat game session
//! - The JSON win/loss/draw ledger
//!
//! # Usage
//!
//! ```bash
//! cargo run -p chess_terminal -- --white alice --black bob
//! cargo run -p chess_terminal -- stats
//! ```

mod cli;
mod config;
mod input;
mod render;
mod session;
mod stats;

pub use cli::*;
pub use config::*;
pub use input::*;
pub use render::*;
pub use session::*;
pub use stats::*;
