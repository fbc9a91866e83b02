//! Terminal configuration, read from TOML.

use std::path::{Path, PathBuf};

use chess_rules::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::CliOptions;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "chess_terminal.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// How pieces and empty squares are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    #[default]
    Unicode,
    Ascii,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Display name of the white player, also their key in the stats ledger.
    pub white_name: String,
    pub black_name: String,
    /// JSON file holding the win/loss/draw ledger.
    pub stats_path: PathBuf,
    pub glyphs: GlyphSet,
    /// Show the fifty-move warning once the half-move clock passes this.
    pub warn_after_half_moves: u32,
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            white_name: "Player 1".to_string(),
            black_name: "Player 2".to_string(),
            stats_path: PathBuf::from("chess_stats.json"),
            glyphs: GlyphSet::Unicode,
            warn_after_half_moves: 60,
            log_filter: "chess_terminal=info,chess_rules=warn".to_string(),
        }
    }
}

impl TerminalConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// The explicit file if given (it must exist), else [`DEFAULT_CONFIG_FILE`]
    /// in `dir` if present, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::load(&fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Command-line flags win over the file.
    pub fn apply_overrides(&mut self, opts: &CliOptions) {
        if let Some(name) = &opts.white_name {
            self.white_name = name.clone();
        }
        if let Some(name) = &opts.black_name {
            self.black_name = name.clone();
        }
        if let Some(path) = &opts.stats_path {
            self.stats_path = path.clone();
        }
        if opts.ascii {
            self.glyphs = GlyphSet::Ascii;
        }
    }

    pub fn name_for(&self, color: Color) -> &str {
        match color {
            Color::White => &self.white_name,
            Color::Black => &self.black_name,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
