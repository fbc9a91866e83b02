//! Two-player chess rules: board model, per-piece movement, attack detection,
//! move execution and the game state controller.

pub mod attacks;
pub mod board;
pub mod error;
pub mod executor;
pub mod fen;
pub mod game;
pub mod legal;
pub mod material;
pub mod movement;
mod speculate;
pub mod types;

pub use attacks::{attackers, in_check, is_attacked};
pub use board::{Board, Square};
pub use error::{FenError, GameError, MoveError};
pub use executor::{execute, is_promotion, MoveOutcome};
pub use game::{Game, GameOutcome, GameState, MoveRecord, FIFTY_MOVE_LIMIT};
pub use legal::{has_legal_move, legal_destinations, legal_moves};
pub use material::have_sufficient_material;
pub use movement::{geometry_ok, CastleSide};
pub use types::*;
