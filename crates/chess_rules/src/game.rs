//! Game state controller.
//!
//! [`Game`] owns the board and the side to move, runs every request through
//! the executor, and classifies the position after each move. It knows
//! nothing about input or rendering.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::attacks::in_check;
use crate::board::Board;
use crate::error::{FenError, GameError, MoveError};
use crate::executor::{execute, MoveOutcome};
use crate::fen;
use crate::legal::{has_legal_move, legal_moves};
use crate::material::have_sufficient_material;
use crate::types::*;

/// Half-move clock value at which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// One entry of the game's move history.
pub type MoveRecord = MoveOutcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameState {
    Ongoing,
    Check,
    /// A pawn move to the last rank is waiting for a piece choice.
    PromotionPending,
    Checkmate { winner: Color },
    Stalemate,
    DrawAgreed,
    DrawFiftyMove,
    DrawInsufficientMaterial,
    Resigned { winner: Color },
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        !matches!(
            self,
            GameState::Ongoing | GameState::Check | GameState::PromotionPending
        )
    }

    /// The `(winner, loser, draw)` verdict of a finished game.
    pub fn outcome(self) -> Option<GameOutcome> {
        match self {
            GameState::Checkmate { winner } | GameState::Resigned { winner } => Some(GameOutcome {
                winner: Some(winner),
                loser: Some(winner.other()),
                draw: false,
            }),
            GameState::Stalemate
            | GameState::DrawAgreed
            | GameState::DrawFiftyMove
            | GameState::DrawInsufficientMaterial => Some(GameOutcome {
                winner: None,
                loser: None,
                draw: true,
            }),
            GameState::Ongoing | GameState::Check | GameState::PromotionPending => None,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Ongoing => write!(f, "ongoing"),
            GameState::Check => write!(f, "check"),
            GameState::PromotionPending => write!(f, "waiting for a promotion choice"),
            GameState::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameState::Stalemate => write!(f, "stalemate, the game is drawn"),
            GameState::DrawAgreed => write!(f, "draw by agreement"),
            GameState::DrawFiftyMove => write!(f, "draw by the fifty-move rule"),
            GameState::DrawInsufficientMaterial => write!(f, "draw by insufficient material"),
            GameState::Resigned { winner } => {
                write!(f, "{} resigned, {winner} wins", winner.other())
            }
        }
    }
}

/// Result of a finished game, as handed to the stats ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Option<Color>,
    pub loser: Option<Color>,
    pub draw: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingPromotion {
    from: Coordinate,
    to: Coordinate,
    // State to return to if the promotion is abandoned.
    resume: GameState,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    state: GameState,
    pending: Option<PendingPromotion>,
    draw_offer: Option<Color>,
    history: Vec<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// State of `side` to move on `board`, assuming the game has not otherwise
/// ended: check, then mate or stalemate, then the fifty-move rule on top.
fn classify(board: &Board, side: Color) -> GameState {
    let checked = in_check(board, side);
    let mut state = if checked {
        GameState::Check
    } else {
        GameState::Ongoing
    };
    if !has_legal_move(board, side) {
        state = if checked {
            GameState::Checkmate {
                winner: side.other(),
            }
        } else {
            GameState::Stalemate
        };
    }
    // Applies even over mate or stalemate.
    if board.half_move_clock() >= FIFTY_MOVE_LIMIT {
        state = GameState::DrawFiftyMove;
    }
    state
}

impl Game {
    /// A new game from the standard opening array, white to move.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            side_to_move: Color::White,
            state: GameState::Ongoing,
            pending: None,
            draw_offer: None,
            history: Vec::new(),
        }
    }

    /// A game starting from an arbitrary FEN position, already classified.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (board, side_to_move) = fen::parse(fen)?;
        let state = if have_sufficient_material(&board) {
            classify(&board, side_to_move)
        } else {
            GameState::DrawInsufficientMaterial
        };
        Ok(Game {
            board,
            side_to_move,
            state,
            pending: None,
            draw_offer: None,
            history: Vec::new(),
        })
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen(self.side_to_move)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The move waiting for a promotion choice, if any.
    pub fn pending_promotion(&self) -> Option<(Coordinate, Coordinate)> {
        self.pending.map(|p| (p.from, p.to))
    }

    /// The side that offered a draw still waiting for an answer.
    pub fn draw_offer(&self) -> Option<Color> {
        self.draw_offer
    }

    /// Legal moves of the side to move.
    pub fn legal_moves(&self) -> Vec<(Coordinate, Coordinate)> {
        legal_moves(&self.board, self.side_to_move)
    }

    fn ensure_open(&self) -> Result<(), GameError> {
        if self.state.is_terminal() {
            return Err(GameError::GameOver(self.state));
        }
        Ok(())
    }

    fn ensure_accepting_moves(&self) -> Result<(), GameError> {
        self.ensure_open()?;
        if self.pending.is_some() {
            return Err(GameError::PromotionPending);
        }
        if self.draw_offer.is_some() {
            return Err(GameError::DrawOfferPending);
        }
        Ok(())
    }

    /// Play `from -> to` for the side to move.
    ///
    /// A pawn reaching the last rank without `promotion` leaves the board
    /// untouched and moves the game into [`GameState::PromotionPending`];
    /// finish it with [`Game::promote`]. On error nothing changes.
    pub fn play(
        &mut self,
        from: Coordinate,
        to: Coordinate,
        promotion: Option<Promotion>,
    ) -> Result<GameState, GameError> {
        self.ensure_accepting_moves()?;
        self.clear_stale_en_passant();

        match execute(&mut self.board, self.side_to_move, from, to, promotion) {
            Ok(outcome) => Ok(self.finish_move(outcome)),
            Err(MoveError::PromotionRequired) => {
                debug!(%from, %to, "promotion pending");
                self.pending = Some(PendingPromotion {
                    from,
                    to,
                    resume: self.state,
                });
                self.state = GameState::PromotionPending;
                Ok(self.state)
            }
            Err(err) => {
                debug!(%from, %to, color = %self.side_to_move, error = %err, "move rejected");
                Err(err.into())
            }
        }
    }

    /// Complete the pending promotion with `choice`.
    pub fn promote(&mut self, choice: Promotion) -> Result<GameState, GameError> {
        self.ensure_open()?;
        let pending = self.pending.ok_or(GameError::NoPendingPromotion)?;
        let outcome = execute(
            &mut self.board,
            self.side_to_move,
            pending.from,
            pending.to,
            Some(choice),
        )?;
        self.pending = None;
        Ok(self.finish_move(outcome))
    }

    /// Abandon the pending promotion; the same side moves again.
    pub fn cancel_promotion(&mut self) -> Result<GameState, GameError> {
        let pending = self.pending.take().ok_or(GameError::NoPendingPromotion)?;
        self.state = pending.resume;
        Ok(self.state)
    }

    /// `by` gives up; the opponent wins.
    pub fn resign(&mut self, by: Color) -> Result<GameState, GameError> {
        self.ensure_open()?;
        self.pending = None;
        self.draw_offer = None;
        self.state = GameState::Resigned { winner: by.other() };
        info!(loser = %by, state = %self.state, "game over");
        Ok(self.state)
    }

    /// The side to move offers a draw. The opponent answers with
    /// [`Game::accept_draw`] or [`Game::decline_draw`].
    pub fn offer_draw(&mut self) -> Result<(), GameError> {
        self.ensure_accepting_moves()?;
        self.draw_offer = Some(self.side_to_move);
        debug!(by = %self.side_to_move, "draw offered");
        Ok(())
    }

    pub fn accept_draw(&mut self) -> Result<GameState, GameError> {
        self.ensure_open()?;
        self.draw_offer.take().ok_or(GameError::NoDrawOffer)?;
        self.state = GameState::DrawAgreed;
        info!(state = %self.state, "game over");
        Ok(self.state)
    }

    /// Refuse the draw; the offering side is still to move.
    pub fn decline_draw(&mut self) -> Result<(), GameError> {
        self.ensure_open()?;
        let by = self.draw_offer.take().ok_or(GameError::NoDrawOffer)?;
        debug!(%by, "draw declined");
        Ok(())
    }

    /// A capture opportunity lapses once its side has had its turn.
    fn clear_stale_en_passant(&mut self) {
        if let Some(target) = self.board.en_passant_target() {
            let owner = self.board.piece_at(target).map(Piece::color);
            if owner != Some(self.side_to_move.other()) {
                self.board.set_en_passant_target(None);
            }
        }
    }

    fn finish_move(&mut self, outcome: MoveOutcome) -> GameState {
        self.history.push(outcome);

        if !have_sufficient_material(&self.board) {
            self.state = GameState::DrawInsufficientMaterial;
            info!(state = %self.state, "game over");
            return self.state;
        }

        self.side_to_move = self.side_to_move.other();
        self.state = classify(&self.board, self.side_to_move);
        if self.state.is_terminal() {
            info!(state = %self.state, moves = self.history.len(), "game over");
        }
        self.state
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
