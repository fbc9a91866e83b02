//! One hot-seat game driven line by line.
//!
//! [`Session`] turns typed lines into controller calls and collects the text
//! to show back. It does no I/O itself, so the binary owns stdin/stdout and
//! tests can feed lines directly.

use chess_rules::{legal_destinations, Color, Coordinate, Game, GameError, GameOutcome, GameState};
use tracing::{debug, info};

use crate::config::TerminalConfig;
use crate::input::{parse_command, Command};
use crate::render::{fifty_move_warning, render_board, status_banner};

/// What the caller should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Finished(GameOutcome),
    Quit,
}

pub struct Session {
    game: Game,
    config: TerminalConfig,
    messages: Vec<String>,
}

pub const HELP_TEXT: &str = "\
Commands:
  e2 e4        move the piece on e2 to e4
  e7 e8 q      move and promote (queen, rook, bishop, knight or q/r/b/n)
  moves e2     list where the piece on e2 may go
  draw         offer a draw; your opponent types `draw` to accept,
               anything else declines and you move again
  resign       give up (also surrender, surr, forfeit, ff); no confirmation
  cancel       take back a move waiting for its promotion piece
  quit         leave without recording a result
  help         show this text

The game ends on checkmate, stalemate, resignation, agreed draw,
insufficient material (e.g. king vs king, king and one minor piece vs king,
king and two same-colored bishops vs king) or after 100 half-moves
without a capture or pawn move. Threefold repetition is not detected;
offer a draw instead.";

fn sentence(text: String) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => text,
    }
}

impl Session {
    pub fn new(config: TerminalConfig) -> Self {
        Self::with_game(Game::new(), config)
    }

    pub fn with_game(game: Game, config: TerminalConfig) -> Self {
        Self {
            game,
            config,
            messages: Vec::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Messages produced since the last call.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    fn say(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
    }

    fn player(&self, color: Color) -> &str {
        self.config.name_for(color)
    }

    /// Board, banners and warnings for the current position.
    pub fn view(&self) -> String {
        let mut out = render_board(self.game.board(), self.config.glyphs);
        out.push('\n');
        if let Some(banner) = status_banner(&self.game) {
            out.push_str(&banner);
            out.push('\n');
        }
        if let Some(warning) =
            fifty_move_warning(self.game.board(), self.config.warn_after_half_moves)
        {
            out.push_str(&warning);
            out.push('\n');
        }
        out
    }

    pub fn prompt(&self) -> String {
        let side = self.game.side_to_move();
        if self.game.pending_promotion().is_some() {
            return "Pawn promotion! Choose queen, rook, bishop or knight: ".to_string();
        }
        if let Some(by) = self.game.draw_offer() {
            return format!(
                "{}, {} offers a draw. Type `draw` to accept: ",
                self.player(by.other()),
                self.player(by)
            );
        }
        format!("{} ({side}) to move: ", self.player(side))
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        if self.game.is_over() {
            return self.finished();
        }
        if self.game.draw_offer().is_some() {
            return self.answer_draw(line);
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                self.say(sentence(e.to_string()));
                return Flow::Continue;
            }
        };

        if self.game.pending_promotion().is_some() {
            return self.answer_promotion(command);
        }

        match command {
            Command::Move {
                from,
                to,
                promotion,
            } => {
                let result = self.game.play(from, to, promotion);
                self.after(result)
            }
            Command::Moves(from) => {
                self.list_moves(from);
                Flow::Continue
            }
            Command::Draw => {
                match self.game.offer_draw() {
                    Ok(()) => {
                        let by = self.game.side_to_move();
                        self.say(format!("{} offers a draw.", self.player(by)));
                    }
                    Err(e) => self.say(sentence(e.to_string())),
                }
                Flow::Continue
            }
            Command::Resign => self.resign(),
            Command::Help => {
                self.say(HELP_TEXT);
                Flow::Continue
            }
            Command::Quit => Flow::Quit,
            Command::Piece(_) | Command::Cancel => {
                self.say("There is no pawn waiting for promotion.");
                Flow::Continue
            }
        }
    }

    fn answer_draw(&mut self, line: &str) -> Flow {
        match parse_command(line) {
            Ok(Command::Draw) => {
                let result = self.game.accept_draw();
                return self.after(result);
            }
            Ok(Command::Resign) => {
                // The offer is still open, so the side to move is the one that made it.
                let by = self.game.side_to_move().other();
                let result = self.game.resign(by);
                return self.after(result);
            }
            _ => {}
        }
        // Any other input refuses the offer; the offering side moves again.
        if let Ok(by) = self.game.decline_draw().map(|()| self.game.side_to_move()) {
            self.say(format!(
                "Draw offer declined by {}. {} to move.",
                self.player(by.other()),
                self.player(by)
            ));
        }
        Flow::Continue
    }

    fn answer_promotion(&mut self, command: Command) -> Flow {
        match command {
            Command::Piece(choice) => {
                let result = self.game.promote(choice);
                self.after(result)
            }
            Command::Cancel => {
                if self.game.cancel_promotion().is_ok() {
                    self.say("Promotion cancelled; choose another move.");
                }
                Flow::Continue
            }
            Command::Resign => self.resign(),
            Command::Quit => Flow::Quit,
            Command::Help => {
                self.say(HELP_TEXT);
                Flow::Continue
            }
            _ => {
                self.say("Choose queen, rook, bishop or knight (or `cancel`).");
                Flow::Continue
            }
        }
    }

    fn resign(&mut self) -> Flow {
        let side = self.game.side_to_move();
        let result = self.game.resign(side);
        self.after(result)
    }

    fn list_moves(&mut self, from: Coordinate) {
        let owner = self.game.board().piece_at(from).map(|pc| pc.color());
        if owner != Some(self.game.side_to_move()) {
            self.say(format!("No piece of yours on {from}."));
            return;
        }
        let dests = legal_destinations(self.game.board(), from);
        if dests.is_empty() {
            self.say(format!("The piece on {from} has no legal moves."));
        } else {
            let list: Vec<String> = dests.iter().map(ToString::to_string).collect();
            self.say(format!("{from}: {}", list.join(" ")));
        }
    }

    fn after(&mut self, result: Result<GameState, GameError>) -> Flow {
        match result {
            Ok(state) => {
                debug!(%state, fen = %self.game.to_fen(), "position");
                if state.is_terminal() {
                    self.finished()
                } else {
                    Flow::Continue
                }
            }
            Err(e) => {
                self.say(sentence(e.to_string()));
                Flow::Continue
            }
        }
    }

    fn finished(&mut self) -> Flow {
        match self.game.outcome() {
            Some(outcome) => {
                let summary = match outcome.winner {
                    Some(winner) => format!("{} wins.", self.player(winner)),
                    None => "The game is drawn.".to_string(),
                };
                info!(state = %self.game.state(), %summary, "game finished");
                self.say(format!("Game over! {}", sentence(self.game.state().to_string())));
                self.say(summary);
                Flow::Finished(outcome)
            }
            None => Flow::Continue,
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
