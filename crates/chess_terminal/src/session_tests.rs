use super::*;

use chess_rules::{Piece, PieceKind};

fn sq(s: &str) -> Coordinate {
    s.parse().unwrap()
}

fn session() -> Session {
    Session::new(TerminalConfig::default())
}

fn feed(session: &mut Session, lines: &[&str]) -> Flow {
    let mut flow = Flow::Continue;
    for line in lines {
        flow = session.handle_line(line);
    }
    flow
}

#[test]
fn test_fools_mate_finishes() {
    let mut s = session();
    assert_eq!(s.prompt(), "Player 1 (white) to move: ");
    let flow = feed(&mut s, &["f2 f3", "e7 e5", "g2 g4", "d8 h4"]);
    let Flow::Finished(outcome) = flow else {
        panic!("expected a finished game, got {flow:?}");
    };
    assert_eq!(outcome.winner, Some(Color::Black));
    assert_eq!(
        s.take_messages(),
        ["Game over! Checkmate, black wins.", "Player 2 wins."]
    );
    assert!(s.view().contains("Game over: checkmate, black wins."));

    // Further input only repeats the verdict.
    assert!(matches!(s.handle_line("e2 e4"), Flow::Finished(_)));
}

#[test]
fn test_rejections_are_reported() {
    let mut s = session();
    assert_eq!(s.handle_line("e2 e5"), Flow::Continue);
    assert!(s.take_messages()[0].starts_with("Invalid move for"));

    s.handle_line("e7 e5");
    assert!(s.take_messages()[0].starts_with("The piece on e7 belongs to black"));

    s.handle_line("e2 z9");
    assert!(s.take_messages()[0].starts_with("Incorrect position"));

    s.handle_line("q");
    assert_eq!(
        s.take_messages(),
        ["There is no pawn waiting for promotion."]
    );
    assert_eq!(s.game().side_to_move(), Color::White);
    assert!(s.game().history().is_empty());
}

#[test]
fn test_resign_token() {
    let mut s = session();
    s.handle_line("e2 e4");
    let flow = s.handle_line("surrender");
    assert_eq!(
        flow,
        Flow::Finished(GameOutcome {
            winner: Some(Color::White),
            loser: Some(Color::Black),
            draw: false,
        })
    );
    assert_eq!(
        s.take_messages(),
        ["Game over! Black resigned, white wins.", "Player 1 wins."]
    );
}

#[test]
fn test_draw_accepted() {
    let mut s = session();
    s.handle_line("draw");
    assert_eq!(s.take_messages(), ["Player 1 offers a draw."]);
    assert_eq!(
        s.prompt(),
        "Player 2, Player 1 offers a draw. Type `draw` to accept: "
    );
    let flow = s.handle_line("DRAW");
    assert!(matches!(flow, Flow::Finished(GameOutcome { draw: true, .. })));
    assert_eq!(s.game().state(), GameState::DrawAgreed);
}

#[test]
fn test_draw_declined_by_any_other_input() {
    let mut s = session();
    s.handle_line("draw");
    s.take_messages();
    assert_eq!(s.handle_line("e7 e5"), Flow::Continue);
    assert_eq!(
        s.take_messages(),
        ["Draw offer declined by Player 2. Player 1 to move."]
    );
    // The declining line is not played as a move.
    assert!(s.game().history().is_empty());
    assert_eq!(s.game().draw_offer(), None);
    assert_eq!(s.game().side_to_move(), Color::White);
}

#[test]
fn test_resigning_instead_of_answering_a_draw() {
    let mut s = session();
    s.handle_line("e2 e4");
    s.handle_line("draw");
    s.take_messages();
    // Black offered; white answers by resigning.
    let flow = s.handle_line("Forfeit");
    assert_eq!(
        flow,
        Flow::Finished(GameOutcome {
            winner: Some(Color::Black),
            loser: Some(Color::White),
            draw: false,
        })
    );
    assert_eq!(s.game().draw_offer(), None);
    assert_eq!(
        s.take_messages(),
        ["Game over! White resigned, black wins.", "Player 2 wins."]
    );
}

#[test]
fn test_promotion_prompt_and_cancel() {
    let game = Game::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    let mut s = Session::with_game(game, TerminalConfig::default());

    assert_eq!(s.handle_line("e7 e8"), Flow::Continue);
    assert_eq!(s.game().state(), GameState::PromotionPending);
    assert!(s.prompt().starts_with("Pawn promotion!"));

    s.handle_line("e1 d1");
    assert_eq!(
        s.take_messages(),
        ["Choose queen, rook, bishop or knight (or `cancel`)."]
    );

    s.handle_line("cancel");
    assert_eq!(
        s.take_messages(),
        ["Promotion cancelled; choose another move."]
    );
    assert_eq!(s.game().pending_promotion(), None);
    assert_eq!(s.game().board().piece_at(sq("e7")).map(Piece::kind), Some(PieceKind::Pawn));

    s.handle_line("e7 e8");
    s.handle_line("Queen");
    let promoted = s.game().board().piece_at(sq("e8")).unwrap();
    assert_eq!(promoted.kind(), PieceKind::Queen);
    assert_eq!(promoted.color(), Color::White);
    assert_eq!(s.game().side_to_move(), Color::Black);
}

#[test]
fn test_moves_command() {
    let mut s = session();
    s.handle_line("moves g1");
    assert_eq!(s.take_messages(), ["g1: f3 h3"]);
    s.handle_line("moves a1");
    assert_eq!(s.take_messages(), ["The piece on a1 has no legal moves."]);
    s.handle_line("moves e7");
    assert_eq!(s.take_messages(), ["No piece of yours on e7."]);
}

#[test]
fn test_help_and_quit() {
    let mut s = session();
    s.handle_line("?");
    assert_eq!(s.take_messages(), [HELP_TEXT]);
    assert_eq!(s.handle_line("quit"), Flow::Quit);
}
