use super::*;

fn sq(s: &str) -> Coordinate {
    s.parse().unwrap()
}

fn play(game: &mut Game, from: &str, to: &str) -> Result<GameState, GameError> {
    game.play(sq(from), sq(to), None)
}

#[test]
fn test_new_game() {
    let game = Game::new();
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.state(), GameState::Ongoing);
    assert!(game.history().is_empty());
    assert_eq!(game.outcome(), None);
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn test_turns_alternate_and_history_grows() {
    let mut game = Game::new();
    assert_eq!(play(&mut game, "e2", "e4"), Ok(GameState::Ongoing));
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(play(&mut game, "e7", "e5"), Ok(GameState::Ongoing));
    assert_eq!(game.side_to_move(), Color::White);

    let history = game.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].from, sq("e2"));
    assert_eq!(history[0].color, Color::White);
    assert_eq!(history[1].color, Color::Black);
}

#[test]
fn test_rejected_move_changes_nothing() {
    let mut game = Game::new();
    let before = game.board().clone();
    assert!(matches!(
        play(&mut game, "e7", "e5"),
        Err(GameError::Move(MoveError::WrongSideToMove { .. }))
    ));
    assert!(matches!(
        play(&mut game, "e2", "e5"),
        Err(GameError::Move(MoveError::IllegalGeometry { .. }))
    ));
    assert_eq!(game.board(), &before);
    assert_eq!(game.side_to_move(), Color::White);
    assert!(game.history().is_empty());
}

#[test]
fn test_fools_mate() {
    let mut game = Game::new();
    play(&mut game, "f2", "f3").unwrap();
    play(&mut game, "e7", "e5").unwrap();
    play(&mut game, "g2", "g4").unwrap();
    let state = play(&mut game, "d8", "h4").unwrap();
    assert_eq!(
        state,
        GameState::Checkmate {
            winner: Color::Black
        }
    );
    assert_eq!(
        game.outcome(),
        Some(GameOutcome {
            winner: Some(Color::Black),
            loser: Some(Color::White),
            draw: false,
        })
    );
    assert_eq!(
        play(&mut game, "e2", "e3"),
        Err(GameError::GameOver(state))
    );
}

#[test]
fn test_check_is_reported() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4").unwrap();
    play(&mut game, "f7", "f6").unwrap();
    assert_eq!(play(&mut game, "d1", "h5"), Ok(GameState::Check));
    // Any reply that leaves the king attacked is refused.
    assert!(matches!(
        play(&mut game, "a7", "a6"),
        Err(GameError::Move(MoveError::KingExposed(Color::Black)))
    ));
    assert_eq!(play(&mut game, "g7", "g6"), Ok(GameState::Ongoing));
}

#[test]
fn test_from_fen_classifies_position() {
    let mate =
        Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    assert_eq!(
        mate.state(),
        GameState::Checkmate {
            winner: Color::Black
        }
    );
    let bare = Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(bare.state(), GameState::DrawInsufficientMaterial);
    assert!(Game::from_fen("not a fen").is_err());
}

#[test]
fn test_draw_offer_accepted() {
    let mut game = Game::new();
    game.offer_draw().unwrap();
    assert_eq!(game.draw_offer(), Some(Color::White));
    assert_eq!(play(&mut game, "e2", "e4"), Err(GameError::DrawOfferPending));
    assert_eq!(game.offer_draw(), Err(GameError::DrawOfferPending));
    assert_eq!(game.accept_draw(), Ok(GameState::DrawAgreed));
    assert_eq!(game.outcome().map(|o| o.draw), Some(true));
    assert_eq!(game.draw_offer(), None);
}

#[test]
fn test_draw_offer_declined_returns_turn_to_offerer() {
    let mut game = Game::new();
    game.offer_draw().unwrap();
    game.decline_draw().unwrap();
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.state(), GameState::Ongoing);
    assert!(play(&mut game, "e2", "e4").is_ok());
}

#[test]
fn test_draw_answers_need_an_offer() {
    let mut game = Game::new();
    assert_eq!(game.accept_draw(), Err(GameError::NoDrawOffer));
    assert_eq!(game.decline_draw(), Err(GameError::NoDrawOffer));
}

#[test]
fn test_resignation() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4").unwrap();
    let state = game.resign(Color::Black).unwrap();
    assert_eq!(
        state,
        GameState::Resigned {
            winner: Color::White
        }
    );
    assert_eq!(game.outcome().and_then(|o| o.loser), Some(Color::Black));
    assert_eq!(game.resign(Color::White), Err(GameError::GameOver(state)));
    assert_eq!(game.offer_draw(), Err(GameError::GameOver(state)));
}

#[test]
fn test_promotion_flow() {
    let mut game = Game::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let before = game.board().clone();

    assert_eq!(play(&mut game, "a7", "a8"), Ok(GameState::PromotionPending));
    assert_eq!(game.board(), &before);
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.pending_promotion(), Some((sq("a7"), sq("a8"))));
    assert_eq!(play(&mut game, "a1", "b1"), Err(GameError::PromotionPending));
    assert_eq!(game.offer_draw(), Err(GameError::PromotionPending));

    assert_eq!(game.promote(Promotion::Queen), Ok(GameState::Check));
    assert_eq!(
        game.board().piece_at(sq("a8")),
        Some(Piece::Queen {
            color: Color::White
        })
    );
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.pending_promotion(), None);
    assert_eq!(game.history()[0].promotion, Some(Promotion::Queen));
}

#[test]
fn test_promotion_cancelled() {
    let mut game = Game::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    play(&mut game, "a7", "a8").unwrap();
    assert_eq!(game.cancel_promotion(), Ok(GameState::Ongoing));
    assert_eq!(game.cancel_promotion(), Err(GameError::NoPendingPromotion));
    assert_eq!(game.promote(Promotion::Rook), Err(GameError::NoPendingPromotion));
    assert_eq!(play(&mut game, "a1", "b1"), Ok(GameState::Ongoing));
}

#[test]
fn test_inline_promotion_choice() {
    let mut game = Game::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let state = game
        .play(sq("a7"), sq("a8"), Some(Promotion::Rook))
        .unwrap();
    assert_eq!(state, GameState::Check);
    assert_eq!(
        game.board().piece_at(sq("a8")),
        Some(Piece::Rook {
            color: Color::White,
            has_moved: true
        })
    );
}

#[test]
fn test_en_passant_lapses_after_one_turn() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4").unwrap();
    play(&mut game, "a7", "a6").unwrap();
    play(&mut game, "e4", "e5").unwrap();
    play(&mut game, "d7", "d5").unwrap();
    assert_eq!(game.board().en_passant_target(), Some(sq("d5")));

    let mut now = game.clone();
    assert!(play(&mut now, "e5", "d6").is_ok());
    assert_eq!(now.board().piece_at(sq("d5")), None);
    assert!(now.history()[4].en_passant);

    play(&mut game, "h2", "h3").unwrap();
    play(&mut game, "a6", "a5").unwrap();
    assert!(matches!(
        play(&mut game, "e5", "d6"),
        Err(GameError::Move(MoveError::IllegalGeometry { .. }))
    ));
}

#[test]
fn test_fifty_move_rule() {
    let mut game = Game::from_fen("7k/8/8/8/8/8/8/KR6 w - - 98 1").unwrap();
    assert_eq!(play(&mut game, "a1", "a2"), Ok(GameState::Ongoing));
    assert_eq!(game.board().half_move_clock(), 99);
    assert_eq!(play(&mut game, "h8", "g8"), Ok(GameState::DrawFiftyMove));
    assert!(game.is_over());
}

#[test]
fn test_fifty_move_rule_overrides_check() {
    let mut game = Game::from_fen("7k/8/8/8/8/8/8/KR6 w - - 99 1").unwrap();
    let mut fresh = game.clone();
    fresh.board.set_half_move_clock(0);
    assert_eq!(play(&mut fresh, "b1", "b8"), Ok(GameState::Check));
    assert_eq!(play(&mut game, "b1", "b8"), Ok(GameState::DrawFiftyMove));
}

#[test]
fn test_insufficient_material_after_capture() {
    let mut game = Game::from_fen("7k/8/8/8/8/8/1r6/K1B5 w - - 0 1").unwrap();
    assert_eq!(game.state(), GameState::Ongoing);
    assert_eq!(
        play(&mut game, "a1", "b2"),
        Ok(GameState::DrawInsufficientMaterial)
    );
    assert_eq!(game.outcome().map(|o| o.draw), Some(true));
}

#[test]
fn test_state_display() {
    assert_eq!(
        GameState::Checkmate {
            winner: Color::White
        }
        .to_string(),
        "checkmate, white wins"
    );
    assert_eq!(
        GameState::Resigned {
            winner: Color::Black
        }
        .to_string(),
        "white resigned, black wins"
    );
    assert!(!GameState::Check.is_terminal());
    assert!(!GameState::PromotionPending.is_terminal());
    assert!(GameState::Stalemate.is_terminal());
}
