//! Turn alternation and position classification across whole games

mod common;

use common::{init_logging, play, position, sq};
use duel_chess::{Color, Game, GameState, Legality, MoveError};

#[test]
fn turns_alternate_and_history_grows() {
    init_logging();
    let mut game = Game::new();
    play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6"]);

    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.history().len(), 4);
    assert_eq!(game.history()[2].to_string(), "g1f3");
}

#[test]
fn fools_mate() {
    init_logging();
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert_eq!(game.state(), GameState::Checkmate);
    assert!(game.is_in_check(Color::White));
    assert!(!game.has_legal_moves(Color::White));
    assert_eq!(game.winner(), Some(Color::Black));
    assert!(game.status().contains("Checkmate! Black wins!"));
}

#[test]
fn check_with_an_escape_is_not_mate() {
    init_logging();
    // Black king e8, white queen d6, white king far away on a1
    let mut game = position("4k3/8/3Q4/8/8/8/8/K7", Color::White);
    assert_eq!(game.state(), GameState::Playing);

    game.make_move("d6", "e7").unwrap();
    assert!(game.is_in_check(Color::Black));
    assert_eq!(game.state(), GameState::Check);
    assert!(game.status().contains("Black is in check!"));

    // The only escape is taking the unprotected queen
    assert_eq!(game.legal_moves(Color::Black).len(), 1);
    game.make_move("e8", "e7").unwrap();
    assert_eq!(game.state(), GameState::Playing);
}

#[test]
fn back_rank_mate() {
    init_logging();
    let mut game = position("6k1/5ppp/8/8/8/8/8/R5K1", Color::White);
    game.make_move("a1", "a8").unwrap();

    assert_eq!(game.state(), GameState::Checkmate);
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(Color::White));
    assert_eq!(
        game.status(),
        "Current Player: Black\nGame State: Checkmate\nCheckmate! White wins!\n"
    );
}

#[test]
fn stalemate_is_a_draw() {
    init_logging();
    // Qf6-f7 leaves the black king on h8 without a safe square
    let mut game = position("7k/8/5QK1/8/8/8/8/8", Color::White);
    game.make_move("f6", "f7").unwrap();

    assert_eq!(game.state(), GameState::Stalemate);
    assert!(game.is_over());
    assert_eq!(game.winner(), None);
    assert!(game.status().contains("Stalemate!"));
}

#[test]
fn classification_undoes_its_trial_moves() {
    let mut game = position("4k3/8/3Q4/8/8/8/8/K7", Color::White);
    game.make_move("d6", "e7").unwrap();
    let snapshot = game.board().clone();

    assert!(game.has_legal_moves(Color::Black));
    assert_eq!(game.board(), &snapshot);
    let king = game.board().get(sq("e8")).expect("king still home");
    assert!(!king.has_moved);
}

#[test]
fn strict_games_refuse_self_check() {
    init_logging();
    // Black rook on e8 controls the e-file
    let mut game =
        position("4r2k/8/8/8/8/8/8/3K4", Color::White).with_legality(Legality::Strict);

    let err = game.make_move("d1", "e2").unwrap_err();
    assert!(matches!(err, MoveError::LeavesKingInCheck(_)));
    assert_eq!(game.side_to_move(), Color::White);

    game.make_move("d1", "d2").unwrap();
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
fn default_games_allow_walking_into_check() {
    let mut game = position("4r2k/8/8/8/8/8/8/3K4", Color::White);
    game.make_move("d1", "e2").unwrap();
    assert!(game.is_in_check(Color::White));
    assert_eq!(game.side_to_move(), Color::Black);
}
