//! Tests for typestate game architecture.

use strictly_trax::{
    Cell, GameConfig, GameInProgress, GameResult, GameSetup, Move, Outcome, Piece, Placement,
    Player, Tile, TraxErrorKind, WinKind,
};

#[test]
fn test_typestate_lifecycle() {
    let game = GameSetup::new(GameConfig::standard()).start();
    assert_eq!(game.to_move(), Player::White);
    assert!(game.board().is_empty());

    let result = game.play(Move::opening(Piece::Slash)).expect("Valid move");
    let game = match result {
        GameResult::InProgress(g) => g,
        GameResult::Finished(_) => panic!("Game shouldn't finish after one move"),
    };
    assert_eq!(game.to_move(), Player::Red);
    assert_eq!(game.board().get(Cell::ORIGIN), Some(Tile::C));
}

#[test]
fn test_notation_game_records_forced_tiles() {
    let result = GameInProgress::replay_notation(GameConfig::standard(), &["@0+", "a0/", "b2\\"])
        .expect("Valid replay");
    let game = result.into_in_progress().expect("Game continues");

    let board = game.board();
    assert_eq!(board.get(Cell::new(0, 0)), Some(Tile::A));
    assert_eq!(board.get(Cell::new(0, 1)), Some(Tile::C));
    assert_eq!(board.get(Cell::new(1, 0)), Some(Tile::E));
    assert_eq!(board.get(Cell::new(1, 1)), Some(Tile::D));
    assert_eq!(board.len(), 4);

    let notation: Vec<&str> = game.history().iter().map(|h| h.notation.as_str()).collect();
    assert_eq!(notation, vec!["@0+", "a0/", "b2\\"]);
    assert_eq!(
        game.history()[2].forced,
        vec![Placement::new(Cell::new(1, 1), Tile::D)]
    );
    assert_eq!(game.to_move(), Player::Red);
}

#[test]
fn test_opponent_loop_wins_for_opponent() {
    // White's third move forces the tile that closes Red's ring.
    let result = GameInProgress::replay_notation(GameConfig::standard(), &["@0/", "b1\\", "a0\\"])
        .expect("Valid replay");
    let GameResult::Finished(game) = result else {
        panic!("Game should be over");
    };
    assert_eq!(game.outcome(), &Outcome::Winner(Player::Red));
    assert_eq!(game.wins().len(), 1);
    assert_eq!(game.wins()[0].kind, WinKind::Loop);
    assert_eq!(game.wins()[0].path.len(), 4);
    assert_eq!(game.board().get(Cell::new(1, 1)), Some(Tile::D));
}

#[test]
fn test_moves_after_game_over_are_rejected() {
    let err = GameInProgress::replay_notation(
        GameConfig::standard(),
        &["@0/", "b1\\", "a0\\", "c1+"],
    )
    .unwrap_err();
    assert_eq!(err.kind(), &TraxErrorKind::GameOver);
}

#[test]
fn test_bounded_board_with_no_room_is_drawn() {
    let result = GameSetup::new(GameConfig::bounded(1))
        .start()
        .play(Move::opening(Piece::Straight))
        .expect("Valid opening");
    let game = result.into_finished().expect("No move fits a 1x1 board");
    assert!(game.outcome().is_draw());
    assert!(game.wins().is_empty());
    assert_eq!(game.restart().config(), &GameConfig::bounded(1));
}

#[test]
fn test_rejected_move_leaves_game_untouched() {
    let game = GameSetup::default()
        .start()
        .play_notation("@0+")
        .unwrap()
        .into_in_progress()
        .unwrap();

    let err = game.play(Move::new(Cell::new(3, 3), Piece::Straight)).unwrap_err();
    assert!(matches!(err.kind(), TraxErrorKind::IllegalPlacement(_)));
    let err = game.play_notation("a1").unwrap_err();
    assert!(matches!(err.kind(), TraxErrorKind::MalformedNotation(_)));
    let err = game.play_notation("+").unwrap_err();
    assert!(matches!(err.kind(), TraxErrorKind::MalformedNotation(_)));

    assert_eq!(game.board().len(), 1);
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.to_move(), Player::Red);
}

#[test]
fn test_placeable_orientations_follow_neighbours() {
    let game = GameSetup::default().start();
    assert_eq!(
        game.placeable_orientations(Cell::ORIGIN),
        vec![Piece::Straight, Piece::Slash]
    );
    assert!(game.placeable_orientations(Cell::new(1, 0)).is_empty());

    let game = game
        .play(Move::opening(Piece::Straight))
        .unwrap()
        .into_in_progress()
        .unwrap();
    assert_eq!(game.placeable_orientations(Cell::new(1, 0)), Piece::ALL.to_vec());
    assert!(game.placeable_orientations(Cell::ORIGIN).is_empty());
}

#[test]
#[should_panic(expected = "not validated against this position")]
fn test_commit_of_stale_move_panics() {
    let game = GameSetup::default()
        .start()
        .play(Move::opening(Piece::Straight))
        .unwrap()
        .into_in_progress()
        .unwrap();
    let stale = game
        .validate(Move::new(Cell::new(1, 0), Piece::Straight))
        .unwrap();
    let moved = game
        .play(Move::new(Cell::new(0, 1), Piece::Straight))
        .unwrap()
        .into_in_progress()
        .unwrap();
    let _ = moved.commit(stale);
}

fn opened(piece: Piece) -> GameInProgress {
    GameSetup::default()
        .start()
        .play(Move::opening(piece))
        .unwrap()
        .into_in_progress()
        .unwrap()
}

#[test]
#[should_panic(expected = "not validated against this position")]
fn test_commit_on_differently_opened_game_panics() {
    // Both boards hold one tile, so only the position itself tells them apart.
    let straight = opened(Piece::Straight);
    let slash = opened(Piece::Slash);
    let legal = straight
        .validate(Move::new(Cell::new(0, 1), Piece::Straight))
        .unwrap();
    let _ = slash.commit(legal);
}

#[test]
fn test_far_notation_is_rejected_without_panicking() {
    let game = opened(Piece::Straight);
    for input in ["a2147483649+", "zz1+", "a4294967295/", "b3\\"] {
        let err = game.play_notation(input).unwrap_err();
        assert!(
            matches!(err.kind(), TraxErrorKind::IllegalPlacement(_)),
            "{input}: {err}"
        );
    }
    let err = game
        .play(Move::new(Cell::new(i32::MAX, i32::MIN), Piece::Slash))
        .unwrap_err();
    assert!(matches!(err.kind(), TraxErrorKind::IllegalPlacement(_)));
    assert_eq!(game.board().len(), 1);
}

#[test]
fn test_replay_from_moves() {
    let moves = [
        Move::opening(Piece::Straight),
        Move::new(Cell::new(0, 1), Piece::Slash),
        Move::new(Cell::new(1, 0), Piece::Backslash),
    ];
    let result = GameInProgress::replay(GameConfig::standard(), &moves).expect("Valid replay");
    assert_eq!(result.board().len(), 4);
    assert_eq!(result.history().len(), 3);
}
