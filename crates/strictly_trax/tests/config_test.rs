//! Tests for loading rule configuration from disk.

use std::io::Write;
use strictly_trax::{GameConfig, GameSetup, Move, Piece};
use tempfile::NamedTempFile;

#[test]
fn test_load_bounded_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "max_extent = 8").unwrap();
    writeln!(file, "loop_variant = true").unwrap();

    let config = GameConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.max_extent(), Some(8));
    assert!(*config.loop_variant());
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_loaded_config_drives_the_game() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "max_extent = 1").unwrap();
    let config = GameConfig::from_file(file.path()).unwrap();

    let result = GameSetup::new(config)
        .start()
        .play(Move::opening(Piece::Slash))
        .unwrap();
    assert!(result.into_finished().is_some());
}
