/// Save/load round trips and the session file conventions.
mod common;

use std::fs;

use pinata_core::{
    load_session, save_session, Adjudicated, Game, Method, Outcome, ProvenanceError,
    SessionConfig, SessionError,
};
use shakmaty::{Color, Position};

fn play(game: &mut Game, sans: &[&str]) {
    for san in sans {
        game.play_san(san).unwrap();
    }
}

#[test]
fn test_fresh_game_scenario() {
    let path = common::temp_pgn("fresh");
    let mut game = Game::new();
    let config = SessionConfig::new(Color::White, "enginebin");

    save_session(&mut game, &config, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[White \"Human\"]"));
    assert!(text.contains("[Black \"enginebin\"]"));
    assert!(text.contains("[Annotator \"pinata\"]"));
    assert!(text.contains("[Result \"*\"]"));
    assert!(text.ends_with("*\n"));

    let session = load_session(&path).unwrap();
    assert!(!session.config.human_is_black);
    assert_eq!(session.config.engine, "enginebin");
    assert_eq!(
        session.config.resume_notice(),
        "You are playing White against enginebin."
    );
    assert!(session.game.moves().is_empty());

    fs::remove_file(&path).ok();
}

#[test]
fn test_round_trip_preserves_history_and_tags() {
    let path = common::temp_pgn("roundtrip");
    let mut game = Game::new();
    game.tags_mut().set("Event", "Lunch break");
    play(&mut game, &["e4", "c5", "Nf3", "d6", "d4", "cxd4", "Nxd4", "Nf6", "Nc3", "a6"]);
    let config = SessionConfig::new(Color::Black, "/opt/engines/crafty");

    save_session(&mut game, &config, &path).unwrap();
    let session = load_session(&path).unwrap();

    assert_eq!(session.config, config);
    assert_eq!(session.game.moves(), game.moves());
    assert_eq!(session.game.position().board(), game.position().board());
    assert_eq!(session.game.tags(), game.tags());
    assert_eq!(session.game.outcome(), Outcome::Undecided);

    fs::remove_file(&path).ok();
}

#[test]
fn test_round_trip_after_resume_and_resave() {
    let path = common::temp_pgn("resave");
    let mut game = Game::new();
    play(&mut game, &["d4", "d5"]);
    let config = SessionConfig::new(Color::White, "stockfish");
    save_session(&mut game, &config, &path).unwrap();

    let mut session = load_session(&path).unwrap();
    play(&mut session.game, &["c4", "e6"]);
    session.save(&path).unwrap();

    let resumed = load_session(&path).unwrap();
    assert_eq!(resumed.game.moves().len(), 4);
    assert_eq!(resumed.config, config);

    fs::remove_file(&path).ok();
}

#[test]
fn test_checkmate_round_trip() {
    let path = common::temp_pgn("mate");
    let mut game = Game::new();
    play(&mut game, &["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7"]);
    let config = SessionConfig::new(Color::White, "stockfish");
    save_session(&mut game, &config, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[Result \"1-0\"]"));
    assert!(text.contains("4. Qxf7# 1-0"));

    let session = load_session(&path).unwrap();
    assert_eq!(session.game.outcome(), Outcome::WhiteWon);
    assert_eq!(session.game.method(), Some(Method::Checkmate));

    fs::remove_file(&path).ok();
}

#[test]
fn test_resignation_survives_reload() {
    let path = common::temp_pgn("resign");
    let mut game = Game::new();
    play(&mut game, &["e4"]);
    game.resign(Color::Black).unwrap();
    let config = SessionConfig::new(Color::Black, "stockfish");
    save_session(&mut game, &config, &path).unwrap();

    let session = load_session(&path).unwrap();
    assert_eq!(session.game.outcome(), Outcome::WhiteWon);
    assert_eq!(session.game.method(), Some(Method::Resignation));

    fs::remove_file(&path).ok();
}

#[test]
fn test_fen_start_round_trip() {
    let path = common::temp_pgn("fen");
    let fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
    let mut game = Game::from_fen(fen).unwrap();
    play(&mut game, &["e4", "Kd7"]);
    let config = SessionConfig::new(Color::White, "stockfish");
    save_session(&mut game, &config, &path).unwrap();

    let session = load_session(&path).unwrap();
    assert_eq!(session.game.tags().get("FEN"), fen);
    assert_eq!(session.game.moves(), game.moves());

    fs::remove_file(&path).ok();
}

#[test]
fn test_engine_names_with_escapes_round_trip() {
    let engines = [
        r"\\server\engines\sf.exe",
        r"a\\b",
        r"C:\engines\",
        r#"the \"fast\" one"#,
        r#"quote"at end""#,
        r"\\\\",
    ];
    for engine in engines {
        for human in [Color::White, Color::Black] {
            let path = common::temp_pgn("escapes");
            let mut game = Game::new();
            play(&mut game, &["d4", "d5"]);
            let config = SessionConfig::new(human, engine);

            save_session(&mut game, &config, &path).unwrap();
            let session = load_session(&path).unwrap();

            assert_eq!(session.config, config);
            assert_eq!(session.game.tags(), game.tags());
            assert_eq!(session.game.moves(), game.moves());
            fs::remove_file(&path).ok();
        }
    }
}

#[test]
fn test_unreadable_movetext_is_a_parse_error() {
    for contents in [
        "[Annotator \"pinata\"]\n[White \"Human\"]\n[Black \"stockfish\"]\n\n1. e4 zz9 e5 *\n",
        "hello world\n",
    ] {
        let path = common::write_temp("garbled", contents);
        assert!(matches!(load_session(&path), Err(SessionError::Parse { .. })));
        fs::remove_file(&path).ok();
    }
}

#[test]
fn test_foreign_file_is_rejected() {
    let path = common::write_temp(
        "foreign",
        "[Event \"Club\"]\n[White \"Alice\"]\n[Black \"Human\"]\n\n1. e4 e5 *\n",
    );

    let err = load_session(&path).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Provenance {
            source: ProvenanceError::ForeignAnnotator(_),
            ..
        }
    ));

    fs::remove_file(&path).ok();
}

#[test]
fn test_wrong_annotator_is_rejected() {
    let path = common::write_temp(
        "annotator",
        "[Annotator \"someone-else\"]\n[White \"Human\"]\n[Black \"stockfish\"]\n\n*\n",
    );
    assert!(matches!(
        load_session(&path),
        Err(SessionError::Provenance { .. })
    ));
    fs::remove_file(&path).ok();
}

#[test]
fn test_ambiguous_sides_are_rejected() {
    for (white, black, expected) in [
        ("Human", "Human", ProvenanceError::BothHuman),
        ("stockfish", "crafty", ProvenanceError::NoHuman),
    ] {
        let path = common::write_temp(
            "sides",
            &format!("[Annotator \"pinata\"]\n[White \"{white}\"]\n[Black \"{black}\"]\n\n*\n"),
        );
        match load_session(&path) {
            Err(SessionError::Provenance { source, .. }) => assert_eq!(source, expected),
            other => panic!("expected provenance error, got {other:?}"),
        }
        fs::remove_file(&path).ok();
    }
}

#[test]
fn test_missing_player_tag_is_rejected() {
    let path = common::write_temp(
        "players",
        "[Annotator \"pinata\"]\n[White \"Human\"]\n\n1. e4 *\n",
    );
    match load_session(&path) {
        Err(SessionError::Provenance { source, .. }) => {
            assert_eq!(source, ProvenanceError::MissingPlayers)
        }
        other => panic!("expected provenance error, got {other:?}"),
    }
    fs::remove_file(&path).ok();
}

#[test]
fn test_missing_file() {
    let err = load_session(common::temp_pgn("absent")).unwrap_err();
    assert!(matches!(err, SessionError::Read { .. }));
    assert!(err.is_io());

    assert!(matches!(load_session(""), Err(SessionError::Read { .. })));
}

#[test]
fn test_empty_file_is_a_parse_error() {
    let path = common::write_temp("empty", "");
    assert!(matches!(load_session(&path), Err(SessionError::Parse { .. })));
    fs::remove_file(&path).ok();
}

#[test]
fn test_illegal_history_is_an_init_error() {
    let path = common::write_temp(
        "illegal",
        "[Annotator \"pinata\"]\n[White \"Human\"]\n[Black \"stockfish\"]\n\n1. e4 e5 2. Ke3 *\n",
    );
    assert!(matches!(load_session(&path), Err(SessionError::Init { .. })));
    fs::remove_file(&path).ok();
}

#[test]
fn test_save_into_missing_directory() {
    let dir = std::env::temp_dir().join(format!("pinata-no-such-dir-{}", common::unique_suffix()));
    let path = dir.join("game.pgn");
    let mut game = Game::new();
    let config = SessionConfig::new(Color::White, "stockfish");

    let err = save_session(&mut game, &config, &path).unwrap_err();
    assert!(matches!(err, SessionError::Create { .. }));
    assert!(!path.exists());
}

#[test]
fn test_save_truncates_existing_file() {
    let path = common::write_temp("truncate", &"x".repeat(4096));
    let mut game = Game::new();
    let config = SessionConfig::new(Color::White, "stockfish");
    save_session(&mut game, &config, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains('x'));
    assert!(load_session(&path).is_ok());
    fs::remove_file(&path).ok();
}

#[test]
fn test_save_stamps_today() {
    let path = common::temp_pgn("date");
    let mut game = Game::new();
    let config = SessionConfig::new(Color::White, "stockfish");
    save_session(&mut game, &config, &path).unwrap();

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let session = load_session(&path).unwrap();
    assert_eq!(session.game.tags().get("Date"), today);
    fs::remove_file(&path).ok();
}
