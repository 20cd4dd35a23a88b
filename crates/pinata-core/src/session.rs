//! Saving and resuming sessions.
//!
//! A session file is ordinary PGN with three conventions:
//! `Annotator` is [`ANNOTATOR`], the human's color tag holds [`HUMAN`], and
//! the other color tag names the engine. [`encode_session`] and
//! [`decode_session`] are the only places that know the convention.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveDate};
use shakmaty::Color;
use tracing::{info, warn};

use crate::error::{ProvenanceError, SessionError};
use crate::game::Game;
use crate::outcome::Adjudicated;
use crate::pgn;
use crate::tags::Tags;
use crate::{ANNOTATOR, HUMAN};

/// Which side the human plays and which engine is on the other side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub human_is_black: bool,
    pub engine: String,
}

impl SessionConfig {
    pub fn new(human: Color, engine: impl Into<String>) -> Self {
        Self {
            human_is_black: human == Color::Black,
            engine: engine.into(),
        }
    }

    pub fn human_color(&self) -> Color {
        if self.human_is_black {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn engine_color(&self) -> Color {
        !self.human_color()
    }

    pub fn is_human_turn(&self, game: &Game) -> bool {
        game.turn() == self.human_color()
    }

    /// "You are playing White against stockfish."
    pub fn resume_notice(&self) -> String {
        format!(
            "You are playing {} against {}.",
            color_name(self.human_color()),
            self.engine
        )
    }
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// A live game together with its session settings.
#[derive(Debug, Clone)]
pub struct Session {
    pub game: Game,
    pub config: SessionConfig,
}

impl Session {
    pub fn new(game: Game, config: SessionConfig) -> Self {
        Self { game, config }
    }

    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        save_session(&mut self.game, &self.config, path)
    }
}

/// Write the player tags for `config`.
pub fn encode_session(tags: &mut Tags, config: &SessionConfig) {
    let (white, black) = match config.human_color() {
        Color::White => (HUMAN, config.engine.as_str()),
        Color::Black => (config.engine.as_str(), HUMAN),
    };
    tags.set("White", white);
    tags.set("Black", black);
}

/// Read the player tags back. Exactly one side must be [`HUMAN`].
pub fn decode_session(tags: &Tags) -> Result<SessionConfig, ProvenanceError> {
    let white = tags.get("White");
    let black = tags.get("Black");
    if white.is_empty() || black.is_empty() {
        return Err(ProvenanceError::MissingPlayers);
    }
    match (white == HUMAN, black == HUMAN) {
        (true, true) => Err(ProvenanceError::BothHuman),
        (false, false) => Err(ProvenanceError::NoHuman),
        (false, true) => Ok(SessionConfig::new(Color::Black, white)),
        (true, false) => Ok(SessionConfig::new(Color::White, black)),
    }
}

/// Reject files this tool did not write.
pub fn verify_provenance(tags: &Tags) -> Result<(), ProvenanceError> {
    let annotator = tags.get("Annotator");
    if annotator != ANNOTATOR {
        return Err(ProvenanceError::ForeignAnnotator(annotator.to_string()));
    }
    if tags.get("White").is_empty() || tags.get("Black").is_empty() {
        return Err(ProvenanceError::MissingPlayers);
    }
    Ok(())
}

/// Stamp every session tag onto `game` for the given save date.
pub fn annotate(game: &mut Game, config: &SessionConfig, date: NaiveDate) {
    let result = game.outcome().result_token();
    let tags = game.tags_mut();
    tags.set("Annotator", ANNOTATOR);
    tags.set("Date", date.format("%Y-%m-%d").to_string());
    tags.set("Result", result);
    encode_session(tags, config);
}

/// Load a session written by [`save_session`].
///
/// Nothing is printed. Callers show [`SessionConfig::resume_notice`] to the
/// user once the session is back.
pub fn load_session(path: impl AsRef<Path>) -> Result<Session, SessionError> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|source| SessionError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = pgn::parse(&bytes).map_err(|source| SessionError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let game = Game::from_pgn(parsed).map_err(|source| SessionError::Init {
        path: path.to_path_buf(),
        source,
    })?;

    let config = verify_provenance(game.tags())
        .and_then(|()| decode_session(game.tags()))
        .map_err(|source| {
            warn!(path = %path.display(), reason = %source, "Rejected session file");
            SessionError::Provenance {
                path: path.to_path_buf(),
                source,
            }
        })?;

    info!(
        path = %path.display(),
        engine = %config.engine,
        human_is_black = config.human_is_black,
        plies = game.moves().len(),
        "Session loaded"
    );
    Ok(Session::new(game, config))
}

/// Annotate `game` and write it to `path`, replacing any existing file.
pub fn save_session(
    game: &mut Game,
    config: &SessionConfig,
    path: impl AsRef<Path>,
) -> Result<(), SessionError> {
    let path = path.as_ref();

    let mut file = File::create(path).map_err(|source| SessionError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    annotate(game, config, Local::now().date_naive());
    let text = pgn::write(game);

    file.write_all(format!("{text}\n").as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| SessionError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = %path.display(), plies = game.moves().len(), "Session saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_with(white: &str, black: &str) -> Tags {
        let mut tags = Tags::new();
        tags.set("Annotator", ANNOTATOR);
        tags.set("White", white);
        tags.set("Black", black);
        tags
    }

    #[test]
    fn test_decode_human_black() {
        let config = decode_session(&tags_with("stockfish", "Human")).unwrap();
        assert!(config.human_is_black);
        assert_eq!(config.engine, "stockfish");
    }

    #[test]
    fn test_decode_human_white() {
        let config = decode_session(&tags_with("Human", "/usr/bin/crafty")).unwrap();
        assert!(!config.human_is_black);
        assert_eq!(config.engine, "/usr/bin/crafty");
    }

    #[test]
    fn test_decode_rejects_ambiguous_sides() {
        assert_eq!(
            decode_session(&tags_with("Human", "Human")),
            Err(ProvenanceError::BothHuman)
        );
        assert_eq!(
            decode_session(&tags_with("stockfish", "crafty")),
            Err(ProvenanceError::NoHuman)
        );
        assert_eq!(
            decode_session(&tags_with("Human", "")),
            Err(ProvenanceError::MissingPlayers)
        );
    }

    #[test]
    fn test_encode_decode_inverse() {
        for config in [
            SessionConfig::new(Color::White, "enginebin"),
            SessionConfig::new(Color::Black, "enginebin"),
        ] {
            let mut tags = Tags::new();
            encode_session(&mut tags, &config);
            assert_eq!(decode_session(&tags).unwrap(), config);
        }
    }

    #[test]
    fn test_provenance() {
        assert!(verify_provenance(&tags_with("Human", "sf")).is_ok());

        let mut foreign = tags_with("Human", "sf");
        foreign.set("Annotator", "Pinata");
        assert_eq!(
            verify_provenance(&foreign),
            Err(ProvenanceError::ForeignAnnotator("Pinata".to_string()))
        );

        assert_eq!(
            verify_provenance(&Tags::new()),
            Err(ProvenanceError::ForeignAnnotator(String::new()))
        );
    }

    #[test]
    fn test_annotate() {
        let mut game = Game::new();
        game.play_san("d4").unwrap();
        let config = SessionConfig::new(Color::Black, "enginebin");
        annotate(&mut game, &config, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());

        let tags = game.tags();
        assert_eq!(tags.get("Annotator"), "pinata");
        assert_eq!(tags.get("Date"), "2024-03-07");
        assert_eq!(tags.get("Result"), "*");
        assert_eq!(tags.get("White"), "enginebin");
        assert_eq!(tags.get("Black"), "Human");
    }

    #[test]
    fn test_resume_notice() {
        let config = SessionConfig::new(Color::Black, "enginebin");
        assert_eq!(config.resume_notice(), "You are playing Black against enginebin.");
        assert_eq!(config.engine_color(), Color::White);
    }
}
