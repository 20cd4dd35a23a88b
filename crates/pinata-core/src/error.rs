//! Error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::outcome::Method;

/// Failure to load, save or adjudicate a session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unable to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to create {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to save the game to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid PGN file", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PgnError,
    },

    #[error("Unable to initialize a new game from {}", path.display())]
    Init {
        path: PathBuf,
        #[source]
        source: GameError,
    },

    #[error("{} is not generated by Pinata", path.display())]
    Provenance {
        path: PathBuf,
        #[source]
        source: ProvenanceError,
    },

    /// The chess backend reported a state it promises never to produce.
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl SessionError {
    /// True for the read/create/write family.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            SessionError::Read { .. } | SessionError::Create { .. } | SessionError::Write { .. }
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    #[error("no game found")]
    Empty,

    #[error("file is not UTF-8 text")]
    Encoding,

    #[error("tag {0} is not UTF-8")]
    TagEncoding(String),

    #[error("expected a single game, found more")]
    MultipleGames,

    #[error("unreadable movetext token {0:?}")]
    UnreadableToken(String),

    #[error("{0}")]
    Reader(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvenanceError {
    #[error("annotator is {0:?}")]
    ForeignAnnotator(String),

    #[error("White and Black must both be set")]
    MissingPlayers,

    #[error("both sides are marked Human")]
    BothHuman,

    #[error("neither side is marked Human")]
    NoHuman,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid move notation: {0}")]
    InvalidSan(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("The game is already over")]
    GameOver,

    #[error("{0} cannot be claimed in this position")]
    DrawNotClaimable(Method),

    #[error("Invalid FEN {0:?}")]
    InvalidFen(String),
}
