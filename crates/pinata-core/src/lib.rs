//! Session persistence for a human-vs-engine chess game.
//!
//! A session is a PGN file annotated by this tool: `Annotator` marks the
//! producer, and the `White`/`Black` tags record which side is the human and
//! which engine was playing. Chess rules come from `shakmaty`, PGN tokenizing
//! from `pgn-reader`.

pub mod advisory;
pub mod board;
pub mod error;
pub mod game;
pub mod outcome;
pub mod pgn;
pub mod report;
pub mod session;
pub mod tags;

pub use error::{GameError, PgnError, ProvenanceError, SessionError};
pub use game::Game;
pub use outcome::{Adjudicated, Method, Outcome};
pub use session::{load_session, save_session, Session, SessionConfig};
pub use tags::{TagPair, Tags};

/// `Annotator` value written on save and required on load.
pub const ANNOTATOR: &str = "pinata";

/// Player tag value marking the human side.
pub const HUMAN: &str = "Human";
