//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pinata_core::Method;

/// Pinata - play chess against an engine, one saved session at a time
#[derive(Parser, Debug)]
#[command(name = "pinata")]
#[command(about = "Resumable human-vs-engine chess sessions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Session file (defaults to PINATA_SAVE_FILE, then pinata.pgn)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Don't draw the board
    #[arg(long, global = true)]
    pub blind: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a new session and save it
    New {
        /// Play Black instead of White
        #[arg(long)]
        black: bool,

        /// Engine identifier (defaults to PINATA_ENGINE, then stockfish)
        #[arg(short, long)]
        engine: Option<String>,

        /// Start from this position instead of the initial one
        #[arg(long)]
        fen: Option<String>,

        /// Replace an existing session file
        #[arg(long)]
        force: bool,
    },

    /// Show the board, whose turn it is and the legal moves
    Status,

    /// Print the legal moves, one per line
    Moves {
        /// Only moves starting with this text
        prefix: Option<String>,
    },

    /// Play one or more moves in SAN and save
    Move {
        #[arg(required = true)]
        sans: Vec<String>,
    },

    /// Resign on behalf of the human and save
    Resign,

    /// Claim a draw and save
    Draw {
        #[arg(value_enum, default_value = "offer")]
        claim: DrawClaim,
    },

    /// Play interactively, saving on exit
    Play,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawClaim {
    Offer,
    Threefold,
    Fifty,
}

impl From<DrawClaim> for Method {
    fn from(claim: DrawClaim) -> Self {
        match claim {
            DrawClaim::Offer => Method::DrawOffer,
            DrawClaim::Threefold => Method::ThreefoldRepetition,
            DrawClaim::Fifty => Method::FiftyMoveRule,
        }
    }
}
