use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    /// Engine named in new sessions
    pub engine: String,
    pub save_file: PathBuf,
    /// Draw the board after each move
    pub visual: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            engine: env::var("PINATA_ENGINE").unwrap_or_else(|_| "stockfish".to_string()),
            save_file: env::var("PINATA_SAVE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("pinata.pgn")),
            visual: env::var("PINATA_VISUAL")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
