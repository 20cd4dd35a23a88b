//! PGN reading (via `pgn-reader`) and writing.

use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use shakmaty::san::San;
use shakmaty::{Color, Position};
use tracing::debug;

use crate::error::PgnError;
use crate::game::Game;
use crate::outcome::Adjudicated;
use crate::tags::Tags;

const MAX_LINE: usize = 80;

/// Tags and mainline moves of one game, not yet replayed.
#[derive(Debug, Clone, Default)]
pub struct ParsedGame {
    pub tags: Tags,
    pub sans: Vec<San>,
}

/// Visitor that keeps every tag and the mainline SAN.
struct Collector;

impl Visitor for Collector {
    type Tags = Tags;
    type Movetext = ParsedGame;
    type Output = Result<ParsedGame, PgnError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Tags> {
        ControlFlow::Continue(Tags::new())
    }

    fn tag(&mut self, tags: &mut Tags, name: &[u8], value: RawTag<'_>) -> ControlFlow<Self::Output> {
        let name = String::from_utf8_lossy(name).into_owned();
        match std::str::from_utf8(value.as_bytes()) {
            Ok(raw) => {
                tags.set(&name, unescape(raw));
                ControlFlow::Continue(())
            }
            Err(_) => ControlFlow::Break(Err(PgnError::TagEncoding(name))),
        }
    }

    fn begin_movetext(&mut self, tags: Tags) -> ControlFlow<Self::Output, ParsedGame> {
        ControlFlow::Continue(ParsedGame {
            tags,
            sans: Vec::new(),
        })
    }

    fn san(&mut self, game: &mut ParsedGame, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        game.sans.push(san_plus.san);
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _game: &mut ParsedGame) -> ControlFlow<Self::Output, Skip> {
        // Mainline only
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, game: ParsedGame) -> Self::Output {
        Ok(game)
    }
}

/// Parse exactly one game from PGN bytes.
pub fn parse(bytes: &[u8]) -> Result<ParsedGame, PgnError> {
    let text = std::str::from_utf8(bytes).map_err(|_| PgnError::Encoding)?;
    check_movetext(text)?;

    let mut reader = Reader::new(bytes);
    let mut collector = Collector;

    let game = match reader.read_game(&mut collector) {
        Ok(Some(result)) => result?,
        Ok(None) => return Err(PgnError::Empty),
        Err(e) => return Err(PgnError::Reader(e.to_string())),
    };

    match reader.read_game(&mut collector) {
        Ok(None) => {}
        Ok(Some(_)) => return Err(PgnError::MultipleGames),
        Err(e) => return Err(PgnError::Reader(e.to_string())),
    }

    debug!(tags = game.tags.len(), plies = game.sans.len(), "Parsed PGN");
    Ok(game)
}

/// Render a game as PGN: tag section, blank line, movetext ending in the
/// result token. No trailing newline.
pub fn write(game: &Game) -> String {
    let mut out = String::new();
    for pair in game.tags().iter() {
        out.push_str(&format!("[{} \"{}\"]\n", pair.key, escape(&pair.value)));
    }
    if !out.is_empty() {
        out.push('\n');
    }

    let mut tokens = Vec::new();
    let start = game.initial_position();
    let mut number = start.fullmoves().get();
    let mut turn = start.turn();
    for (ply, san) in game.san_history().into_iter().enumerate() {
        match turn {
            Color::White => tokens.push(format!("{number}.")),
            Color::Black if ply == 0 => tokens.push(format!("{number}...")),
            Color::Black => {}
        }
        tokens.push(san.to_string());
        if turn == Color::Black {
            number += 1;
        }
        turn = !turn;
    }
    tokens.push(game.outcome().result_token().to_string());

    out.push_str(&wrap(&tokens));
    out
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Inverse of [`escape`]. A backslash not followed by `\\` or `"` is kept.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(next @ ('\\' | '"')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Reject movetext tokens that `pgn-reader` would skip without telling the
/// visitor. Tag lines, comments and `%` escape lines are ignored.
fn check_movetext(text: &str) -> Result<(), PgnError> {
    let mut in_comment = false;
    for line in text.lines() {
        let trimmed = line.trim_start();
        if !in_comment && (trimmed.starts_with('[') || trimmed.starts_with('%')) {
            continue;
        }

        let mut code = String::new();
        for ch in line.chars() {
            match ch {
                '}' if in_comment => in_comment = false,
                _ if in_comment => {}
                '{' => in_comment = true,
                ';' => break,
                '(' | ')' | '.' => code.push(' '),
                _ => code.push(ch),
            }
        }

        if let Some(token) = code.split_whitespace().find(|t| !is_movetext_token(t)) {
            return Err(PgnError::UnreadableToken(token.to_string()));
        }
    }
    Ok(())
}

fn is_movetext_token(token: &str) -> bool {
    if matches!(token, "*" | "1-0" | "0-1" | "1/2-1/2" | "\u{bd}-\u{bd}" | "0-0" | "0-0-0") {
        return true;
    }
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }
    if let Some(nag) = token.strip_prefix('$') {
        return !nag.is_empty() && nag.bytes().all(|b| b.is_ascii_digit());
    }
    let san = token.trim_end_matches(['!', '?']);
    san.is_empty() || san.parse::<SanPlus>().is_ok()
}

fn wrap(tokens: &[String]) -> String {
    let mut text = String::new();
    let mut line_len = 0;
    for token in tokens {
        if line_len > 0 && line_len + 1 + token.len() > MAX_LINE {
            text.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            text.push(' ');
            line_len += 1;
        }
        text.push_str(token);
        line_len += token.len();
    }
    text
}
