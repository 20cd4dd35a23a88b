//! Live game record on top of `shakmaty`.
//!
//! Tracks the move history from a starting position, the tags that travel
//! with it in PGN, and the outcome. Outcomes the rules force (checkmate,
//! stalemate, insufficient material, fivefold repetition, the 75-move rule)
//! are applied after every move; threefold repetition and the 50-move rule
//! only end the game when claimed.

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position};
use tracing::debug;

use crate::error::GameError;
use crate::outcome::{Adjudicated, Method, Outcome};
use crate::pgn::ParsedGame;
use crate::tags::Tags;

const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;
const FIFTY_MOVE_PLIES: u32 = 100;

#[derive(Debug, Clone)]
pub struct Game {
    tags: Tags,
    initial: Chess,
    position: Chess,
    moves: Vec<Move>,
    /// Hash of every position reached, starting with `initial`.
    history: Vec<Zobrist64>,
    outcome: Outcome,
    method: Option<Method>,
}

impl Default for Game {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_position(position: Chess) -> Self {
        let mut game = Self {
            tags: Tags::new(),
            initial: position.clone(),
            history: vec![hash(&position)],
            position,
            moves: Vec::new(),
            outcome: Outcome::Undecided,
            method: None,
        };
        game.adjudicate();
        game
    }

    /// Start from a FEN position. Records the `SetUp`/`FEN` tags so the
    /// starting point survives a save.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let position = parse_fen(fen)?;
        let mut game = Self::from_position(position);
        game.tags.set("SetUp", "1");
        game.tags.set("FEN", fen.trim());
        Ok(game)
    }

    /// Replay a parsed PGN game.
    ///
    /// Starts from the `FEN` tag when present. A `Result` tag that the board
    /// doesn't explain (resignation, agreed or claimed draw) is restored.
    pub fn from_pgn(parsed: ParsedGame) -> Result<Self, GameError> {
        let ParsedGame { tags, sans } = parsed;

        let fen = tags.get("FEN");
        let position = if fen.is_empty() {
            Chess::default()
        } else {
            parse_fen(fen)?
        };

        let mut game = Self::from_position(position);
        game.tags = tags;

        for (ply, san) in sans.iter().enumerate() {
            if game.outcome.is_decided() {
                return Err(GameError::IllegalMove(format!(
                    "{san} at ply {} comes after the game ended",
                    ply + 1
                )));
            }
            let mv = san
                .to_move(&game.position)
                .map_err(|_| GameError::IllegalMove(format!("{san} at ply {}", ply + 1)))?;
            game.push(mv);
        }
        debug!(plies = game.moves.len(), "Replayed game");

        if !game.outcome.is_decided() {
            game.restore_result_tag();
        }
        Ok(game)
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn initial_position(&self) -> &Chess {
        &self.initial
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// Move history in SAN, with check and mate suffixes.
    pub fn san_history(&self) -> Vec<SanPlus> {
        let mut pos = self.initial.clone();
        self.moves
            .iter()
            .map(|&mv| SanPlus::from_move_and_play_unchecked(&mut pos, mv))
            .collect()
    }

    /// Play a move given in SAN. Returns the move as written with its
    /// check/mate suffix.
    pub fn play_san(&mut self, text: &str) -> Result<SanPlus, GameError> {
        if self.outcome.is_decided() {
            return Err(GameError::GameOver);
        }
        let text = text.trim();
        let san: San = text
            .parse()
            .map_err(|_| GameError::InvalidSan(text.to_string()))?;
        let mv = san
            .to_move(&self.position)
            .map_err(|_| GameError::IllegalMove(text.to_string()))?;
        Ok(self.push(mv))
    }

    pub fn resign(&mut self, loser: Color) -> Result<(), GameError> {
        if self.outcome.is_decided() {
            return Err(GameError::GameOver);
        }
        self.conclude(Outcome::won_by(!loser), Method::Resignation);
        Ok(())
    }

    /// Draws the side to move may claim right now. An offer is always open.
    pub fn eligible_draws(&self) -> Vec<Method> {
        let mut draws = vec![Method::DrawOffer];
        if self.repetitions() >= 3 {
            draws.push(Method::ThreefoldRepetition);
        }
        if self.position.halfmoves() >= FIFTY_MOVE_PLIES {
            draws.push(Method::FiftyMoveRule);
        }
        draws
    }

    pub fn claim_draw(&mut self, method: Method) -> Result<(), GameError> {
        if self.outcome.is_decided() {
            return Err(GameError::GameOver);
        }
        if !self.eligible_draws().contains(&method) {
            return Err(GameError::DrawNotClaimable(method));
        }
        self.conclude(Outcome::Draw, method);
        Ok(())
    }

    /// Apply a legal move. Callers obtain `mv` from the current position.
    fn push(&mut self, mv: Move) -> SanPlus {
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, mv);
        self.moves.push(mv);
        self.history.push(hash(&self.position));
        self.adjudicate();
        san
    }

    /// Times the current position has occurred, counting itself.
    fn repetitions(&self) -> usize {
        let current = hash(&self.position);
        self.history.iter().filter(|h| **h == current).count()
    }

    fn adjudicate(&mut self) {
        let pos = &self.position;
        let (outcome, method) = if pos.is_checkmate() {
            (Outcome::won_by(!pos.turn()), Method::Checkmate)
        } else if pos.is_stalemate() {
            (Outcome::Draw, Method::Stalemate)
        } else if pos.is_insufficient_material() {
            (Outcome::Draw, Method::InsufficientMaterial)
        } else if self.repetitions() >= 5 {
            (Outcome::Draw, Method::FivefoldRepetition)
        } else if pos.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES {
            (Outcome::Draw, Method::SeventyFiveMoveRule)
        } else {
            return;
        };
        self.conclude(outcome, method);
    }

    fn restore_result_tag(&mut self) {
        let outcome = Outcome::from_result_token(self.tags.get("Result"));
        let method = match outcome {
            Outcome::Undecided => return,
            Outcome::Draw => {
                let eligible = self.eligible_draws();
                [Method::ThreefoldRepetition, Method::FiftyMoveRule]
                    .into_iter()
                    .find(|m| eligible.contains(m))
                    .unwrap_or(Method::DrawOffer)
            }
            Outcome::WhiteWon | Outcome::BlackWon => Method::Resignation,
        };
        self.conclude(outcome, method);
    }

    fn conclude(&mut self, outcome: Outcome, method: Method) {
        debug!(%outcome, %method, "Game over");
        self.outcome = outcome;
        self.method = Some(method);
    }
}

impl Adjudicated for Game {
    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn method(&self) -> Option<Method> {
        self.method
    }
}

fn hash(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

fn parse_fen(text: &str) -> Result<Chess, GameError> {
    let fen: Fen = text
        .trim()
        .parse()
        .map_err(|_| GameError::InvalidFen(text.to_string()))?;
    fen.into_position(CastlingMode::Standard)
        .map_err(|_| GameError::InvalidFen(text.to_string()))
}
