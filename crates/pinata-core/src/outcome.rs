//! Game outcome and the reason it was reached.

use std::fmt;

use shakmaty::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Undecided,
    Draw,
    WhiteWon,
    BlackWon,
}

impl Outcome {
    pub fn won_by(winner: Color) -> Self {
        match winner {
            Color::White => Outcome::WhiteWon,
            Color::Black => Outcome::BlackWon,
        }
    }

    pub fn is_decided(self) -> bool {
        self != Outcome::Undecided
    }

    /// PGN result token: `*`, `1-0`, `0-1` or `1/2-1/2`.
    pub fn result_token(self) -> &'static str {
        match self {
            Outcome::Undecided => "*",
            Outcome::WhiteWon => "1-0",
            Outcome::BlackWon => "0-1",
            Outcome::Draw => "1/2-1/2",
        }
    }

    /// Inverse of [`Outcome::result_token`]. Unknown tokens read as undecided.
    pub fn from_result_token(token: &str) -> Self {
        match token.trim() {
            "1-0" => Outcome::WhiteWon,
            "0-1" => Outcome::BlackWon,
            "1/2-1/2" => Outcome::Draw,
            _ => Outcome::Undecided,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.result_token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Checkmate,
    Resignation,
    DrawOffer,
    Stalemate,
    ThreefoldRepetition,
    FivefoldRepetition,
    FiftyMoveRule,
    SeventyFiveMoveRule,
    InsufficientMaterial,
}

impl Method {
    /// Methods that end the game with a winner.
    pub fn is_decisive(self) -> bool {
        matches!(self, Method::Checkmate | Method::Resignation)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Checkmate => "Checkmate",
            Method::Resignation => "Resignation",
            Method::DrawOffer => "Draw offer",
            Method::Stalemate => "Stalemate",
            Method::ThreefoldRepetition => "Threefold repetition",
            Method::FivefoldRepetition => "Fivefold repetition",
            Method::FiftyMoveRule => "50-move rule",
            Method::SeventyFiveMoveRule => "75-move rule",
            Method::InsufficientMaterial => "Insufficient material",
        };
        f.write_str(s)
    }
}

/// Anything that can report a terminal-state signal.
pub trait Adjudicated {
    fn outcome(&self) -> Outcome;

    /// `None` while the game is undecided.
    fn method(&self) -> Option<Method>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_tokens() {
        for outcome in [
            Outcome::Undecided,
            Outcome::Draw,
            Outcome::WhiteWon,
            Outcome::BlackWon,
        ] {
            assert_eq!(Outcome::from_result_token(outcome.result_token()), outcome);
        }
        assert_eq!(Outcome::from_result_token("2-0"), Outcome::Undecided);
    }

    #[test]
    fn test_won_by() {
        assert_eq!(Outcome::won_by(Color::Black), Outcome::BlackWon);
        assert!(!Outcome::Undecided.is_decided());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::FiftyMoveRule.to_string(), "50-move rule");
        assert!(Method::Resignation.is_decisive());
        assert!(!Method::Stalemate.is_decisive());
    }
}
