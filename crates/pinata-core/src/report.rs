//! Game-over announcement.

use std::fmt;

use crate::error::SessionError;
use crate::outcome::{Adjudicated, Method, Outcome};

/// A concluded game's result and reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    outcome: Outcome,
    method: Method,
}

impl Verdict {
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn method(&self) -> Method {
        self.method
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headline = match self.outcome {
            Outcome::Draw => "Game Draw",
            Outcome::WhiteWon => "White Won",
            Outcome::BlackWon => "Black Won",
            Outcome::Undecided => unreachable!("verdict is only built for decided games"),
        };
        write!(f, "{headline} ({})", self.method)
    }
}

/// The verdict, or `None` while play continues.
///
/// Fails with [`SessionError::Invariant`] when the outcome and method
/// contradict each other.
pub fn verdict<A: Adjudicated + ?Sized>(game: &A) -> Result<Option<Verdict>, SessionError> {
    match (game.outcome(), game.method()) {
        (Outcome::Undecided, None) => Ok(None),
        (Outcome::Undecided, Some(method)) => Err(SessionError::Invariant(format!(
            "undecided game carries method {method}"
        ))),
        (outcome, None) => Err(SessionError::Invariant(format!(
            "outcome {outcome} has no method"
        ))),
        (Outcome::Draw, Some(method)) if method.is_decisive() => Err(SessionError::Invariant(
            format!("draw by {method}"),
        )),
        (outcome @ (Outcome::WhiteWon | Outcome::BlackWon), Some(method))
            if !method.is_decisive() =>
        {
            Err(SessionError::Invariant(format!("{outcome} by {method}")))
        }
        (outcome, Some(method)) => Ok(Some(Verdict { outcome, method })),
    }
}

/// Print the verdict if the game is over. Returns whether it is.
pub fn report_if_over<A: Adjudicated + ?Sized>(game: &A) -> Result<bool, SessionError> {
    match verdict(game)? {
        Some(v) => {
            println!("{v}");
            Ok(true)
        }
        None => Ok(false),
    }
}
