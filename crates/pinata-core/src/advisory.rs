//! Legal moves in SAN, for display and input completion.

use shakmaty::san::SanPlus;
use shakmaty::Position;

use crate::game::Game;

/// SAN of every legal move in the current position, in move-generation
/// order. Empty exactly when the side to move is mated or stalemated.
pub fn legal_moves(game: &Game) -> Vec<String> {
    let position = game.position();
    position
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let mut after = position.clone();
            SanPlus::from_move_and_play_unchecked(&mut after, mv).to_string()
        })
        .collect()
}

/// [`legal_moves`] joined by spaces.
pub fn legal_moves_line(game: &Game) -> String {
    legal_moves(game).join(" ")
}

/// Legal moves starting with `prefix`.
pub fn complete(game: &Game, prefix: &str) -> Vec<String> {
    legal_moves(game)
        .into_iter()
        .filter(|san| san.starts_with(prefix))
        .collect()
}
