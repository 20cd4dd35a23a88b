//! Line-oriented interactive play.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use pinata_core::session::color_name;
use pinata_core::{advisory, GameError, Method};

use crate::cli::DrawClaim;
use crate::commands;

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Quit,
    Help,
    Moves,
    Board,
    Save,
    Resign,
    Draw(Method),
    Move(&'a str),
}

fn parse_input(line: &str) -> Result<Input<'_>, String> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(Input::Empty);
    };
    let input = match first {
        "quit" | "exit" => Input::Quit,
        "help" | "?" => Input::Help,
        "moves" => Input::Moves,
        "board" => Input::Board,
        "save" => Input::Save,
        "resign" => Input::Resign,
        "draw" => {
            let claim = match words.next() {
                Some(word) => DrawClaim::from_str(word, true)?,
                None => DrawClaim::Offer,
            };
            Input::Draw(claim.into())
        }
        san => Input::Move(san),
    };
    Ok(input)
}

fn print_help() {
    println!("Enter a move in SAN (e4, Nf3, O-O, e8=Q), or one of:");
    println!("  moves                         list legal moves");
    println!("  board                         redraw the board");
    println!("  draw [offer|threefold|fifty]  claim a draw");
    println!("  resign                        resign the game");
    println!("  save                          save and keep playing");
    println!("  quit                          save and leave");
}

/// Play both sides' moves from stdin until the game ends or the user quits.
/// The session is saved on the way out.
pub fn run(path: &Path, visual: bool) -> Result<()> {
    let mut session = commands::open(path)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut redraw = true;

    loop {
        if redraw {
            if commands::show(&session, visual)? {
                break;
            }
            redraw = false;
        }

        print!("{}> ", color_name(session.game.turn()));
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        match parse_input(&line) {
            Err(e) => println!("{e}"),
            Ok(Input::Empty) => {}
            Ok(Input::Quit) => break,
            Ok(Input::Help) => print_help(),
            Ok(Input::Moves) => println!("{}", advisory::legal_moves_line(&session.game)),
            Ok(Input::Board) => redraw = true,
            Ok(Input::Save) => {
                if let Err(e) = commands::save(&mut session, path) {
                    println!("{e:#}");
                }
            }
            Ok(Input::Resign) => match session.game.resign(session.config.human_color()) {
                Ok(()) => redraw = true,
                Err(e) => println!("{e}"),
            },
            Ok(Input::Draw(method)) => match session.game.claim_draw(method) {
                Ok(()) => redraw = true,
                Err(e) => println!("{e}"),
            },
            Ok(Input::Move(san)) => {
                let mover = color_name(session.game.turn());
                match session.game.play_san(san) {
                    Ok(played) => {
                        println!("{mover} played {played}.");
                        redraw = true;
                    }
                    Err(e @ (GameError::IllegalMove(_) | GameError::InvalidSan(_))) => {
                        println!("{e}");
                        let hints = advisory::complete(&session.game, san);
                        if !hints.is_empty() {
                            println!("Did you mean: {}", hints.join(" "));
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    commands::save(&mut session, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("   "), Ok(Input::Empty));
        assert_eq!(parse_input("moves"), Ok(Input::Moves));
        assert_eq!(parse_input(" Nf3 "), Ok(Input::Move("Nf3")));
        assert_eq!(parse_input("draw"), Ok(Input::Draw(Method::DrawOffer)));
        assert_eq!(
            parse_input("draw Threefold"),
            Ok(Input::Draw(Method::ThreefoldRepetition))
        );
        assert!(parse_input("draw never").is_err());
    }
}
