//! Subcommand handlers.

use std::path::Path;

use anyhow::{anyhow, bail, Result};
use pinata_core::session::color_name;
use pinata_core::{advisory, board, load_session, report, Game, Method, Session, SessionConfig};
use shakmaty::{Color, Position};
use tracing::info;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::play;

pub fn run(cli: Cli, config: &Config) -> Result<()> {
    let path = cli.file.unwrap_or_else(|| config.save_file.clone());
    let visual = config.visual && !cli.blind;

    match cli.command {
        Command::New {
            black,
            engine,
            fen,
            force,
        } => {
            let engine = engine.unwrap_or_else(|| config.engine.clone());
            let human = if black { Color::Black } else { Color::White };
            new_session(&path, SessionConfig::new(human, engine), fen.as_deref(), force, visual)
        }
        Command::Status => status(&path, visual),
        Command::Moves { prefix } => moves(&path, prefix.as_deref()),
        Command::Move { sans } => apply_moves(&path, &sans, visual),
        Command::Resign => resign(&path, visual),
        Command::Draw { claim } => draw(&path, claim.into(), visual),
        Command::Play => play::run(&path, visual),
    }
}

/// Load a session and tell the user who they are playing.
pub fn open(path: &Path) -> Result<Session> {
    let session = load_session(path)?;
    println!("{}", session.config.resume_notice());
    Ok(session)
}

pub fn save(session: &mut Session, path: &Path) -> Result<()> {
    session.save(path)?;
    println!("Game saved to {}.", path.display());
    Ok(())
}

/// Board (unless blind), then either the verdict or whose move it is.
/// Returns whether the game is over.
pub fn show(session: &Session, visual: bool) -> Result<bool> {
    if visual {
        print!(
            "{}",
            board::diagram(session.game.position().board(), session.config.human_color())
        );
    }
    let over = report::report_if_over(&session.game)?;
    if !over {
        println!("{}", turn_line(session));
    }
    Ok(over)
}

pub fn turn_line(session: &Session) -> String {
    let color = color_name(session.game.turn());
    if session.config.is_human_turn(&session.game) {
        format!("Your move ({color}).")
    } else {
        format!("Waiting for {} ({color}).", session.config.engine)
    }
}

fn new_session(
    path: &Path,
    config: SessionConfig,
    fen: Option<&str>,
    force: bool,
    visual: bool,
) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to replace it", path.display());
    }

    let game = match fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };
    let mut session = Session::new(game, config);
    save(&mut session, path)?;
    info!(path = %path.display(), engine = %session.config.engine, "New session");

    println!("{}", session.config.resume_notice());
    show(&session, visual)?;
    Ok(())
}

fn status(path: &Path, visual: bool) -> Result<()> {
    let session = open(path)?;
    if !show(&session, visual)? {
        println!("Legal moves: {}", advisory::legal_moves_line(&session.game));
    }
    Ok(())
}

fn moves(path: &Path, prefix: Option<&str>) -> Result<()> {
    let session = load_session(path)?;
    let moves = match prefix {
        Some(prefix) => advisory::complete(&session.game, prefix),
        None => advisory::legal_moves(&session.game),
    };
    for san in moves {
        println!("{san}");
    }
    Ok(())
}

fn apply_moves(path: &Path, sans: &[String], visual: bool) -> Result<()> {
    let mut session = open(path)?;

    let mut failure = None;
    for san in sans {
        let mover = color_name(session.game.turn());
        match session.game.play_san(san) {
            Ok(played) => println!("{mover} played {played}."),
            Err(e) => {
                failure = Some(anyhow!("Cannot play {san}: {e}"));
                break;
            }
        }
    }

    save(&mut session, path)?;
    show(&session, visual)?;
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn resign(path: &Path, visual: bool) -> Result<()> {
    let mut session = open(path)?;
    session.game.resign(session.config.human_color())?;
    save(&mut session, path)?;
    show(&session, visual)?;
    Ok(())
}

fn draw(path: &Path, method: Method, visual: bool) -> Result<()> {
    let mut session = open(path)?;
    session.game.claim_draw(method)?;
    save(&mut session, path)?;
    show(&session, visual)?;
    Ok(())
}
