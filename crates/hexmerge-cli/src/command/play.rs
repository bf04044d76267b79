use std::io::{self, Write as _};

use anyhow::Context as _;
use hexmerge_engine::{Direction, GameSession, InvalidDirectionError};

use crate::{command::session_arg::SessionArg, view::TextBoard};

const KEY_HELP: &str = "\
Keys:  q: up-left    e: up-right
       a: left       d: right
       z: down-left  c: down-right
       h: help       x: quit
Direction names (left, up-right, ...) work too.";

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    session: SessionArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayCommand {
    Move(Direction),
    Help,
    Quit,
}

fn parse_command(input: &str) -> Result<PlayCommand, InvalidDirectionError> {
    let input = input.trim();
    let command = match input.to_ascii_lowercase().as_str() {
        "a" => PlayCommand::Move(Direction::Left),
        "d" => PlayCommand::Move(Direction::Right),
        "q" => PlayCommand::Move(Direction::UpLeft),
        "e" => PlayCommand::Move(Direction::UpRight),
        "z" => PlayCommand::Move(Direction::DownLeft),
        "c" => PlayCommand::Move(Direction::DownRight),
        "h" | "?" | "help" => PlayCommand::Help,
        "x" | "quit" | "exit" => PlayCommand::Quit,
        _ => PlayCommand::Move(input.parse()?),
    };
    Ok(command)
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { session } = arg;
    let color = session.color();
    let mut session = session.start()?;
    let layout = *session.board().layout();

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{KEY_HELP}\n")?;
    write!(stdout, "{}", TextBoard::new(&layout, &session.snapshot(), color))?;

    let mut lines = io::stdin().lines();
    while !session.is_game_over() {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(PlayCommand::Move(direction)) => {
                let turn = session.apply_move(direction);
                if turn.moved {
                    write!(stdout, "{}", TextBoard::new(&layout, &turn, color))?;
                } else {
                    writeln!(stdout, "Nothing moves {direction}.")?;
                }
            }
            Ok(PlayCommand::Help) => writeln!(stdout, "{KEY_HELP}")?,
            Ok(PlayCommand::Quit) => break,
            Err(e) => writeln!(stdout, "{e}")?,
        }
    }

    if session.is_game_over() {
        writeln!(stdout, "Game over!")?;
    }
    print_summary(&session);
    Ok(())
}

fn print_summary(session: &GameSession) {
    let stats = session.stats();
    let max_tile = stats
        .max_tile()
        .map_or_else(|| "-".to_owned(), |tile| tile.to_string());
    eprintln!(
        "Score {} after {} turns, max tile {max_tile} (seed {})",
        stats.score(),
        stats.turns(),
        session.seed(),
    );
}
