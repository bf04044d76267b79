use clap::{Parser, Subcommand};

use self::{auto_play::AutoPlayArg, layout::LayoutArg, play::PlayArg};

mod auto_play;
mod layout;
mod play;
mod session_arg;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively, one move per input line
    Play(#[clap(flatten)] PlayArg),
    /// Let a simple strategy play until the game is over
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Print the cell mask and row spans of a board radius
    Layout(#[clap(flatten)] LayoutArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::Layout(arg) => layout::run(&arg)?,
    }
    Ok(())
}
