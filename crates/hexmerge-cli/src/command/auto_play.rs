use std::path::PathBuf;

use hexmerge_engine::{
    Direction, GameSession, GameStats, HexBoard, SpawnSeed, TurnResult, legal_moves, resolve,
};
use rand::{Rng, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{command::session_arg::SessionArg, util::Output, view::TextBoard};

#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display, derive_more::FromStr,
)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Strategy {
    /// Take the move with the largest immediate score, then the most empty cells
    #[default]
    #[display("greedy")]
    Greedy,
    /// Take any move that changes the board
    #[display("random")]
    Random,
}

impl Strategy {
    fn choose<R>(self, board: &HexBoard, rng: &mut R) -> Option<Direction>
    where
        R: Rng + ?Sized,
    {
        let moves = legal_moves(board);
        match self {
            Strategy::Greedy => moves.iter().copied().max_by_key(|&direction| {
                let resolution = resolve(board, direction);
                (resolution.score_delta, resolution.board.empty_count())
            }),
            Strategy::Random => moves.choose(rng).copied(),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[clap(flatten)]
    session: SessionArg,
    /// Move selection strategy (greedy or random)
    #[arg(long, default_value = "greedy")]
    strategy: Strategy,
    /// Stop after this many turns even if the game is not over
    #[arg(long, default_value_t = 100_000)]
    max_turns: usize,
    /// Print the final turn and statistics as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Output file path for the JSON report
    #[arg(long, requires = "json")]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct AutoPlayReport<'a> {
    seed: SpawnSeed,
    strategy: Strategy,
    last_turn: &'a TurnResult,
    stats: &'a GameStats,
}

/// Stream of the move-choice generator, apart from the session's spawn stream.
const STRATEGY_STREAM: u64 = 0x6d6f_7665_5f63_686f;

/// Generator for move choices: seeded from the session seed, but on its own
/// stream so choices and spawns draw different numbers.
#[expect(clippy::cast_possible_truncation)]
fn strategy_rng(seed: SpawnSeed) -> Pcg32 {
    Pcg32::new((seed.to_u128() >> 64) as u64, STRATEGY_STREAM)
}

/// Plays `session` with `strategy` until the game is over, no move changes
/// the board, or `max_turns` turns have been played.
fn play_out(session: &mut GameSession, strategy: Strategy, max_turns: usize) -> TurnResult {
    let mut rng = strategy_rng(session.seed());
    let mut last_turn = session.snapshot();
    while !last_turn.game_over && session.stats().turns() < max_turns {
        let Some(direction) = strategy.choose(session.board(), &mut rng) else {
            break;
        };
        last_turn = session.apply_move(direction);
    }
    last_turn
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        session,
        strategy,
        max_turns,
        json,
        output,
    } = arg;
    let color = session.color();
    let mut session = session.start()?;

    let last_turn = play_out(&mut session, *strategy, *max_turns);
    let stats = session.stats();

    if *json {
        let report = AutoPlayReport {
            seed: session.seed(),
            strategy: *strategy,
            last_turn: &last_turn,
            stats,
        };
        Output::save_json(&report, output.clone())?;
    } else {
        print!(
            "{}",
            TextBoard::new(session.board().layout(), &last_turn, color)
        );
        println!();
        println!(
            "Turns: {} (rejected moves: {})",
            stats.turns(),
            stats.rejected_moves()
        );
        println!(
            "Merges: {}, spawned tiles: {}",
            stats.merges(),
            stats.spawned_tiles()
        );
        if let Some(max_tile) = stats.max_tile() {
            println!("Max tile: {max_tile}");
        }
        let moves = Direction::ALL
            .iter()
            .map(|&direction| format!("{direction} {}", stats.moves_in(direction)))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Moves: {moves}");
    }

    if last_turn.game_over {
        eprintln!("{strategy} strategy: game over after {} turns", stats.turns());
    } else {
        eprintln!("{strategy} strategy: stopped after {} turns", stats.turns());
    }
    Ok(())
}
