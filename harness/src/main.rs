use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, trace};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use twenty48::{visualize_grid, Direction, Game, GameEvent, MoveOutcome};

use crate::recording::Recorder;

mod recording;

#[derive(Parser)]
struct Args {
    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Record each game's moves as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

struct GameSummary {
    score: u32,
    highest_tile: u32,
    num_moves: usize,
}

/// Play one game to the end with a uniformly random move policy.
fn play_game(rng: &mut StdRng, recorder: &mut Option<Recorder>) -> anyhow::Result<GameSummary> {
    let mut game = Game::new(rng);
    let mut num_moves = 0;
    while !game.is_game_over() {
        let direction = *Direction::ALL.choose(rng).unwrap();
        match game.apply_move(direction, rng) {
            MoveOutcome::Unchanged => continue,
            MoveOutcome::Moved { events } => {
                num_moves += 1;
                for event in &events {
                    match event {
                        GameEvent::Merge {
                            new_score,
                            points_added,
                        } => trace!(new_score, points_added),
                        GameEvent::GameOver { final_score } => debug!(final_score, "Game over"),
                    }
                }
                if let Some(rec) = recorder {
                    rec.store_move(direction, &events, &game);
                }
            }
        }
    }
    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }

    debug!("Final position:\n{}", visualize_grid(game.grid()));
    let highest_tile = game
        .grid()
        .rows()
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(0);
    Ok(GameSummary {
        score: game.score(),
        highest_tile,
        num_moves,
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    // The best score across games is tracked here in the host; the engine
    // itself holds no persistent state.
    let mut best_score = 0;
    let mut highest_tile = 0;
    let mut total_moves = 0;
    for game_idx in 0..args.num_games {
        let summary = play_game(&mut rng, &mut recorder)?;
        debug!(
            game_idx,
            score = summary.score,
            highest_tile = summary.highest_tile,
            num_moves = summary.num_moves
        );
        if summary.score > best_score {
            best_score = summary.score;
            info!(game_idx, best_score, "New best score");
        }
        highest_tile = highest_tile.max(summary.highest_tile);
        total_moves += summary.num_moves;
    }

    eprintln!(
        "End result:\n- {} games played\n- best score: {}\n- highest tile reached: {}\n- {:.1} moves per game on average",
        args.num_games,
        best_score,
        highest_tile,
        total_moves as f64 / args.num_games.max(1) as f64
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
