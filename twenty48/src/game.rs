use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Direction, Grid};

/// A notification produced while applying a move.
///
/// The caller drains these from [`MoveOutcome::Moved`]; there is no
/// registered-listener mechanism inside the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Two tiles merged somewhere on the grid. One event per merge, with
    /// the points that merge added and the running total after it.
    Merge { new_score: u32, points_added: u32 },
    /// This move ended the game: the grid is full and no two adjacent
    /// cells are equal. Emitted once per transition into that state.
    GameOver { final_score: u32 },
}

/// Summarizes the outcome of applying a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing slid or merged (or the game was already over). No tile was
    /// spawned and the score did not change.
    Unchanged,
    /// At least one tile moved, so one new tile was spawned afterwards.
    Moved { events: Vec<GameEvent> },
}

/// The state of a single game: grid, score and game-over flag.
///
/// All operations are synchronous and total; the only external dependency
/// is the random number generator passed into the spawning operations,
/// which keeps the engine deterministic under a seeded RNG.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    score: u32,
    game_over: bool,
}

impl Game {
    /// Starts a game with two spawned tiles and a score of 0.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut game = Self {
            grid: Grid::EMPTY,
            score: 0,
            game_over: false,
        };
        game.spawn_tile(rng);
        game.spawn_tile(rng);
        game
    }

    /// A read-only snapshot of the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The running score. Non-decreasing until [`Self::reset()`].
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether the game has reached the terminal state.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Pushes all tiles in `direction`, then spawns one tile if anything
    /// moved and rechecks for the terminal state.
    ///
    /// Calling this on a finished game is allowed and does nothing.
    pub fn apply_move<R: Rng>(&mut self, direction: Direction, rng: &mut R) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::Unchanged;
        }
        let shift = self.grid.shift(direction);
        if !shift.moved {
            return MoveOutcome::Unchanged;
        }

        let mut events = Vec::with_capacity(shift.merge_points.len());
        for points in shift.merge_points {
            self.score += points;
            events.push(GameEvent::Merge {
                new_score: self.score,
                points_added: points,
            });
        }

        // A changing move always leaves at least one empty cell behind,
        // so the spawn cannot fail.
        self.spawn_tile(rng);

        if !self.grid.has_moves() {
            self.game_over = true;
            events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        }
        MoveOutcome::Moved { events }
    }

    /// Clears the grid and score and spawns two fresh tiles.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.grid = Grid::EMPTY;
        self.score = 0;
        self.game_over = false;
        self.spawn_tile(rng);
        self.spawn_tile(rng);
    }

    // Place a 2 (9 in 10 times) or a 4 on a uniformly chosen empty cell.
    // Spawning never awards points.
    fn spawn_tile<R: Rng>(&mut self, rng: &mut R) {
        let empty = self.grid.empty_cells();
        if let Some(&(i, j)) = empty.choose(rng) {
            let value = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
            self.grid.set(i, j, value);
        }
    }
}
