use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use twenty48::{Direction, Game, GameEvent, Grid};

/// Writes one JSON transcript file per game into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    moves: Vec<RecordedMove>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            moves: Vec::new(),
        })
    }

    /// Store one applied move together with the events it produced and the
    /// state the game was left in.
    pub fn store_move(&mut self, direction: Direction, events: &[GameEvent], game: &Game) {
        self.moves.push(RecordedMove {
            direction,
            events: events.to_vec(),
            grid: *game.grid(),
            score: game.score(),
        });
    }

    pub fn write_game_recording(&mut self) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(filepath)?);
        let recording = GameRecording {
            moves: std::mem::take(&mut self.moves),
        };
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    pub moves: Vec<RecordedMove>,
}

#[derive(Serialize, Deserialize)]
pub struct RecordedMove {
    pub direction: Direction,
    pub events: Vec<GameEvent>,
    /// The grid after the move and the follow-up spawn.
    pub grid: Grid,
    pub score: u32,
}
