use serde::{Deserialize, Serialize};

use crate::Direction;

pub const GRID_SIZE: usize = 4;

/// The 4x4 playing grid.
///
/// A cell is either 0 (empty) or a power of two >= 2. The grid is owned by
/// a [`Game`](crate::Game) and mutated only through moves and tile spawns;
/// callers get read-only snapshots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
}

/// What a single [`Grid::shift()`] did to the grid.
#[derive(Clone, Debug)]
pub struct ShiftOutcome {
    /// Whether any cell changed. A shift that moved nothing must leave the
    /// grid bit-for-bit identical.
    pub moved: bool,
    /// The value of each newly formed tile, in the order the merges
    /// happened (lane by lane, nearest the compaction edge first).
    pub merge_points: Vec<u32>,
}

impl Grid {
    /// A grid with no tiles on it.
    pub const EMPTY: Grid = Grid {
        cells: [[0; GRID_SIZE]; GRID_SIZE],
    };

    /// Creates a grid from explicit rows. Intended for tests and hosts
    /// restoring a snapshot; values must be 0 or powers of two >= 2.
    pub fn from_rows(cells: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// The rows of the grid, top to bottom.
    pub fn rows(&self) -> &[[u32; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// The value at row `i`, column `j` (0 if empty).
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i][j]
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: u32) {
        self.cells[i][j] = value;
    }

    /// The coordinates of all empty cells, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                if self.cells[i][j] == 0 {
                    cells.push((i, j));
                }
            }
        }
        cells
    }

    /// Is there any legal move left?
    ///
    /// True iff there is an empty cell, or two horizontally or vertically
    /// adjacent cells hold the same value. When this returns false the
    /// game is over.
    pub fn has_moves(&self) -> bool {
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                if self.cells[i][j] == 0 {
                    return true;
                }
                if i + 1 < GRID_SIZE && self.cells[i][j] == self.cells[i + 1][j] {
                    return true;
                }
                if j + 1 < GRID_SIZE && self.cells[i][j] == self.cells[i][j + 1] {
                    return true;
                }
            }
        }
        false
    }

    /// Slide and merge all tiles toward the given direction's edge.
    ///
    /// This is the core function of this type. Each row (or column) is
    /// compacted independently: tiles slide through empty cells toward the
    /// edge, and a tile that lands next to an equal tile merges into a
    /// doubled tile. A tile produced by a merge cannot merge again within
    /// the same shift, so a lane of (V, V, V) merges only the pair nearest
    /// the edge and (V, V, V, V) becomes (2V, 2V).
    ///
    /// No randomness and no score bookkeeping happens here; the caller
    /// turns `merge_points` into score and spawns the follow-up tile.
    pub fn shift(&mut self, direction: Direction) -> ShiftOutcome {
        let mut moved = false;
        let mut merge_points = Vec::new();
        for lane in 0..GRID_SIZE {
            let coords = lane_coords(direction, lane);
            let mut line = coords.map(|(i, j)| self.cells[i][j]);
            if compact_line(&mut line, &mut merge_points) {
                moved = true;
                for (&(i, j), &value) in coords.iter().zip(line.iter()) {
                    self.cells[i][j] = value;
                }
            }
        }
        ShiftOutcome {
            moved,
            merge_points,
        }
    }
}

// The cells of one row/column, ordered so that index 0 is the cell at the
// compaction edge.
fn lane_coords(direction: Direction, lane: usize) -> [(usize, usize); GRID_SIZE] {
    let mut coords = [(0, 0); GRID_SIZE];
    for (k, coord) in coords.iter_mut().enumerate() {
        *coord = match direction {
            Direction::Left => (lane, k),
            Direction::Right => (lane, GRID_SIZE - 1 - k),
            Direction::Up => (k, lane),
            Direction::Down => (GRID_SIZE - 1 - k, lane),
        };
    }
    coords
}

// Compact a single lane toward index 0.
//
// Scans from the second cell outward, so the tiles nearest the edge settle
// first. `last_merge` marks the cell a merge already landed on, which blocks
// a second merge onto it within this shift.
fn compact_line(line: &mut [u32; GRID_SIZE], merge_points: &mut Vec<u32>) -> bool {
    let mut changed = false;
    let mut last_merge = None;
    for start in 1..GRID_SIZE {
        if line[start] == 0 {
            continue;
        }
        let mut pos = start;
        while pos > 0 && line[pos - 1] == 0 {
            line[pos - 1] = line[pos];
            line[pos] = 0;
            pos -= 1;
            changed = true;
        }
        if pos > 0 && line[pos - 1] == line[pos] && last_merge != Some(pos - 1) {
            let merged = line[pos - 1] * 2;
            line[pos - 1] = merged;
            line[pos] = 0;
            last_merge = Some(pos - 1);
            merge_points.push(merged);
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    fn shift_row(row: [u32; 4], direction: Direction) -> ([u32; 4], ShiftOutcome) {
        let mut grid = Grid::EMPTY;
        for (j, &value) in row.iter().enumerate() {
            grid.set(0, j, value);
        }
        let outcome = grid.shift(direction);
        (grid.rows()[0], outcome)
    }

    #[test]
    fn triple_merges_only_the_edge_pair() {
        let (row, outcome) = shift_row([2, 2, 2, 0], Direction::Left);
        assert_eq!(row, [4, 2, 0, 0]);
        assert_eq!(outcome.merge_points, vec![4]);
    }

    #[test]
    fn quadruple_merges_into_two_pairs() {
        let (row, outcome) = shift_row([2, 2, 2, 2], Direction::Left);
        assert_eq!(row, [4, 4, 0, 0]);
        assert_eq!(outcome.merge_points, vec![4, 4]);
    }

    #[test]
    fn merged_tile_does_not_merge_again() {
        // 4 (2 2) -> 4 4 must not become 8 in the same shift
        let (row, _) = shift_row([4, 2, 2, 0], Direction::Left);
        assert_eq!(row, [4, 4, 0, 0]);
    }

    #[test]
    fn slide_through_empty_cells() {
        let (row, outcome) = shift_row([2, 0, 0, 2], Direction::Left);
        assert_eq!(row, [4, 0, 0, 0]);
        assert_eq!(outcome.merge_points, vec![4]);
        assert!(outcome.moved);
    }

    #[test]
    fn shift_right_mirrors_left() {
        let (row, outcome) = shift_row([2, 2, 2, 0], Direction::Right);
        assert_eq!(row, [0, 0, 2, 4]);
        assert_eq!(outcome.merge_points, vec![4]);
        let (row, _) = shift_row([0, 2, 2, 2], Direction::Right);
        assert_eq!(row, [0, 0, 2, 4]);
    }

    #[test]
    fn shift_up_and_down_work_on_columns() {
        let mut grid = Grid::from_rows([
            [2, 0, 0, 0],
            [2, 0, 0, 0],
            [2, 0, 0, 0],
            [0, 0, 0, 4],
        ]);
        let outcome = grid.shift(Direction::Up);
        assert_eq!(
            grid.rows(),
            &[
                [4, 0, 0, 4],
                [2, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ]
        );
        assert_eq!(outcome.merge_points, vec![4]);

        let mut grid = Grid::from_rows([
            [2, 0, 0, 0],
            [2, 0, 0, 0],
            [2, 0, 0, 0],
            [0, 0, 0, 4],
        ]);
        let outcome = grid.shift(Direction::Down);
        assert_eq!(
            grid.rows(),
            &[
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [2, 0, 0, 0],
                [4, 0, 0, 4],
            ]
        );
        assert_eq!(outcome.merge_points, vec![4]);
    }

    #[test]
    fn fully_compacted_lane_does_not_move() {
        let (row, outcome) = shift_row([4, 2, 0, 0], Direction::Left);
        assert_eq!(row, [4, 2, 0, 0]);
        assert!(!outcome.moved);
        assert!(outcome.merge_points.is_empty());
    }

    #[test]
    fn full_grid_without_pairs_has_no_moves() {
        let grid = Grid::from_rows([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(!grid.has_moves());
    }

    #[test]
    fn full_grid_with_adjacent_pair_has_moves() {
        let grid = Grid::from_rows([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 4, 8],
            [4, 2, 8, 2],
        ]);
        assert!(grid.has_moves());
    }

    #[test]
    fn grid_with_empty_cell_has_moves() {
        let mut grid = Grid::EMPTY;
        grid.set(1, 2, 2);
        assert!(grid.has_moves());
    }

    quickcheck! {
        fn shift_preserves_power_of_two_cells(grid: Grid, direction: Direction) -> bool {
            let mut grid = grid;
            grid.shift(direction);
            grid.rows()
                .iter()
                .flatten()
                .all(|&v| v == 0 || (v >= 2 && v.is_power_of_two()))
        }

        fn shift_conserves_tile_value_sum(grid: Grid, direction: Direction) -> bool {
            let sum_before: u32 = grid.rows().iter().flatten().sum();
            let mut grid = grid;
            grid.shift(direction);
            let sum_after: u32 = grid.rows().iter().flatten().sum();
            sum_before == sum_after
        }

        fn moved_flag_matches_grid_change(grid: Grid, direction: Direction) -> bool {
            let before = grid;
            let mut after = grid;
            let outcome = after.shift(direction);
            outcome.moved == (before != after)
        }

        fn merge_points_are_merged_tile_values(grid: Grid, direction: Direction) -> bool {
            // Merging two V tiles yields a 2V tile, so every reported merge
            // point is a power of two >= 4.
            let mut grid = grid;
            let outcome = grid.shift(direction);
            outcome.merge_points.iter().all(|&p| p >= 4 && p.is_power_of_two())
        }
    }
}
