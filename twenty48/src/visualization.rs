use crate::{Grid, GRID_SIZE};

/// Renders the grid as a text box for logs and debugging.
pub fn visualize_grid(grid: &Grid) -> String {
    let mut result = String::from("╭");
    for j in 0..GRID_SIZE {
        result += "──────";
        result += if j + 1 < GRID_SIZE { "┬" } else { "╮\n" };
    }
    for (i, row) in grid.rows().iter().enumerate() {
        result += "│";
        for &value in row {
            if value == 0 {
                result += "      │";
            } else {
                result += &format!("{:>5} │", value);
            }
        }
        result += "\n";
        if i + 1 < GRID_SIZE {
            result += "├";
            for j in 0..GRID_SIZE {
                result += "──────";
                result += if j + 1 < GRID_SIZE { "┼" } else { "┤\n" };
            }
        }
    }
    result += "╰";
    for j in 0..GRID_SIZE {
        result += "──────";
        result += if j + 1 < GRID_SIZE { "┴" } else { "╯" };
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tiles_and_empty_cells() {
        let mut grid = Grid::EMPTY;
        grid.set(0, 0, 2);
        grid.set(3, 3, 2048);
        let rendered = visualize_grid(&grid);
        assert!(rendered.contains("    2 │"));
        assert!(rendered.contains(" 2048 │"));
        // 4 rows of cells plus 5 border lines
        assert_eq!(rendered.lines().count(), 9);
    }
}
