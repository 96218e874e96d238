use quickcheck::Arbitrary;

use crate::{Direction, Grid, GRID_SIZE};

#[cfg(test)]
impl quickcheck::Arbitrary for Grid {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut cells = [[0u32; GRID_SIZE]; GRID_SIZE];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                // 0 (empty) or a power of two between 2 and 2048
                let exponent = u32::arbitrary(g) % 12;
                *cell = if exponent == 0 { 0 } else { 1 << exponent };
            }
        }
        Grid::from_rows(cells)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Direction {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}
