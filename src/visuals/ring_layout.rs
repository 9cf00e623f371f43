use crate::logic::hotels_constants::{LAST_CELL_ID, START_CELL_ID};

// the ring is drawn as the border of an 11 x 7 rectangle, clockwise from the top left
pub const RING_COLS: usize = 11;
pub const RING_ROWS: usize = 7;

/// (row, col) of a cell on the drawn rectangle.
pub fn ring_position(id: i32) -> Option<(usize, usize)> {
    let position = match id {
        -1..=9 => (0, id + 1),
        10..=14 => (id - 9, 10),
        15..=25 => (6, 25 - id),
        26..=30 => (31 - id, 0),
        _ => return None,
    };
    Some((position.0 as usize, position.1 as usize))
}

/// Cell ids laid out row by row; `None` marks the hollow middle.
pub fn ring_grid() -> [[Option<i32>; RING_COLS]; RING_ROWS] {
    let mut grid = [[None; RING_COLS]; RING_ROWS];
    for id in START_CELL_ID..=LAST_CELL_ID {
        if let Some((row, col)) = ring_position(id) {
            grid[row][col] = Some(id);
        }
    }
    grid
}
