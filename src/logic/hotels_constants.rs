pub const STARTING_MONEY: i64 = 12000;

pub const START_CELL_ID: i32 = -1;
pub const LAST_CELL_ID: i32 = 30;
pub const CELL_COUNT: usize = 32;

// -1 folds onto 30 for relative moves, so the ring has one position fewer than the board
pub const RING_SIZE: i32 = 31;

pub const MAX_NIGHTS: usize = 6;
pub const DIE_FACES: i32 = 6;
