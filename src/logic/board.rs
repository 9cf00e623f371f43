use std::collections::HashMap;

use log::debug;

use super::cell::Cell;
use super::config::Config;
use super::error::{ConfigError, GameError, GameResult};
use super::hotels_constants::{CELL_COUNT, LAST_CELL_ID, RING_SIZE, START_CELL_ID};
use super::player::Player;

/// The ring of cells plus where every seated player stands.
pub struct Board {
    // index = id + 1
    cells: Vec<Cell>,
    // player name -> cell id
    positions: HashMap<String, i32>,
}

impl Board {
    pub fn new(config: &Config, players: &[Player]) -> Result<Board, ConfigError> {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        for id in START_CELL_ID..=LAST_CELL_ID {
            cells.push(Cell::new(id, config.cell(id)?));
        }

        let positions = players
            .iter()
            .map(|player| (player.get_name().to_string(), START_CELL_ID))
            .collect();

        let mut board = Board { cells, positions };
        board.sync_occupancy(START_CELL_ID);
        Ok(board)
    }

    fn index_of(id: i32) -> GameResult<usize> {
        if !(START_CELL_ID..=LAST_CELL_ID).contains(&id) {
            return Err(GameError::OutOfRange(id));
        }
        Ok((id - START_CELL_ID) as usize)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn find_cell(&self, id: i32) -> GameResult<&Cell> {
        Ok(&self.cells[Self::index_of(id)?])
    }

    pub fn find_cell_mut(&mut self, id: i32) -> GameResult<&mut Cell> {
        Ok(&mut self.cells[Self::index_of(id)?])
    }

    pub fn find_player_position(&self, player: &str) -> GameResult<&Cell> {
        let id = self.position_id(player)?;
        self.find_cell(id)
    }

    fn position_id(&self, player: &str) -> GameResult<i32> {
        self.positions
            .get(player)
            .copied()
            .ok_or_else(|| GameError::PlayerNotFound(player.to_string()))
    }

    pub fn is_seated(&self, player: &str) -> bool {
        self.positions.contains_key(player)
    }

    /// Names of the players standing on the given cell.
    pub fn players_at(&self, id: i32) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .positions
            .iter()
            .filter(|(_, position)| **position == id)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn remove_player(&mut self, player: &str) -> GameResult<()> {
        let id = self
            .positions
            .remove(player)
            .ok_or_else(|| GameError::PlayerNotFound(player.to_string()))?;
        self.sync_occupancy(id);
        Ok(())
    }

    /// Moves a seated player and returns the cell they land on.
    ///
    /// With a destination the player jumps straight there and `delta` is ignored.
    /// Otherwise the player walks `delta` cells (negative walks backwards). The start
    /// cell takes part in the arithmetic as id -1, so walking from it needs no special
    /// case: `-1 + 6` lands on 5 and `-1 + 0` folds onto 30.
    pub fn move_player(
        &mut self,
        player: &str,
        destination: Option<i32>,
        delta: i32,
    ) -> GameResult<&Cell> {
        let current = self.position_id(player)?;

        let next = match destination {
            Some(id) => {
                Self::index_of(id)?;
                id
            }
            // reduce first, the raw sum can overflow
            None => (current.rem_euclid(RING_SIZE) + delta.rem_euclid(RING_SIZE)).rem_euclid(RING_SIZE),
        };

        debug!("{} moves from cell {} to cell {}", player, current, next);

        self.positions.insert(player.to_string(), next);
        self.sync_occupancy(current);
        self.sync_occupancy(next);
        self.find_cell(next)
    }

    fn sync_occupancy(&mut self, id: i32) {
        let occupied = self.positions.values().any(|position| *position == id);
        if let Ok(cell) = self.find_cell_mut(id) {
            match occupied {
                true => cell.occupy(),
                false => cell.free(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::seq::SliceRandom;
    use rand::Rng;

    use super::*;

    const PLAYER_COUNT: usize = 4;
    const REPETITION: usize = 1000;

    fn create_players(count: usize) -> Vec<Player> {
        (0..count).map(|i| Player::human(&i.to_string())).collect()
    }

    fn new_board(players: &[Player]) -> Board {
        Board::new(&Config::bundled(), players).unwrap()
    }

    #[test]
    fn test_board_cells() {
        let board = new_board(&create_players(PLAYER_COUNT));
        assert_eq!(board.cells().len(), CELL_COUNT);

        for id in -1..31 {
            assert_eq!(board.find_cell(id).unwrap().get_id(), id);
        }

        assert_eq!(board.find_cell(31), Err(GameError::OutOfRange(31)));
        assert_eq!(board.find_cell(-2), Err(GameError::OutOfRange(-2)));
        assert_eq!(board.find_cell(-3), Err(GameError::OutOfRange(-3)));
    }

    #[test]
    fn test_everyone_starts_on_start_cell() {
        let players = create_players(PLAYER_COUNT);
        let board = new_board(&players);

        for player in &players {
            assert_eq!(board.find_player_position(player.get_name()).unwrap().get_id(), -1);
        }
        assert!(board.find_cell(-1).unwrap().is_occupied());
        assert_eq!(board.players_at(-1).len(), PLAYER_COUNT);
    }

    #[test]
    fn test_move_players() {
        let config = Config::bundled();
        let mut rng = rand::thread_rng();

        for _ in 0..REPETITION {
            let players = create_players(PLAYER_COUNT);
            let mut board = Board::new(&config, &players).unwrap();

            let mut picked = players.choose_multiple(&mut rng, 2);
            let mover = picked.next().unwrap().get_name();
            let from_start = picked.next().unwrap().get_name();

            let destination = rng.gen_range(-1..31);
            let delta = rng.gen_range(0..7);

            // destination wins over delta
            let landed = board.move_player(mover, Some(destination), delta).unwrap();
            assert_eq!(landed.get_id(), destination);

            board.move_player(mover, None, delta).unwrap();
            assert_eq!(
                board.find_player_position(mover).unwrap().get_id(),
                (destination + delta).rem_euclid(31)
            );

            for player in &players {
                if player.get_name() != mover {
                    assert_eq!(board.find_player_position(player.get_name()).unwrap().get_id(), -1);
                }
            }

            // the start cell is id -1 in the ring arithmetic
            board.move_player(from_start, None, delta).unwrap();
            assert_eq!(
                board.find_player_position(from_start).unwrap().get_id(),
                (delta - 1).rem_euclid(31)
            );

            board.remove_player(mover).unwrap();
            assert_eq!(
                board.find_player_position(mover),
                Err(GameError::PlayerNotFound(mover.to_string()))
            );
            assert!(board.remove_player(mover).is_err());
            assert!(board.move_player(mover, None, 3).is_err());
            assert!(board.move_player(mover, Some(3), 0).is_err());
        }
    }

    #[test]
    fn test_scenario_two_players() {
        let players = vec![Player::human("A"), Player::ai("B")];
        let mut board = new_board(&players);

        assert_eq!(board.move_player("A", None, 6).unwrap().get_id(), 5);

        board.move_player("B", Some(20), 0).unwrap();
        assert_eq!(board.move_player("B", None, 15).unwrap().get_id(), 4);

        assert_eq!(board.find_player_position("A").unwrap().get_id(), 5);
    }

    #[test]
    fn test_negative_delta_wraps() {
        let players = create_players(1);
        let mut board = new_board(&players);

        board.move_player("0", Some(2), 0).unwrap();
        assert_eq!(board.move_player("0", None, -5).unwrap().get_id(), 28);
        assert_eq!(board.move_player("0", None, 3).unwrap().get_id(), 0);
        assert_eq!(board.move_player("0", None, -62).unwrap().get_id(), 0);
    }

    #[test]
    fn test_extreme_deltas_wrap() {
        let players = create_players(1);
        let mut board = new_board(&players);

        assert_eq!(board.move_player("0", None, i32::MAX).unwrap().get_id(), 0);
        assert_eq!(board.move_player("0", None, i32::MIN).unwrap().get_id(), 29);

        board.move_player("0", Some(30), 0).unwrap();
        assert_eq!(board.move_player("0", None, i32::MAX).unwrap().get_id(), 0);

        board.move_player("0", Some(30), 0).unwrap();
        assert_eq!(board.move_player("0", None, i32::MIN).unwrap().get_id(), 28);
    }

    #[test]
    fn test_move_to_invalid_destination() {
        let players = create_players(1);
        let mut board = new_board(&players);

        assert_eq!(
            board.move_player("0", Some(31), 0).map(|cell| cell.get_id()),
            Err(GameError::OutOfRange(31))
        );
        assert_eq!(board.find_player_position("0").unwrap().get_id(), -1);
    }

    #[test]
    fn test_occupancy_follows_players() {
        let players = create_players(2);
        let mut board = new_board(&players);

        board.move_player("0", None, 4).unwrap();
        assert!(board.find_cell(3).unwrap().is_occupied());
        assert!(board.find_cell(-1).unwrap().is_occupied());

        board.move_player("1", None, 4).unwrap();
        assert!(!board.find_cell(-1).unwrap().is_occupied());
        assert_eq!(board.players_at(3), vec!["0", "1"]);

        board.remove_player("0").unwrap();
        assert!(board.find_cell(3).unwrap().is_occupied());
        board.remove_player("1").unwrap();
        assert!(!board.find_cell(3).unwrap().is_occupied());
        assert!(!board.is_seated("1"));
    }
}
