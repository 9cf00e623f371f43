use std::collections::BTreeMap;
use std::fmt;

use log::{info, warn};
use rand::Rng;

use super::board::Board;
use super::config::Config;
use super::error::{ConfigError, GameError, GameResult};
use super::hotel::Hotel;
use super::hotels_constants::DIE_FACES;
use super::player::{Player, PlayerKind};

/// Groups every model object of a running game and mediates lookups by name.
pub struct HotelsGame {
    players: Vec<Player>,
    board: Board,
    hotels: BTreeMap<String, Hotel>,
    cell_types: BTreeMap<u8, String>,
    current_player: usize,
}

impl HotelsGame {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let players: Vec<Player> = config
            .game
            .player_list
            .iter()
            .map(|declaration| {
                let kind = match declaration.is_ai {
                    true => PlayerKind::Ai,
                    false => PlayerKind::Human,
                };
                Player::new(&declaration.name, kind)
            })
            .collect();

        let board = Board::new(config, &players)?;

        let hotels = config
            .hotels
            .iter()
            .map(|(name, hotel)| (name.clone(), Hotel::new(name, hotel.clone())))
            .collect();

        info!("New game with {} players", players.len());

        Ok(Self {
            players,
            board,
            hotels,
            cell_types: config.cell_types.clone(),
            current_player: 0,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn hotels(&self) -> impl Iterator<Item = &Hotel> {
        self.hotels.values()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn cell_type_name(&self, cell_type: u8) -> Option<&str> {
        self.cell_types.get(&cell_type).map(String::as_str)
    }

    pub fn get_player(&self, name: &str) -> GameResult<&Player> {
        self.players
            .iter()
            .find(|player| player.get_name() == name)
            .ok_or_else(|| GameError::PlayerNotFound(name.to_string()))
    }

    pub fn get_player_mut(&mut self, name: &str) -> GameResult<&mut Player> {
        self.players
            .iter_mut()
            .find(|player| player.get_name() == name)
            .ok_or_else(|| GameError::PlayerNotFound(name.to_string()))
    }

    pub fn get_hotel(&self, name: &str) -> GameResult<&Hotel> {
        self.hotels
            .get(name)
            .ok_or_else(|| GameError::HotelNotFound(name.to_string()))
    }

    pub fn get_hotel_mut(&mut self, name: &str) -> GameResult<&mut Hotel> {
        self.hotels
            .get_mut(name)
            .ok_or_else(|| GameError::HotelNotFound(name.to_string()))
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    pub fn next_turn(&mut self) {
        if !self.players.is_empty() {
            self.current_player = (self.current_player + 1) % self.players.len();
        }
    }

    /// Takes a player out of the game: off the roster, off the board, and every
    /// hotel they owned goes back on the market. Unknown names are ignored.
    pub fn remove_player(&mut self, name: &str) {
        let Some(index) = self.players.iter().position(|p| p.get_name() == name) else {
            return;
        };

        self.players.remove(index);
        if index < self.current_player {
            self.current_player -= 1;
        }
        if self.current_player >= self.players.len() {
            self.current_player = 0;
        }

        // already off the board is fine
        let _ = self.board.remove_player(name);

        for hotel in self.hotels.values_mut() {
            if hotel.get_owner() == Some(name) {
                hotel.free_property();
            }
        }

        info!("{} left the game", name);
    }

    pub fn buy_land(&mut self, player: &str, hotel: &str) -> GameResult<()> {
        let land = self
            .hotels
            .get_mut(hotel)
            .ok_or_else(|| GameError::HotelNotFound(hotel.to_string()))?;
        let buyer = self
            .players
            .iter_mut()
            .find(|p| p.get_name() == player)
            .ok_or_else(|| GameError::PlayerNotFound(player.to_string()))?;

        if let Some(owner) = land.get_owner() {
            warn!("{} tried to buy {} from {}", player, hotel, owner);
            return Err(GameError::AlreadyOwned {
                hotel: hotel.to_string(),
                owner: owner.to_string(),
            });
        }

        buyer.change_money(-i64::from(land.get_land_cost()));
        land.set_owner(player);
        buyer.add_property(land);

        info!("{} bought {} for {}", player, hotel, land.get_land_cost());
        buyer.notify(&format!("You bought the land of {}", hotel));
        Ok(())
    }

    /// Builds the named upgrade if it is on offer and returns what it cost.
    pub fn build_upgrade(&mut self, player: &str, hotel: &str, upgrade: &str) -> GameResult<u32> {
        let target = self
            .hotels
            .get_mut(hotel)
            .ok_or_else(|| GameError::HotelNotFound(hotel.to_string()))?;
        let builder = self
            .players
            .iter_mut()
            .find(|p| p.get_name() == player)
            .ok_or_else(|| GameError::PlayerNotFound(player.to_string()))?;

        if target.get_owner() != Some(player) {
            warn!("{} tried to build on {} without owning it", player, hotel);
            return Err(GameError::NotOwner {
                hotel: hotel.to_string(),
                player: player.to_string(),
            });
        }

        let tier = target.upgrade_tier(upgrade)?;
        let offer = target
            .get_upgrade_costs()
            .into_iter()
            .find(|offer| offer.tier == tier)
            .ok_or_else(|| GameError::UpgradeUnavailable {
                hotel: hotel.to_string(),
                upgrade: upgrade.to_string(),
            })?;

        target.upgrade(tier)?;
        builder.change_money(-i64::from(offer.cost));

        info!(
            "{} built {} on {} for {}, now {} stars",
            player,
            upgrade,
            hotel,
            offer.cost,
            target.get_star_level()
        );
        builder.notify(&format!("{} is now a {} star hotel", hotel, target.get_star_level()));
        Ok(offer.cost)
    }

    /// Puts the hotel's entrance on a cell next to it.
    pub fn add_entrance(&mut self, hotel: &str, cell_id: i32) -> GameResult<()> {
        self.get_hotel(hotel)?;
        let cell = self.board.find_cell_mut(cell_id)?;
        if !cell.is_near(hotel) {
            return Err(GameError::NotNearHotel {
                hotel: hotel.to_string(),
                cell: cell_id,
            });
        }
        cell.add_entrance(hotel);
        info!("{} has an entrance on cell {}", hotel, cell_id);
        Ok(())
    }

    /// Drains the messages queued for a player since the last call.
    pub fn take_messages(&mut self, player: &str) -> GameResult<Vec<String>> {
        Ok(self.get_player_mut(player)?.take_messages())
    }

    pub fn entrances_of(&self, hotel: &str) -> Vec<i32> {
        self.board
            .cells()
            .iter()
            .filter(|cell| cell.get_entrance() == Some(hotel))
            .map(|cell| cell.get_id())
            .collect()
    }

    /// Rolls a die and walks the player forward. Returns the roll and the landing cell id.
    pub fn roll_and_move<R: Rng>(&mut self, player: &str, rng: &mut R) -> GameResult<(i32, i32)> {
        let roll = rng.gen_range(1..=DIE_FACES);
        let landed = self.board.move_player(player, None, roll)?.get_id();
        if let Ok(mover) = self.get_player_mut(player) {
            mover.notify(&format!("Rolled {} and landed on cell {}", roll, landed));
        }
        Ok((roll, landed))
    }
}

impl fmt::Display for HotelsGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game State:")?;
        writeln!(f)?;
        for player in &self.players {
            let position = self
                .board
                .find_player_position(player.get_name())
                .map(|cell| cell.get_id().to_string())
                .unwrap_or_else(|_| "-".to_string());
            writeln!(f, "{} @ {}", player, position)?;
        }
        Ok(())
    }
}
