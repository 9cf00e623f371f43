use core::fmt;
use std::hash::{Hash, Hasher};

use super::config::CellConfig;

/// A square of the board. Equality and hashing only look at the id.
#[derive(Debug, Clone)]
pub struct Cell {
    id: i32,
    cell_type: u8,
    hotels_near: Vec<String>,
    // name of the hotel whose entrance sits here; the game owns the hotel itself
    entrance: Option<String>,
    occupied: bool,
}

impl Cell {
    pub fn new(id: i32, config: &CellConfig) -> Self {
        Self {
            id,
            cell_type: config.cell_type,
            hotels_near: config.hotels_near.clone(),
            entrance: None,
            occupied: false,
        }
    }

    pub fn get_id(&self) -> i32 {
        self.id
    }

    pub fn get_type(&self) -> u8 {
        self.cell_type
    }

    pub fn get_hotels_near(&self) -> &[String] {
        &self.hotels_near
    }

    pub fn is_near(&self, hotel: &str) -> bool {
        self.hotels_near.iter().any(|name| name == hotel)
    }

    pub fn get_entrance(&self) -> Option<&str> {
        self.entrance.as_deref()
    }

    /// Replaces any previous entrance. Does not check `hotels_near`.
    pub fn add_entrance(&mut self, hotel: &str) {
        self.entrance = Some(hotel.to_string());
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn occupy(&mut self) {
        self.occupied = true;
    }

    pub fn free(&mut self) {
        self.occupied = false;
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{:02}|", self.id)
    }
}
