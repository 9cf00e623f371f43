pub mod board;
pub mod cell;
pub mod config;
pub mod error;
pub mod hotel;
pub mod hotels_constants;
pub mod hotels_game;
pub mod player;
