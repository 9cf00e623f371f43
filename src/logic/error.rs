use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum GameError {
    #[error("cell {0} is off the board")]
    OutOfRange(i32),

    #[error("player {0} not found")]
    PlayerNotFound(String),

    #[error("hotel {0} not found")]
    HotelNotFound(String),

    #[error("{hotel} has no upgrade tier {tier}")]
    UpgradeOutOfRange { hotel: String, tier: usize },

    #[error("{hotel} has no upgrade named {upgrade}")]
    UnknownUpgrade { hotel: String, upgrade: String },

    #[error("{upgrade} cannot be built on {hotel} right now")]
    UpgradeUnavailable { hotel: String, upgrade: String },

    #[error("{player} does not own {hotel}")]
    NotOwner { hotel: String, player: String },

    #[error("{hotel} is already owned by {owner}")]
    AlreadyOwned { hotel: String, owner: String },

    #[error("cell {cell} is not next to {hotel}")]
    NotNearHotel { hotel: String, cell: i32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no configuration for cell {0}")]
    MissingCell(i32),

    #[error("cell {cell} lists unknown hotel {hotel}")]
    UnknownHotelNear { cell: i32, hotel: String },

    #[error("{hotel} prices unknown upgrade {upgrade}")]
    UnknownUpgradeType { hotel: String, upgrade: String },

    #[error("{hotel} has invalid cost {value:?} for {upgrade}")]
    InvalidCost {
        hotel: String,
        upgrade: String,
        value: String,
    },

    #[error("{hotel} star table has {got} entries, expected {expected}")]
    StarTableLength {
        hotel: String,
        expected: usize,
        got: usize,
    },

    #[error("{hotel} payment row {row} has {got} columns")]
    PaymentRowLength { hotel: String, row: usize, got: usize },

    #[error("{hotel} has no payment row for {star} stars")]
    MissingPaymentRow { hotel: String, star: u8 },

    #[error("expected {expected} players, got {got}")]
    PlayerCountMismatch { expected: usize, got: usize },

    #[error("player {0} is declared twice")]
    DuplicatePlayer(String),
}

pub type GameResult<T> = Result<T, GameError>;
