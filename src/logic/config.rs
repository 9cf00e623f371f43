use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::ConfigError;
use super::hotels_constants::{LAST_CELL_ID, MAX_NIGHTS, START_CELL_ID};

pub const CELL_JSON: &str = "cell.json";
pub const CELL_TYPE_JSON: &str = "cell_type.json";
pub const HOTEL_JSON: &str = "hotel.json";
pub const HOTEL_UPGRADE_TYPE_JSON: &str = "hotel_upgrade_type.json";
pub const GAME_JSON: &str = "game.json";

/// Static description of a single board cell.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct CellConfig {
    #[serde(rename = "type")]
    pub cell_type: u8,
    #[serde(default)]
    pub hotels_near: Vec<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UpgradeCost {
    Available(u32),
    /// The hotel can never build this upgrade.
    Unavailable,
}

impl UpgradeCost {
    pub fn amount(&self) -> Option<u32> {
        match self {
            UpgradeCost::Available(cost) => Some(*cost),
            UpgradeCost::Unavailable => None,
        }
    }

    fn from_json(hotel: &str, upgrade: &str, value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Null => Ok(UpgradeCost::Unavailable),
            Value::String(marker) if marker == "None" => Ok(UpgradeCost::Unavailable),
            Value::Number(number) => number
                .as_u64()
                .and_then(|cost| u32::try_from(cost).ok())
                .map(UpgradeCost::Available)
                .ok_or_else(|| ConfigError::InvalidCost {
                    hotel: hotel.to_string(),
                    upgrade: upgrade.to_string(),
                    value: value.to_string(),
                }),
            _ => Err(ConfigError::InvalidCost {
                hotel: hotel.to_string(),
                upgrade: upgrade.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// One step of a hotel's upgrade path. The tier is the position in the path.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct UpgradeStep {
    pub name: String,
    pub cost: UpgradeCost,
    pub stars: u8,
}

/// Everything a hotel needs from the configuration, already resolved against the
/// upgrade path so the hotel never sees the rest of the tree.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct HotelConfig {
    pub land_cost: u32,
    pub expropriation_price: u32,
    pub entrance_cost: u32,
    pub upgrades: Vec<UpgradeStep>,
    /// Row = star level - 1, column = nights - 1.
    pub payments: Vec<Vec<u32>>,
}

#[derive(Debug, Deserialize)]
struct RawHotelConfig {
    land_cost: u32,
    expropriation_price: u32,
    entrance_cost: u32,
    costs: BTreeMap<String, Value>,
    star_upgrade: Vec<u8>,
    payments: Vec<Vec<u32>>,
}

impl HotelConfig {
    fn resolve(
        name: &str,
        raw: RawHotelConfig,
        upgrade_types: &[String],
    ) -> Result<Self, ConfigError> {
        if let Some(unknown) = raw.costs.keys().find(|key| !upgrade_types.contains(*key)) {
            return Err(ConfigError::UnknownUpgradeType {
                hotel: name.to_string(),
                upgrade: unknown.clone(),
            });
        }

        if raw.star_upgrade.len() != upgrade_types.len() {
            return Err(ConfigError::StarTableLength {
                hotel: name.to_string(),
                expected: upgrade_types.len(),
                got: raw.star_upgrade.len(),
            });
        }

        for (row, payments) in raw.payments.iter().enumerate() {
            if payments.len() != MAX_NIGHTS {
                return Err(ConfigError::PaymentRowLength {
                    hotel: name.to_string(),
                    row,
                    got: payments.len(),
                });
            }
        }

        if let Some(star) = raw
            .star_upgrade
            .iter()
            .find(|star| usize::from(**star) > raw.payments.len())
        {
            return Err(ConfigError::MissingPaymentRow {
                hotel: name.to_string(),
                star: *star,
            });
        }

        let mut upgrades = Vec::with_capacity(upgrade_types.len());
        for (upgrade, stars) in upgrade_types.iter().zip(raw.star_upgrade.iter()) {
            // an upgrade missing from the cost table is never offered
            let cost = match raw.costs.get(upgrade) {
                Some(value) => UpgradeCost::from_json(name, upgrade, value)?,
                None => UpgradeCost::Unavailable,
            };
            upgrades.push(UpgradeStep {
                name: upgrade.clone(),
                cost,
                stars: *stars,
            });
        }

        Ok(HotelConfig {
            land_cost: raw.land_cost,
            expropriation_price: raw.expropriation_price,
            entrance_cost: raw.entrance_cost,
            upgrades,
            payments: raw.payments,
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct PlayerDeclaration {
    pub name: String,
    #[serde(default)]
    pub is_ai: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct GameSetup {
    pub n_players: usize,
    pub player_list: Vec<PlayerDeclaration>,
}

impl GameSetup {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.player_list.len() != self.n_players {
            return Err(ConfigError::PlayerCountMismatch {
                expected: self.n_players,
                got: self.player_list.len(),
            });
        }

        let mut seen = HashSet::new();
        for declaration in &self.player_list {
            if !seen.insert(declaration.name.as_str()) {
                return Err(ConfigError::DuplicatePlayer(declaration.name.clone()));
            }
        }
        Ok(())
    }
}

/// Raw text of every configuration file.
pub struct ConfigSources<'a> {
    pub cells: &'a str,
    pub cell_types: &'a str,
    pub hotels: &'a str,
    pub upgrade_types: &'a str,
    pub game: &'a str,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub cells: BTreeMap<i32, CellConfig>,
    pub cell_types: BTreeMap<u8, String>,
    pub hotels: BTreeMap<String, HotelConfig>,
    /// Upgrade names ordered by tier.
    pub upgrade_types: Vec<String>,
    pub game: GameSetup,
}

impl Config {
    pub fn load(dir: &Path) -> Result<Config, ConfigError> {
        info!("Loading configuration from {}", dir.display());

        let read = |file: &str| {
            let path = dir.join(file);
            fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })
        };

        let cells = read(CELL_JSON)?;
        let cell_types = read(CELL_TYPE_JSON)?;
        let hotels = read(HOTEL_JSON)?;
        let upgrade_types = read(HOTEL_UPGRADE_TYPE_JSON)?;
        let game = read(GAME_JSON)?;

        Self::parse(ConfigSources {
            cells: &cells,
            cell_types: &cell_types,
            hotels: &hotels,
            upgrade_types: &upgrade_types,
            game: &game,
        })
    }

    pub fn parse(sources: ConfigSources<'_>) -> Result<Config, ConfigError> {
        let cells: BTreeMap<i32, CellConfig> = parse_json(CELL_JSON, sources.cells)?;
        let cell_types: BTreeMap<u8, String> = parse_json(CELL_TYPE_JSON, sources.cell_types)?;
        let raw_hotels: BTreeMap<String, RawHotelConfig> = parse_json(HOTEL_JSON, sources.hotels)?;
        let raw_upgrades: BTreeMap<String, i32> =
            parse_json(HOTEL_UPGRADE_TYPE_JSON, sources.upgrade_types)?;
        let game: GameSetup = parse_json(GAME_JSON, sources.game)?;

        let upgrade_types = order_upgrade_types(raw_upgrades);

        let mut hotels = BTreeMap::new();
        for (name, raw) in raw_hotels {
            let hotel = HotelConfig::resolve(&name, raw, &upgrade_types)?;
            hotels.insert(name, hotel);
        }

        for id in START_CELL_ID..=LAST_CELL_ID {
            let cell = cells.get(&id).ok_or(ConfigError::MissingCell(id))?;
            if let Some(hotel) = cell.hotels_near.iter().find(|h| !hotels.contains_key(*h)) {
                return Err(ConfigError::UnknownHotelNear {
                    cell: id,
                    hotel: hotel.clone(),
                });
            }
        }

        game.validate()?;

        info!(
            "Configuration ready: {} cells, {} hotels, {} players",
            cells.len(),
            hotels.len(),
            game.player_list.len()
        );

        Ok(Config {
            cells,
            cell_types,
            hotels,
            upgrade_types,
            game,
        })
    }

    pub fn cell(&self, id: i32) -> Result<&CellConfig, ConfigError> {
        self.cells.get(&id).ok_or(ConfigError::MissingCell(id))
    }

    #[cfg(test)]
    pub fn bundled() -> Config {
        Self::parse(ConfigSources {
            cells: include_str!("../../configs/cell.json"),
            cell_types: include_str!("../../configs/cell_type.json"),
            hotels: include_str!("../../configs/hotel.json"),
            upgrade_types: include_str!("../../configs/hotel_upgrade_type.json"),
            game: include_str!("../../configs/game.json"),
        })
        .expect("bundled configuration is valid")
    }
}

fn parse_json<T: DeserializeOwned>(file: &str, text: &str) -> Result<T, ConfigError> {
    serde_json::from_str(text).map_err(|source| ConfigError::Json {
        path: PathBuf::from(file),
        source,
    })
}

// negative tiers are placeholders for "nothing built yet"
fn order_upgrade_types(raw: BTreeMap<String, i32>) -> Vec<String> {
    let mut tiers: Vec<(i32, String)> = raw
        .into_iter()
        .filter(|(_, tier)| *tier >= 0)
        .map(|(name, tier)| (tier, name))
        .collect();
    tiers.sort();
    tiers.into_iter().map(|(_, name)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADES: &str = r#"{"none": -1, "main_building": 0, "I_dependance": 1}"#;

    fn sources_with_hotels(hotels: &str) -> Result<Config, ConfigError> {
        Config::parse(ConfigSources {
            cells: include_str!("../../configs/cell.json"),
            cell_types: include_str!("../../configs/cell_type.json"),
            hotels,
            upgrade_types: include_str!("../../configs/hotel_upgrade_type.json"),
            game: include_str!("../../configs/game.json"),
        })
    }

    #[test]
    fn test_bundled_config() {
        let config = Config::bundled();
        assert_eq!(config.cells.len(), 32);
        assert_eq!(config.hotels.len(), 8);
        assert_eq!(config.upgrade_types.len(), 6);
        assert_eq!(config.upgrade_types[0], "main_building");
        assert_eq!(config.upgrade_types[5], "facilities");
        assert_eq!(config.game.player_list.len(), config.game.n_players);
        assert_eq!(config.cell(-1).unwrap().cell_type, 0);
        assert!(config.cell(31).is_err());
    }

    #[test]
    fn test_order_upgrade_types() {
        let raw: BTreeMap<String, i32> = serde_json::from_str(UPGRADES).unwrap();
        assert_eq!(
            order_upgrade_types(raw),
            vec!["main_building".to_string(), "I_dependance".to_string()]
        );
    }

    #[test]
    fn test_unavailable_sentinels() {
        let config = Config::bundled();

        // null in the file
        let boomerang = &config.hotels["Boomerang"];
        assert_eq!(boomerang.upgrades[3].cost, UpgradeCost::Unavailable);
        assert_eq!(boomerang.upgrades[0].cost, UpgradeCost::Available(3000));

        // "None" string in the file
        let waikiki = &config.hotels["Waikiki"];
        assert_eq!(waikiki.upgrades[3].cost, UpgradeCost::Unavailable);
        assert_eq!(waikiki.upgrades[4].cost.amount(), None);
    }

    #[test]
    fn test_invalid_cost() {
        let hotels = r#"{"Boomerang": {
            "land_cost": 1, "expropriation_price": 1, "entrance_cost": 1,
            "costs": {"main_building": "cheap"},
            "star_upgrade": [1, 1, 1, 1, 1, 1],
            "payments": [[1, 2, 3, 4, 5, 6]]
        }}"#;
        let result = sources_with_hotels(hotels);
        assert!(matches!(result, Err(ConfigError::InvalidCost { .. })));
    }

    #[test]
    fn test_star_table_must_cover_every_tier() {
        let hotels = r#"{"Boomerang": {
            "land_cost": 1, "expropriation_price": 1, "entrance_cost": 1,
            "costs": {"main_building": 10},
            "star_upgrade": [1, 2],
            "payments": [[1, 2, 3, 4, 5, 6], [1, 2, 3, 4, 5, 6]]
        }}"#;
        let result = sources_with_hotels(hotels);
        assert!(matches!(
            result,
            Err(ConfigError::StarTableLength { expected: 6, got: 2, .. })
        ));
    }

    #[test]
    fn test_missing_payment_row() {
        let hotels = r#"{"Boomerang": {
            "land_cost": 1, "expropriation_price": 1, "entrance_cost": 1,
            "costs": {"main_building": 10},
            "star_upgrade": [1, 2, 2, 2, 2, 3],
            "payments": [[1, 2, 3, 4, 5, 6], [1, 2, 3, 4, 5, 6]]
        }}"#;
        let result = sources_with_hotels(hotels);
        assert!(matches!(
            result,
            Err(ConfigError::MissingPaymentRow { star: 3, .. })
        ));
    }

    #[test]
    fn test_unknown_hotel_near_cell() {
        // only one hotel configured, the bundled cells reference the others
        let hotels = r#"{"Boomerang": {
            "land_cost": 1, "expropriation_price": 1, "entrance_cost": 1,
            "costs": {},
            "star_upgrade": [1, 1, 1, 1, 1, 1],
            "payments": [[1, 2, 3, 4, 5, 6]]
        }}"#;
        let result = sources_with_hotels(hotels);
        assert!(matches!(result, Err(ConfigError::UnknownHotelNear { .. })));
    }

    #[test]
    fn test_player_count_mismatch() {
        let game = r#"{"n_players": 3, "player_list": [{"name": "a"}, {"name": "b", "is_ai": true}]}"#;
        let setup: GameSetup = serde_json::from_str(game).unwrap();
        assert!(matches!(
            setup.validate(),
            Err(ConfigError::PlayerCountMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_duplicate_player() {
        let game = r#"{"n_players": 2, "player_list": [{"name": "a"}, {"name": "a"}]}"#;
        let setup: GameSetup = serde_json::from_str(game).unwrap();
        assert!(matches!(
            setup.validate(),
            Err(ConfigError::DuplicatePlayer(name)) if name == "a"
        ));
    }

    #[test]
    fn test_load_missing_directory() {
        let result = Config::load(Path::new("does/not/exist"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
