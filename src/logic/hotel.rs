use std::fmt;
use std::hash::{Hash, Hasher};

use super::config::{HotelConfig, UpgradeCost};
use super::error::{GameError, GameResult};
use super::hotels_constants::MAX_NIGHTS;

/// An upgrade the owner may still buy.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct UpgradeOffer {
    pub tier: usize,
    pub name: String,
    pub cost: u32,
}

/// A hotel property. Equality and hashing only look at the name.
#[derive(Debug, Clone)]
pub struct Hotel {
    name: String,
    config: HotelConfig,
    // player name, the game owns the player
    owner: Option<String>,
    star_level: u8,
    last_upgrade: Option<usize>,
}

impl Hotel {
    pub fn new(name: &str, config: HotelConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
            owner: None,
            star_level: 0,
            last_upgrade: None,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn set_owner(&mut self, player: &str) {
        self.owner = Some(player.to_string());
    }

    pub fn free_property(&mut self) {
        self.owner = None;
    }

    pub fn get_star_level(&self) -> u8 {
        self.star_level
    }

    /// Tier of the last upgrade built, `None` while nothing has been built.
    pub fn get_last_upgrade(&self) -> Option<usize> {
        self.last_upgrade
    }

    pub fn get_last_upgrade_name(&self) -> Option<&str> {
        self.last_upgrade
            .map(|tier| self.config.upgrades[tier].name.as_str())
    }

    /// Records `tier` as built and takes its star level. The tier is not checked
    /// against the previous one nor against its cost; that is the caller's rule.
    pub fn upgrade(&mut self, tier: usize) -> GameResult<()> {
        let step = self
            .config
            .upgrades
            .get(tier)
            .ok_or_else(|| GameError::UpgradeOutOfRange {
                hotel: self.name.clone(),
                tier,
            })?;

        self.star_level = step.stars;
        self.last_upgrade = Some(tier);
        Ok(())
    }

    pub fn upgrade_tier(&self, upgrade: &str) -> GameResult<usize> {
        self.config
            .upgrades
            .iter()
            .position(|step| step.name == upgrade)
            .ok_or_else(|| GameError::UnknownUpgrade {
                hotel: self.name.clone(),
                upgrade: upgrade.to_string(),
            })
    }

    pub fn get_land_cost(&self) -> u32 {
        self.config.land_cost
    }

    pub fn get_expropriation_price(&self) -> u32 {
        self.config.expropriation_price
    }

    pub fn get_entrance_cost(&self) -> u32 {
        self.config.entrance_cost
    }

    /// Upgrades past the last one built, skipping those this hotel can never have.
    pub fn get_upgrade_costs(&self) -> Vec<UpgradeOffer> {
        let first = self.last_upgrade.map_or(0, |tier| tier + 1);
        self.config
            .upgrades
            .iter()
            .enumerate()
            .skip(first)
            .filter_map(|(tier, step)| match step.cost {
                UpgradeCost::Available(cost) => Some(UpgradeOffer {
                    tier,
                    name: step.name.clone(),
                    cost,
                }),
                UpgradeCost::Unavailable => None,
            })
            .collect()
    }

    /// Row = star level - 1, column = nights - 1.
    pub fn get_payments(&self) -> &[Vec<u32>] {
        &self.config.payments
    }

    /// What a guest pays for `nights` at the current star level.
    /// `None` while the hotel has no stars or for a night count off the table.
    pub fn payment(&self, nights: usize) -> Option<u32> {
        if self.star_level == 0 || nights == 0 || nights > MAX_NIGHTS {
            return None;
        }
        self.config
            .payments
            .get(usize::from(self.star_level) - 1)
            .and_then(|row| row.get(nights - 1))
            .copied()
    }
}

impl PartialEq for Hotel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Hotel {}

impl Hash for Hotel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "\tOwner: {}", self.owner.as_deref().unwrap_or("none"))?;
        writeln!(f, "\t{} star", self.star_level)?;
        writeln!(
            f,
            "\tLast upgrade: {}",
            self.get_last_upgrade_name().unwrap_or("none")
        )?;
        writeln!(f, "\tLand cost: {}", self.config.land_cost)?;
        writeln!(f, "\tExpropriation price: {}", self.config.expropriation_price)?;
        writeln!(f, "\tEntrance cost: {}", self.config.entrance_cost)?;
        writeln!(f, "\tCosts:")?;
        for step in &self.config.upgrades {
            match step.cost {
                UpgradeCost::Available(cost) => writeln!(f, "\t\t{}: {}", step.name, cost)?,
                UpgradeCost::Unavailable => writeln!(f, "\t\t{}: -", step.name)?,
            }
        }
        writeln!(f, "\tPayments:")?;
        write!(f, "\t\t")?;
        for nights in 1..=MAX_NIGHTS {
            write!(f, "{:>9}", format!("{} night", nights))?;
        }
        writeln!(f)?;
        for (row, payments) in self.config.payments.iter().enumerate() {
            write!(f, "\t{}*\t", row + 1)?;
            for payment in payments {
                write!(f, "{:>9}", payment)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
