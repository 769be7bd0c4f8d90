//! Upgrade shop
//!
//! Six upgrades with an exponential price curve and independent level caps.
//! Levels are persisted as the `playerUpgrades` blob. The shop does not feed
//! back into the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Price growth per level
pub const PRICE_GROWTH: f64 = 1.5;

/// Upgrade types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeKind {
    Speed,
    StartSize,
    CoinBonus,
    Magnetism,
    Shield,
    Experience,
}

impl UpgradeKind {
    /// Every upgrade, in shop order
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::Speed,
        UpgradeKind::StartSize,
        UpgradeKind::CoinBonus,
        UpgradeKind::Magnetism,
        UpgradeKind::Shield,
        UpgradeKind::Experience,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UpgradeKind::Speed => "Speed Boost",
            UpgradeKind::StartSize => "Starting Size",
            UpgradeKind::CoinBonus => "Coin Multiplier",
            UpgradeKind::Magnetism => "Magnetism",
            UpgradeKind::Shield => "Protection",
            UpgradeKind::Experience => "XP Multiplier",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UpgradeKind::Speed => "Move faster across the arena",
            UpgradeKind::StartSize => "Begin each game larger",
            UpgradeKind::CoinBonus => "Earn more coins from objects",
            UpgradeKind::Magnetism => "Attract nearby objects",
            UpgradeKind::Shield => "Resistance to larger objects",
            UpgradeKind::Experience => "Level up faster",
        }
    }

    pub fn benefit(self) -> &'static str {
        match self {
            UpgradeKind::Speed => "+10% movement speed",
            UpgradeKind::StartSize => "+5 starting size",
            UpgradeKind::CoinBonus => "+15% coin rewards",
            UpgradeKind::Magnetism => "Larger attraction radius",
            UpgradeKind::Shield => "Survive bigger threats",
            UpgradeKind::Experience => "+20% experience gain",
        }
    }

    pub fn base_price(self) -> u64 {
        match self {
            UpgradeKind::Speed => 50,
            UpgradeKind::StartSize => 100,
            UpgradeKind::CoinBonus => 75,
            UpgradeKind::Magnetism => 200,
            UpgradeKind::Shield => 300,
            UpgradeKind::Experience => 150,
        }
    }

    pub fn max_level(self) -> u32 {
        match self {
            UpgradeKind::Speed => 10,
            UpgradeKind::StartSize => 8,
            UpgradeKind::CoinBonus => 15,
            UpgradeKind::Magnetism => 5,
            UpgradeKind::Shield => 3,
            UpgradeKind::Experience => 12,
        }
    }
}

/// `floor(base * 1.5^level)`
pub fn price(base_price: u64, level: u32) -> u64 {
    (base_price as f64 * PRICE_GROWTH.powi(level as i32)).floor() as u64
}

/// Why a purchase was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("{0:?} is not in the shop")]
    NotAvailable(UpgradeKind),
    #[error("{0:?} is already at max level")]
    MaxLevel(UpgradeKind),
    #[error("need {price} coins, have {available}")]
    InsufficientCoins { price: u64, available: u64 },
}

/// One upgrade and its purchased level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: UpgradeKind,
    pub level: u32,
}

impl Upgrade {
    pub fn is_max_level(&self) -> bool {
        self.level >= self.id.max_level()
    }

    /// Price of the next level
    pub fn next_price(&self) -> u64 {
        price(self.id.base_price(), self.level)
    }
}

/// Saved entry; ids the shop doesn't know are tolerated and dropped
#[derive(Debug, Deserialize)]
struct SavedUpgrade {
    id: String,
    #[serde(default)]
    level: u32,
}

/// All upgrades with their levels
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UpgradeShop {
    pub upgrades: Vec<Upgrade>,
}

impl Default for UpgradeShop {
    fn default() -> Self {
        Self {
            upgrades: UpgradeKind::ALL
                .iter()
                .map(|&id| Upgrade { id, level: 0 })
                .collect(),
        }
    }
}

impl UpgradeShop {
    /// Merge saved levels into the catalogue by id.
    ///
    /// Unknown ids are ignored, missing ones stay at level 0 and levels are
    /// capped at each upgrade's max.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let saved: Vec<SavedUpgrade> = serde_json::from_str(json)?;
        let mut shop = Self::default();
        for entry in saved {
            let kind: Result<UpgradeKind, _> =
                serde_json::from_value(serde_json::Value::String(entry.id.clone()));
            match kind {
                Ok(kind) => {
                    if let Some(u) = shop.upgrades.iter_mut().find(|u| u.id == kind) {
                        u.level = entry.level.min(kind.max_level());
                    }
                }
                Err(_) => log::warn!("Ignoring unknown upgrade '{}'", entry.id),
            }
        }
        Ok(shop)
    }

    pub fn get(&self, kind: UpgradeKind) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == kind)
    }

    pub fn level(&self, kind: UpgradeKind) -> u32 {
        self.get(kind).map(|u| u.level).unwrap_or(0)
    }

    /// Whether `coins` can buy the next level of `kind`
    pub fn can_afford(&self, kind: UpgradeKind, coins: u64) -> bool {
        self.get(kind)
            .is_some_and(|u| !u.is_max_level() && coins >= u.next_price())
    }

    /// Buy the next level of `kind`, deducting its price from `coins`.
    /// Returns the new level.
    pub fn purchase(&mut self, kind: UpgradeKind, coins: &mut u64) -> Result<u32, PurchaseError> {
        let upgrade = self
            .upgrades
            .iter_mut()
            .find(|u| u.id == kind)
            .ok_or(PurchaseError::NotAvailable(kind))?;

        if upgrade.is_max_level() {
            return Err(PurchaseError::MaxLevel(kind));
        }
        let price = upgrade.next_price();
        if *coins < price {
            return Err(PurchaseError::InsufficientCoins {
                price,
                available: *coins,
            });
        }

        *coins -= price;
        upgrade.level += 1;
        log::info!("{} is now level {}", kind.name(), upgrade.level);
        Ok(upgrade.level)
    }
}
