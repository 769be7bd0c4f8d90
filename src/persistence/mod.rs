//! Player profile persistence
//!
//! The profile is four independent JSON blobs in a [`KeyValueStore`]:
//! - `playerStats`: lifetime [`PlayerStats`]
//! - `playerCoins`: wallet balance
//! - `playerUpgrades`: upgrade levels, merged by id on load
//! - `playerAchievements`: achievement progress, merged by id on load
//!
//! Storage faults never reach gameplay: a blob that can't be read falls back
//! to its default and a failed write is logged.

use crate::achievements::{AchievementDef, Achievements};
use crate::platform::{KeyValueStore, StorageError};
use crate::settings::Settings;
use crate::stats::{GameSummary, PlayerStats};
use crate::upgrades::{PurchaseError, UpgradeKind, UpgradeShop};

pub const STATS_KEY: &str = "playerStats";
pub const COINS_KEY: &str = "playerCoins";
pub const UPGRADES_KEY: &str = "playerUpgrades";
pub const ACHIEVEMENTS_KEY: &str = "playerAchievements";

/// What recording a finished game produced
#[derive(Debug, Clone, Default)]
pub struct GameReward {
    /// Coins from score
    pub coins_earned: u64,
    /// Achievements completed by this game
    pub unlocked: Vec<&'static AchievementDef>,
}

impl GameReward {
    /// Coins from score plus achievement rewards
    pub fn total_coins(&self) -> u64 {
        self.coins_earned + self.unlocked.iter().map(|a| a.reward).sum::<u64>()
    }
}

/// Everything persisted about the player
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub stats: PlayerStats,
    pub coins: u64,
    pub upgrades: UpgradeShop,
    pub achievements: Achievements,
}

impl Profile {
    /// Load every blob, substituting defaults for missing or unreadable ones
    pub fn load(store: &impl KeyValueStore) -> Self {
        let stats = or_default(STATS_KEY, store.load_json(STATS_KEY));
        let coins = or_default(COINS_KEY, store.load_json(COINS_KEY));
        let upgrades = or_default(
            UPGRADES_KEY,
            read_with(store, UPGRADES_KEY, UpgradeShop::from_json),
        );
        let achievements = or_default(
            ACHIEVEMENTS_KEY,
            read_with(store, ACHIEVEMENTS_KEY, Achievements::from_json),
        );

        let profile = Self {
            stats,
            coins,
            upgrades,
            achievements,
        };
        log::info!(
            "Profile loaded: {} games, {} coins",
            profile.stats.games_played,
            profile.coins
        );
        profile
    }

    /// Write every blob. Failures are logged, not returned.
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let results = [
            (STATS_KEY, store.save_json(STATS_KEY, &self.stats)),
            (COINS_KEY, store.save_json(COINS_KEY, &self.coins)),
            (UPGRADES_KEY, store.save_json(UPGRADES_KEY, &self.upgrades)),
            (
                ACHIEVEMENTS_KEY,
                store.save_json(ACHIEVEMENTS_KEY, &self.achievements),
            ),
        ];
        for (key, result) in results {
            if let Err(e) = result {
                log::error!("Failed to save {key}: {e}");
            }
        }
    }

    /// Fold a finished game into the profile and persist it.
    ///
    /// Score coins go to both the wallet and `totalCoinsEarned`; achievement
    /// rewards go to the wallet only.
    pub fn record_game(
        &mut self,
        summary: &GameSummary,
        store: &mut impl KeyValueStore,
    ) -> GameReward {
        let coins_earned = self.stats.record_game(summary);
        self.coins += coins_earned;

        let unlocked = self.achievements.refresh(&self.stats);
        self.coins += unlocked.iter().map(|a| a.reward).sum::<u64>();

        log::info!(
            "Game recorded: score {}, +{} coins, {} achievement(s)",
            summary.score,
            coins_earned,
            unlocked.len()
        );
        self.save(store);

        GameReward {
            coins_earned,
            unlocked,
        }
    }

    /// Buy the next level of an upgrade and persist the result
    pub fn purchase(
        &mut self,
        kind: UpgradeKind,
        store: &mut impl KeyValueStore,
    ) -> Result<u32, PurchaseError> {
        let level = self.upgrades.purchase(kind, &mut self.coins)?;
        self.save(store);
        Ok(level)
    }
}

/// Load settings, falling back to defaults
pub fn load_settings(store: &impl KeyValueStore) -> Settings {
    or_default(Settings::STORAGE_KEY, store.load_json(Settings::STORAGE_KEY))
}

pub fn save_settings(settings: &Settings, store: &mut impl KeyValueStore) {
    if let Err(e) = store.save_json(Settings::STORAGE_KEY, settings) {
        log::error!("Failed to save settings: {e}");
    }
}

/// Read a raw blob and parse it with a custom loader
fn read_with<T>(
    store: &impl KeyValueStore,
    key: &str,
    parse: fn(&str) -> Result<T, serde_json::Error>,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(json) => Ok(Some(parse(&json)?)),
        None => Ok(None),
    }
}

fn or_default<T: Default>(key: &str, loaded: Result<Option<T>, StorageError>) -> T {
    match loaded {
        Ok(Some(v)) => v,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Discarding unreadable {key}: {e}");
            T::default()
        }
    }
}
