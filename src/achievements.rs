//! Achievements unlocked by lifetime stat thresholds
//!
//! Progress is read from [`PlayerStats`] after each game. Persisted as the
//! `playerAchievements` blob.

use serde::{Deserialize, Serialize};

use crate::stats::PlayerStats;

/// Which stat an achievement tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    GamesPlayed,
    BestScore,
    ObjectsConsumed,
    LargestSize,
    MinutesPlayed,
}

impl Metric {
    pub fn read(self, stats: &PlayerStats) -> u64 {
        match self {
            Metric::GamesPlayed => stats.games_played as u64,
            Metric::BestScore => stats.best_score,
            Metric::ObjectsConsumed => stats.total_objects_consumed,
            Metric::LargestSize => stats.largest_size.floor() as u64,
            Metric::MinutesPlayed => stats.total_time_played,
        }
    }
}

/// Static description of an achievement
#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    pub requirement: u64,
    /// Coins credited on unlock
    pub reward: u64,
}

/// Every achievement, in display order
pub const CATALOGUE: [AchievementDef; 8] = [
    AchievementDef {
        id: "first_game",
        name: "First Steps",
        description: "Play your first game",
        metric: Metric::GamesPlayed,
        requirement: 1,
        reward: 25,
    },
    AchievementDef {
        id: "score_1k",
        name: "Rising Star",
        description: "Score 1,000 points in a single game",
        metric: Metric::BestScore,
        requirement: 1000,
        reward: 50,
    },
    AchievementDef {
        id: "score_10k",
        name: "High Achiever",
        description: "Score 10,000 points in a single game",
        metric: Metric::BestScore,
        requirement: 10000,
        reward: 100,
    },
    AchievementDef {
        id: "consume_100",
        name: "Hungry Hungry",
        description: "Consume 100 objects total",
        metric: Metric::ObjectsConsumed,
        requirement: 100,
        reward: 75,
    },
    AchievementDef {
        id: "consume_500",
        name: "Voracious",
        description: "Consume 500 objects total",
        metric: Metric::ObjectsConsumed,
        requirement: 500,
        reward: 150,
    },
    AchievementDef {
        id: "size_100",
        name: "Giant",
        description: "Reach size 100 in a single game",
        metric: Metric::LargestSize,
        requirement: 100,
        reward: 200,
    },
    AchievementDef {
        id: "games_10",
        name: "Dedicated Player",
        description: "Play 10 games",
        metric: Metric::GamesPlayed,
        requirement: 10,
        reward: 100,
    },
    AchievementDef {
        id: "time_60",
        name: "Marathon Runner",
        description: "Play for 60 minutes total",
        metric: Metric::MinutesPlayed,
        requirement: 60,
        reward: 250,
    },
];

/// Persisted progress for one achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub id: String,
    #[serde(default)]
    pub progress: u64,
    #[serde(default)]
    pub completed: bool,
}

impl AchievementProgress {
    pub fn def(&self) -> Option<&'static AchievementDef> {
        CATALOGUE.iter().find(|d| d.id == self.id)
    }

    /// Percentage towards the requirement, capped at 100
    pub fn percent(&self) -> f32 {
        match self.def() {
            Some(def) => (self.progress as f32 / def.requirement as f32 * 100.0).min(100.0),
            None => 0.0,
        }
    }
}

/// Progress for every achievement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Achievements {
    pub entries: Vec<AchievementProgress>,
}

impl Default for Achievements {
    fn default() -> Self {
        Self {
            entries: CATALOGUE
                .iter()
                .map(|d| AchievementProgress {
                    id: d.id.to_string(),
                    progress: 0,
                    completed: false,
                })
                .collect(),
        }
    }
}

impl Achievements {
    /// Merge saved progress into the catalogue by id; unknown ids are dropped
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let saved: Vec<AchievementProgress> = serde_json::from_str(json)?;
        let mut all = Self::default();
        for entry in &mut all.entries {
            if let Some(s) = saved.iter().find(|s| s.id == entry.id) {
                entry.progress = s.progress;
                entry.completed = s.completed;
            }
        }
        Ok(all)
    }

    /// Update progress from stats. Returns newly completed achievements.
    ///
    /// Completion is sticky: an unlocked achievement stays unlocked.
    pub fn refresh(&mut self, stats: &PlayerStats) -> Vec<&'static AchievementDef> {
        let mut unlocked = Vec::new();
        for entry in &mut self.entries {
            let Some(def) = CATALOGUE.iter().find(|d| d.id == entry.id) else {
                continue;
            };
            entry.progress = def.metric.read(stats);
            if !entry.completed && entry.progress >= def.requirement {
                entry.completed = true;
                log::info!("Achievement unlocked: {} (+{})", def.name, def.reward);
                unlocked.push(def);
            }
        }
        unlocked
    }

    pub fn completed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.completed).count()
    }
}
