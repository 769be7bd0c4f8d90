//! Lifetime player statistics
//!
//! Aggregates the summary of every finished game. Persisted as the
//! `playerStats` JSON blob.

use serde::{Deserialize, Serialize};

/// Coins are earned at one per this many points
pub const POINTS_PER_COIN: u64 = 10;

/// What a finished game reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Final score
    pub score: u64,
    /// Regular food dots eaten
    pub objects_consumed: u32,
    /// Total player mass when the game ended
    pub final_size: f32,
    /// Whole minutes played (floored)
    pub minutes_played: u32,
}

impl GameSummary {
    /// Coins this game is worth
    pub fn coins_earned(&self) -> u64 {
        self.score / POINTS_PER_COIN
    }
}

/// Cumulative statistics across all games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_score: u64,
    pub best_score: u64,
    pub games_played: u32,
    pub total_objects_consumed: u64,
    /// Minutes
    pub total_time_played: u64,
    pub largest_size: f32,
    pub total_coins_earned: u64,
    pub average_score: u64,
}

impl PlayerStats {
    /// Fold a finished game into the totals. Returns the coins it earned.
    pub fn record_game(&mut self, game: &GameSummary) -> u64 {
        let coins = game.coins_earned();

        self.total_score += game.score;
        self.best_score = self.best_score.max(game.score);
        self.games_played += 1;
        self.total_objects_consumed += game.objects_consumed as u64;
        self.total_time_played += game.minutes_played as u64;
        self.largest_size = self.largest_size.max(game.final_size);
        self.total_coins_earned += coins;
        self.average_score = self.total_score / self.games_played as u64;

        coins
    }
}

/// Format minutes as "1h 5m" or "5m"
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Format seconds as a game clock ("m:ss")
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
