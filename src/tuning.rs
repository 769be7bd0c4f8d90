//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-balanced from JSON
//! without touching the simulation. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    // === Player ===
    /// Size of the single circle a game starts with
    pub initial_player_size: f32,
    /// Base speed scale shared by players and AI
    pub base_speed: f32,
    /// Player speed = base * (initial / size) * factor + bonus
    pub player_speed_factor: f32,
    pub player_speed_bonus: f32,
    /// Player circle cap after splits
    pub max_player_circles: usize,

    // === Split / merge ===
    pub min_size_to_split: f32,
    /// Child offset = parent size * factor
    pub split_distance_factor: f32,
    /// Parent recoil = child offset / divisor
    pub split_recoil_divisor: f32,
    /// Cooldown after a split or merge before circles may merge (ms)
    pub merge_delay_ms: u64,
    /// Circles merge when distance < (half-size sum) * overlap
    pub merge_overlap: f32,

    // === Ejection ===
    /// Circles must be strictly larger than this to eject
    pub min_size_to_eject: f32,
    pub ejected_mass_size: f32,
    pub ejected_mass_cost: f32,
    pub max_ejections_per_press: usize,
    /// Circles at or below this size are removed
    pub min_viable_size: f32,

    // === Food ===
    pub food_count: usize,
    pub food_min_size: f32,
    pub food_size_range: f32,
    /// Growth = dot size * ratio
    pub food_growth_ratio: f32,

    // === AI ===
    pub ai_count: usize,
    /// AI spawn size = min_ratio * initial_player_size + rand * range
    pub ai_min_size_ratio: f32,
    pub ai_size_range: f32,
    pub ai_speed_factor: f32,
    pub ai_speed_bonus: f32,
    /// Size ratio needed to count as threat or prey
    pub ai_threat_ratio: f32,
    pub ai_flee_radius: f32,
    pub ai_pursue_radius: f32,
    pub ai_flee_distance: f32,
    pub ai_wander_ms: u64,

    // === Player vs AI ===
    /// Size ratio required for one side to eat the other
    pub eat_ratio: f32,
    /// Player growth = eaten AI size * ratio
    pub ai_growth_ratio: f32,

    // === Particles ===
    pub food_particles: usize,
    pub ai_eaten_particles: usize,
    pub player_eaten_particles: usize,
    /// Particle spawn jitter (+/- half on each axis)
    pub particle_spread: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_player_size: 30.0,
            base_speed: 1.5,
            player_speed_factor: 2.5,
            player_speed_bonus: 0.5,
            max_player_circles: 4,

            min_size_to_split: 50.0,
            split_distance_factor: 1.5,
            split_recoil_divisor: 4.0,
            merge_delay_ms: 5000,
            merge_overlap: 0.8,

            min_size_to_eject: 20.0,
            ejected_mass_size: 10.0,
            ejected_mass_cost: 5.0,
            max_ejections_per_press: 5,
            min_viable_size: 5.0,

            food_count: 150,
            food_min_size: 4.0,
            food_size_range: 6.0,
            food_growth_ratio: 0.1,

            ai_count: 5,
            ai_min_size_ratio: 0.5,
            ai_size_range: 20.0,
            ai_speed_factor: 1.5,
            ai_speed_bonus: 0.3,
            ai_threat_ratio: 1.2,
            ai_flee_radius: 200.0,
            ai_pursue_radius: 250.0,
            ai_flee_distance: 300.0,
            ai_wander_ms: 3000,

            eat_ratio: 1.1,
            ai_growth_ratio: 0.25,

            food_particles: 3,
            ai_eaten_particles: 8,
            player_eaten_particles: 10,
            particle_spread: 20.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Per-tick speed of a player circle (smaller is faster)
    #[inline]
    pub fn player_speed(&self, size: f32) -> f32 {
        self.base_speed * (self.initial_player_size / size) * self.player_speed_factor
            + self.player_speed_bonus
    }

    /// Per-tick speed of an AI opponent (same shape as the player curve)
    #[inline]
    pub fn ai_speed(&self, size: f32) -> f32 {
        self.base_speed * (self.initial_player_size / size) * self.ai_speed_factor
            + self.ai_speed_bonus
    }
}
