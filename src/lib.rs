//! Blob Arena - A grow-by-consuming arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, steering, consumption, camera)
//! - `game`: Session driver (fixed timestep, pause, game over, reporting)
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `persistence`: Player profile saved as key/value JSON blobs
//! - `tuning`: Data-driven game balance

pub mod achievements;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod tuning;
pub mod upgrades;

pub use game::Game;
pub use persistence::Profile;
pub use settings::{QualityPreset, Settings};
pub use stats::{GameSummary, PlayerStats};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Side length of the square world
    pub const WORLD_SIZE: f32 = 2000.0;

    /// Fixed simulation rate (20 Hz)
    pub const TICK_RATE: u32 = 20;
    /// Tick duration in simulation milliseconds
    pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;
    /// Tick duration in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Particle lifetime (ms)
    pub const PARTICLE_LIFETIME_MS: u64 = 600;
    /// Particle scale at the end of its life
    pub const PARTICLE_END_SCALE: f32 = 0.3;
}

/// Center of the world
#[inline]
pub fn world_center() -> Vec2 {
    Vec2::splat(consts::WORLD_SIZE / 2.0)
}

/// Clamp a center position so an entity of `size` stays fully inside the world.
///
/// Uses `max`/`min` rather than `clamp` so oversized entities cannot panic.
#[inline]
pub fn clamp_to_world(pos: Vec2, size: f32) -> Vec2 {
    let half = size / 2.0;
    let hi = consts::WORLD_SIZE - half;
    Vec2::new(pos.x.max(half).min(hi), pos.y.max(half).min(hi))
}

/// Unit vector for a direction, falling back to +x for a zero input.
///
/// Matches the bearing of `atan2(0, 0)`.
#[inline]
pub fn direction_or_x(dir: Vec2) -> Vec2 {
    let n = dir.normalize_or_zero();
    if n == Vec2::ZERO { Vec2::X } else { n }
}
