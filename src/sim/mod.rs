//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (20 Hz)
//! - Seeded RNG only
//! - Stable iteration order (population order, index-ascending scans)
//! - No rendering or platform dependencies

pub mod ai;
pub mod camera;
pub mod collision;
pub mod consume;
pub mod movement;
pub mod spawn;
pub mod state;
pub mod tick;

pub use ai::{Steering, autopilot_direction, choose_steering, update_ais};
pub use camera::{Camera, Sprite, SpriteKind, camera_anchor};
pub use collision::{EatResult, circles_overlap, size_contest};
pub use consume::{ais_eat_food, players_eat_food, players_vs_ais};
pub use movement::{eject_mass, merge_players, move_players, split_players};
pub use state::{
    AiOpponent, EntityId, FoodDot, FoodKind, GamePhase, GameState, Particle, PlayerCircle,
    MAX_PARTICLES, PALETTE, PLAYER_COLOR,
};
pub use tick::{TickInput, tick};
