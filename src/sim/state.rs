//! Game state and core simulation types
//!
//! Everything one game session mutates lives in [`GameState`]. Time is
//! counted in ticks so a seed plus an input sequence replays exactly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::world_center;

/// Entity identifier, unique within one game
pub type EntityId = u32;

/// Color of the player's circles (#00D4AA)
pub const PLAYER_COLOR: u32 = 0x00D4AA;

/// Palette shared by food and AI opponents
pub const PALETTE: [u32; 8] = [
    0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0x96CEB4, 0xFFEAA7, 0xDDA0DD, 0xF08080, 0x20B2AA,
];

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticking
    Playing,
    /// Suspended; time does not advance
    Paused,
    /// Last player circle was eaten
    GameOver,
}

/// One of the circles the player controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCircle {
    pub id: EntityId,
    pub pos: Vec2,
    /// Diameter; also drives speed and collision
    pub size: f32,
    pub color: u32,
    /// Simulation time (ms) after which this circle may merge
    pub merge_at_ms: u64,
}

impl PlayerCircle {
    pub fn new(id: EntityId, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            pos,
            size,
            color: PLAYER_COLOR,
            merge_at_ms: 0,
        }
    }

    /// Whether the merge cooldown has elapsed at `now_ms`
    #[inline]
    pub fn can_merge(&self, now_ms: u64) -> bool {
        self.merge_at_ms < now_ms
    }
}

/// A computer-controlled opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiOpponent {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
    /// Displacement applied on the last tick
    pub vel: Vec2,
    /// Current steering target (None until first chosen)
    pub target: Option<Vec2>,
    /// Simulation time (ms) the target last changed
    pub last_target_change_ms: u64,
}

/// Whether a food dot is regular food or mass ejected by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Regular,
    /// Grows the eater like food but never scores
    Ejected,
}

/// A food dot (regular food or ejected mass)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDot {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
    /// Score awarded when a player eats it
    pub points: u32,
    pub kind: FoodKind,
}

impl FoodDot {
    /// Regular food worth `floor(size)` points
    pub fn regular(id: EntityId, pos: Vec2, size: f32, color: u32) -> Self {
        Self {
            id,
            pos,
            size,
            color,
            points: size.floor() as u32,
            kind: FoodKind::Regular,
        }
    }

    /// Ejected mass, worth nothing
    pub fn ejected(id: EntityId, pos: Vec2, size: f32, color: u32) -> Self {
        Self {
            id,
            pos,
            size,
            color,
            points: 0,
            kind: FoodKind::Ejected,
        }
    }

    #[inline]
    pub fn is_ejected(&self) -> bool {
        self.kind == FoodKind::Ejected
    }
}

/// A particle for visual effects (never affects gameplay)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub color: u32,
    pub born_ms: u64,
}

impl Particle {
    /// Fraction of the lifetime elapsed, 0..=1
    #[inline]
    pub fn progress(&self, now_ms: u64) -> f32 {
        let age = now_ms.saturating_sub(self.born_ms) as f32;
        (age / PARTICLE_LIFETIME_MS as f32).min(1.0)
    }

    /// Fades from 1 to 0 over the lifetime
    pub fn opacity(&self, now_ms: u64) -> f32 {
        1.0 - self.progress(now_ms)
    }

    /// Shrinks from 1 to `PARTICLE_END_SCALE` over the lifetime
    pub fn scale(&self, now_ms: u64) -> f32 {
        1.0 - (1.0 - PARTICLE_END_SCALE) * self.progress(now_ms)
    }

    pub fn is_alive(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.born_ms) < PARTICLE_LIFETIME_MS
    }
}

/// Default particle cap when settings don't say otherwise
pub const MAX_PARTICLES: usize = 256;

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG (seeded from `seed`)
    pub rng: Pcg32,
    /// Balance values this run was started with
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Regular food dots eaten
    pub objects_consumed: u32,
    /// Size of the last circle at the moment it was eaten
    pub eliminated_mass: f32,
    /// Player circles in population order
    pub players: Vec<PlayerCircle>,
    pub ais: Vec<AiOpponent>,
    pub food: Vec<FoodDot>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Particle cap from settings
    pub max_particles: usize,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a state with a single centered player circle and no AI or food
    pub fn empty(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            time_ticks: 0,
            phase: GamePhase::Playing,
            score: 0,
            objects_consumed: 0,
            eliminated_mass: 0.0,
            players: Vec::new(),
            ais: Vec::new(),
            food: Vec::new(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            next_id: 1,
        };

        let id = state.next_entity_id();
        let size = state.tuning.initial_player_size;
        state
            .players
            .push(PlayerCircle::new(id, world_center(), size));

        state
    }

    /// Create a new game: one centered circle, full food and AI populations
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::empty(seed, tuning);
        state.refill_food();
        state.refill_ais();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current simulation time in milliseconds
    #[inline]
    pub fn time_ms(&self) -> u64 {
        self.time_ticks * TICK_MS
    }

    /// Whole minutes of simulated play
    pub fn minutes_played(&self) -> u32 {
        (self.time_ms() / 60_000) as u32
    }

    /// Sum of all player circle sizes
    pub fn total_mass(&self) -> f32 {
        self.players.iter().map(|p| p.size).sum()
    }

    /// Player circle the camera follows: largest, first on ties
    pub fn largest_player(&self) -> Option<&PlayerCircle> {
        self.players
            .iter()
            .fold(None, |best: Option<&PlayerCircle>, c| match best {
                Some(b) if c.size <= b.size => Some(b),
                _ => Some(c),
            })
    }

    /// Whether a split would do anything right now
    pub fn can_split(&self) -> bool {
        self.players.len() < self.tuning.max_player_circles
            && self
                .players
                .iter()
                .any(|c| c.size >= self.tuning.min_size_to_split)
    }

    /// Whether an eject would do anything right now
    pub fn can_eject(&self) -> bool {
        self.players
            .iter()
            .any(|c| c.size > self.tuning.min_size_to_eject)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
