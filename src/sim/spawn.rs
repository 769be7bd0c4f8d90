//! Procedural spawning and population upkeep
//!
//! Food and AI populations are held at their tuned counts by spawning fresh
//! entities at uniformly random positions inside the world.

use glam::Vec2;
use rand::Rng;

use super::state::{AiOpponent, FoodDot, GameState, PALETTE, Particle};
use crate::clamp_to_world;
use crate::consts::WORLD_SIZE;

impl GameState {
    fn random_color(&mut self) -> u32 {
        PALETTE[self.rng.random_range(0..PALETTE.len())]
    }

    /// Uniform random point in the world
    pub fn random_world_point(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random::<f32>() * WORLD_SIZE,
            self.rng.random::<f32>() * WORLD_SIZE,
        )
    }

    /// Spawn a regular food dot at a random location
    pub fn random_food(&mut self) -> FoodDot {
        let size = self.rng.random::<f32>() * self.tuning.food_size_range + self.tuning.food_min_size;
        let pos = clamp_to_world(self.random_world_point(), size);
        let color = self.random_color();
        let id = self.next_entity_id();
        FoodDot::regular(id, pos, size, color)
    }

    /// Spawn an AI opponent at a random location
    pub fn random_ai(&mut self) -> AiOpponent {
        let size = self.rng.random::<f32>() * self.tuning.ai_size_range
            + self.tuning.initial_player_size * self.tuning.ai_min_size_ratio;
        let pos = clamp_to_world(self.random_world_point(), size);
        let color = self.random_color();
        let vel = Vec2::new(
            (self.rng.random::<f32>() - 0.5) * 2.0,
            (self.rng.random::<f32>() - 0.5) * 2.0,
        );
        let id = self.next_entity_id();
        AiOpponent {
            id,
            pos,
            size,
            color,
            vel,
            target: None,
            last_target_change_ms: self.time_ms(),
        }
    }

    /// Top food back up to the tuned count with regular food
    pub fn refill_food(&mut self) {
        while self.food.len() < self.tuning.food_count {
            let dot = self.random_food();
            self.food.push(dot);
        }
    }

    /// Replace eaten AI opponents
    pub fn refill_ais(&mut self) {
        while self.ais.len() < self.tuning.ai_count {
            let ai = self.random_ai();
            self.ais.push(ai);
        }
    }

    /// Decorative burst around `pos`; dropped once the particle cap is hit
    pub fn spawn_particles(&mut self, pos: Vec2, color: u32, count: usize) {
        let spread = self.tuning.particle_spread;
        let born_ms = self.time_ms();
        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                break;
            }
            let jitter = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * spread,
                (self.rng.random::<f32>() - 0.5) * spread,
            );
            self.particles.push(Particle {
                pos: pos + jitter,
                color,
                born_ms,
            });
        }
    }

    /// Drop particles past their lifetime
    pub fn age_particles(&mut self) {
        let now = self.time_ms();
        self.particles.retain(|p| p.is_alive(now));
    }

    /// Pull every entity back inside the world
    pub fn enforce_bounds(&mut self) {
        for c in &mut self.players {
            c.pos = clamp_to_world(c.pos, c.size);
        }
        for ai in &mut self.ais {
            ai.pos = clamp_to_world(ai.pos, ai.size);
        }
        for dot in &mut self.food {
            dot.pos = clamp_to_world(dot.pos, dot.size);
        }
    }
}
