//! Camera anchoring and world-to-screen projection
//!
//! Rendering is a thin per-frame projection: each entity's world position is
//! shifted by the camera offset and culled if it falls outside the viewport.
//! Nothing here feeds back into the simulation.

use glam::Vec2;

use super::state::GameState;
use crate::world_center;

/// Cull margin around the viewport for player and AI circles
pub const CIRCLE_CULL_MARGIN: f32 = 50.0;
/// Cull margin around the viewport for food dots
pub const FOOD_CULL_MARGIN: f32 = 10.0;
/// Diameter of a particle at full scale
pub const PARTICLE_SIZE: f32 = 10.0;

/// What a sprite represents (also decides draw order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpriteKind {
    Particle,
    Food,
    EjectedMass,
    Ai,
    Player,
}

impl SpriteKind {
    /// Draw layer; higher draws on top
    pub fn z_index(self) -> u8 {
        match self {
            SpriteKind::Particle => 1,
            SpriteKind::Food | SpriteKind::EjectedMass => 3,
            SpriteKind::Ai => 5,
            SpriteKind::Player => 10,
        }
    }
}

/// One thing to draw, in screen space
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Top-left corner of the bounding square
    pub screen_pos: Vec2,
    pub diameter: f32,
    pub color: u32,
    pub opacity: f32,
}

/// Camera following the player's largest circle
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Viewport size in screen units
    pub viewport: Vec2,
    /// World coordinate shown at the viewport's top-left corner
    pub offset: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            offset: world_center() - viewport / 2.0,
        }
    }

    /// Re-center on the current anchor (largest circle, else world center)
    pub fn follow(&mut self, state: &GameState) {
        self.offset = camera_anchor(state) - self.viewport / 2.0;
    }

    /// Top-left screen corner of an entity centered at `pos`
    #[inline]
    pub fn project(&self, pos: Vec2, size: f32) -> Vec2 {
        pos - size / 2.0 - self.offset
    }

    /// Whether a projected square of `size` touches the viewport grown by `margin`
    pub fn is_visible(&self, screen_pos: Vec2, size: f32, margin: f32) -> bool {
        !(screen_pos.x + size < -margin
            || screen_pos.x > self.viewport.x + margin
            || screen_pos.y + size < -margin
            || screen_pos.y > self.viewport.y + margin)
    }

    fn cull(
        &self,
        kind: SpriteKind,
        pos: Vec2,
        size: f32,
        color: u32,
        opacity: f32,
        margin: f32,
    ) -> Option<Sprite> {
        let screen_pos = self.project(pos, size);
        self.is_visible(screen_pos, size, margin).then_some(Sprite {
            kind,
            screen_pos,
            diameter: size,
            color,
            opacity,
        })
    }

    /// Visible sprites for this frame, back to front
    pub fn frame(&self, state: &GameState) -> Vec<Sprite> {
        let now = state.time_ms();
        let mut sprites = Vec::new();

        // Particles are short-lived and never culled
        for p in &state.particles {
            let diameter = PARTICLE_SIZE * p.scale(now);
            sprites.push(Sprite {
                kind: SpriteKind::Particle,
                screen_pos: p.pos - self.offset,
                diameter,
                color: p.color,
                opacity: p.opacity(now),
            });
        }

        sprites.extend(state.food.iter().filter_map(|dot| {
            let (kind, opacity) = if dot.is_ejected() {
                (SpriteKind::EjectedMass, 0.7)
            } else {
                (SpriteKind::Food, 1.0)
            };
            self.cull(kind, dot.pos, dot.size, dot.color, opacity, FOOD_CULL_MARGIN)
        }));

        sprites.extend(state.ais.iter().filter_map(|ai| {
            self.cull(SpriteKind::Ai, ai.pos, ai.size, ai.color, 1.0, CIRCLE_CULL_MARGIN)
        }));

        sprites.extend(state.players.iter().filter_map(|c| {
            self.cull(SpriteKind::Player, c.pos, c.size, c.color, 1.0, CIRCLE_CULL_MARGIN)
        }));

        sprites
    }
}

/// World point the camera centers on
pub fn camera_anchor(state: &GameState) -> Vec2 {
    state
        .largest_player()
        .map(|c| c.pos)
        .unwrap_or_else(world_center)
}
