//! Pointer/touch drag to movement direction

use glam::Vec2;

/// Drags this short (or shorter) are ignored
pub const MIN_DRAG_DISTANCE: f32 = 5.0;

/// Tracks a single drag gesture and turns it into a unit direction
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    origin: Option<Vec2>,
    direction: Vec2,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer/touch went down at `pos`
    pub fn start(&mut self, pos: Vec2) {
        self.origin = Some(pos);
    }

    /// Pointer moved. Returns the new direction if the drag is long enough.
    pub fn drag_to(&mut self, pos: Vec2) -> Option<Vec2> {
        let origin = self.origin?;
        self.apply_delta(pos - origin)
    }

    /// Feed a raw drag delta (e.g. from a gesture recognizer)
    pub fn apply_delta(&mut self, delta: Vec2) -> Option<Vec2> {
        if delta.length() <= MIN_DRAG_DISTANCE {
            return None;
        }
        self.direction = delta.normalize();
        Some(self.direction)
    }

    /// Pointer released. The last direction is kept.
    pub fn end(&mut self) {
        self.origin = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    /// Last accepted direction (zero before the first drag)
    pub fn direction(&self) -> Vec2 {
        self.direction
    }
}
