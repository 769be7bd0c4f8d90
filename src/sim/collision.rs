//! Circle-circle collision tests
//!
//! Every entity is a circle whose diameter is its `size`. Contact is binary:
//! two entities touch when their centers are closer than the sum of their
//! radii, with no partial-overlap scoring.

use glam::Vec2;

/// Whether two circles (given by center and diameter) overlap
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    a_pos.distance(b_pos) < a_size / 2.0 + b_size / 2.0
}

/// Whether two of the player's circles overlap enough to merge
#[inline]
pub fn overlap_for_merge(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32, overlap: f32) -> bool {
    a_pos.distance(b_pos) < (a_size / 2.0 + b_size / 2.0) * overlap
}

/// Outcome of a size contest between two touching entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EatResult {
    /// First entity eats the second
    FirstEats,
    /// Second entity eats the first
    SecondEats,
    /// Too close in size; nothing happens
    Standoff,
}

/// Decide who eats whom: one side must be more than `ratio` times the other
pub fn size_contest(a_size: f32, b_size: f32, ratio: f32) -> EatResult {
    if a_size > b_size * ratio {
        EatResult::FirstEats
    } else if b_size > a_size * ratio {
        EatResult::SecondEats
    } else {
        EatResult::Standoff
    }
}

/// Size-weighted centroid of two circles
#[inline]
pub fn weighted_centroid(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> Vec2 {
    (a_pos * a_size + b_pos * b_size) / (a_size + b_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Vec2::new(100.0, 100.0);
        // Radii 10 + 5 = 15
        assert!(circles_overlap(a, 20.0, Vec2::new(114.9, 100.0), 10.0));
        assert!(!circles_overlap(a, 20.0, Vec2::new(115.0, 100.0), 10.0));
    }

    #[test]
    fn test_merge_needs_deeper_overlap() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(25.0, 0.0);
        // Half-size sum 30, merge threshold 24
        assert!(circles_overlap(a, 30.0, b, 30.0));
        assert!(!overlap_for_merge(a, 30.0, b, 30.0, 0.8));
        assert!(overlap_for_merge(a, 30.0, Vec2::new(23.0, 0.0), 30.0, 0.8));
    }

    #[test]
    fn test_size_contest() {
        assert_eq!(size_contest(40.0, 30.0, 1.1), EatResult::FirstEats);
        assert_eq!(size_contest(30.0, 40.0, 1.1), EatResult::SecondEats);
        assert_eq!(size_contest(33.0, 30.0, 1.1), EatResult::Standoff);
        assert_eq!(size_contest(30.0, 30.0, 1.1), EatResult::Standoff);
    }

    #[test]
    fn test_weighted_centroid() {
        let c = weighted_centroid(Vec2::new(0.0, 0.0), 30.0, Vec2::new(40.0, 0.0), 10.0);
        assert!((c.x - 10.0).abs() < 1e-5);
        assert_eq!(c.y, 0.0);
    }
}
