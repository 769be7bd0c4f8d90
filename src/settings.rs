//! Game settings and preferences
//!
//! Persisted separately from the profile under the `gameSettings` key.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 32,
            QualityPreset::Medium => 128,
            QualityPreset::High => 512,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Consumption bursts
    pub particles: bool,
    /// Reduced motion (no particle bursts)
    pub reduced_motion: bool,
    /// Viewport the camera centers within (screen units)
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            reduced_motion: false,
            viewport_width: 390.0,
            viewport_height: 844.0,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "gameSettings";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle cap (respects toggles)
    pub fn max_particles(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_cap_respects_toggles() {
        let mut s = Settings::from_preset(QualityPreset::High);
        assert_eq!(s.max_particles(), 512);
        s.reduced_motion = true;
        assert_eq!(s.max_particles(), 0);
        s.reduced_motion = false;
        s.particles = false;
        assert_eq!(s.max_particles(), 0);
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_partial_blob_uses_defaults() {
        let s: Settings = serde_json::from_str(r#"{"quality":"Low"}"#).unwrap();
        assert_eq!(s.quality, QualityPreset::Low);
        assert!(s.particles);
        assert_eq!(s.viewport(), Vec2::new(390.0, 844.0));
    }
}
