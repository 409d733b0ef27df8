//! Game settings and difficulty configuration
//!
//! The source game inferred spawn/size multipliers from the viewport width
//! (phones got bigger, denser obstacles). That coupling made the core
//! non-deterministic across displays, so the scaling lives here as an
//! explicit difficulty profile the host picks once.

use serde::{Deserialize, Serialize};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Relaxed,
    #[default]
    Standard,
    Intense,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Standard => "Standard",
            Difficulty::Intense => "Intense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(Difficulty::Relaxed),
            "standard" | "normal" => Some(Difficulty::Standard),
            "intense" | "hard" => Some(Difficulty::Intense),
            _ => None,
        }
    }

    /// Hitbox shrink per side in px. Larger margin = more forgiving.
    pub fn collision_margin(&self) -> f32 {
        match self {
            Difficulty::Relaxed => 6.0,
            Difficulty::Standard => 3.0,
            Difficulty::Intense => 0.0,
        }
    }

    /// Multiplier on the spawn interval (lower = denser field)
    pub fn spawn_interval_scale(&self) -> f64 {
        match self {
            Difficulty::Relaxed => 1.35,
            Difficulty::Standard => 1.0,
            Difficulty::Intense => 0.75,
        }
    }

    /// Worst-case spawn interval floor (ms)
    pub fn spawn_floor_ms(&self) -> f64 {
        match self {
            Difficulty::Relaxed => 450.0,
            Difficulty::Standard => 300.0,
            Difficulty::Intense => 220.0,
        }
    }

    /// Multiplier on obstacle size
    pub fn size_scale(&self) -> f32 {
        match self {
            Difficulty::Relaxed => 0.9,
            Difficulty::Standard => 1.0,
            Difficulty::Intense => 1.15,
        }
    }

    /// Multiplier on obstacle fall speed
    pub fn fall_speed_scale(&self) -> f32 {
        match self {
            Difficulty::Relaxed => 0.85,
            Difficulty::Standard => 1.0,
            Difficulty::Intense => 1.2,
        }
    }
}

/// Host-facing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Fixed run seed; `None` lets the host pick one
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_roundtrip() {
        for d in [Difficulty::Relaxed, Difficulty::Standard, Difficulty::Intense] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_margins_order_by_strictness() {
        // Stricter presets shrink the hitbox less
        assert!(Difficulty::Relaxed.collision_margin() > Difficulty::Standard.collision_margin());
        assert!(Difficulty::Standard.collision_margin() > Difficulty::Intense.collision_margin());
    }

    #[test]
    fn test_settings_json_roundtrip() {
        let settings = Settings {
            difficulty: Difficulty::Intense,
            seed: Some(99),
        };
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.difficulty, Difficulty::Intense);
        assert_eq!(back.seed, Some(99));
    }
}
