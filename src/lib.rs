//! Astro Ascent - an arcade ascent game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (progression, obstacles, particles, game state)
//! - `hud`: Read-only per-frame snapshot and distance formatting
//! - `view`: Derived render parameters for external renderer collaborators
//! - `settings`: Data-driven difficulty configuration
//!
//! Rendering, input capture, and application bootstrap are external
//! collaborators: the core reads a key-state map once per tick and emits
//! snapshots/view parameters, nothing more.

pub mod hud;
pub mod settings;
pub mod sim;
pub mod view;

pub use hud::Snapshot;
pub use settings::{Difficulty, Settings};

/// Game tuning constants
pub mod consts {
    /// Per-tick elapsed time ceiling (ms). Bounds the work done after a
    /// stall (tab backgrounded, debugger pause) so physics stays in range.
    pub const DELTA_CLAMP_MS: f64 = 60.0;
    /// Maximum sub-steps per `advance` call (guards region-boundary oscillation)
    pub const MAX_ADVANCE_STEPS: u32 = 4;

    /// Player progression multipliers
    pub const PLAYER_MULT_NONE: f64 = 1.0;
    pub const PLAYER_MULT_ASCEND: f64 = 2.0;
    pub const PLAYER_MULT_BOOST: f64 = 5.0;

    /// Visual speed low-pass smoothing factor
    pub const VISUAL_SMOOTHING: f32 = 0.06;
    /// Per-frame visual scroll step ceiling (px)
    pub const VISUAL_STEP_MAX: f32 = 200.0;
    /// Visual scroll accumulator wrap modulus (prevents float runaway)
    pub const VISUAL_SCROLL_WRAP: f32 = 1.0e7;

    /// Vehicle dimensions (px)
    pub const VEHICLE_W: f32 = 40.0;
    pub const VEHICLE_H: f32 = 60.0;
    /// Vertical velocity targets (px/ms, negative = upward)
    pub const CLIMB_VY: f32 = -0.02;
    pub const THRUST_VY: f32 = -0.1;
    pub const BOOST_VY: f32 = -0.26;
    /// Vertical velocity interpolation factor
    pub const VY_SMOOTHING: f32 = 0.08;
    /// Horizontal steering acceleration (px/frame) and drag
    pub const VX_ACCEL: f32 = 0.22;
    pub const VX_DRAG: f32 = 0.96;

    /// Obstacles are culled once below the viewport by this many times their size
    pub const CULL_SIZE_FACTOR: f32 = 3.0;

    /// One astronomical unit in kilometers
    pub const AU_KM: f64 = 1.496e8;

    /// HUD formatted-field refresh interval (ms) and the distance past which
    /// throttling kicks in
    pub const HUD_THROTTLE_MS: f64 = 1000.0;
    pub const HUD_BOOTSTRAP_KM: f64 = 1000.0;
}

/// Interpolate two packed 0xRRGGBB colors, `factor` in [0, 1]
#[inline]
pub fn blend_rgb(from: u32, to: u32, factor: f32) -> [u8; 3] {
    let t = factor.clamp(0.0, 1.0);
    let ch = |shift: u32| {
        let a = ((from >> shift) & 0xff) as f32;
        let b = ((to >> shift) & 0xff) as f32;
        (a + (b - a) * t).round() as u8
    };
    [ch(16), ch(8), ch(0)]
}

/// Hermite smoothstep of `x` over [edge0, edge1]
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let span = edge1 - edge0;
    if span <= 0.0 {
        return if x >= edge1 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_rgb_endpoints() {
        assert_eq!(blend_rgb(0x166534, 0x60a5fa, 0.0), [0x16, 0x65, 0x34]);
        assert_eq!(blend_rgb(0x166534, 0x60a5fa, 1.0), [0x60, 0xa5, 0xfa]);
    }

    #[test]
    fn test_blend_rgb_midpoint() {
        let mid = blend_rgb(0x000000, 0xff00ff, 0.5);
        assert_eq!(mid, [128, 0, 128]);
    }

    #[test]
    fn test_smoothstep_clamps() {
        assert_eq!(smoothstep(0.0, 1.0, -5.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 5.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-9);
    }
}
