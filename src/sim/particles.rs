//! Plasma burst particle system
//!
//! One batch per collision: electric cyan to deep purple, short-lived, with
//! drag, a slight downward drift, and per-axis turbulence jitter. The burst
//! replaces any live batch; the system deactivates once the batch empties.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, SimState};

/// Batch size: 48 plus up to 23 extra, so the count lies in [48, 72)
const BURST_BASE_COUNT: u32 = 48;
const BURST_EXTRA_COUNT: u32 = 24;

/// Per-update multiplicative velocity drag
const DRAG: f32 = 0.98;
/// Constant downward drift added per update (px/frame)
const DOWNWARD_DRIFT: f32 = 0.02;
/// Per-axis turbulence jitter half-range (px/frame)
const JITTER: f32 = 0.15;

/// Replace the particle collection with a fresh burst centered on `center`
/// and mark the system active.
pub fn burst(state: &mut SimState, center: Vec2) {
    state.particles.clear();
    let count = BURST_BASE_COUNT + state.rng.random_range(0..BURST_EXTRA_COUNT);

    for _ in 0..count {
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(1.0..9.0f32);
        let lifetime_ms = state.rng.random_range(700.0..1300.0f64);
        let size = state.rng.random_range(1.0..4.0f32);

        // Cyan-to-purple interpolation band
        let mix = state.rng.random_range(0.0..1.0f32);
        let color = [
            (20.0 + 120.0 * mix).round() as u8,
            (180.0 + 40.0 * (1.0 - mix)).round() as u8,
            (255.0 - 40.0 * mix).round() as u8,
        ];

        state.particles.push(Particle {
            pos: center,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            age_ms: 0.0,
            lifetime_ms,
            size,
            color,
            flicker: state.rng.random_range(0.4..1.0f32),
        });
    }

    state.explosion_active = true;
    state.explosion_ms = 0.0;
}

/// Advance the batch one frame; drop particles past their lifetime and
/// deactivate once the collection empties.
pub fn update(state: &mut SimState, delta_ms: f64) {
    if !state.explosion_active {
        return;
    }
    state.explosion_ms += delta_ms;

    for p in &mut state.particles {
        p.vel *= DRAG;
        p.vel.y += DOWNWARD_DRIFT;
        let jitter = Vec2::new(
            state.rng.random_range(-JITTER..JITTER),
            state.rng.random_range(-JITTER..JITTER),
        );
        p.pos += p.vel + jitter;
        p.age_ms += delta_ms;
    }

    state.particles.retain(|p| p.age_ms < p.lifetime_ms);
    if state.particles.is_empty() {
        state.explosion_active = false;
    }
}

/// Whether a burst is still animating
pub fn is_active(state: &SimState) -> bool {
    state.explosion_active
}
