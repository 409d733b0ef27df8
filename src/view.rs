//! Derived per-frame render parameters
//!
//! The core owns no drawing. Each tick the host derives one [`FrameView`]
//! and hands it to the background/sprite renderer collaborators: gradient
//! stops for the sky, a star-field fade and drift, exhaust intensity for the
//! flame renderer, and borrowed obstacle/particle/vehicle snapshots.
//!
//! Optional overlay effects are fallible by contract: a failed visual is
//! logged and skipped, never allowed to abort the rest of the frame's draw
//! sequence (the simulation has already been updated by then).

use serde::Serialize;

use crate::sim::atlas::{self, LAYERS};
use crate::sim::state::{GamePhase, InputState, Obstacle, Particle, SimState, Vehicle};

/// Exhaust intensity tier for the external flame renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExhaustLevel {
    Idle,
    Thrust,
    Boost,
}

/// Everything the renderer collaborators need for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView<'a> {
    /// Background gradient stops (bottom, top) and the blend toward the
    /// next layer
    pub gradient_bottom: [u8; 3],
    pub gradient_top: [u8; 3],
    pub layer_index: usize,
    pub layer_blend: f32,

    /// Star-field fade scalar in [0, 1] (smoothed, distance-keyed)
    pub star_fade: f32,
    /// Vertical and horizontal star drift magnitudes (px-ish per frame)
    pub star_drift_y: f32,
    pub star_drift_x: f32,

    pub exhaust: ExhaustLevel,
    /// Game-over overlay alpha in [0, 0.7]; 0 while playing
    pub overlay_alpha: f32,

    pub vehicle: &'a Vehicle,
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
}

impl<'a> FrameView<'a> {
    /// Derive the frame's render parameters from the simulation state and
    /// the input map (drift direction follows steering).
    pub fn derive(state: &'a SimState, input: &InputState) -> Self {
        let (gradient_bottom, gradient_top, layer_blend) =
            atlas::gradient_at(LAYERS, state.distance_km);

        let exhaust = if input.boosting() {
            ExhaustLevel::Boost
        } else if input.ascending() {
            ExhaustLevel::Thrust
        } else {
            ExhaustLevel::Idle
        };

        let base_drift = state.visual_speed * 25.0;
        let star_drift_y = match exhaust {
            ExhaustLevel::Boost => base_drift * 3.0,
            ExhaustLevel::Thrust => base_drift * 1.5,
            ExhaustLevel::Idle => base_drift,
        };
        let star_drift_x = input.steer() * base_drift * 0.4;

        let overlay_alpha = if state.phase == GamePhase::GameOver {
            (0.25 + (state.explosion_ms / 900.0) as f32).min(0.7)
        } else {
            0.0
        };

        Self {
            gradient_bottom,
            gradient_top,
            layer_index: atlas::layer_index(LAYERS, state.distance_km),
            layer_blend,
            star_fade: state.star_fade,
            star_drift_y,
            star_drift_x,
            exhaust,
            overlay_alpha,
            vehicle: &state.vehicle,
            obstacles: &state.obstacles,
            particles: &state.particles,
        }
    }
}

/// An optional overlay visual (warp streaks, exhaust trails, ...) drawn on
/// top of the authoritative frame.
pub trait OverlayEffect {
    /// Name used when logging a skipped effect
    fn name(&self) -> &str;
    /// Draw against the frame view; any error skips only this effect
    fn draw(&mut self, view: &FrameView<'_>) -> Result<(), String>;
}

/// Run every overlay effect, skipping (and logging) failures so a broken
/// visual never stops the frame.
pub fn run_overlay_effects(effects: &mut [Box<dyn OverlayEffect>], view: &FrameView<'_>) {
    for effect in effects {
        if let Err(err) = effect.draw(view) {
            log::warn!("overlay effect {:?} skipped: {err}", effect.name());
        }
    }
}
