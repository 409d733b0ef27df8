//! Simulation state and core entity types
//!
//! Everything the source game kept in long-lived mutable refs lives here as
//! fields of one owned [`SimState`], passed by exclusive reference into each
//! engine's per-tick function. Restart rebuilds the play-session fields
//! atomically; the RNG keeps running so consecutive sessions differ.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::hud::Snapshot;
use crate::settings::Difficulty;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active ascent
    Playing,
    /// Run ended on collision; only particles keep animating
    GameOver,
}

/// Logical input identifiers (filled in asynchronously by the input
/// collaborator, read once per tick by the core)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Ascend,
    Boost,
    SteerLeft,
    SteerRight,
}

const BUTTON_COUNT: usize = 4;

/// Key-state map plus the one-shot restart command flag
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; BUTTON_COUNT],
    /// Restart command (key press or pointer click); consumed at the start
    /// of the next tick, honored only in `GameOver`
    pub restart: bool,
}

impl InputState {
    pub fn set(&mut self, button: Button, down: bool) {
        self.held[button as usize] = down;
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held[button as usize]
    }

    /// True ascent input (ascend key, with or without boost)
    pub fn ascending(&self) -> bool {
        self.is_held(Button::Ascend)
    }

    /// Boost only counts while ascending
    pub fn boosting(&self) -> bool {
        self.is_held(Button::Ascend) && self.is_held(Button::Boost)
    }

    /// Progression multiplier: 1x idle, 2x ascending, 5x ascending + boost
    pub fn progress_multiplier(&self) -> f64 {
        if self.boosting() {
            PLAYER_MULT_BOOST
        } else if self.ascending() {
            PLAYER_MULT_ASCEND
        } else {
            PLAYER_MULT_NONE
        }
    }

    /// Horizontal steer direction: -1, 0, or +1
    pub fn steer(&self) -> f32 {
        match (self.is_held(Button::SteerLeft), self.is_held(Button::SteerRight)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Play area dimensions in px
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0 }
    }
}

/// The player's vehicle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vehicle {
    /// Top-left corner (px); y stays fixed, x is steered and clamped
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub vel: Vec2,
    /// Vertical velocity target the smoothing chases (px/ms, negative = up).
    /// Never applied to `pos.y`; it feeds the visual speed model and the
    /// external flame renderer.
    pub target_vy: f32,
}

impl Vehicle {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(viewport.width / 2.0 - VEHICLE_W / 2.0, viewport.height * 0.7),
            w: VEHICLE_W,
            h: VEHICLE_H,
            vel: Vec2::ZERO,
            target_vy: CLIMB_VY,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.w / 2.0, self.h / 2.0)
    }

    /// Apply steering and thrust input for one frame, keeping x in bounds
    pub fn apply_controls(&mut self, input: &InputState, viewport: Viewport) {
        self.target_vy = if input.boosting() {
            BOOST_VY
        } else if input.ascending() {
            THRUST_VY
        } else {
            CLIMB_VY
        };
        self.vel.y += (self.target_vy - self.vel.y) * VY_SMOOTHING;

        self.vel.x += input.steer() * VX_ACCEL;
        self.vel.x *= VX_DRAG;
        self.pos.x = (self.pos.x + self.vel.x).clamp(0.0, (viewport.width - self.w).max(0.0));
    }
}

/// Closed set of obstacle variants (spawn weighting and sprite dispatch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Debris,
    Junk,
    Satellite,
    Asteroid,
    Comet,
    Moon,
    Nebula,
    Pulsar,
    BlackHole,
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Debris => "debris",
            ObstacleKind::Junk => "junk",
            ObstacleKind::Satellite => "satellite",
            ObstacleKind::Asteroid => "asteroid",
            ObstacleKind::Comet => "comet",
            ObstacleKind::Moon => "moon",
            ObstacleKind::Nebula => "nebula",
            ObstacleKind::Pulsar => "pulsar",
            ObstacleKind::BlackHole => "blackhole",
        }
    }
}

/// A falling obstacle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner (px)
    pub pos: Vec2,
    pub size: f32,
    /// Own downward speed (px/frame, before the region pacing factor)
    pub fall_speed: f32,
    pub kind: ObstacleKind,
    /// Sprite rotation (radians) and per-frame angular rate
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Obstacle {
    /// Collision box, shrunk on all sides by `margin`. Satellites use an
    /// anisotropic box (wider, shorter) to match their sprite silhouette.
    pub fn hitbox(&self, margin: f32) -> (Vec2, Vec2) {
        let (w, h) = match self.kind {
            ObstacleKind::Satellite => (self.size * 1.06, self.size * 0.6),
            _ => (self.size, self.size),
        };
        let min = self.pos + Vec2::splat(margin);
        let max = self.pos + Vec2::new(w - margin, h - margin);
        (min, max)
    }
}

/// One plasma-burst particle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age_ms: f64,
    pub lifetime_ms: f64,
    pub size: f32,
    /// Base color (the renderer applies alpha from age/flicker)
    pub color: [u8; 3],
    pub flicker: f32,
}

impl Particle {
    /// Remaining-life alpha in [0, 1]
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age_ms / self.lifetime_ms).max(0.0) as f32
    }
}

/// Complete per-session simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single injectable randomness source feeding all spawn/jitter draws
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub viewport: Viewport,

    /// Authoritative distance (km); monotone non-decreasing while playing
    pub distance_km: f64,
    /// Smoothed on-screen scroll speed (px/ms)
    pub visual_speed: f32,
    /// Visual scroll accumulator (px-like, wraps at 1e7)
    pub visual_scroll: f32,

    pub vehicle: Vehicle,
    pub obstacles: Vec<Obstacle>,
    pub spawn_timer_ms: f64,

    pub particles: Vec<Particle>,
    /// True from burst until the particle collection empties
    pub explosion_active: bool,
    /// Time since the burst (ms); drives the game-over overlay fade
    pub explosion_ms: f64,

    /// Smoothed star-field fade scalar in [0, 1]
    pub star_fade: f32,

    /// Last derived snapshot; formatted fields refresh at most once per
    /// second once past the bootstrap distance
    pub snapshot: Snapshot,
    pub hud_timer_ms: f64,
}

impl SimState {
    pub fn new(seed: u64, viewport: Viewport, difficulty: Difficulty) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            difficulty,
            viewport,
            distance_km: 0.0,
            visual_speed: 0.0,
            visual_scroll: 0.0,
            vehicle: Vehicle::new(viewport),
            obstacles: Vec::new(),
            spawn_timer_ms: 0.0,
            particles: Vec::new(),
            explosion_active: false,
            explosion_ms: 0.0,
            star_fade: 0.0,
            snapshot: Snapshot::default(),
            hud_timer_ms: 0.0,
        };
        state.snapshot = Snapshot::derive(state.distance_km);
        state
    }

    /// Atomic reset back to `Playing`. The RNG is left running on purpose so
    /// a restarted session gets a fresh obstacle sequence.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.distance_km = 0.0;
        self.visual_speed = 0.0;
        self.visual_scroll = 0.0;
        self.vehicle = Vehicle::new(self.viewport);
        self.obstacles.clear();
        self.spawn_timer_ms = 0.0;
        self.particles.clear();
        self.explosion_active = false;
        self.explosion_ms = 0.0;
        self.star_fade = 0.0;
        self.snapshot = Snapshot::derive(0.0);
        self.hud_timer_ms = 0.0;
    }

    /// Viewport change from the layout collaborator; re-centers nothing,
    /// just re-clamps the vehicle into the new bounds.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport { width, height };
        self.vehicle.pos.x = self
            .vehicle
            .pos
            .x
            .clamp(0.0, (width - self.vehicle.w).max(0.0));
        self.vehicle.pos.y = height * 0.7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_multiplier_tiers() {
        let mut input = InputState::default();
        assert_eq!(input.progress_multiplier(), 1.0);

        input.set(Button::Ascend, true);
        assert_eq!(input.progress_multiplier(), 2.0);

        input.set(Button::Boost, true);
        assert_eq!(input.progress_multiplier(), 5.0);

        // Boost without ascend does nothing
        input.set(Button::Ascend, false);
        assert_eq!(input.progress_multiplier(), 1.0);
    }

    #[test]
    fn test_vehicle_stays_in_bounds() {
        let viewport = Viewport { width: 200.0, height: 400.0 };
        let mut vehicle = Vehicle::new(viewport);
        let mut input = InputState::default();
        input.set(Button::SteerLeft, true);

        for _ in 0..2000 {
            vehicle.apply_controls(&input, viewport);
        }
        assert_eq!(vehicle.pos.x, 0.0);

        input.set(Button::SteerLeft, false);
        input.set(Button::SteerRight, true);
        for _ in 0..2000 {
            vehicle.apply_controls(&input, viewport);
        }
        assert_eq!(vehicle.pos.x, viewport.width - vehicle.w);
    }

    #[test]
    fn test_satellite_hitbox_anisotropic() {
        let obstacle = Obstacle {
            pos: Vec2::new(10.0, 20.0),
            size: 50.0,
            fall_speed: 2.0,
            kind: ObstacleKind::Satellite,
            rotation: 0.0,
            rotation_speed: 0.0,
        };
        let (min, max) = obstacle.hitbox(0.0);
        assert_eq!(min, Vec2::new(10.0, 20.0));
        assert!((max.x - (10.0 + 53.0)).abs() < 1e-4);
        assert!((max.y - (20.0 + 30.0)).abs() < 1e-4);
    }

    #[test]
    fn test_restart_resets_session_fields() {
        let mut state = SimState::new(7, Viewport::default(), Difficulty::Standard);
        state.distance_km = 42.0;
        state.phase = GamePhase::GameOver;
        state.obstacles.push(Obstacle {
            pos: Vec2::ZERO,
            size: 10.0,
            fall_speed: 1.0,
            kind: ObstacleKind::Debris,
            rotation: 0.0,
            rotation_speed: 0.0,
        });
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            age_ms: 0.0,
            lifetime_ms: 1000.0,
            size: 2.0,
            color: [0, 0, 0],
            flicker: 1.0,
        });

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.distance_km, 0.0);
        assert!(state.obstacles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.spawn_timer_ms, 0.0);
    }
}
