//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Single-threaded, one tick runs to completion before the next
//! - Seeded RNG only (one `Pcg32` feeds every random draw)
//! - No rendering or platform dependencies

pub mod atlas;
pub mod obstacles;
pub mod particles;
pub mod progress;
pub mod state;
pub mod tick;

pub use atlas::{LAYERS, Layer, REGIONS, Region, gradient_at, layer_index, region_index};
pub use state::{
    Button, GamePhase, InputState, Obstacle, ObstacleKind, Particle, SimState, Vehicle, Viewport,
};
pub use tick::{request_restart, tick};
