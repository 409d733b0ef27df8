//! Obstacle spawning, motion, culling, and collision
//!
//! Spawn cadence is timer-driven: intervals shrink with region index and
//! visual speed, floored by the difficulty profile so worst-case density is
//! bounded. Kinds, sizes, and fall speeds come from region-appropriate
//! weighted sets drawn off the state's seeded RNG.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Obstacle, ObstacleKind, SimState, Vehicle};
use crate::consts::CULL_SIZE_FACTOR;
use crate::settings::Difficulty;

/// Base spawn interval per region (ms)
const BASE_INTERVALS_MS: [f64; 4] = [1500.0, 1200.0, 900.0, 700.0];
/// Region index at which burst spawning unlocks
const BURST_REGION_THRESHOLD: usize = 2;
/// Per-spawn chance of a burst once unlocked
const BURST_CHANCE: f64 = 0.22;

/// Weighted kind table for one region: (kind, weight)
type KindWeights = &'static [(ObstacleKind, f64)];

/// Region-appropriate obstacle mixes: near-Earth junk first, then orbital
/// hardware and rocks, then interstellar bodies, then cosmic-scale hazards.
const KIND_WEIGHTS: [KindWeights; 4] = [
    &[
        (ObstacleKind::Debris, 0.5),
        (ObstacleKind::Junk, 0.38),
        (ObstacleKind::Satellite, 0.12),
    ],
    &[
        (ObstacleKind::Satellite, 0.3),
        (ObstacleKind::Asteroid, 0.4),
        (ObstacleKind::Debris, 0.2),
        (ObstacleKind::Comet, 0.1),
    ],
    &[
        (ObstacleKind::Asteroid, 0.35),
        (ObstacleKind::Comet, 0.3),
        (ObstacleKind::Nebula, 0.2),
        (ObstacleKind::Pulsar, 0.15),
    ],
    &[
        (ObstacleKind::Moon, 0.3),
        (ObstacleKind::Nebula, 0.25),
        (ObstacleKind::Pulsar, 0.2),
        (ObstacleKind::BlackHole, 0.25),
    ],
];

impl ObstacleKind {
    /// Size multiplier on top of the base roll (bigger bodies read bigger)
    fn size_factor(&self) -> f32 {
        match self {
            ObstacleKind::Debris | ObstacleKind::Junk => 0.9,
            ObstacleKind::Satellite | ObstacleKind::Asteroid => 1.0,
            ObstacleKind::Comet | ObstacleKind::Pulsar => 1.1,
            ObstacleKind::Nebula => 1.5,
            ObstacleKind::Moon => 1.6,
            ObstacleKind::BlackHole => 1.4,
        }
    }
}

/// Draw a kind from the region's weighted set
fn roll_kind(rng: &mut Pcg32, region_idx: usize) -> ObstacleKind {
    let table = KIND_WEIGHTS[region_idx.min(KIND_WEIGHTS.len() - 1)];
    let total: f64 = table.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0.0..total);
    for &(kind, weight) in table {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    table[table.len() - 1].0
}

/// Create one obstacle for the given region
pub fn spawn_obstacle(state: &mut SimState, region_idx: usize) {
    let difficulty = state.difficulty;
    let viewport = state.viewport;
    let rng = &mut state.rng;

    let kind = roll_kind(rng, region_idx);

    let base_size: f32 = rng.random_range(20.0..48.0);
    let region_scale = 1.0 + region_idx as f32 * 0.5;
    let size = (base_size * region_scale * kind.size_factor() * difficulty.size_scale()).round();

    let max_x = (viewport.width - size).max(0.0);
    let x = if max_x > 0.0 { rng.random_range(0.0..max_x) } else { 0.0 };
    // Stagger spawns up to 120 px above the top edge so waves don't pop in
    // as a row
    let y = -size - rng.random_range(0.0..120.0);

    let base_speed = 1.8 + region_idx as f32 * 1.8;
    let jitter = rng.random_range(0.0..(0.9 + region_idx as f32 * 0.7));
    let fall_speed = (base_speed + jitter) * difficulty.fall_speed_scale();

    let rotation_speed = rng.random_range(-0.05..0.05f32);

    state.obstacles.push(Obstacle {
        pos: Vec2::new(x, y),
        size,
        fall_speed,
        kind,
        rotation: 0.0,
        rotation_speed,
    });
}

/// Current spawn interval (ms) for the region/speed/difficulty combination
pub fn spawn_interval_ms(region_idx: usize, visual_speed: f32, difficulty: Difficulty) -> f64 {
    let base = BASE_INTERVALS_MS[region_idx.min(BASE_INTERVALS_MS.len() - 1)];
    let divisor = 1.0 + region_idx as f64 * 0.7 + (visual_speed.abs() as f64) * 0.01;
    ((base / divisor) * difficulty.spawn_interval_scale()).max(difficulty.spawn_floor_ms())
}

/// Advance the spawn timer, spawn when due, move every obstacle down by its
/// own fall speed (region-paced), advance rotations, and cull what has
/// fallen well below the viewport.
pub fn update_obstacles(state: &mut SimState, delta_ms: f64, region_idx: usize) {
    state.spawn_timer_ms += delta_ms;

    let interval = spawn_interval_ms(region_idx, state.visual_speed, state.difficulty);
    if state.spawn_timer_ms > interval {
        if region_idx >= BURST_REGION_THRESHOLD && state.rng.random_range(0.0..1.0) < BURST_CHANCE
        {
            let burst = 1 + state.rng.random_range(0..(2 + region_idx as u32));
            for _ in 0..burst {
                spawn_obstacle(state, region_idx);
            }
        } else {
            spawn_obstacle(state, region_idx);
        }
        state.spawn_timer_ms = 0.0;
    }

    let pace = 0.6 + region_idx as f32 * 0.18;
    for obstacle in &mut state.obstacles {
        obstacle.pos.y += obstacle.fall_speed * pace;
        obstacle.rotation += obstacle.rotation_speed;
    }

    let floor = state.viewport.height;
    state
        .obstacles
        .retain(|o| o.pos.y < floor + o.size * CULL_SIZE_FACTOR);
}

/// Axis-aligned box test between the margin-shrunk vehicle box and each
/// obstacle's margin-shrunk box. Returns true on the first intersection
/// found (no ordering guarantee beyond "any").
pub fn check_collision(vehicle: &Vehicle, obstacles: &[Obstacle], margin: f32) -> bool {
    let v_min = vehicle.pos + Vec2::splat(margin);
    let v_max = vehicle.pos + Vec2::new(vehicle.w - margin, vehicle.h - margin);
    if v_min.x >= v_max.x || v_min.y >= v_max.y {
        return false;
    }

    obstacles.iter().any(|o| {
        let (o_min, o_max) = o.hitbox(margin);
        v_min.x < o_max.x && v_max.x > o_min.x && v_min.y < o_max.y && v_max.y > o_min.y
    })
}
