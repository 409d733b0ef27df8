//! Per-frame orchestration and the play / game-over state machine
//!
//! One tick runs the engines synchronously in fixed order: input read,
//! vehicle controls, distance progression, visual speed, obstacle
//! spawn/move/cull, particle update, collision test, snapshot derivation.
//! While `GameOver` only the particles keep animating; the restart command
//! is consumed at the start of the next tick and honored only then.

use super::atlas::{self, REGIONS};
use super::state::{GamePhase, InputState, SimState};
use super::{obstacles, particles, progress};
use crate::consts::*;
use crate::hud::Snapshot;
use crate::smoothstep;

/// Star fade distance band (km): invisible below, fully visible past the top
const STAR_FADE_START_KM: f64 = 80_000.0;
const STAR_FADE_FULL_KM: f64 = 250_000.0;
/// Per-frame smoothing toward the fade target
const STAR_FADE_SMOOTHING: f32 = 0.05;

/// Advance the simulation by one frame.
///
/// `delta_ms` is clamped to [`DELTA_CLAMP_MS`] so a stalled host (tab in the
/// background, debugger pause) cannot produce out-of-bounds physics. The
/// restart flag is a no-op unless the state is `GameOver`.
pub fn tick(state: &mut SimState, input: &InputState, delta_ms: f64) {
    let delta_ms = delta_ms.clamp(0.0, DELTA_CLAMP_MS);

    if input.restart && state.phase == GamePhase::GameOver {
        log::info!(
            "restart accepted at {} km (seed {})",
            state.snapshot.distance_km,
            state.seed
        );
        state.restart();
    }

    if state.phase == GamePhase::Playing {
        state.vehicle.apply_controls(input, state.viewport);

        let region_before = atlas::region_index(REGIONS, state.distance_km);
        progress::advance_distance(&mut state.distance_km, REGIONS, input, delta_ms);
        let region_idx = atlas::region_index(REGIONS, state.distance_km);
        if region_idx != region_before {
            log::info!(
                "entered region {:?} at {:.0} km",
                REGIONS[region_idx].name,
                state.distance_km
            );
        }

        progress::update_visual(state, input, delta_ms);
        obstacles::update_obstacles(state, delta_ms, region_idx);
    }

    particles::update(state, delta_ms);

    if state.phase == GamePhase::Playing {
        let margin = state.difficulty.collision_margin();
        if obstacles::check_collision(&state.vehicle, &state.obstacles, margin) {
            let center = state.vehicle.center();
            particles::burst(state, center);
            state.phase = GamePhase::GameOver;
            log::info!(
                "collision at {:.0} km, {} obstacles on screen",
                state.distance_km,
                state.obstacles.len()
            );
        }
    }

    update_star_fade(state);
    update_snapshot(state, delta_ms);
}

/// Low-pass the star-field fade scalar toward its distance-keyed target
fn update_star_fade(state: &mut SimState) {
    let target = smoothstep(STAR_FADE_START_KM, STAR_FADE_FULL_KM, state.distance_km) as f32;
    state.star_fade += (target - state.star_fade) * STAR_FADE_SMOOTHING;
}

/// Refresh the HUD snapshot. Past the bootstrap distance the formatted
/// fields refresh at most once per second so the readout digits don't
/// churn; the cached snapshot keeps the most recent computed values in
/// between.
fn update_snapshot(state: &mut SimState, delta_ms: f64) {
    state.hud_timer_ms += delta_ms;
    let throttled = state.distance_km >= HUD_BOOTSTRAP_KM;
    if !throttled || state.hud_timer_ms >= HUD_THROTTLE_MS {
        state.snapshot = Snapshot::derive(state.distance_km);
        state.hud_timer_ms = 0.0;
    }
}

/// Convenience for hosts: set a restart command on the shared input map.
/// Safe to spam; the tick ignores it outside `GameOver`.
pub fn request_restart(input: &mut InputState) {
    input.restart = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::state::{Button, Obstacle, ObstacleKind, Viewport};

    const FRAME_MS: f64 = 16.667;

    fn fresh_state(seed: u64) -> SimState {
        SimState::new(seed, Viewport { width: 800.0, height: 600.0 }, Difficulty::Standard)
    }

    fn plant_obstacle_on_vehicle(state: &mut SimState) {
        let center = state.vehicle.center();
        state.obstacles.push(Obstacle {
            pos: center,
            size: 30.0,
            fall_speed: 0.0,
            kind: ObstacleKind::Asteroid,
            rotation: 0.0,
            rotation_speed: 0.0,
        });
    }

    #[test]
    fn test_collision_transitions_to_game_over_with_one_burst() {
        let mut state = fresh_state(1);
        plant_obstacle_on_vehicle(&mut state);

        tick(&mut state, &InputState::default(), FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);
        let burst_size = state.particles.len();
        assert!((48..72).contains(&burst_size), "burst of {burst_size}");

        // Still overlapping, but already GameOver: no second burst and no
        // new particles, only aging
        tick(&mut state, &InputState::default(), FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.particles.len() <= burst_size);
        assert!(state.particles.iter().all(|p| p.age_ms > 0.0));
    }

    #[test]
    fn test_game_over_freezes_progression_and_obstacles() {
        let mut state = fresh_state(2);
        plant_obstacle_on_vehicle(&mut state);
        tick(&mut state, &InputState::default(), FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);

        let distance = state.distance_km;
        let obstacle_y = state.obstacles[0].pos.y;
        let mut input = InputState::default();
        input.set(Button::Ascend, true);
        input.set(Button::Boost, true);
        for _ in 0..10 {
            tick(&mut state, &input, FRAME_MS);
        }
        assert_eq!(state.distance_km, distance);
        assert_eq!(state.obstacles[0].pos.y, obstacle_y);
    }

    #[test]
    fn test_restart_only_accepted_in_game_over() {
        let mut state = fresh_state(3);
        let mut input = InputState::default();
        input.restart = true;

        // Playing: restart is a no-op
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.distance_km > 0.0);

        plant_obstacle_on_vehicle(&mut state);
        tick(&mut state, &InputState::default(), FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.obstacles.is_empty());
        // One frame of progression has already run post-restart
        assert!(state.distance_km < 1.0e4);
    }

    #[test]
    fn test_restart_spam_is_idempotent() {
        let mut state = fresh_state(4);
        plant_obstacle_on_vehicle(&mut state);
        tick(&mut state, &InputState::default(), FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);

        let mut input = InputState::default();
        input.restart = true;
        tick(&mut state, &input, FRAME_MS);
        let distance_after_first = state.distance_km;
        // Second restart while already Playing changes nothing but time
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.distance_km >= distance_after_first);
    }

    #[test]
    fn test_delta_clamp_bounds_single_step() {
        let mut stalled = fresh_state(5);
        let mut steady = fresh_state(5);
        let input = InputState::default();

        // A 10-minute stall advances no further than one clamped frame
        tick(&mut stalled, &input, 600_000.0);
        tick(&mut steady, &input, DELTA_CLAMP_MS);
        assert_eq!(stalled.distance_km, steady.distance_km);
    }

    #[test]
    fn test_determinism_same_seed_same_run() {
        let mut a = fresh_state(99);
        let mut b = fresh_state(99);
        let mut input = InputState::default();
        input.set(Button::Ascend, true);

        for frame in 0..600 {
            if frame == 300 {
                input.set(Button::Boost, true);
            }
            tick(&mut a, &input, FRAME_MS);
            tick(&mut b, &input, FRAME_MS);
        }

        assert_eq!(a.distance_km, b.distance_km);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.visual_scroll, b.visual_scroll);
        assert_eq!(a.phase, b.phase);
    }

    #[test]
    fn test_snapshot_throttles_past_bootstrap() {
        let mut state = fresh_state(6);
        state.distance_km = 5.0e6;
        let input = InputState::default();

        // First post-warp frame: timer below the interval, cached text stays
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.snapshot.distance_km, 0);

        // Accumulate a second of wall time: snapshot refreshes
        for _ in 0..70 {
            tick(&mut state, &input, FRAME_MS);
        }
        assert!(state.snapshot.distance_km >= 5_000_000);
        assert!(state.snapshot.distance_km_text.contains("M km"));
    }

    #[test]
    fn test_snapshot_updates_every_tick_at_bootstrap() {
        let mut state = fresh_state(7);
        let input = InputState::default();
        tick(&mut state, &input, FRAME_MS);
        let first = state.snapshot.clone();
        tick(&mut state, &input, FRAME_MS);
        // Below the bootstrap distance the snapshot tracks every tick
        assert_eq!(state.snapshot.distance_km, state.distance_km as u64);
        assert!(state.snapshot.distance_km >= first.distance_km);
    }

    #[test]
    fn test_star_fade_rises_with_distance() {
        let mut state = fresh_state(8);
        assert_eq!(state.star_fade, 0.0);
        state.distance_km = 1.0e6;
        for _ in 0..300 {
            update_star_fade(&mut state);
        }
        assert!(state.star_fade > 0.95);
    }
}
