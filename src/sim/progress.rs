//! Distance progression and the visual speed model
//!
//! Two decoupled scales: `distance_km` is the authoritative progression
//! scalar (km to light-years per region), `visual_speed`/`visual_scroll`
//! drive perceptible on-screen motion. Keeping them separate is what lets a
//! region spanning nine orders of magnitude still scroll at a sane pace.

use super::atlas::{self, Region};
use super::state::{InputState, SimState};
use crate::consts::*;

/// Division guard for degenerate rates
const RATE_EPSILON: f64 = 1.0e-9;
/// Clamp-to-just-under-end margin when a region is fully traversed
const BOUNDARY_MARGIN_KM: f64 = 1.0e-6;

/// Advance `distance_km` by `delta_ms` of simulated time against `regions`.
///
/// Sub-stepped (at most [`MAX_ADVANCE_STEPS`] iterations): each step resolves
/// the active region, consumes at most the time needed to finish it at the
/// effective rate, then re-resolves. A single large delta after a stall
/// would otherwise cross several region boundaries at one region's rate.
pub fn advance_distance(
    distance_km: &mut f64,
    regions: &[Region],
    input: &InputState,
    delta_ms: f64,
) {
    if regions.is_empty() {
        // No table to resolve against: freeze rather than guess
        return;
    }

    let multiplier = input.progress_multiplier();
    let mut remaining_ms = delta_ms.max(0.0);
    let mut steps = 0;

    while remaining_ms > 0.0 && steps < MAX_ADVANCE_STEPS {
        steps += 1;

        let idx = atlas::region_index(regions, *distance_km);
        let region = &regions[idx];
        let width_km = region.width_km();
        let effective_rate = (region.rate_per_ms() * multiplier).max(0.0);

        let progress = ((*distance_km - region.start_km) / width_km).clamp(0.0, 1.0);
        let fraction_remaining = 1.0 - progress;
        let ms_to_finish = fraction_remaining / effective_rate.max(RATE_EPSILON);

        let ms_step = remaining_ms.min(ms_to_finish);
        let fraction_step = effective_rate * ms_step;

        // Zero net progress is a stable termination signal, not an error
        if fraction_step <= 0.0 {
            break;
        }

        *distance_km += fraction_step * width_km;
        remaining_ms -= ms_step;

        // Region fully traversed: park just under the bound so the next
        // iteration resolves the successor region
        if ms_step >= ms_to_finish && region.end_km.is_finite() {
            *distance_km = distance_km.max(region.end_km - BOUNDARY_MARGIN_KM);
        }
    }
}

/// Update the smoothed visual speed and scroll accumulator.
///
/// Target speed grows with region index and progression rate, scales with
/// vertical thrust intensity and boost; the actual speed chases it through a
/// low-pass filter so region transitions don't pop.
pub fn update_visual(state: &mut SimState, input: &InputState, delta_ms: f64) {
    let idx = atlas::region_index(atlas::REGIONS, state.distance_km);
    let region = &atlas::REGIONS[idx.min(atlas::REGIONS.len() - 1)];

    let base_visual = 0.02 + idx as f32 * 0.006;
    let rate_term = region.rate_per_ms() as f32 * 0.18;
    let thrust_factor = (-state.vehicle.vel.y).max(0.0) * 0.85;
    let boost_factor = if input.boosting() { 1.2 } else { 1.0 };

    let target = (base_visual + rate_term) * (1.0 + thrust_factor) * boost_factor;
    state.visual_speed += (target - state.visual_speed) * VISUAL_SMOOTHING;

    let step = (state.visual_speed * delta_ms as f32).clamp(0.0, VISUAL_STEP_MAX);
    state.visual_scroll += step;
    if state.visual_scroll > VISUAL_SCROLL_WRAP {
        state.visual_scroll %= VISUAL_SCROLL_WRAP;
    }
}
