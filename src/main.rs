//! Astro Ascent entry point
//!
//! Headless demo driver: runs a scripted session at a fixed frame cadence,
//! prints HUD snapshots as JSON lines, and restarts once after the first
//! collision. Real hosts wire a display-synchronized loop, keyboard/touch
//! input, and the canvas renderers around the same `tick`/`FrameView` calls.

use astro_ascent::consts::DELTA_CLAMP_MS;
use astro_ascent::settings::Settings;
use astro_ascent::sim::{
    Button, GamePhase, InputState, SimState, Viewport, request_restart, tick,
};
use astro_ascent::view::{FrameView, OverlayEffect, run_overlay_effects};

const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_FRAMES: u32 = 36_000; // ten simulated minutes

/// Demo overlay that refuses to draw until the ship is moving fast enough;
/// exercises the skip-on-failure path.
struct WarpStreaks;

impl OverlayEffect for WarpStreaks {
    fn name(&self) -> &str {
        "warp-streaks"
    }

    fn draw(&mut self, view: &FrameView<'_>) -> Result<(), String> {
        if view.star_drift_y < 0.15 {
            return Err("below streak speed threshold".into());
        }
        Ok(())
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xA5CE17u64);
    let settings = Settings::default();
    log::info!(
        "Astro Ascent demo starting (seed {seed}, difficulty {})",
        settings.difficulty.as_str()
    );

    let mut state = SimState::new(
        settings.seed.unwrap_or(seed),
        Viewport::default(),
        settings.difficulty,
    );
    let mut input = InputState::default();
    input.set(Button::Ascend, true);

    let mut effects: Vec<Box<dyn OverlayEffect>> = vec![Box::new(WarpStreaks)];
    let mut last_snapshot = state.snapshot.clone();
    let mut restarts = 0u32;

    for frame in 0..MAX_FRAMES {
        // Script: start boosting after ten seconds, weave a little
        if frame == 600 {
            input.set(Button::Boost, true);
        }
        input.set(Button::SteerLeft, (frame / 120) % 2 == 0);
        input.set(Button::SteerRight, (frame / 120) % 2 == 1);

        if state.phase == GamePhase::GameOver {
            if restarts >= 1 {
                break;
            }
            restarts += 1;
            request_restart(&mut input);
        }

        // Occasional stall to show the delta clamp at work
        let delta = if frame % 1800 == 1799 { DELTA_CLAMP_MS * 4.0 } else { FRAME_MS };
        tick(&mut state, &input, delta);
        input.restart = false;

        let view = FrameView::derive(&state, &input);
        run_overlay_effects(&mut effects, &view);

        if state.snapshot != last_snapshot {
            match serde_json::to_string(&state.snapshot) {
                Ok(line) => println!("{line}"),
                Err(err) => log::error!("snapshot serialization failed: {err}"),
            }
            last_snapshot = state.snapshot.clone();
        }
    }

    log::info!(
        "demo finished: {} ({}), {} restart(s)",
        state.snapshot.distance_km_text,
        state.snapshot.region,
        restarts
    );
}
