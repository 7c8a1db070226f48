//! Fixed timestep simulation tick
//!
//! One call advances the session by one animation frame: explosion, pad
//! motion, result timer, then (only while flying) ship physics, world-edge
//! clamps and the landing check.

use serde::{Deserialize, Serialize};

use super::landing::judge;
use super::state::{GameEvent, GamePhase, GameState};
use super::vehicle::{Controls, Vehicle};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held intents from keyboard/touch/tilt
    pub controls: Controls,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Advance the game state by one frame.
///
/// `now` is wall-clock seconds; it drives the moving pad and the result
/// timer, never the physics.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    // The burst keeps animating through every phase
    if state.explosion.step() {
        state.emit(GameEvent::ExplosionFinished);
    }

    state.pad.update(now);
    state.poll_result(now);

    if input.pause {
        state.toggle_pause();
    }

    if state.phase == GamePhase::Ready && input.controls.thrust {
        state.launch();
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.controls = input.controls;
    state.flight_ticks += 1;

    let was_thrusting = state.vehicle.is_thrusting();
    let env = state.level.env;
    state
        .vehicle
        .step(env.gravity, env.thrust_power, state.controls, &mut state.rng);
    if state.vehicle.is_thrusting() != was_thrusting {
        state.emit(GameEvent::ThrustChanged {
            thrusting: state.vehicle.is_thrusting(),
        });
    }

    clamp_to_world(&mut state.vehicle, state.viewport.width);

    let ground_y = state.viewport.ground_y();
    if state.vehicle.bounds().bottom >= ground_y {
        let report = judge(
            &mut state.vehicle,
            &state.pad,
            &env,
            ground_y,
            state.level_id,
        );
        state.resolve_landing(report, now);
    }
}

/// Keep the ship between the side walls and under the ceiling.
///
/// Hitting a wall reflects horizontal velocity away from it at half speed;
/// hitting the ceiling sends the ship back down at 30% speed.
pub fn clamp_to_world(vehicle: &mut Vehicle, view_width: f32) {
    if vehicle.pos.x < WALL_MARGIN {
        vehicle.pos.x = WALL_MARGIN;
        vehicle.vel.x = vehicle.vel.x.abs() * WALL_DAMPING;
    }
    if vehicle.pos.x > view_width - WALL_MARGIN {
        vehicle.pos.x = view_width - WALL_MARGIN;
        vehicle.vel.x = -vehicle.vel.x.abs() * WALL_DAMPING;
    }
    if vehicle.pos.y < CEILING_Y {
        vehicle.pos.y = CEILING_Y;
        vehicle.vel.y = vehicle.vel.y.abs() * CEILING_DAMPING;
    }
}

/// Turns real elapsed time into whole fixed steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add elapsed seconds and return how many ticks to run now
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, 0.25);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }
}
