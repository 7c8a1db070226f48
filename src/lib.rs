//! Rocket Lander - A lunar-lander arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicle physics, landing judge, explosion)
//! - `levels`: Data-driven level table (Moon, Mars, Earth and harder variants)
//! - `progress`: Highest-unlocked-level bookkeeping and persistence
//! - `platform`: Browser input mapping (keyboard, touch, tilt)
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod levels;
pub mod platform;
pub mod progress;
pub mod settings;
pub mod sim;

pub use levels::{Environment, LEVEL_COUNT, Level, MovingPlatform, get_level, is_last_level, next_level};
pub use progress::Progress;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Physics values are per frame: the simulation is frame-coupled, one call to
/// `tick` is one unit of time.
pub mod consts {
    /// Fixed simulation timestep in seconds (one animation frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Vehicle hull at scale 1.0
    pub const SHIP_WIDTH: f32 = 40.0;
    pub const SHIP_HEIGHT: f32 = 60.0;
    /// Spawn height below the top of the view
    pub const SHIP_SPAWN_Y: f32 = 80.0;

    /// Sideways acceleration while a turn input is held
    pub const HORIZONTAL_POWER: f32 = 0.08;
    /// Degrees of tilt added per frame while turning
    pub const TILT_STEP: f32 = 0.8;
    /// Degrees per frame the ship rights itself with no turn input
    pub const STABILIZATION_STEP: f32 = 0.5;
    /// Angles within this band snap to exactly zero
    pub const STABILIZATION_EPSILON: f32 = 0.5;
    /// Tilt stops accumulating once this angle is reached
    pub const MAX_TILT: f32 = 25.0;
    /// Fuel burned per thrusting frame
    pub const FUEL_BURN: f32 = 0.3;
    /// Horizontal velocity multiplier applied every frame
    pub const HORIZONTAL_DRAG: f32 = 0.995;

    /// Flame intensity while thrusting is FLAME_BASE + [0, FLAME_JITTER)
    pub const FLAME_BASE: f32 = 15.0;
    pub const FLAME_JITTER: f32 = 10.0;
    /// Flame intensity lost per frame without thrust
    pub const FLAME_DECAY: f32 = 3.0;
    /// Limit of the cosmetic eye offset
    pub const MAX_GAZE: f32 = 2.0;

    /// World edges
    pub const WALL_MARGIN: f32 = 30.0;
    pub const CEILING_Y: f32 = -2000.0;
    pub const WALL_DAMPING: f32 = 0.5;
    pub const CEILING_DAMPING: f32 = 0.3;

    /// Explosion burst
    pub const SPARK_COUNT: usize = 40;
    pub const DEBRIS_COUNT: usize = 15;
    pub const PARTICLE_GRAVITY: f32 = 0.15;

    /// Delays (seconds) between a terminal landing and showing its result
    pub const SUCCESS_RESULT_DELAY: f64 = 0.5;
    pub const CRASH_RESULT_DELAY: f64 = 1.2;
    pub const DISTRESS_RESULT_DELAY: f64 = 1.5;
}

/// Normalize an angle in degrees to (-180, 180]
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

/// Unit thrust direction for a ship angle in degrees (0 = nose up, y down)
#[inline]
pub fn heading_vector(angle_degrees: f32) -> Vec2 {
    let radians = (angle_degrees - 90.0).to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
