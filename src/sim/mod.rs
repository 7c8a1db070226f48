//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no delta-time scaling
//! - Seeded RNG only
//! - Wall-clock time only for the pad sway and result timer
//! - No rendering or platform dependencies

pub mod explosion;
pub mod hud;
pub mod landing;
pub mod pad;
pub mod state;
pub mod tick;
pub mod vehicle;
pub mod viewport;

pub use explosion::{Explosion, Particle};
pub use hud::{FuelBand, HudSnapshot, SpeedBand};
pub use landing::{Checks, LandingOutcome, LandingReport, Touchdown, classify, judge};
pub use pad::{Pad, pad_position};
pub use state::{GameEvent, GamePhase, GameState, PendingResult};
pub use tick::{FrameClock, TickInput, clamp_to_world, tick};
pub use vehicle::{Bounds, Controls, Vehicle};
pub use viewport::Viewport;
