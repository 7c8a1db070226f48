//! Platform abstraction layer
//!
//! Turns browser input (keyboard, touch, device tilt) into simulation
//! controls. Storage lives with the types it persists (`Progress`, `Settings`).

pub mod input;

pub use input::{InputState, Intent, intent_for_key, tilt_intent};
