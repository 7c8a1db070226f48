//! Keyboard, touch and tilt mapping

use crate::sim::Controls;

/// A held control the player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Thrust,
    Left,
    Right,
}

/// Map a `KeyboardEvent.key` value to an intent
pub fn intent_for_key(key: &str) -> Option<Intent> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Intent::Thrust),
        "ArrowLeft" | "a" | "A" => Some(Intent::Left),
        "ArrowRight" | "d" | "D" => Some(Intent::Right),
        _ => None,
    }
}

/// Steering from the device's left/right tilt (`gamma`, degrees)
pub fn tilt_intent(gamma: f32, dead_zone: f32) -> Option<Intent> {
    if gamma < -dead_zone {
        Some(Intent::Left)
    } else if gamma > dead_zone {
        Some(Intent::Right)
    } else {
        None
    }
}

/// Held state from every input source
///
/// Sources are tracked separately so releasing a key doesn't cancel a
/// finger still on the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    keys: Controls,
    touch_thrust: bool,
    tilt: Controls,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key press or release. Returns true if the key is a game control.
    pub fn apply_key(&mut self, key: &str, pressed: bool) -> bool {
        let Some(intent) = intent_for_key(key) else {
            return false;
        };
        match intent {
            Intent::Thrust => self.keys.thrust = pressed,
            Intent::Left => self.keys.left = pressed,
            Intent::Right => self.keys.right = pressed,
        }
        true
    }

    pub fn set_touch_thrust(&mut self, active: bool) {
        self.touch_thrust = active;
    }

    /// Replace the tilt steering with a fresh orientation reading
    pub fn apply_tilt(&mut self, gamma: f32, dead_zone: f32) {
        let intent = tilt_intent(gamma, dead_zone);
        self.tilt = Controls {
            thrust: false,
            left: intent == Some(Intent::Left),
            right: intent == Some(Intent::Right),
        };
    }

    pub fn clear_tilt(&mut self) {
        self.tilt = Controls::default();
    }

    /// Drop everything held, e.g. when the page loses focus
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Combined controls for the next tick
    pub fn controls(&self) -> Controls {
        Controls {
            thrust: self.keys.thrust || self.touch_thrust,
            left: self.keys.left || self.tilt.left,
            right: self.keys.right || self.tilt.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        for key in ["ArrowUp", "w", "W"] {
            assert_eq!(intent_for_key(key), Some(Intent::Thrust));
        }
        for key in ["ArrowLeft", "a", "A"] {
            assert_eq!(intent_for_key(key), Some(Intent::Left));
        }
        for key in ["ArrowRight", "d", "D"] {
            assert_eq!(intent_for_key(key), Some(Intent::Right));
        }
        assert_eq!(intent_for_key("ArrowDown"), None);
        assert_eq!(intent_for_key(" "), None);
    }

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        assert!(input.apply_key("ArrowUp", true));
        assert!(input.apply_key("a", true));
        assert!(!input.apply_key("q", true));
        assert_eq!(
            input.controls(),
            Controls {
                thrust: true,
                left: true,
                right: false
            }
        );

        input.apply_key("W", false);
        assert!(!input.controls().thrust);
        assert!(input.controls().left);
    }

    #[test]
    fn test_touch_and_key_thrust_are_independent() {
        let mut input = InputState::new();
        input.set_touch_thrust(true);
        input.apply_key("w", true);
        input.apply_key("w", false);
        assert!(input.controls().thrust);
        input.set_touch_thrust(false);
        assert!(!input.controls().thrust);
    }

    #[test]
    fn test_tilt_dead_zone() {
        assert_eq!(tilt_intent(0.0, 5.0), None);
        assert_eq!(tilt_intent(4.9, 5.0), None);
        assert_eq!(tilt_intent(-4.9, 5.0), None);
        assert_eq!(tilt_intent(-12.0, 5.0), Some(Intent::Left));
        assert_eq!(tilt_intent(12.0, 5.0), Some(Intent::Right));

        let mut input = InputState::new();
        input.apply_tilt(20.0, 5.0);
        assert!(input.controls().right);
        input.apply_tilt(1.0, 5.0);
        assert_eq!(input.controls(), Controls::default());
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.apply_key("d", true);
        input.set_touch_thrust(true);
        input.apply_tilt(-30.0, 5.0);
        input.release_all();
        assert_eq!(input.controls(), Controls::default());
    }
}
