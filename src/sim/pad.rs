//! Landing pad placement and motion

use serde::{Deserialize, Serialize};

use super::viewport::Viewport;
use crate::levels::Environment;

/// Pad thickness in pixels
pub const PAD_HEIGHT: f32 = 15.0;
/// Gap kept between the pad's travel and the screen edge
pub const PAD_PADDING: f32 = 50.0;
pub const MOBILE_PAD_PADDING: f32 = 30.0;
/// Pad width on phones held upright, as a fraction of view width
pub const MOBILE_PAD_FRACTION: f32 = 0.30;
pub const MIN_MOBILE_PAD_WIDTH: f32 = 80.0;

/// Horizontal pad position at `time` seconds.
///
/// `time` is wall-clock, not a frame count, so the pad keeps sliding through
/// menus and pauses.
#[inline]
pub fn pad_position(base_x: f32, time: f64, speed: f32, range: f32) -> f32 {
    if speed == 0.0 {
        return base_x;
    }
    base_x + ((time * speed as f64).sin() as f32) * range
}

/// The landing target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pad {
    /// Anchor of the oscillation
    pub base_x: f32,
    /// Current left edge
    pub x: f32,
    /// Top surface (the ground line)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Angular speed in radians per second (0 = stationary)
    pub move_speed: f32,
    pub move_range: f32,
}

impl Pad {
    /// Place the pad for a level on the given viewport
    pub fn layout(viewport: &Viewport, env: &Environment) -> Self {
        let mobile_portrait = viewport.is_mobile_portrait();

        let width = if mobile_portrait {
            MIN_MOBILE_PAD_WIDTH.max(viewport.width * MOBILE_PAD_FRACTION)
        } else {
            env.pad_width
        };
        let padding = if viewport.mobile {
            MOBILE_PAD_PADDING
        } else {
            PAD_PADDING
        };

        let available = viewport.width - padding * 2.0 - width;
        let x = padding + available * env.pad_position;

        let (move_speed, mut move_range) = env
            .moving_platform
            .map(|p| (p.speed, p.range))
            .unwrap_or((0.0, 0.0));
        if mobile_portrait && move_range > 0.0 {
            move_range = move_range.min(available / 2.0);
        }

        Self {
            base_x: x,
            x,
            y: viewport.ground_y(),
            width,
            height: PAD_HEIGHT,
            move_speed,
            move_range,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.move_speed > 0.0
    }

    /// Re-evaluate the moving pad's position for the current time
    pub fn update(&mut self, time: f64) {
        if self.is_moving() {
            self.x = pad_position(self.base_x, time, self.move_speed, self.move_range);
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Whether a point lies over the pad. A pad without width never matches.
    pub fn contains_x(&self, x: f32) -> bool {
        self.width > 0.0 && x >= self.x && x <= self.x + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{MovingPlatform, get_level};
    use proptest::prelude::*;

    #[test]
    fn test_centred_pad_layout() {
        let viewport = Viewport::new(800.0, 600.0, false);
        let pad = Pad::layout(&viewport, &get_level(1).env);
        assert_eq!(pad.width, 180.0);
        // 50 + (800 - 100 - 180) * 0.5
        assert_eq!(pad.x, 310.0);
        assert_eq!(pad.base_x, pad.x);
        assert_eq!(pad.y, viewport.ground_y());
        assert_eq!(pad.center_x(), 400.0);
        assert!(!pad.is_moving());
    }

    #[test]
    fn test_off_centre_pad_layout() {
        let viewport = Viewport::new(800.0, 600.0, false);
        let pad = Pad::layout(&viewport, &get_level(4).env);
        // 50 + (800 - 100 - 150) * 0.2
        assert!((pad.x - 160.0).abs() < 1e-4);
    }

    #[test]
    fn test_mobile_portrait_pad_is_wide_and_range_clamped() {
        let viewport = Viewport::new(400.0, 800.0, true);
        let pad = Pad::layout(&viewport, &get_level(9).env);
        assert!((pad.width - 120.0).abs() < 1e-3);
        // (400 - 60 - 120) / 2
        assert!((pad.move_range - 110.0).abs() < 1e-3);
        assert!(pad.is_moving());
    }

    #[test]
    fn test_stationary_pad_ignores_time() {
        let viewport = Viewport::new(800.0, 600.0, false);
        let mut pad = Pad::layout(&viewport, &get_level(2).env);
        let x = pad.x;
        pad.update(12345.678);
        assert_eq!(pad.x, x);
    }

    #[test]
    fn test_moving_pad_follows_time() {
        let viewport = Viewport::new(1200.0, 800.0, false);
        let mut env = get_level(1).env;
        env.moving_platform = Some(MovingPlatform {
            speed: 1.0,
            range: 100.0,
        });
        let mut pad = Pad::layout(&viewport, &env);
        pad.update(std::f64::consts::FRAC_PI_2);
        assert!((pad.x - (pad.base_x + 100.0)).abs() < 1e-3);
    }

    #[test]
    fn test_zero_width_pad_never_contains() {
        let pad = Pad {
            base_x: 100.0,
            x: 100.0,
            y: 500.0,
            width: 0.0,
            height: PAD_HEIGHT,
            move_speed: 0.0,
            move_range: 0.0,
        };
        assert!(!pad.contains_x(100.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let viewport = Viewport::new(800.0, 600.0, false);
        let pad = Pad::layout(&viewport, &get_level(1).env);
        assert!(pad.contains_x(pad.x));
        assert!(pad.contains_x(pad.x + pad.width));
        assert!(!pad.contains_x(pad.x - 0.01));
    }

    proptest! {
        #[test]
        fn prop_stationary_pad_is_constant(base in -1000.0f32..1000.0, t in 0.0f64..1e9, range in 0.0f32..500.0) {
            prop_assert_eq!(pad_position(base, t, 0.0, range), base);
        }

        #[test]
        fn prop_moving_pad_stays_in_range(
            base in -1000.0f32..1000.0,
            t in 0.0f64..1e6,
            speed in 0.01f32..5.0,
            range in 0.0f32..500.0,
        ) {
            let x = pad_position(base, t, speed, range);
            prop_assert!(x >= base - range - 1e-3);
            prop_assert!(x <= base + range + 1e-3);
            prop_assert_eq!(pad_position(base, 0.0, speed, range), base);
        }
    }
}
