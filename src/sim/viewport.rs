//! World geometry derived from the canvas size

use serde::{Deserialize, Serialize};

use crate::consts::CEILING_Y;

/// Reference width at which the ship is drawn at full size
pub const BASE_WIDTH: f32 = 800.0;
/// Extra shrink applied on phones held upright
pub const MOBILE_PORTRAIT_SCALE: f32 = 0.7;
/// Tallest ground strip, in pixels
pub const MAX_GROUND_HEIGHT: f32 = 120.0;
/// Ground strip as a fraction of view height (when under the cap)
pub const GROUND_FRACTION: f32 = 0.15;

/// Visible play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub mobile: bool,
    pub portrait: bool,
    /// Ship scale for small screens (≤ 1.0)
    pub scale_factor: f32,
    pub ground_height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, mobile: bool) -> Self {
        let mut viewport = Self {
            width,
            height,
            mobile,
            portrait: false,
            scale_factor: 1.0,
            ground_height: 0.0,
        };
        viewport.resize(width, height);
        viewport
    }

    /// Recompute derived geometry after a window resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.portrait = height > width;

        self.scale_factor = (width / BASE_WIDTH).min(1.0);
        if self.is_mobile_portrait() {
            self.scale_factor *= MOBILE_PORTRAIT_SCALE;
        }

        self.ground_height = MAX_GROUND_HEIGHT.min(height * GROUND_FRACTION);
    }

    pub fn is_mobile_portrait(&self) -> bool {
        self.mobile && self.portrait
    }

    /// Y coordinate of the ground line
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Height above ground as a fraction of the full flyable range
    pub fn altitude_fraction(&self, y: f32) -> f32 {
        let ground_y = self.ground_y();
        let max_altitude = ground_y - CEILING_Y;
        if max_altitude <= 0.0 {
            return 0.0;
        }
        ((ground_y - y) / max_altitude).clamp(0.0, 1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(BASE_WIDTH, 600.0, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_geometry() {
        let v = Viewport::new(1280.0, 720.0, false);
        assert_eq!(v.scale_factor, 1.0);
        assert!((v.ground_height - 108.0).abs() < 1e-4);
        assert!((v.ground_y() - 612.0).abs() < 1e-4);
        assert!(!v.portrait);
    }

    #[test]
    fn test_ground_height_is_capped() {
        let v = Viewport::new(1920.0, 1080.0, false);
        assert_eq!(v.ground_height, 120.0);
    }

    #[test]
    fn test_mobile_portrait_shrinks_ship() {
        let v = Viewport::new(400.0, 800.0, true);
        assert!(v.is_mobile_portrait());
        assert!((v.scale_factor - 0.35).abs() < 1e-6);

        let desktop_portrait = Viewport::new(400.0, 800.0, false);
        assert!((desktop_portrait.scale_factor - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_altitude_fraction() {
        let v = Viewport::new(800.0, 600.0, false);
        assert_eq!(v.altitude_fraction(v.ground_y()), 0.0);
        assert_eq!(v.altitude_fraction(v.ground_y() + 50.0), 0.0);
        assert_eq!(v.altitude_fraction(CEILING_Y), 1.0);
    }
}
