//! Spaceship physics
//!
//! One call to [`Vehicle::step`] advances exactly one frame. There is no
//! delta-time: gravity, thrust and drag are all per-frame quantities.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{heading_vector, normalize_degrees};

/// Control intents for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub thrust: bool,
    pub left: bool,
    pub right: bool,
}

/// Axis-aligned box around the rotated hull
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// The player's spaceship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Centre position (y grows downward)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, 0 = upright, normalized to (-180, 180]
    pub angle: f32,
    pub fuel: f32,
    /// Hull size after scaling
    pub width: f32,
    pub height: f32,
    /// Set after a non-destructive failed landing
    pub distressed: bool,
    /// Flame size for rendering, decays toward 0 without thrust
    pub flame: f32,
    /// Cosmetic eye offset following horizontal motion
    pub gaze: f32,
    thrusting: bool,
}

impl Vehicle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            angle: 0.0,
            fuel: 100.0,
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
            distressed: false,
            flame: 0.0,
            gaze: 0.0,
            thrusting: false,
        }
    }

    /// Put the ship back at rest at a new spawn point
    pub fn reset(&mut self, x: f32, y: f32, fuel: f32) {
        self.pos = Vec2::new(x, y);
        self.vel = Vec2::ZERO;
        self.angle = 0.0;
        self.fuel = fuel.max(0.0);
        self.distressed = false;
        self.flame = 0.0;
        self.gaze = 0.0;
        self.thrusting = false;
    }

    /// Resize the hull for small screens
    pub fn set_scale(&mut self, scale: f32) {
        self.width = SHIP_WIDTH * scale;
        self.height = SHIP_HEIGHT * scale;
    }

    /// Whether the engine fired during the last step
    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    /// Stop firing without touching the flame, which decays on its own
    pub fn cut_engine(&mut self) {
        self.thrusting = false;
    }

    /// Advance one frame
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        gravity: f32,
        thrust_power: f32,
        controls: Controls,
        rng: &mut R,
    ) {
        self.vel.y += gravity;

        if controls.left {
            self.vel.x -= HORIZONTAL_POWER;
            if self.angle > -MAX_TILT {
                self.angle -= TILT_STEP;
            }
        }
        if controls.right {
            self.vel.x += HORIZONTAL_POWER;
            if self.angle < MAX_TILT {
                self.angle += TILT_STEP;
            }
        }
        if !controls.left && !controls.right {
            self.stabilize();
        }
        self.angle = normalize_degrees(self.angle);

        self.thrusting = controls.thrust && self.fuel > 0.0;
        if self.thrusting {
            self.vel += heading_vector(self.angle) * thrust_power;
            self.fuel = (self.fuel - FUEL_BURN).max(0.0);
            self.flame = FLAME_BASE + rng.random::<f32>() * FLAME_JITTER;
        } else {
            self.flame = (self.flame - FLAME_DECAY).max(0.0);
        }

        self.pos += self.vel;
        self.gaze = (self.vel.x * 0.5).clamp(-MAX_GAZE, MAX_GAZE);
        self.vel.x *= HORIZONTAL_DRAG;
    }

    /// Linear auto-leveling toward upright
    fn stabilize(&mut self) {
        if self.angle > STABILIZATION_EPSILON {
            self.angle -= STABILIZATION_STEP;
        } else if self.angle < -STABILIZATION_EPSILON {
            self.angle += STABILIZATION_STEP;
        } else {
            self.angle = 0.0;
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Projected box of the rotated hull.
    ///
    /// Uses `|cos|·w + |sin|·h` extents rather than the exact polygon; the
    /// ground and landing checks depend on this shape.
    pub fn bounds(&self) -> Bounds {
        let radians = self.angle.to_radians();
        let cos = radians.cos().abs();
        let sin = radians.sin().abs();

        let w = self.width * cos + self.height * sin;
        let h = self.width * sin + self.height * cos;

        Bounds {
            left: self.pos.x - w / 2.0,
            right: self.pos.x + w / 2.0,
            top: self.pos.y - h / 2.0,
            bottom: self.pos.y + h / 2.0,
        }
    }

    /// Stop dead with the hull resting on the ground line
    pub fn settle_on_ground(&mut self, ground_y: f32) {
        self.vel = Vec2::ZERO;
        self.pos.y = ground_y - self.height / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_gravity_only() {
        let mut ship = Vehicle::new(100.0, 100.0);
        ship.step(0.05, 0.12, Controls::default(), &mut rng());
        assert!((ship.vel.y - 0.05).abs() < 1e-6);
        assert!((ship.pos.y - 100.05).abs() < 1e-4);
        assert_eq!(ship.fuel, 100.0);
        assert!(!ship.is_thrusting());
    }

    #[test]
    fn test_upright_thrust_pushes_up_and_burns_fuel() {
        let mut ship = Vehicle::new(100.0, 100.0);
        let controls = Controls {
            thrust: true,
            ..Default::default()
        };
        ship.step(0.01, 0.12, controls, &mut rng());
        assert!((ship.vel.y - (0.01 - 0.12)).abs() < 1e-5);
        assert!(ship.vel.x.abs() < 1e-5);
        assert!((ship.fuel - (100.0 - FUEL_BURN)).abs() < 1e-4);
        assert!(ship.flame >= FLAME_BASE && ship.flame <= FLAME_BASE + FLAME_JITTER);
        assert!(ship.is_thrusting());
    }

    #[test]
    fn test_zero_fuel_never_thrusts() {
        let mut ship = Vehicle::new(100.0, 100.0);
        ship.reset(100.0, 100.0, 0.0);
        let controls = Controls {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..10 {
            ship.step(0.02, 0.2, controls, &mut rng());
        }
        assert_eq!(ship.fuel, 0.0);
        assert!(!ship.is_thrusting());
        assert!(ship.vel.y > 0.19);
    }

    #[test]
    fn test_fuel_clamps_at_zero() {
        let mut ship = Vehicle::new(100.0, 100.0);
        ship.reset(100.0, 100.0, 0.5);
        let controls = Controls {
            thrust: true,
            ..Default::default()
        };
        ship.step(0.0, 0.1, controls, &mut rng());
        ship.step(0.0, 0.1, controls, &mut rng());
        assert_eq!(ship.fuel, 0.0);
    }

    #[test]
    fn test_flame_decays_without_thrust() {
        let mut ship = Vehicle::new(0.0, 0.0);
        ship.flame = 7.0;
        ship.step(0.0, 0.1, Controls::default(), &mut rng());
        assert_eq!(ship.flame, 4.0);
        ship.step(0.0, 0.1, Controls::default(), &mut rng());
        ship.step(0.0, 0.1, Controls::default(), &mut rng());
        assert_eq!(ship.flame, 0.0);
    }

    #[test]
    fn test_turning_tilts_and_accelerates_sideways() {
        let mut ship = Vehicle::new(0.0, 0.0);
        let left = Controls {
            left: true,
            ..Default::default()
        };
        ship.step(0.0, 0.1, left, &mut rng());
        assert!((ship.angle + TILT_STEP).abs() < 1e-6);
        assert!((ship.vel.x + HORIZONTAL_POWER * HORIZONTAL_DRAG).abs() < 1e-6);
    }

    #[test]
    fn test_tilt_stops_near_max() {
        let mut ship = Vehicle::new(0.0, 0.0);
        let right = Controls {
            right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            ship.step(0.0, 0.1, right, &mut rng());
        }
        assert!(ship.angle >= MAX_TILT);
        assert!(ship.angle < MAX_TILT + TILT_STEP);
    }

    #[test]
    fn test_drag_is_horizontal_only() {
        let mut ship = Vehicle::new(0.0, 0.0);
        ship.vel = Vec2::new(2.0, 2.0);
        ship.step(0.0, 0.1, Controls::default(), &mut rng());
        assert!((ship.vel.x - 2.0 * HORIZONTAL_DRAG).abs() < 1e-6);
        assert_eq!(ship.vel.y, 2.0);
        assert_eq!(ship.pos, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_bounds_upright_and_sideways() {
        let mut ship = Vehicle::new(100.0, 200.0);
        let b = ship.bounds();
        assert!((b.bottom - 230.0).abs() < 1e-4);
        assert!((b.left - 80.0).abs() < 1e-4);

        ship.angle = 90.0;
        let b = ship.bounds();
        assert!((b.bottom - 220.0).abs() < 1e-3);
        assert!((b.right - 130.0).abs() < 1e-3);
    }

    #[test]
    fn test_scaled_hull_settles_lower() {
        let mut ship = Vehicle::new(0.0, 0.0);
        ship.set_scale(0.5);
        ship.vel = Vec2::new(1.0, 3.0);
        ship.settle_on_ground(500.0);
        assert_eq!(ship.vel, Vec2::ZERO);
        assert_eq!(ship.pos.y, 485.0);
    }

    proptest! {
        #[test]
        fn prop_fuel_never_negative_and_only_burns_when_thrusting(
            start_fuel in 0.0f32..5.0,
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..80),
        ) {
            let mut rng = rng();
            let mut ship = Vehicle::new(400.0, 100.0);
            ship.reset(400.0, 100.0, start_fuel);
            for (thrust, left, right) in inputs {
                let before = ship.fuel;
                ship.step(0.03, 0.15, Controls { thrust, left, right }, &mut rng);
                prop_assert!(ship.fuel >= 0.0);
                if thrust && before > 0.0 {
                    prop_assert!(ship.fuel < before);
                } else {
                    prop_assert_eq!(ship.fuel, before);
                }
            }
        }

        #[test]
        fn prop_angle_stays_normalized(
            start in -179.9f32..=180.0,
            inputs in prop::collection::vec((any::<bool>(), any::<bool>()), 1..100),
        ) {
            let mut rng = rng();
            let mut ship = Vehicle::new(0.0, 0.0);
            ship.angle = start;
            for (left, right) in inputs {
                ship.step(0.0, 0.1, Controls { thrust: false, left, right }, &mut rng);
                prop_assert!(ship.angle > -180.0 && ship.angle <= 180.0);
            }
        }

        #[test]
        fn prop_angle_levels_out_once_released(start in -179.9f32..=180.0) {
            let mut rng = rng();
            let mut ship = Vehicle::new(0.0, 0.0);
            ship.angle = start;
            let frames = (180.0 / STABILIZATION_STEP) as usize + 2;
            for _ in 0..frames {
                ship.step(0.0, 0.1, Controls::default(), &mut rng);
            }
            prop_assert_eq!(ship.angle, 0.0);
        }
    }
}
