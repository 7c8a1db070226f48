//! Landing judgment
//!
//! Runs once when the ship's bounds first reach the ground line. The verdict
//! is a plain value: a crash is a game outcome, never an error.

use serde::{Deserialize, Serialize};

use super::pad::Pad;
use super::vehicle::Vehicle;
use crate::levels::Environment;

/// Classified result of a touchdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandingOutcome {
    /// On the pad, slow enough and upright enough
    Success,
    /// Too fast; the ship explodes
    Crashed,
    /// Missed the pad (non-destructive)
    MissedPad,
    /// Touched the pad leaning too far (non-destructive)
    BadAngle,
}

impl LandingOutcome {
    pub fn is_success(self) -> bool {
        self == LandingOutcome::Success
    }

    /// Failures that blow the ship up
    pub fn is_destructive(self) -> bool {
        self == LandingOutcome::Crashed
    }

    /// Failures that leave a sad but intact ship
    pub fn is_distress(self) -> bool {
        matches!(self, LandingOutcome::MissedPad | LandingOutcome::BadAngle)
    }

    /// Short player-facing reason
    pub fn reason(self) -> &'static str {
        match self {
            LandingOutcome::Success => "Touchdown!",
            LandingOutcome::Crashed => "You came down too fast!",
            LandingOutcome::MissedPad => "You missed the landing pad!",
            LandingOutcome::BadAngle => "The rocket was tilted too far!",
        }
    }
}

/// Everything the judge looks at, captured at touchdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touchdown {
    pub speed: f32,
    /// Absolute tilt in degrees
    pub tilt: f32,
    /// Ship centre x
    pub x: f32,
}

impl Touchdown {
    pub fn of(vehicle: &Vehicle) -> Self {
        Self {
            speed: vehicle.speed(),
            tilt: vehicle.angle.abs(),
            x: vehicle.pos.x,
        }
    }
}

/// Individual checks behind an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checks {
    pub on_pad: bool,
    pub good_speed: bool,
    pub good_angle: bool,
}

impl Checks {
    pub fn evaluate(touchdown: &Touchdown, pad: &Pad, env: &Environment) -> Self {
        Self {
            on_pad: pad.contains_x(touchdown.x),
            good_speed: touchdown.speed <= env.max_landing_speed,
            good_angle: touchdown.tilt <= env.max_landing_angle,
        }
    }

    /// First failing check wins: speed, then pad, then angle
    pub fn outcome(&self) -> LandingOutcome {
        if !self.good_speed {
            LandingOutcome::Crashed
        } else if !self.on_pad {
            LandingOutcome::MissedPad
        } else if !self.good_angle {
            LandingOutcome::BadAngle
        } else {
            LandingOutcome::Success
        }
    }
}

/// What the judge decided, and for which level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingReport {
    pub level: u32,
    pub outcome: LandingOutcome,
    pub touchdown: Touchdown,
    pub checks: Checks,
}

/// Pure verdict from touchdown values
pub fn classify(touchdown: &Touchdown, pad: &Pad, env: &Environment) -> LandingOutcome {
    Checks::evaluate(touchdown, pad, env).outcome()
}

/// Judge the vehicle's touchdown and settle it on the ground.
///
/// The ship is stopped and snapped to rest on `ground_y` whatever the
/// outcome; distress failures also set its `distressed` flag.
pub fn judge(
    vehicle: &mut Vehicle,
    pad: &Pad,
    env: &Environment,
    ground_y: f32,
    level: u32,
) -> LandingReport {
    let touchdown = Touchdown::of(vehicle);
    let checks = Checks::evaluate(&touchdown, pad, env);
    let outcome = checks.outcome();

    vehicle.settle_on_ground(ground_y);
    if outcome.is_distress() {
        vehicle.distressed = true;
    }

    LandingReport {
        level,
        outcome,
        touchdown,
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::get_level;
    use crate::sim::viewport::Viewport;
    use glam::Vec2;
    use proptest::prelude::*;

    fn setup() -> (Pad, Environment) {
        let viewport = Viewport::new(800.0, 600.0, false);
        let env = get_level(1).env;
        (Pad::layout(&viewport, &env), env)
    }

    #[test]
    fn test_gentle_landing_on_pad_succeeds() {
        let (pad, env) = setup();
        let touchdown = Touchdown {
            speed: 1.0,
            tilt: 10.0,
            x: pad.center_x(),
        };
        assert_eq!(classify(&touchdown, &pad, &env), LandingOutcome::Success);
    }

    #[test]
    fn test_limits_are_inclusive() {
        let (pad, env) = setup();
        let touchdown = Touchdown {
            speed: env.max_landing_speed,
            tilt: env.max_landing_angle,
            x: pad.x,
        };
        assert_eq!(classify(&touchdown, &pad, &env), LandingOutcome::Success);
    }

    #[test]
    fn test_speed_beats_missed_pad() {
        let (pad, env) = setup();
        let touchdown = Touchdown {
            speed: 5.0,
            tilt: 0.0,
            x: pad.x - 100.0,
        };
        assert_eq!(classify(&touchdown, &pad, &env), LandingOutcome::Crashed);
    }

    #[test]
    fn test_missed_pad_beats_bad_angle() {
        let (pad, env) = setup();
        let touchdown = Touchdown {
            speed: 1.0,
            tilt: 80.0,
            x: pad.x + pad.width + 1.0,
        };
        assert_eq!(classify(&touchdown, &pad, &env), LandingOutcome::MissedPad);
    }

    #[test]
    fn test_bad_angle_on_pad() {
        let (pad, env) = setup();
        let touchdown = Touchdown {
            speed: 1.0,
            tilt: 40.0,
            x: pad.center_x(),
        };
        assert_eq!(classify(&touchdown, &pad, &env), LandingOutcome::BadAngle);
    }

    #[test]
    fn test_zero_width_pad_cannot_be_landed_on() {
        let (mut pad, env) = setup();
        pad.width = 0.0;
        let touchdown = Touchdown {
            speed: 0.5,
            tilt: 0.0,
            x: pad.x,
        };
        assert_eq!(classify(&touchdown, &pad, &env), LandingOutcome::MissedPad);
    }

    #[test]
    fn test_judge_settles_vehicle_and_flags_distress() {
        let (pad, env) = setup();
        let mut ship = Vehicle::new(pad.x - 50.0, 505.0);
        ship.vel = Vec2::new(0.3, 1.0);
        let report = judge(&mut ship, &pad, &env, 510.0, 1);

        assert_eq!(report.outcome, LandingOutcome::MissedPad);
        assert_eq!(report.level, 1);
        assert!(!report.checks.on_pad);
        assert_eq!(ship.vel, Vec2::ZERO);
        assert_eq!(ship.pos.y, 510.0 - ship.height / 2.0);
        assert!(ship.distressed);
    }

    #[test]
    fn test_crash_is_not_distress() {
        let (pad, env) = setup();
        let mut ship = Vehicle::new(pad.center_x(), 505.0);
        ship.vel = Vec2::new(0.0, 4.0);
        let report = judge(&mut ship, &pad, &env, 510.0, 3);
        assert_eq!(report.outcome, LandingOutcome::Crashed);
        assert!(report.outcome.is_destructive());
        assert!(!ship.distressed);
        assert!((report.touchdown.speed - 4.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_too_fast_always_crashes(
            excess in 0.001f32..50.0,
            tilt in 0.0f32..180.0,
            x in -500.0f32..1500.0,
        ) {
            let (pad, env) = setup();
            let touchdown = Touchdown { speed: env.max_landing_speed + excess, tilt, x };
            prop_assert_eq!(classify(&touchdown, &pad, &env), LandingOutcome::Crashed);
        }

        #[test]
        fn prop_outcome_is_deterministic(
            speed in 0.0f32..6.0,
            tilt in 0.0f32..180.0,
            x in -500.0f32..1500.0,
        ) {
            let (pad, env) = setup();
            let touchdown = Touchdown { speed, tilt, x };
            prop_assert_eq!(classify(&touchdown, &pad, &env), classify(&touchdown, &pad, &env));
        }
    }
}
