//! Explosion particle burst
//!
//! Fire-and-forget: a crash calls [`Explosion::start`], and the frame driver
//! calls [`Explosion::step`] every tick whatever the game phase. Once every
//! particle has burned out the burst clears itself.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{DEBRIS_COUNT, PARTICLE_GRAVITY, SPARK_COUNT};

/// Spark palette (0xRRGGBB)
pub const SPARK_COLORS: [u32; 6] = [0xff6b6b, 0xfeca57, 0xff9f43, 0xee5a24, 0xf8c291, 0xffffff];
pub const DEBRIS_COLOR: u32 = 0x636e72;

/// Extra random spread added to each spark's evenly spaced angle (radians)
const SPARK_ANGLE_JITTER: f32 = 0.5;
const SPARK_MIN_SPEED: f32 = 2.0;
const SPARK_SPEED_SPREAD: f32 = 6.0;
/// Upward kick so the burst fountains
const SPARK_LIFT: f32 = 2.0;
const SPARK_MIN_SIZE: f32 = 4.0;
const SPARK_SIZE_SPREAD: f32 = 8.0;
const SPARK_DECAY_MIN: f32 = 0.015;
const SPARK_DECAY_SPREAD: f32 = 0.01;

const DEBRIS_SCATTER: f32 = 30.0;
const DEBRIS_MIN_SPEED: f32 = 1.0;
const DEBRIS_SPEED_SPREAD: f32 = 4.0;
const DEBRIS_LIFT: f32 = 3.0;
const DEBRIS_MIN_SIZE: f32 = 6.0;
const DEBRIS_SIZE_SPREAD: f32 = 10.0;
/// Debris lasts about 1.5x longer than sparks on average
const DEBRIS_DECAY_MIN: f32 = 0.011;
const DEBRIS_DECAY_SPREAD: f32 = 0.0047;

/// One particle of the burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// 1.0 at spawn, burned out at ≤ 0
    pub life: f32,
    /// Life lost per frame
    pub decay: f32,
    /// Hull fragment rather than a spark (drawn differently)
    pub debris: bool,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// The burst owned by a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Explosion {
    particles: Vec<Particle>,
    active: bool,
}

impl Explosion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Replace any running burst with a fresh one at `origin`
    pub fn start<R: Rng + ?Sized>(&mut self, origin: Vec2, rng: &mut R) {
        self.particles.clear();
        self.particles.reserve(SPARK_COUNT + DEBRIS_COUNT);

        for i in 0..SPARK_COUNT {
            let angle =
                TAU * i as f32 / SPARK_COUNT as f32 + rng.random::<f32>() * SPARK_ANGLE_JITTER;
            let speed = SPARK_MIN_SPEED + rng.random::<f32>() * SPARK_SPEED_SPREAD;
            let color = SPARK_COLORS[rng.random_range(0..SPARK_COLORS.len())];
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - SPARK_LIFT),
                size: SPARK_MIN_SIZE + rng.random::<f32>() * SPARK_SIZE_SPREAD,
                color,
                life: 1.0,
                decay: SPARK_DECAY_MIN + rng.random::<f32>() * SPARK_DECAY_SPREAD,
                debris: false,
            });
        }

        for _ in 0..DEBRIS_COUNT {
            let angle = rng.random::<f32>() * TAU;
            let speed = DEBRIS_MIN_SPEED + rng.random::<f32>() * DEBRIS_SPEED_SPREAD;
            let offset = Vec2::new(
                (rng.random::<f32>() - 0.5) * DEBRIS_SCATTER,
                (rng.random::<f32>() - 0.5) * DEBRIS_SCATTER,
            );
            self.particles.push(Particle {
                pos: origin + offset,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - DEBRIS_LIFT),
                size: DEBRIS_MIN_SIZE + rng.random::<f32>() * DEBRIS_SIZE_SPREAD,
                color: DEBRIS_COLOR,
                life: 1.0,
                decay: DEBRIS_DECAY_MIN + rng.random::<f32>() * DEBRIS_DECAY_SPREAD,
                debris: true,
            });
        }

        self.active = true;
        log::debug!("Explosion started at ({:.0}, {:.0})", origin.x, origin.y);
    }

    /// Advance one frame. Returns true on the frame the burst burns out.
    pub fn step(&mut self) -> bool {
        if !self.active {
            return false;
        }

        let mut any_alive = false;
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life -= p.decay;
            any_alive |= p.is_alive();
        }

        if any_alive {
            return false;
        }

        self.particles.clear();
        self.active = false;
        log::debug!("Explosion finished");
        true
    }

    /// Drop the burst immediately (level reload)
    pub fn clear(&mut self) {
        self.particles.clear();
        self.active = false;
    }
}
