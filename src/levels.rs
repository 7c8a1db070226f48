//! Level table
//!
//! Nine levels in three tiers of Moon, Mars and Earth. The first tier has a
//! centred pad, the second moves the pad off-centre and the third makes it
//! oscillate. Gravity values are scaled for arcade play (pixels/frame²).

use serde::{Deserialize, Serialize};

/// Horizontal oscillation of a moving landing pad
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatform {
    /// Angular speed (radians per wall-clock second)
    pub speed: f32,
    /// Amplitude in pixels
    pub range: f32,
}

/// Physics constants of one level, immutable once loaded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Engine acceleration per frame
    pub thrust_power: f32,
    pub start_fuel: f32,
    pub max_landing_speed: f32,
    /// Degrees either side of upright
    pub max_landing_angle: f32,
    pub pad_width: f32,
    /// 0.0 = left edge, 0.5 = centre, 1.0 = right edge
    pub pad_position: f32,
    #[serde(default)]
    pub moving_platform: Option<MovingPlatform>,
}

/// Visual theme of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Moon,
    Mars,
    Earth,
}

/// Scenery toggles for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Scenery {
    pub clouds: bool,
    pub trees: bool,
    pub mountains: bool,
    pub craters: bool,
}

/// A level: physics plus presentation text
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Level {
    /// 1-based level id
    pub id: u32,
    pub name: &'static str,
    pub theme: Theme,
    pub env: Environment,
    pub description: &'static str,
    pub success_message: &'static str,
    pub scenery: Scenery,
}

impl Level {
    pub fn has_moving_pad(&self) -> bool {
        self.env.moving_platform.is_some_and(|p| p.speed > 0.0)
    }
}

const MOON_SCENERY: Scenery = Scenery {
    clouds: false,
    trees: false,
    mountains: false,
    craters: true,
};

const MARS_SCENERY: Scenery = Scenery {
    clouds: false,
    trees: false,
    mountains: true,
    craters: true,
};

const EARTH_SCENERY: Scenery = Scenery {
    clouds: true,
    trees: true,
    mountains: false,
    craters: false,
};

/// Number of levels in the table
pub const LEVEL_COUNT: u32 = 9;

/// All levels, ordered by id
pub static LEVELS: [Level; LEVEL_COUNT as usize] = [
    Level {
        id: 1,
        name: "THE MOON",
        theme: Theme::Moon,
        env: Environment {
            gravity: 0.01,
            thrust_power: 0.12,
            start_fuel: 200.0,
            max_landing_speed: 2.5,
            max_landing_angle: 35.0,
            pad_width: 180.0,
            pad_position: 0.5,
            moving_platform: None,
        },
        description: "Welcome to the Moon! There is hardly any gravity here.",
        success_message: "Fantastic! You landed on the Moon!",
        scenery: MOON_SCENERY,
    },
    Level {
        id: 2,
        name: "MARS",
        theme: Theme::Mars,
        env: Environment {
            gravity: 0.025,
            thrust_power: 0.15,
            start_fuel: 200.0,
            max_landing_speed: 2.2,
            max_landing_angle: 30.0,
            pad_width: 160.0,
            pad_position: 0.5,
            moving_platform: None,
        },
        description: "Mars, the red planet! A little more gravity here.",
        success_message: "Incredible! You are a real Mars astronaut!",
        scenery: MARS_SCENERY,
    },
    Level {
        id: 3,
        name: "EARTH",
        theme: Theme::Earth,
        env: Environment {
            gravity: 0.06,
            thrust_power: 0.18,
            start_fuel: 200.0,
            max_landing_speed: 2.0,
            max_landing_angle: 25.0,
            pad_width: 150.0,
            pad_position: 0.5,
            moving_platform: None,
        },
        description: "Earth has the strongest gravity. This is the hardest!",
        success_message: "Great landing on Earth!",
        scenery: EARTH_SCENERY,
    },
    Level {
        id: 4,
        name: "THE MOON 2",
        theme: Theme::Moon,
        env: Environment {
            gravity: 0.012,
            thrust_power: 0.12,
            start_fuel: 250.0,
            max_landing_speed: 2.5,
            max_landing_angle: 35.0,
            pad_width: 150.0,
            pad_position: 0.2,
            moving_platform: None,
        },
        description: "Fly to the left to find the pad!",
        success_message: "Well done! You found the pad!",
        scenery: MOON_SCENERY,
    },
    Level {
        id: 5,
        name: "MARS 2",
        theme: Theme::Mars,
        env: Environment {
            gravity: 0.028,
            thrust_power: 0.15,
            start_fuel: 250.0,
            max_landing_speed: 2.2,
            max_landing_angle: 30.0,
            pad_width: 140.0,
            pad_position: 0.8,
            moving_platform: None,
        },
        description: "The pad is far to the right!",
        success_message: "Fantastic navigation!",
        scenery: MARS_SCENERY,
    },
    Level {
        id: 6,
        name: "EARTH 2",
        theme: Theme::Earth,
        env: Environment {
            gravity: 0.055,
            thrust_power: 0.18,
            start_fuel: 280.0,
            max_landing_speed: 2.0,
            max_landing_angle: 25.0,
            pad_width: 130.0,
            pad_position: 0.25,
            moving_platform: None,
        },
        description: "Strong gravity and a pad to the left. Good luck!",
        success_message: "AMAZING! You are a master pilot!",
        scenery: EARTH_SCENERY,
    },
    Level {
        id: 7,
        name: "THE MOON 3",
        theme: Theme::Moon,
        env: Environment {
            gravity: 0.015,
            thrust_power: 0.12,
            start_fuel: 300.0,
            max_landing_speed: 2.5,
            max_landing_angle: 35.0,
            pad_width: 140.0,
            pad_position: 0.5,
            moving_platform: Some(MovingPlatform {
                speed: 0.4,
                range: 180.0,
            }),
        },
        description: "The pad glides slowly back and forth!",
        success_message: "Wow! You hit a moving pad!",
        scenery: MOON_SCENERY,
    },
    Level {
        id: 8,
        name: "MARS 3",
        theme: Theme::Mars,
        env: Environment {
            gravity: 0.03,
            thrust_power: 0.15,
            start_fuel: 300.0,
            max_landing_speed: 2.2,
            max_landing_angle: 30.0,
            pad_width: 120.0,
            pad_position: 0.5,
            moving_platform: Some(MovingPlatform {
                speed: 0.5,
                range: 220.0,
            }),
        },
        description: "The pad travels a long way! Watch out!",
        success_message: "Fantastic precision!",
        scenery: MARS_SCENERY,
    },
    Level {
        id: 9,
        name: "EARTH 3",
        theme: Theme::Earth,
        env: Environment {
            gravity: 0.055,
            thrust_power: 0.18,
            start_fuel: 350.0,
            max_landing_speed: 2.0,
            max_landing_angle: 25.0,
            pad_width: 110.0,
            pad_position: 0.5,
            moving_platform: Some(MovingPlatform {
                speed: 0.6,
                range: 260.0,
            }),
        },
        description: "ULTIMATE! Long pad travel and strong gravity!",
        success_message: "YOU ARE A LEGEND! Every level complete!",
        scenery: EARTH_SCENERY,
    },
];

/// Look up a level by id, falling back to the first level for unknown ids
pub fn get_level(id: u32) -> &'static Level {
    LEVELS.iter().find(|l| l.id == id).unwrap_or(&LEVELS[0])
}

/// The level after `id`, if any
pub fn next_level(id: u32) -> Option<&'static Level> {
    let next = id.checked_add(1)?;
    LEVELS.iter().find(|l| l.id == next)
}

/// True for the final level of the table
pub fn is_last_level(id: u32) -> bool {
    id == LEVEL_COUNT
}
