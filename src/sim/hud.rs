//! Read-only view of the session for the HUD

use glam::Vec2;
use serde::Serialize;

use super::state::GameState;
use super::vehicle::Bounds;

/// Speed readout colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedBand {
    Safe,
    Warning,
    Danger,
}

/// Fuel gauge colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FuelBand {
    Ok,
    Low,
    Critical,
}

/// Everything the HUD draws for one frame
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    pub level: u32,
    pub level_name: &'static str,
    pub pos: Vec2,
    pub angle: f32,
    pub bounds: Bounds,
    /// Speed ×10, rounded, as shown to the player
    pub speed_readout: u32,
    pub speed_band: SpeedBand,
    pub fuel: f32,
    /// Percent of the level's starting fuel, capped at 100
    pub fuel_percent: f32,
    pub fuel_band: FuelBand,
    /// 0 on the ground, 1 at the ceiling
    pub altitude: f32,
    pub pad_center_x: f32,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let env = &state.level.env;
        let vehicle = &state.vehicle;

        let speed_readout = (vehicle.speed() * 10.0).round() as u32;
        let readout = speed_readout as f32;
        let speed_band = if readout > env.max_landing_speed * 15.0 {
            SpeedBand::Danger
        } else if readout > env.max_landing_speed * 10.0 {
            SpeedBand::Warning
        } else {
            SpeedBand::Safe
        };

        let fuel_percent = if env.start_fuel > 0.0 {
            (vehicle.fuel / env.start_fuel * 100.0).min(100.0)
        } else {
            0.0
        };
        let fuel_band = if fuel_percent < 20.0 {
            FuelBand::Critical
        } else if fuel_percent < 40.0 {
            FuelBand::Low
        } else {
            FuelBand::Ok
        };

        Self {
            level: state.level_id,
            level_name: state.level.name,
            pos: vehicle.pos,
            angle: vehicle.angle,
            bounds: vehicle.bounds(),
            speed_readout,
            speed_band,
            fuel: vehicle.fuel,
            fuel_percent,
            fuel_band,
            altitude: state.viewport.altitude_fraction(vehicle.pos.y),
            pad_center_x: state.pad.center_x(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Progress;
    use crate::sim::viewport::Viewport;

    fn state() -> GameState {
        let mut state = GameState::new(3, Viewport::new(800.0, 600.0, false), Progress::new());
        state.start_game();
        state
    }

    #[test]
    fn test_speed_bands() {
        let mut state = state();
        state.vehicle.vel = Vec2::new(0.0, 2.0);
        let hud = HudSnapshot::capture(&state);
        assert_eq!(hud.speed_readout, 20);
        assert_eq!(hud.speed_band, SpeedBand::Safe);

        state.vehicle.vel = Vec2::new(0.0, 3.0);
        assert_eq!(HudSnapshot::capture(&state).speed_band, SpeedBand::Warning);

        state.vehicle.vel = Vec2::new(0.0, 4.0);
        assert_eq!(HudSnapshot::capture(&state).speed_band, SpeedBand::Danger);
    }

    #[test]
    fn test_fuel_bands() {
        let mut state = state();
        assert_eq!(HudSnapshot::capture(&state).fuel_percent, 100.0);

        state.vehicle.fuel = 60.0;
        let hud = HudSnapshot::capture(&state);
        assert!((hud.fuel_percent - 30.0).abs() < 1e-4);
        assert_eq!(hud.fuel_band, FuelBand::Low);

        state.vehicle.fuel = 10.0;
        assert_eq!(HudSnapshot::capture(&state).fuel_band, FuelBand::Critical);
    }

    #[test]
    fn test_zero_start_fuel_reads_empty() {
        let mut state = state();
        let mut level = *state.level;
        level.env.start_fuel = 0.0;
        state.level = Box::leak(Box::new(level));
        state.vehicle.fuel = 0.0;
        let hud = HudSnapshot::capture(&state);
        assert_eq!(hud.fuel_percent, 0.0);
        assert_eq!(hud.fuel_band, FuelBand::Critical);
    }
}
