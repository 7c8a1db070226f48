//! Player preferences
//!
//! Persisted separately from progress in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound effects on/off
    pub sound_enabled: bool,
    /// Steer by tilting the device (phones only)
    pub tilt_control: bool,
    /// Tilt (degrees) ignored around level
    pub tilt_dead_zone: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            tilt_control: false,
            tilt_dead_zone: 5.0,
        }
    }
}

impl Settings {
    /// Flip sound on/off, returning the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rocket_lander_settings";

    /// Parse stored settings; unknown or missing fields take defaults
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Unreadable settings ({e}), using defaults");
            Self::default()
        })
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());

        match stored {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => Self::default(),
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) if storage.set_item(Self::STORAGE_KEY, &json).is_ok() => {
                log::info!("Settings saved")
            }
            _ => log::warn!("Failed to save settings"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_sound() {
        let mut settings = Settings::default();
        assert!(settings.sound_enabled);
        assert!(!settings.toggle_sound());
        assert!(settings.toggle_sound());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"tilt_control": true}"#).unwrap();
        assert!(settings.tilt_control);
        assert!(settings.sound_enabled);
        assert_eq!(settings.tilt_dead_zone, 5.0);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
        let saved = Settings {
            sound_enabled: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&saved).unwrap();
        assert_eq!(Settings::from_json(&json), saved);
    }
}
