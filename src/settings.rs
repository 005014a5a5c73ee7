//! Game settings and preferences
//!
//! Persisted as JSON in LocalStorage, separately from the best score.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute toggle (the M key), remembered across sessions
    #[serde(default)]
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Visuals ===
    /// Screen shake on penalty catches
    pub screen_shake: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (suppresses shake regardless of the shake toggle)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            screen_shake: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "school_rush_settings";

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_overrides_shake() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());

        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());

        settings.screen_shake = false;
        settings.reduced_motion = false;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn settings_round_trip_json() {
        let settings = Settings {
            master_volume: 0.5,
            muted: true,
            show_fps: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.master_volume, 0.5);
        assert!(back.muted);
        assert!(back.show_fps);
    }

    #[test]
    fn muted_defaults_false_for_older_saves() {
        // Stored JSON from before the muted flag existed still parses
        let json = r#"{
            "master_volume": 0.8,
            "sfx_volume": 1.0,
            "mute_on_blur": true,
            "screen_shake": true,
            "show_fps": false,
            "reduced_motion": false
        }"#;
        let back: Settings = serde_json::from_str(json).unwrap();
        assert!(!back.muted);
    }
}
