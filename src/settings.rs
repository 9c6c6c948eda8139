//! Presentation preferences
//!
//! Held in memory for the lifetime of the page; nothing is stored.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Ambient sea loop volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (draw the player without squash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.3,
            mute_on_blur: true,

            show_fps: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective sound effect gain
    pub fn sfx_gain(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Effective ambient loop gain
    pub fn music_gain(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Squash factor to draw, respecting reduced motion
    pub fn effective_squash(&self, squash: f32) -> f32 {
        if self.reduced_motion { 1.0 } else { squash }
    }

    /// Apply `key=value` overrides, as found in a page's query string.
    ///
    /// Unknown keys and unparsable values are skipped with a warning.
    pub fn apply_query(&mut self, query: &str) {
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let applied = match key {
                "volume" => volume(value).map(|v| self.master_volume = v).is_some(),
                "sfx" => volume(value).map(|v| self.sfx_volume = v).is_some(),
                "music" => volume(value).map(|v| self.music_volume = v).is_some(),
                "fps" => value.parse::<bool>().map(|v| self.show_fps = v).is_ok(),
                "reduced_motion" => value.parse::<bool>().map(|v| self.reduced_motion = v).is_ok(),
                "mute_on_blur" => value.parse::<bool>().map(|v| self.mute_on_blur = v).is_ok(),
                _ => false,
            };
            if !applied {
                log::warn!("Ignoring setting {}={}", key, value);
            }
        }
    }
}

fn volume(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().map(|v| v.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gains() {
        let settings = Settings::default();
        assert!((settings.sfx_gain() - 0.8).abs() < 1e-6);
        assert!((settings.music_gain() - 0.24).abs() < 1e-6);
    }

    #[test]
    fn test_reduced_motion_flattens_squash() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_squash(0.7), 0.7);
        settings.reduced_motion = true;
        assert_eq!(settings.effective_squash(0.7), 1.0);
    }

    #[test]
    fn test_apply_query() {
        let mut settings = Settings::default();
        settings.apply_query("?volume=0.5&fps=true&music=2&bogus=1&sfx=loud");
        assert_eq!(settings.master_volume, 0.5);
        assert!(settings.show_fps);
        assert_eq!(settings.music_volume, 1.0);
        assert_eq!(settings.sfx_volume, 1.0);
    }
}
