//! Animation tuning resource.
//!
//! Holds the knobs of the state machine and the frame sampler, loaded from an
//! INI file. Defaults are safe to run with when the file is missing.
//!
//! # Configuration File Format
//!
//! ```ini
//! [playback]
//! min_frame_duration_ms = 100
//!
//! [multipliers]
//! walking = 2.0
//!
//! [actions]
//! attacking = 40
//! casting = none
//! ```
//!
//! `[multipliers]` sets the sampling speed an actor gets when it enters a
//! state; unlisted states play at 1.0. `[actions]` overrides entries of the
//! [`ActionTable`](crate::resources::actiontable::ActionTable); `none` unmaps
//! a state.

use std::path::PathBuf;
use std::time::Duration;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::components::behavior::BehavioralState;

/// Default safe values for startup
const DEFAULT_MIN_FRAME_DURATION_MS: u64 = 100;
const DEFAULT_WALKING_MULTIPLIER: f32 = 2.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone)]
pub struct AnimationConfig {
    /// Floor applied to the per-frame duration after speed scaling.
    pub min_frame_duration: Duration,
    /// Sampling speed per entered state. Values are finite and > 0.
    pub multipliers: FxHashMap<BehavioralState, f32>,
    /// Action table overrides; `None` removes the mapping.
    pub action_overrides: FxHashMap<BehavioralState, Option<usize>>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationConfig {
    pub fn new() -> Self {
        let mut multipliers = FxHashMap::default();
        multipliers.insert(BehavioralState::Walking, DEFAULT_WALKING_MULTIPLIER);
        Self {
            min_frame_duration: Duration::from_millis(DEFAULT_MIN_FRAME_DURATION_MS),
            multipliers,
            action_overrides: FxHashMap::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Sampling speed for an actor entering `state`.
    pub fn multiplier_for(&self, state: BehavioralState) -> f32 {
        self.multipliers.get(&state).copied().unwrap_or(1.0)
    }

    /// Set the multiplier for `state`, rejecting values that are not
    /// finite and positive.
    pub fn set_multiplier(&mut self, state: BehavioralState, multiplier: f32) -> bool {
        if multiplier.is_finite() && multiplier > 0.0 {
            self.multipliers.insert(state, multiplier);
            true
        } else {
            false
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        info!("Loaded animation config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [playback] section
        match config.getuint("playback", "min_frame_duration_ms") {
            Ok(Some(ms)) => self.min_frame_duration = Duration::from_millis(ms),
            Ok(None) => {}
            Err(e) => warn!("Ignoring playback.min_frame_duration_ms: {}", e),
        }

        let map = config.get_map_ref();

        // [multipliers] section
        if let Some(section) = map.get("multipliers") {
            for (key, value) in section {
                let Some(state) = BehavioralState::from_config_name(key) else {
                    warn!("Unknown state '{}' in [multipliers]", key);
                    continue;
                };
                let parsed = value.as_deref().and_then(|v| v.trim().parse::<f32>().ok());
                match parsed {
                    Some(m) if self.set_multiplier(state, m) => {}
                    _ => warn!("Ignoring invalid multiplier for '{}': {:?}", key, value),
                }
            }
        }

        // [actions] section
        if let Some(section) = map.get("actions") {
            for (key, value) in section {
                let Some(state) = BehavioralState::from_config_name(key) else {
                    warn!("Unknown state '{}' in [actions]", key);
                    continue;
                };
                match value.as_deref().map(str::trim) {
                    Some("none") | Some("") | None => {
                        self.action_overrides.insert(state, None);
                    }
                    Some(v) => match v.parse::<usize>() {
                        Ok(index) => {
                            self.action_overrides.insert(state, Some(index));
                        }
                        Err(_) => warn!("Ignoring invalid action index for '{}': {}", key, v),
                    },
                }
            }
        }
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set(
            "playback",
            "min_frame_duration_ms",
            Some(self.min_frame_duration.as_millis().to_string()),
        );
        for (state, multiplier) in &self.multipliers {
            config.set(
                "multipliers",
                state.config_name(),
                Some(multiplier.to_string()),
            );
        }
        for (state, index) in &self.action_overrides {
            let value = match index {
                Some(i) => i.to_string(),
                None => "none".to_string(),
            };
            config.set("actions", state.config_name(), Some(value));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved animation config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_walk_twice_as_fast() {
        let config = AnimationConfig::new();
        assert_eq!(config.multiplier_for(BehavioralState::Walking), 2.0);
        assert_eq!(config.multiplier_for(BehavioralState::Idle), 1.0);
        assert_eq!(config.multiplier_for(BehavioralState::Attacking), 1.0);
        assert_eq!(config.min_frame_duration, Duration::from_millis(100));
    }

    #[test]
    fn parses_all_sections() {
        let mut config = AnimationConfig::new();
        config
            .load_from_str(
                "[playback]\nmin_frame_duration_ms = 80\n\
                 [multipliers]\nwalking = 1.5\nattacking = 1.25\n\
                 [actions]\nattacking = 80\ncasting = none\n",
            )
            .unwrap();

        assert_eq!(config.min_frame_duration, Duration::from_millis(80));
        assert_eq!(config.multiplier_for(BehavioralState::Walking), 1.5);
        assert_eq!(config.multiplier_for(BehavioralState::Attacking), 1.25);
        assert_eq!(
            config.action_overrides.get(&BehavioralState::Attacking),
            Some(&Some(80))
        );
        assert_eq!(
            config.action_overrides.get(&BehavioralState::Casting),
            Some(&None)
        );
    }

    #[test]
    fn rejects_non_positive_multipliers() {
        let mut config = AnimationConfig::new();
        config
            .load_from_str("[multipliers]\nwalking = 0\nhurt = -2\nsitting = abc\n")
            .unwrap();

        assert_eq!(config.multiplier_for(BehavioralState::Walking), 2.0);
        assert_eq!(config.multiplier_for(BehavioralState::Hurt), 1.0);
        assert_eq!(config.multiplier_for(BehavioralState::Sitting), 1.0);
        assert!(!config.set_multiplier(BehavioralState::Idle, f32::NAN));
    }

    #[test]
    fn ignores_unknown_states() {
        let mut config = AnimationConfig::new();
        config
            .load_from_str("[actions]\nflying = 3\n[multipliers]\nflying = 3.0\n")
            .unwrap();
        assert!(config.action_overrides.is_empty());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.ini");

        let mut saved = AnimationConfig::with_path(&path);
        saved.min_frame_duration = Duration::from_millis(120);
        saved.set_multiplier(BehavioralState::Casting, 0.5);
        saved
            .action_overrides
            .insert(BehavioralState::Dead, None);
        saved.save_to_file().unwrap();

        let mut loaded = AnimationConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.min_frame_duration, Duration::from_millis(120));
        assert_eq!(loaded.multiplier_for(BehavioralState::Casting), 0.5);
        assert_eq!(
            loaded.action_overrides.get(&BehavioralState::Dead),
            Some(&None)
        );
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let mut config = AnimationConfig::with_path("/nonexistent/anim.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.multiplier_for(BehavioralState::Walking), 2.0);
    }
}
