//! Widget configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use trellis_nav::{Nav, NavConfig};
use trellis_timepicker::TimepickerConfig;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global animation switch; overrides the per-nav setting when off
    pub animation: bool,
    pub nav: NavConfig,
    pub timepicker: TimepickerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation: true,
            nav: NavConfig::default(),
            timepicker: TimepickerConfig::default(),
        }
    }
}

impl Config {
    /// Load a JSON configuration file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&json)?;
        config.validate()?;

        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;

        tracing::debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let steps = [
            ("hour_step", self.timepicker.hour_step),
            ("minute_step", self.timepicker.minute_step),
            ("second_step", self.timepicker.second_step),
        ];
        for (name, step) in steps {
            if step <= 0 {
                return Err(CoreError::Config(format!(
                    "{name} must be positive, got {step}"
                )));
            }
        }
        Ok(())
    }

    /// Nav settings with the global animation switch applied
    pub fn nav_config(&self) -> NavConfig {
        NavConfig {
            animation: self.animation && self.nav.animation,
            ..self.nav.clone()
        }
    }

    pub fn apply_to_nav(&self, nav: &Nav) {
        nav.set_config(self.nav_config());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_nav::{Keyboard, Orientation};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("trellis-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"nav": {"orientation": "vertical"}}"#).unwrap();

        assert!(config.animation);
        assert_eq!(config.nav.orientation, Orientation::Vertical);
        assert_eq!(config.nav.keyboard, Keyboard::Off);
        assert_eq!(config.timepicker, TimepickerConfig::default());
    }

    #[test]
    fn test_global_animation_switch() {
        let mut config = Config::default();
        assert!(config.nav_config().animation);

        config.animation = false;
        assert!(!config.nav_config().animation);

        let nav = Nav::new(NavConfig::default());
        config.apply_to_nav(&nav);
        assert!(!nav.animation());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("config");
        let mut config = Config::default();
        config.timepicker.meridian = true;
        config.nav.keyboard = Keyboard::ChangeWithArrows;

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_bad_step() {
        let path = temp_path("bad-step");
        std::fs::write(&path, r#"{"timepicker": {"minute_step": 0}}"#).unwrap();

        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(temp_path("missing"));
        assert!(matches!(result, Err(CoreError::Io(_))));
    }
}
