//! Configuration file handling for comet.
//!
//! Settings live in `config.toml` under the platform config directory. A
//! missing file means defaults; missing keys take their default values.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use comet_core::{AnimationSpeed, ColorTheme, FieldConfig, TickPolicy};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "config.toml";

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme for comets and the title card.
    pub color_theme: ColorTheme,
    /// Animation clock playback speed.
    pub animation_speed: AnimationSpeed,
    /// Fixed random seed; a fresh one is drawn each run when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Particle field tunables.
    pub field: FieldConfig,
}

impl Config {
    /// Load from the default location, falling back to defaults if the file
    /// does not exist.
    pub fn load() -> Result<Self> {
        let Some(path) = config_path() else {
            debug!("no config directory available, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from the default location. A file that cannot be read, parsed or
    /// validated is logged and replaced by defaults.
    pub fn load_or_default() -> Self {
        Self::or_default(Self::load())
    }

    /// [`Config::load_or_default`] for a specific file.
    pub fn load_or_default_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::or_default(Self::load_from(path))
    }

    fn or_default(loaded: Result<Self>) -> Self {
        loaded.unwrap_or_else(|err| {
            warn!("{err:#}; falling back to defaults");
            Self::default()
        })
    }

    /// Load and validate a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).wrap_err("failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).wrap_err("failed to serialize config")
    }

    /// Check the field settings.
    pub fn validate(&self) -> Result<()> {
        self.field.validate().wrap_err("invalid [field] settings")
    }

    /// Save to the default location, returning the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path().ok_or_else(|| eyre!("no config directory available"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .wrap_err_with(|| format!("failed to write config file {}", path.display()))?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Switch to the other tick policy, resetting field tunables to its preset.
    pub fn toggle_policy(&mut self) {
        self.field = FieldConfig::preset(self.field.policy.toggle());
    }

    /// The active tick policy.
    pub fn policy(&self) -> TickPolicy {
        self.field.policy
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "comet")
}

/// Path of the config file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Directory for runtime data such as the log file.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use comet_core::Interval;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("comet-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.field.comet_count, 8);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
color_theme = "amber"

[field]
policy = "spawn_and_prune"
comet_count = 12
tick_interval = { min = 3.0, max = 5.0 }
"#,
        )
        .unwrap();
        assert_eq!(config.color_theme, ColorTheme::Amber);
        assert_eq!(config.animation_speed, AnimationSpeed::Normal);
        assert_eq!(config.policy(), TickPolicy::SpawnAndPrune);
        assert_eq!(config.field.comet_count, 12);
        assert_eq!(config.field.star_count, 50);
        assert_eq!(config.field.tick_interval, Interval::new(3.0, 5.0));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_range_is_rejected() {
        let err = Config::from_toml(
            r#"
[field]
comet_delay = { min = 5.0, max = 1.0 }
"#,
        )
        .unwrap_err();
        assert!(format!("{err:?}").contains("comet_delay"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = Config::from_toml("bogus = 1\n[field]\nnope = 2\n").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_oversized_count_is_rejected() {
        assert!(Config::from_toml("[field]\ncomet_count = 18446744073709551615").is_err());
        let err = Config::from_toml("[field]\nstar_count = 10001").unwrap_err();
        assert!(format!("{err:?}").contains("star_count"));
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!(Config::from_toml(r#"color_theme = "plaid""#).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config {
            color_theme: ColorTheme::Rose,
            animation_speed: AnimationSpeed::Fast,
            seed: Some(1234),
            ..Default::default()
        };
        config.toggle_policy();

        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_path("nested/config.toml");
        let config = Config {
            seed: Some(7),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_dir_all(path.parent().and_then(Path::parent).unwrap());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let path = std::env::temp_dir()
            .join(format!("comet-fallback-test-{}", std::process::id()))
            .join("config.toml");
        assert_eq!(Config::load_or_default_from(&path), Config::default());

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[field]\ntick_interval = { min = 0.0, max = 0.0 }\n").unwrap();
        assert_eq!(Config::load_or_default_from(&path), Config::default());

        fs::write(&path, "color_theme = [").unwrap();
        assert_eq!(Config::load_or_default_from(&path), Config::default());

        fs::write(&path, "color_theme = \"mono\"\n").unwrap();
        assert_eq!(
            Config::load_or_default_from(&path).color_theme,
            ColorTheme::Mono
        );
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_toggle_policy_uses_preset() {
        let mut config = Config::default();
        config.toggle_policy();
        assert_eq!(config.field, FieldConfig::spawn_and_prune());
        config.toggle_policy();
        assert_eq!(config.field, FieldConfig::regenerate());
    }
}
