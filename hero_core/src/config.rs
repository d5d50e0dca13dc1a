//! Configuration file support for Heroforge.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/heroforge/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub classifier: ClassifierParams,

    #[serde(default)]
    pub leveling: LevelingParams,
}

/// Data location configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_workouts_path")]
    pub workouts_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            workouts_path: default_workouts_path(),
        }
    }
}

/// Classification thresholds.
///
/// Defaults preserve the tuned production values. They are configuration,
/// not fixed law: tightening `champion_tolerance` makes the champion path
/// rarer, lowering `dominant_threshold` makes specialist paths more common.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ClassifierParams {
    /// Percentage each category should sit near for a champion distribution
    #[serde(default = "default_champion_target")]
    pub champion_target: f64,

    /// Absolute tolerance around the champion target
    #[serde(default = "default_champion_tolerance")]
    pub champion_tolerance: f64,

    /// Minimum percentage for a single category to dominate outright
    #[serde(default = "default_dominant_threshold")]
    pub dominant_threshold: f64,

    /// Gap between 2nd and 3rd place below which the pairing is a coin flip
    #[serde(default = "default_tie_epsilon")]
    pub tie_epsilon: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            champion_target: default_champion_target(),
            champion_tolerance: default_champion_tolerance(),
            dominant_threshold: default_dominant_threshold(),
            tie_epsilon: default_tie_epsilon(),
        }
    }
}

/// XP curve and content unlock schedule
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LevelingParams {
    /// Level N costs `xp_per_level_base * N` XP beyond level N-1
    #[serde(default = "default_xp_per_level_base")]
    pub xp_per_level_base: u64,

    /// XP awarded per workout minute when a record carries no explicit award
    #[serde(default = "default_xp_per_minute")]
    pub xp_per_minute: u64,

    #[serde(default = "default_item_shop_unlock_level")]
    pub item_shop_unlock_level: u32,

    #[serde(default = "default_missions_unlock_level")]
    pub missions_unlock_level: u32,

    #[serde(default = "default_faction_unlock_level")]
    pub faction_unlock_level: u32,

    /// Path (re)assignment happens at every multiple of this level
    #[serde(default = "default_path_milestone_interval")]
    pub path_milestone_interval: u32,
}

impl Default for LevelingParams {
    fn default() -> Self {
        Self {
            xp_per_level_base: default_xp_per_level_base(),
            xp_per_minute: default_xp_per_minute(),
            item_shop_unlock_level: default_item_shop_unlock_level(),
            missions_unlock_level: default_missions_unlock_level(),
            faction_unlock_level: default_faction_unlock_level(),
            path_milestone_interval: default_path_milestone_interval(),
        }
    }
}

// Default value functions
fn default_workouts_path() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("heroforge").join("workouts.csv")
}

fn default_champion_target() -> f64 {
    33.33
}

fn default_champion_tolerance() -> f64 {
    1.0
}

fn default_dominant_threshold() -> f64 {
    80.0
}

fn default_tie_epsilon() -> f64 {
    0.1
}

fn default_xp_per_level_base() -> u64 {
    100
}

fn default_xp_per_minute() -> u64 {
    10
}

fn default_item_shop_unlock_level() -> u32 {
    2
}

fn default_missions_unlock_level() -> u32 {
    3
}

fn default_faction_unlock_level() -> u32 {
    5
}

fn default_path_milestone_interval() -> u32 {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("heroforge").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.classifier.dominant_threshold, 80.0);
        assert_eq!(config.classifier.tie_epsilon, 0.1);
        assert_eq!(config.leveling.faction_unlock_level, 5);
        assert_eq!(config.leveling.path_milestone_interval, 10);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.classifier.champion_tolerance,
            parsed.classifier.champion_tolerance
        );
        assert_eq!(
            config.leveling.xp_per_level_base,
            parsed.leveling.xp_per_level_base
        );
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[classifier]
dominant_threshold = 75.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.classifier.dominant_threshold, 75.0);
        assert_eq!(config.classifier.tie_epsilon, 0.1); // default
        assert_eq!(config.leveling.missions_unlock_level, 3); // default
    }
}
