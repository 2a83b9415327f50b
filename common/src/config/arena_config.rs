use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Validate;
use super::validate::{check_positive, check_range};
use crate::sim::{DEFAULT_FOOD_VALUE, DifficultyPreset};

const CONFIG_FILE_NAME: &str = "snake_arena_config.yaml";

/// Config file next to the executable, or in the working directory when that can't be resolved.
pub fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct FoodConfig {
    pub value: u32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_FOOD_VALUE,
        }
    }
}

impl Validate for FoodConfig {
    fn validate(&self) -> Result<(), String> {
        check_range("food.value", self.value, 1..=1000)
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct PowerUpConfig {
    pub spawn_interval_secs: f64,
    pub max_lifetime_secs: f64,
    pub max_active: usize,
    pub effect_duration_secs: f64,
    #[serde(default = "default_score_multiplier_factor")]
    pub score_multiplier_factor: f64,
}

fn default_score_multiplier_factor() -> f64 {
    1.0
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            spawn_interval_secs: 10.0,
            max_lifetime_secs: 15.0,
            max_active: 3,
            effect_duration_secs: 5.0,
            score_multiplier_factor: default_score_multiplier_factor(),
        }
    }
}

impl Validate for PowerUpConfig {
    fn validate(&self) -> Result<(), String> {
        check_positive("power_ups.spawn_interval_secs", self.spawn_interval_secs)?;
        check_positive("power_ups.max_lifetime_secs", self.max_lifetime_secs)?;
        check_positive("power_ups.effect_duration_secs", self.effect_duration_secs)?;
        check_range("power_ups.max_active", self.max_active, 1..=10)?;
        if !(self.score_multiplier_factor.is_finite() && self.score_multiplier_factor >= 1.0) {
            return Err(format!(
                "power_ups.score_multiplier_factor must be at least 1, got {}",
                self.score_multiplier_factor
            ));
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct HighScoresConfig {
    pub location: String,
    pub retain: usize,
}

impl Default for HighScoresConfig {
    fn default() -> Self {
        Self {
            location: "snake_arena_high_scores.yaml".to_string(),
            retain: 10,
        }
    }
}

impl Validate for HighScoresConfig {
    fn validate(&self) -> Result<(), String> {
        if self.location.trim().is_empty() {
            return Err("high_scores.location must not be empty".to_string());
        }
        check_range("high_scores.retain", self.retain, 1..=100)
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: None,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ArenaConfig {
    pub field_width: usize,
    pub field_height: usize,
    pub difficulty: DifficultyPreset,
    pub food: FoodConfig,
    pub power_ups: PowerUpConfig,
    pub high_scores: HighScoresConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            field_width: 60,
            field_height: 40,
            difficulty: DifficultyPreset::Easy,
            food: FoodConfig::default(),
            power_ups: PowerUpConfig::default(),
            high_scores: HighScoresConfig::default(),
            logging: LoggingConfig::default(),
            seed: None,
        }
    }
}

impl Validate for ArenaConfig {
    fn validate(&self) -> Result<(), String> {
        check_range("field_width", self.field_width, 10..=200)?;
        check_range("field_height", self.field_height, 10..=200)?;
        self.food.validate()?;
        self.power_ups.validate()?;
        self.high_scores.validate()?;
        Ok(())
    }
}
