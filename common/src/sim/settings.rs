use crate::config::ArenaConfig;
use super::difficulty::DifficultyPreset;
use super::food::DEFAULT_FOOD_VALUE;
use super::power_up::SpawnerSettings;

/// Everything a match needs from the configuration, resolved into simulation units.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub difficulty: DifficultyPreset,
    pub food_value: u32,
    pub spawner: SpawnerSettings,
    /// Extra factor applied to food points while the score-multiplier effect is active.
    pub score_multiplier_factor: f64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            field_width: 60,
            field_height: 40,
            difficulty: DifficultyPreset::Easy,
            food_value: DEFAULT_FOOD_VALUE,
            spawner: SpawnerSettings::default(),
            score_multiplier_factor: 1.0,
        }
    }
}

impl From<&ArenaConfig> for MatchSettings {
    fn from(config: &ArenaConfig) -> Self {
        Self {
            field_width: config.field_width,
            field_height: config.field_height,
            difficulty: config.difficulty,
            food_value: config.food.value.max(1),
            spawner: SpawnerSettings {
                spawn_interval: config.power_ups.spawn_interval_secs,
                max_lifetime: config.power_ups.max_lifetime_secs,
                max_active: config.power_ups.max_active.max(1),
                effect_duration: config.power_ups.effect_duration_secs,
            },
            score_multiplier_factor: config.power_ups.score_multiplier_factor.max(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_settings() {
        let settings = MatchSettings::from(&ArenaConfig::default());
        assert_eq!(settings, MatchSettings::default());
    }
}
