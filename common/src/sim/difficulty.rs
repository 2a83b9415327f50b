use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named difficulty as picked on the settings screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyPreset {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Values the simulation reads; the preset name is only a label for them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultySettings {
    /// Baseline moves per second before speed effects.
    pub speed: f64,
    pub score_multiplier: f64,
    pub powerups_enabled: bool,
}

impl DifficultyPreset {
    pub const ALL: [DifficultyPreset; 3] =
        [DifficultyPreset::Easy, DifficultyPreset::Medium, DifficultyPreset::Hard];

    pub fn settings(&self) -> DifficultySettings {
        match self {
            DifficultyPreset::Easy => DifficultySettings {
                speed: 8.0,
                score_multiplier: 1.0,
                powerups_enabled: true,
            },
            DifficultyPreset::Medium => DifficultySettings {
                speed: 12.0,
                score_multiplier: 1.5,
                powerups_enabled: true,
            },
            DifficultyPreset::Hard => DifficultySettings {
                speed: 18.0,
                score_multiplier: 2.0,
                powerups_enabled: false,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "easy",
            DifficultyPreset::Medium => "medium",
            DifficultyPreset::Hard => "hard",
        }
    }
}

impl fmt::Display for DifficultyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DifficultyPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DifficultyPreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown difficulty '{}', expected easy, medium or hard", s))
    }
}
