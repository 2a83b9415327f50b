mod agent;
mod arena;
mod difficulty;
mod effects;
pub mod events;
mod food;
mod grid;
mod match_controller;
mod power_up;
mod rng;
mod settings;
mod step;
mod types;

pub use agent::Agent;
pub use arena::Arena;
pub use difficulty::{DifficultyPreset, DifficultySettings};
pub use effects::{
    EffectSet, PowerUpKind, SHRINK_MIN_LENGTH, SLOW_DOWN_MULTIPLIER, SPEED_BOOST_MULTIPLIER,
    WALL_PHASE_INVULNERABILITY_SECS,
};
pub use events::{EventSink, RoundResult, SimEvent, dispatch};
pub use food::{DEFAULT_FOOD_VALUE, Food};
pub use grid::{Grid, SPAWN_ATTEMPTS};
pub use match_controller::{MatchController, MatchState};
pub use power_up::{PowerUp, PowerUpSpawner, SpawnerSettings};
pub use rng::SessionRng;
pub use settings::MatchSettings;
pub use step::{FOOD_GROWTH, StepContext};
pub use types::{AgentColor, AgentId, BoundaryMode, DeathReason, Direction, MatchMode, Point};
