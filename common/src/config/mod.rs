mod arena_config;
mod config_manager;
mod content_provider;
mod serializer;
mod validate;

pub use arena_config::{
    ArenaConfig, FoodConfig, HighScoresConfig, LoggingConfig, PowerUpConfig, get_config_path,
};
pub use config_manager::ConfigManager;
pub use content_provider::{ContentProvider, FileContentProvider, MemoryContentProvider};
pub use serializer::{Serializer, YamlSerializer};
pub use validate::Validate;
