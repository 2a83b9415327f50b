pub mod config;
pub mod high_scores;
pub mod logger;
pub mod sim;
