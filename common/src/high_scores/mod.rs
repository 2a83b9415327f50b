mod score_keeper;
mod store;
mod table;

pub use score_keeper::{SINGLE_PLAYER_LABEL, ScoreKeeper};
pub use store::{FileHighScoreStore, HighScoreError, InMemoryHighScoreStore, ScoreRecorder};
pub use table::{HighScoreEntry, HighScoreTable};
