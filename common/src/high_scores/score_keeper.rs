use crate::log;
use crate::sim::{EventSink, MatchMode, RoundResult, SimEvent};
use super::ScoreRecorder;

pub const SINGLE_PLAYER_LABEL: &str = "Player";

/// Files finished rounds with a recorder. Persistence failures are logged and dropped.
pub struct ScoreKeeper<R: ScoreRecorder> {
    recorder: R,
}

impl<R: ScoreRecorder> ScoreKeeper<R> {
    pub fn new(recorder: R) -> Self {
        Self { recorder }
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut R {
        &mut self.recorder
    }

    fn record_round(&mut self, result: &RoundResult) {
        let entry = match result.mode {
            MatchMode::Single => result
                .results
                .first()
                .map(|(_, score)| (*score, SINGLE_PLAYER_LABEL.to_string())),
            MatchMode::Multi => result
                .winner
                .and_then(|id| result.score_of(id).map(|score| (score, id.to_string()))),
        };
        let Some((score, label)) = entry else {
            return;
        };
        if let Err(e) = self.recorder.record_score(score, &label, result.mode) {
            log!("Failed to record high score for {}: {}", label, e);
        }
    }
}

impl<R: ScoreRecorder> EventSink for ScoreKeeper<R> {
    fn on_event(&mut self, event: &SimEvent) {
        if let SimEvent::RoundEnded(result) = event {
            self.record_round(result);
        }
    }
}
