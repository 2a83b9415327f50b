use super::effects::PowerUpKind;
use super::match_controller::MatchState;
use super::types::{AgentId, DeathReason, MatchMode, Point};

/// Final standings of one round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundResult {
    pub mode: MatchMode,
    /// Every agent in the roster with its final score, in roster order.
    pub results: Vec<(AgentId, u32)>,
    /// Multi-agent rounds only: highest score, lowest id on ties.
    pub winner: Option<AgentId>,
}

impl RoundResult {
    pub fn score_of(&self, agent_id: AgentId) -> Option<u32> {
        self.results
            .iter()
            .find(|(id, _)| *id == agent_id)
            .map(|(_, score)| *score)
    }

    pub fn winner_score(&self) -> Option<u32> {
        self.winner.and_then(|id| self.score_of(id))
    }
}

/// Outcomes the simulation reports to audio, visual and persistence collaborators.
#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    AgentDied {
        agent_id: AgentId,
        reason: DeathReason,
        last_positions: Vec<Point>,
    },
    FoodEaten {
        agent_id: AgentId,
        points_awarded: u32,
        new_food_position: Point,
    },
    PowerUpCollected {
        agent_id: AgentId,
        kind: PowerUpKind,
    },
    PowerUpSpawned {
        kind: PowerUpKind,
        position: Point,
    },
    PowerUpExpired {
        kind: PowerUpKind,
        position: Point,
    },
    EffectExpired {
        agent_id: AgentId,
        kind: PowerUpKind,
    },
    RoundEnded(RoundResult),
    StateChanged {
        from: MatchState,
        to: MatchState,
    },
}

/// A consumer of simulation events. Implementations must not feed back into the simulation.
pub trait EventSink {
    fn on_event(&mut self, event: &SimEvent);
}

/// Delivers every event, in order, to every sink.
pub fn dispatch(events: &[SimEvent], sinks: &mut [&mut dyn EventSink]) {
    for event in events {
        for sink in sinks.iter_mut() {
            sink.on_event(event);
        }
    }
}
