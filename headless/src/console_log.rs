use common::sim::{EventSink, SimEvent};
use ringbuffer::{AllocRingBuffer, RingBuffer};

pub const EVENT_LOG_CAPACITY: usize = 32;

/// Prints every event and remembers the most recent ones for the end-of-session summary.
pub struct ConsoleEventLog {
    recent: AllocRingBuffer<String>,
    echo: bool,
}

impl ConsoleEventLog {
    pub fn new(capacity: usize, echo: bool) -> Self {
        Self {
            recent: AllocRingBuffer::new(capacity.max(1)),
            echo,
        }
    }

    pub fn recent(&self) -> impl Iterator<Item = &String> {
        self.recent.iter()
    }
}

pub fn describe(event: &SimEvent) -> String {
    match event {
        SimEvent::AgentDied {
            agent_id,
            reason,
            last_positions,
        } => format!("{} {} (length {})", agent_id, reason, last_positions.len()),
        SimEvent::FoodEaten {
            agent_id,
            points_awarded,
            new_food_position,
        } => format!(
            "{} ate food for {} points, new food at {}",
            agent_id, points_awarded, new_food_position
        ),
        SimEvent::PowerUpCollected { agent_id, kind } => format!("{} picked up {}", agent_id, kind),
        SimEvent::PowerUpSpawned { kind, position } => format!("{} appeared at {}", kind, position),
        SimEvent::PowerUpExpired { kind, position } => format!("{} at {} vanished", kind, position),
        SimEvent::EffectExpired { agent_id, kind } => format!("{} lost {}", agent_id, kind),
        SimEvent::RoundEnded(result) => {
            let scores: Vec<String> = result
                .results
                .iter()
                .map(|(id, score)| format!("{}: {}", id, score))
                .collect();
            match result.winner {
                Some(winner) => format!("Round over ({}), {} wins", scores.join(", "), winner),
                None => format!("Round over ({})", scores.join(", ")),
            }
        }
        SimEvent::StateChanged { from, to } => format!("{} -> {}", from, to),
    }
}

impl EventSink for ConsoleEventLog {
    fn on_event(&mut self, event: &SimEvent) {
        let line = describe(event);
        if self.echo {
            println!("{}", line);
        }
        self.recent.enqueue(line);
    }
}
