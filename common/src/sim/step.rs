use crate::log;
use super::arena::Arena;
use super::difficulty::DifficultySettings;
use super::effects::PowerUpKind;
use super::events::{RoundResult, SimEvent};
use super::rng::SessionRng;
use super::types::{AgentId, DeathReason, MatchMode, Point};

/// Cells added to an agent for each food eaten.
pub const FOOD_GROWTH: u32 = 2;

pub struct StepContext<'a> {
    /// Simulated seconds since the match started; effect expiries are based on it.
    pub now: f64,
    pub difficulty: &'a DifficultySettings,
    pub rng: &'a mut SessionRng,
}

impl Arena {
    /// One discrete tick: move, eat, collect, collide, then check for the end of the round.
    /// The phase order is fixed and every phase sees the results of the previous one.
    pub fn step(&mut self, ctx: &mut StepContext<'_>, events: &mut Vec<SimEvent>) -> Option<RoundResult> {
        let movers: Vec<usize> = (0..self.agents.len())
            .filter(|&i| self.agents[i].is_alive())
            .collect();

        self.move_agents(&movers, events);
        self.resolve_food(&movers, ctx, events);
        if ctx.difficulty.powerups_enabled {
            self.resolve_power_ups(&movers, ctx.now, events);
        }
        if self.mode == MatchMode::Multi && movers.len() > 1 {
            self.resolve_agent_collisions(&movers, events);
        }

        self.round_result()
    }

    fn move_agents(&mut self, movers: &[usize], events: &mut Vec<SimEvent>) {
        for &i in movers {
            let agent = &mut self.agents[i];
            if agent.advance(&self.grid) {
                continue;
            }
            if let Some(reason) = agent.death_reason() {
                log!("{} {} at {}", agent.id(), reason, agent.head());
                events.push(death_event(agent.id(), reason, agent.body().iter().copied().collect()));
            }
        }
    }

    fn resolve_food(&mut self, movers: &[usize], ctx: &mut StepContext<'_>, events: &mut Vec<SimEvent>) {
        for &i in movers {
            let agent = &self.agents[i];
            if !agent.is_alive() || agent.head() != self.food.position() {
                continue;
            }

            let points = self.points_for(i, ctx.difficulty);
            let agent = &mut self.agents[i];
            agent.grow(FOOD_GROWTH);
            agent.add_score(points);
            let agent_id = agent.id();
            log!("{} ate food for {} points, score {}", agent_id, points, agent.score());

            let new_food_position = self.respawn_food(ctx.rng);
            events.push(SimEvent::FoodEaten {
                agent_id,
                points_awarded: points,
                new_food_position,
            });
        }
    }

    fn points_for(&self, index: usize, difficulty: &DifficultySettings) -> u32 {
        let agent = &self.agents[index];
        let mut points = self.food.base_points(difficulty.score_multiplier);
        if agent.has_effect(PowerUpKind::DoublePoints) {
            points = points.saturating_mul(2);
        }
        if agent.has_effect(PowerUpKind::ScoreMultiplier) {
            points = (points as f64 * self.score_multiplier_factor).floor() as u32;
        }
        points
    }

    fn resolve_power_ups(&mut self, movers: &[usize], now: f64, events: &mut Vec<SimEvent>) {
        for &i in movers {
            let agent = &mut self.agents[i];
            if !agent.is_alive() {
                continue;
            }
            let Some(power_up) = self.spawner.collect_at(agent.head()) else {
                continue;
            };
            agent.apply_effect(power_up.kind, power_up.duration, now);
            log!("{} collected {} for {}s", agent.id(), power_up.kind, power_up.duration);
            events.push(SimEvent::PowerUpCollected {
                agent_id: agent.id(),
                kind: power_up.kind,
            });
        }
    }

    /// Head-into-body checks among the agents that were alive at tick start, all judged on the
    /// same post-move bodies. A rival that died this tick still blocks with its frozen body.
    /// Two heads on the same cell eliminate both agents; passing through each other does not.
    fn resolve_agent_collisions(&mut self, movers: &[usize], events: &mut Vec<SimEvent>) {
        let mut victims: Vec<(usize, AgentId)> = Vec::new();
        for &a in movers {
            let attacker = &self.agents[a];
            if !attacker.is_alive() || attacker.is_invulnerable() {
                continue;
            }
            let head = attacker.head();
            if let Some(&b) = movers
                .iter()
                .find(|&&b| b != a && self.agents[b].occupies(head))
            {
                victims.push((a, self.agents[b].id()));
            }
        }

        for (index, other) in victims {
            let agent = &mut self.agents[index];
            let reason = DeathReason::AgentCollision { other };
            agent.kill(reason);
            log!("{} {} at {}", agent.id(), reason, agent.head());
            events.push(death_event(agent.id(), reason, agent.body().iter().copied().collect()));
        }
    }

    /// `Some` once nobody in the roster is alive.
    pub fn round_result(&self) -> Option<RoundResult> {
        if self.agents.iter().any(|a| a.is_alive()) {
            return None;
        }

        let results: Vec<(AgentId, u32)> = self.agents.iter().map(|a| (a.id(), a.score())).collect();
        let winner = match self.mode {
            MatchMode::Single => None,
            MatchMode::Multi => results
                .iter()
                .fold(None, |best: Option<(AgentId, u32)>, &(id, score)| match best {
                    Some((best_id, best_score))
                        if best_score > score || (best_score == score && best_id < id) =>
                    {
                        Some((best_id, best_score))
                    }
                    _ => Some((id, score)),
                })
                .map(|(id, _)| id),
        };

        Some(RoundResult {
            mode: self.mode,
            results,
            winner,
        })
    }
}

fn death_event(agent_id: AgentId, reason: DeathReason, last_positions: Vec<Point>) -> SimEvent {
    SimEvent::AgentDied {
        agent_id,
        reason,
        last_positions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::agent::Agent;
    use crate::sim::difficulty::DifficultyPreset;
    use crate::sim::grid::Grid;
    use crate::sim::power_up::PowerUp;
    use crate::sim::settings::MatchSettings;
    use crate::sim::types::{AgentColor, Direction, Point};

    fn agent(id: u32, head: Point, tail: Vec<Point>, heading: Direction) -> Agent {
        Agent::with_body(AgentId::new(id), AgentColor::NEON_GREEN, head, tail, heading)
    }

    fn arena(agents: Vec<Agent>, mode: MatchMode) -> Arena {
        let mut arena = Arena::with_agents(Grid::new(10, 10), agents, mode, &MatchSettings::default());
        arena.set_food_position(Point::new(9, 9));
        arena
    }

    fn run_step(arena: &mut Arena, preset: DifficultyPreset, now: f64) -> (Vec<SimEvent>, Option<RoundResult>) {
        let difficulty = preset.settings();
        let mut rng = SessionRng::new(42);
        let mut ctx = StepContext {
            now,
            difficulty: &difficulty,
            rng: &mut rng,
        };
        let mut events = Vec::new();
        let result = arena.step(&mut ctx, &mut events);
        (events, result)
    }

    #[test]
    fn test_agent_into_rival_body_dies_rival_survives() {
        let a = agent(1, Point::new(2, 4), vec![Point::new(1, 4)], Direction::Right);
        let b = agent(2, Point::new(3, 2), vec![Point::new(3, 3), Point::new(3, 4), Point::new(3, 5)], Direction::Up);
        let mut arena = arena(vec![a, b], MatchMode::Multi);

        let (events, result) = run_step(&mut arena, DifficultyPreset::Easy, 0.0);

        // After moving, B occupies (3,1),(3,2),(3,3),(3,4); A's head lands on (3,4).
        assert!(!arena.agents()[0].is_alive());
        assert!(arena.agents()[1].is_alive());
        assert_eq!(
            arena.agents()[0].death_reason(),
            Some(DeathReason::AgentCollision { other: AgentId::new(2) })
        );
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], SimEvent::AgentDied { agent_id, .. } if *agent_id == AgentId::new(1)));
        assert!(result.is_none());
    }

    #[test]
    fn test_head_on_same_cell_kills_both() {
        let a = agent(1, Point::new(3, 5), vec![], Direction::Right);
        let b = agent(2, Point::new(5, 5), vec![], Direction::Left);
        let mut arena = arena(vec![a, b], MatchMode::Multi);

        let (events, result) = run_step(&mut arena, DifficultyPreset::Easy, 0.0);

        assert_eq!(arena.alive_count(), 0);
        assert_eq!(events.iter().filter(|e| matches!(e, SimEvent::AgentDied { .. })).count(), 2);
        let result = result.unwrap();
        assert_eq!(result.winner, Some(AgentId::new(1)));
    }

    #[test]
    fn test_head_swap_pass_through_is_legal() {
        let a = agent(1, Point::new(4, 5), vec![], Direction::Right);
        let b = agent(2, Point::new(5, 5), vec![], Direction::Left);
        let mut arena = arena(vec![a, b], MatchMode::Multi);

        let (events, _) = run_step(&mut arena, DifficultyPreset::Easy, 0.0);

        assert_eq!(arena.alive_count(), 2);
        assert!(events.is_empty());
        assert_eq!(arena.agents()[0].head(), Point::new(5, 5));
        assert_eq!(arena.agents()[1].head(), Point::new(4, 5));
    }

    #[test]
    fn test_invulnerable_agent_survives_rival_body() {
        let mut a = agent(1, Point::new(2, 4), vec![], Direction::Right);
        a.apply_effect(PowerUpKind::WallPhase, 5.0, 0.0);
        let b = agent(2, Point::new(3, 2), vec![Point::new(3, 3), Point::new(3, 4), Point::new(3, 5)], Direction::Up);
        let mut arena = arena(vec![a, b], MatchMode::Multi);

        run_step(&mut arena, DifficultyPreset::Easy, 0.0);

        assert_eq!(arena.alive_count(), 2);
    }

    #[test]
    fn test_single_mode_skips_agent_collisions() {
        let a = agent(1, Point::new(3, 5), vec![], Direction::Right);
        let b = agent(2, Point::new(5, 5), vec![], Direction::Left);
        let mut arena = arena(vec![a, b], MatchMode::Single);

        run_step(&mut arena, DifficultyPreset::Easy, 0.0);

        assert_eq!(arena.alive_count(), 2);
    }

    #[test]
    fn test_eating_food_grows_scores_and_respawns() {
        let a = agent(1, Point::new(2, 2), vec![], Direction::Right);
        let mut arena = arena(vec![a], MatchMode::Single);
        arena.set_food_position(Point::new(3, 2));

        let (events, _) = run_step(&mut arena, DifficultyPreset::Medium, 0.0);

        let eater = &arena.agents()[0];
        assert_eq!(eater.score(), 15);
        assert_eq!(eater.pending_growth(), FOOD_GROWTH);
        assert_ne!(arena.food().position(), Point::new(3, 2));
        assert!(!eater.occupies(arena.food().position()));
        assert_eq!(
            events,
            vec![SimEvent::FoodEaten {
                agent_id: AgentId::new(1),
                points_awarded: 15,
                new_food_position: arena.food().position(),
            }]
        );
    }

    #[test]
    fn test_double_points_doubles_after_difficulty() {
        let mut a = agent(1, Point::new(2, 2), vec![], Direction::Right);
        a.apply_effect(PowerUpKind::DoublePoints, 5.0, 0.0);
        let mut arena = arena(vec![a], MatchMode::Single);
        arena.set_food_position(Point::new(3, 2));

        run_step(&mut arena, DifficultyPreset::Hard, 0.0);

        assert_eq!(arena.agents()[0].score(), 40);
    }

    #[test]
    fn test_score_multiplier_uses_configured_factor() {
        let mut a = agent(1, Point::new(2, 2), vec![], Direction::Right);
        a.apply_effect(PowerUpKind::ScoreMultiplier, 5.0, 0.0);
        let settings = MatchSettings {
            score_multiplier_factor: 1.5,
            ..MatchSettings::default()
        };
        let mut arena = Arena::with_agents(Grid::new(10, 10), vec![a], MatchMode::Single, &settings);
        arena.set_food_position(Point::new(3, 2));

        run_step(&mut arena, DifficultyPreset::Easy, 0.0);

        assert_eq!(arena.agents()[0].score(), 15);
    }

    #[test]
    fn test_power_up_pickup_applies_effect() {
        let a = agent(1, Point::new(2, 2), vec![], Direction::Right);
        let mut arena = arena(vec![a], MatchMode::Single);
        arena.spawner_mut().place(PowerUp {
            kind: PowerUpKind::SpeedBoost,
            position: Point::new(3, 2),
            duration: 5.0,
            spawned_at: 0.0,
        });

        let (events, _) = run_step(&mut arena, DifficultyPreset::Easy, 4.0);

        let agent = &arena.agents()[0];
        assert_eq!(agent.speed_multiplier(), 2.0);
        assert_eq!(agent.effects().expiry(PowerUpKind::SpeedBoost), Some(9.0));
        assert!(arena.power_ups().is_empty());
        assert_eq!(
            events,
            vec![SimEvent::PowerUpCollected {
                agent_id: AgentId::new(1),
                kind: PowerUpKind::SpeedBoost
            }]
        );
    }

    #[test]
    fn test_power_ups_ignored_when_disabled() {
        let a = agent(1, Point::new(2, 2), vec![], Direction::Right);
        let mut arena = arena(vec![a], MatchMode::Single);
        arena.spawner_mut().place(PowerUp {
            kind: PowerUpKind::SpeedBoost,
            position: Point::new(3, 2),
            duration: 5.0,
            spawned_at: 0.0,
        });

        run_step(&mut arena, DifficultyPreset::Hard, 0.0);

        assert_eq!(arena.agents()[0].speed_multiplier(), 1.0);
        assert_eq!(arena.power_ups().len(), 1);
    }

    #[test]
    fn test_agent_eating_food_can_still_die_to_rival() {
        let a = agent(1, Point::new(2, 4), vec![], Direction::Right);
        let b = agent(2, Point::new(3, 2), vec![Point::new(3, 3), Point::new(3, 4), Point::new(3, 5)], Direction::Up);
        let mut arena = arena(vec![a, b], MatchMode::Multi);
        arena.set_food_position(Point::new(3, 4));

        let (events, _) = run_step(&mut arena, DifficultyPreset::Easy, 0.0);

        let a = &arena.agents()[0];
        assert!(!a.is_alive());
        assert_eq!(a.score(), 10);
        assert!(matches!(events[0], SimEvent::FoodEaten { .. }));
        assert!(matches!(events[1], SimEvent::AgentDied { .. }));
    }

    #[test]
    fn test_rival_killed_this_tick_still_blocks() {
        let a = agent(1, Point::new(2, 0), vec![], Direction::Right);
        let b = agent(2, Point::new(3, 0), vec![], Direction::Up);
        let mut arena = arena(vec![a, b], MatchMode::Multi);

        let (events, result) = run_step(&mut arena, DifficultyPreset::Easy, 0.0);

        // B hits the top wall and keeps its body at (3,0); A moves onto it.
        let a = &arena.agents()[0];
        assert_eq!(a.head(), Point::new(3, 0));
        assert!(!a.is_alive());
        assert_eq!(
            a.death_reason(),
            Some(DeathReason::AgentCollision { other: AgentId::new(2) })
        );
        assert_eq!(
            arena.agents()[1].death_reason(),
            Some(DeathReason::WallCollision)
        );
        assert_eq!(events.len(), 2);
        assert!(result.is_some());
    }

    #[test]
    fn test_power_up_applied_before_rival_collision() {
        let a = agent(1, Point::new(2, 4), vec![], Direction::Right);
        let b = agent(2, Point::new(3, 2), vec![Point::new(3, 3), Point::new(3, 4), Point::new(3, 5)], Direction::Up);
        let mut arena = arena(vec![a, b], MatchMode::Multi);
        arena.spawner_mut().place(PowerUp {
            kind: PowerUpKind::SlowDown,
            position: Point::new(3, 4),
            duration: 5.0,
            spawned_at: 0.0,
        });

        let (events, _) = run_step(&mut arena, DifficultyPreset::Easy, 1.0);

        let a = &arena.agents()[0];
        assert!(!a.is_alive());
        assert!(a.has_effect(PowerUpKind::SlowDown));
        assert_eq!(a.speed_multiplier(), 0.5);
        assert!(arena.power_ups().is_empty());
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            SimEvent::PowerUpCollected {
                agent_id: AgentId::new(1),
                kind: PowerUpKind::SlowDown
            }
        );
        assert!(matches!(
            &events[1],
            SimEvent::AgentDied { agent_id, reason: DeathReason::AgentCollision { .. }, .. }
                if *agent_id == AgentId::new(1)
        ));
    }

    #[test]
    fn test_dead_agents_stay_in_roster_and_do_not_move() {
        let a = agent(1, Point::new(9, 0), vec![], Direction::Right);
        let b = agent(2, Point::new(0, 9), vec![], Direction::Right);
        let mut arena = arena(vec![a, b], MatchMode::Multi);

        let (events, result) = run_step(&mut arena, DifficultyPreset::Easy, 0.0);
        assert_eq!(events.len(), 1);
        assert!(result.is_none());
        assert_eq!(arena.agents().len(), 2);

        let (events, _) = run_step(&mut arena, DifficultyPreset::Easy, 0.1);
        assert!(events.is_empty());
        assert_eq!(arena.agents()[0].head(), Point::new(9, 0));
        assert_eq!(arena.agents()[1].head(), Point::new(2, 9));
    }

    #[test]
    fn test_round_ends_when_last_agent_dies() {
        let a = agent(1, Point::new(9, 5), vec![], Direction::Right);
        let mut arena = arena(vec![a], MatchMode::Single);

        let (events, result) = run_step(&mut arena, DifficultyPreset::Easy, 0.0);

        assert!(matches!(
            events.as_slice(),
            [SimEvent::AgentDied { reason: DeathReason::WallCollision, .. }]
        ));
        let result = result.unwrap();
        assert_eq!(result.mode, MatchMode::Single);
        assert_eq!(result.results, vec![(AgentId::new(1), 0)]);
        assert_eq!(result.winner, None);
    }

    #[test]
    fn test_winner_is_highest_score_lowest_id_on_tie() {
        let mut a = agent(1, Point::new(9, 1), vec![], Direction::Right);
        let mut b = agent(2, Point::new(9, 3), vec![], Direction::Right);
        let mut c = agent(3, Point::new(9, 5), vec![], Direction::Right);
        a.add_score(20);
        b.add_score(30);
        c.add_score(30);
        let mut arena = arena(vec![a, b, c], MatchMode::Multi);

        let (_, result) = run_step(&mut arena, DifficultyPreset::Easy, 0.0);

        let result = result.unwrap();
        assert_eq!(result.winner, Some(AgentId::new(2)));
        assert_eq!(result.winner_score(), Some(30));
    }
}
