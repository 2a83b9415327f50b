use std::collections::VecDeque;

use super::effects::{EffectSet, PowerUpKind};
use super::grid::Grid;
use super::types::{AgentColor, AgentId, BoundaryMode, DeathReason, Direction, Point};

/// One snake. The body is ordered head first and is never empty.
#[derive(Clone, Debug)]
pub struct Agent {
    id: AgentId,
    color: AgentColor,
    pub(crate) body: VecDeque<Point>,
    heading: Direction,
    pending_growth: u32,
    score: u32,
    death_reason: Option<DeathReason>,
    effects: EffectSet,
    pub(crate) invulnerability: f64,
    pub(crate) speed_multiplier: f64,
    pub(crate) boundary: BoundaryMode,
}

impl Agent {
    pub fn new(id: AgentId, color: AgentColor, start: Point, heading: Direction) -> Self {
        Self::with_body(id, color, start, std::iter::empty(), heading)
    }

    /// Builds an agent from a head cell followed by the rest of the body, head to tail.
    pub fn with_body(
        id: AgentId,
        color: AgentColor,
        head: Point,
        tail: impl IntoIterator<Item = Point>,
        heading: Direction,
    ) -> Self {
        let mut body = VecDeque::from([head]);
        body.extend(tail);
        Self {
            id,
            color,
            body,
            heading,
            pending_growth: 0,
            score: 0,
            death_reason: None,
            effects: EffectSet::new(),
            invulnerability: 0.0,
            speed_multiplier: 1.0,
            boundary: BoundaryMode::Blocking,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn color(&self) -> AgentColor {
        self.color
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.death_reason.is_none()
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn effects(&self) -> &EffectSet {
        &self.effects
    }

    pub fn has_effect(&self, kind: PowerUpKind) -> bool {
        self.effects.contains(kind)
    }

    pub fn invulnerability(&self) -> f64 {
        self.invulnerability
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability > 0.0
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Moves one cell along the heading. Returns `false` if the agent died doing so;
    /// the body is left exactly as it was before the fatal move.
    pub fn advance(&mut self, grid: &Grid) -> bool {
        if !self.is_alive() {
            return false;
        }

        let Some(next_head) = grid.step(self.head(), self.heading, self.boundary) else {
            self.kill(DeathReason::WallCollision);
            return false;
        };

        if !self.is_invulnerable() && self.occupies(next_head) {
            self.kill(DeathReason::SelfCollision);
            return false;
        }

        self.body.push_front(next_head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }
        true
    }

    /// Changes the heading for the next move. The exact reverse of the current heading is ignored.
    pub fn set_heading(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(&self.heading) {
            return false;
        }
        self.heading = direction;
        true
    }

    pub fn grow(&mut self, cells: u32) {
        self.pending_growth = self.pending_growth.saturating_add(cells);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) fn kill(&mut self, reason: DeathReason) {
        if self.is_alive() {
            self.death_reason = Some(reason);
        }
    }

    /// Starts or refreshes an effect. The structural side effect only fires on first application.
    pub fn apply_effect(&mut self, kind: PowerUpKind, duration: f64, now: f64) {
        if self.effects.insert(kind, now + duration) {
            kind.apply(self);
        }
    }

    /// Drops effects whose expiry is at or before `now` and undoes their side effects.
    pub fn expire_effects(&mut self, now: f64) -> Vec<PowerUpKind> {
        let expired = self.effects.take_expired(now);
        for kind in &expired {
            kind.revert(self);
        }
        expired
    }

    pub fn tick_timers(&mut self, dt: f64, now: f64) -> Vec<PowerUpKind> {
        self.invulnerability = (self.invulnerability - dt).max(0.0);
        self.expire_effects(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_at(x: usize, y: usize, heading: Direction) -> Agent {
        Agent::new(AgentId::new(1), AgentColor::NEON_GREEN, Point::new(x, y), heading)
    }

    fn line_agent(len: usize) -> Agent {
        Agent::with_body(
            AgentId::new(1),
            AgentColor::NEON_GREEN,
            Point::new(len, 0),
            (0..len).rev().map(|x| Point::new(x, 0)),
            Direction::Right,
        )
    }

    #[test]
    fn test_blocking_agent_dies_at_wall() {
        let grid = Grid::new(10, 10);
        let mut agent = agent_at(2, 5, Direction::Right);
        for _ in 0..7 {
            assert!(agent.advance(&grid));
        }
        assert_eq!(agent.head(), Point::new(9, 5));
        assert!(!agent.advance(&grid));
        assert_eq!(agent.death_reason(), Some(DeathReason::WallCollision));
        assert_eq!(agent.head(), Point::new(9, 5));
        assert_eq!(agent.len(), 1);
    }

    #[test]
    fn test_growth_keeps_tail() {
        let grid = Grid::new(10, 10);
        let mut agent = agent_at(2, 2, Direction::Right);
        agent.grow(2);
        assert!(agent.advance(&grid));
        assert_eq!(agent.len(), 2);
        assert!(agent.advance(&grid));
        assert_eq!(agent.len(), 3);
        assert!(agent.advance(&grid));
        assert_eq!(agent.len(), 3);
        assert_eq!(agent.pending_growth(), 0);
        let body: Vec<Point> = agent.body().iter().copied().collect();
        assert_eq!(body, vec![Point::new(5, 2), Point::new(4, 2), Point::new(3, 2)]);
    }

    #[test]
    fn test_reverse_heading_ignored() {
        let mut agent = agent_at(2, 2, Direction::Right);
        assert!(!agent.set_heading(Direction::Left));
        assert_eq!(agent.heading(), Direction::Right);
        assert!(agent.set_heading(Direction::Up));
        assert_eq!(agent.heading(), Direction::Up);
    }

    #[test]
    fn test_double_turn_only_checks_current_heading() {
        let mut agent = agent_at(2, 2, Direction::Right);
        assert!(agent.set_heading(Direction::Up));
        assert!(agent.set_heading(Direction::Left));
        assert_eq!(agent.heading(), Direction::Left);
    }

    #[test]
    fn test_self_collision_kills() {
        let grid = Grid::new(10, 10);
        // Head at (2,2) with a loop so that moving up re-enters the body.
        let mut agent = Agent::with_body(
            AgentId::new(1),
            AgentColor::NEON_GREEN,
            Point::new(2, 2),
            [Point::new(3, 2), Point::new(3, 1), Point::new(2, 1), Point::new(1, 1)],
            Direction::Left,
        );
        assert!(agent.set_heading(Direction::Up));
        assert!(!agent.advance(&grid));
        assert_eq!(agent.death_reason(), Some(DeathReason::SelfCollision));
        assert_eq!(agent.len(), 5);
    }

    #[test]
    fn test_moving_into_own_tail_cell_is_fatal() {
        let grid = Grid::new(10, 10);
        let mut agent = Agent::with_body(
            AgentId::new(1),
            AgentColor::NEON_GREEN,
            Point::new(2, 2),
            [Point::new(3, 2), Point::new(3, 3), Point::new(2, 3)],
            Direction::Down,
        );
        assert!(!agent.advance(&grid));
        assert_eq!(agent.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn test_wall_phase_wraps_and_suppresses_self_collision() {
        let grid = Grid::new(10, 10);
        let mut agent = Agent::with_body(
            AgentId::new(1),
            AgentColor::NEON_GREEN,
            Point::new(3, 0),
            [Point::new(3, 1), Point::new(3, 2)],
            Direction::Up,
        );
        agent.apply_effect(PowerUpKind::WallPhase, 5.0, 0.0);
        assert_eq!(agent.boundary(), BoundaryMode::Wrapping);
        assert_eq!(agent.invulnerability(), 2.0);

        assert!(agent.advance(&grid));
        assert_eq!(agent.head(), Point::new(3, 9));

        // Turning back into the body is survivable while invulnerable.
        let mut looped = Agent::with_body(
            AgentId::new(2),
            AgentColor::NEON_BLUE,
            Point::new(3, 3),
            [Point::new(3, 4), Point::new(3, 5), Point::new(4, 5), Point::new(4, 4), Point::new(4, 3), Point::new(4, 2)],
            Direction::Right,
        );
        looped.apply_effect(PowerUpKind::WallPhase, 5.0, 0.0);
        assert!(looped.advance(&grid));
        assert_eq!(looped.head(), Point::new(4, 3));

        looped.tick_timers(2.0, 2.0);
        assert!(!looped.is_invulnerable());
        looped.set_heading(Direction::Down);
        assert!(!looped.advance(&grid));
        assert_eq!(looped.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn test_wall_phase_revert_restores_blocking() {
        let mut agent = agent_at(0, 0, Direction::Right);
        agent.apply_effect(PowerUpKind::WallPhase, 5.0, 1.0);
        assert!(agent.expire_effects(5.9).is_empty());
        assert_eq!(agent.expire_effects(6.0), vec![PowerUpKind::WallPhase]);
        assert_eq!(agent.boundary(), BoundaryMode::Blocking);
    }

    #[test]
    fn test_reapplying_speed_boost_does_not_stack() {
        let mut agent = agent_at(2, 2, Direction::Right);
        agent.apply_effect(PowerUpKind::SpeedBoost, 5.0, 0.0);
        agent.apply_effect(PowerUpKind::SpeedBoost, 5.0, 3.0);
        assert_eq!(agent.speed_multiplier(), 2.0);
        assert_eq!(agent.effects().expiry(PowerUpKind::SpeedBoost), Some(8.0));
        assert!(agent.expire_effects(5.0).is_empty());
        assert_eq!(agent.expire_effects(8.0), vec![PowerUpKind::SpeedBoost]);
        assert_eq!(agent.speed_multiplier(), 1.0);
    }

    #[test]
    fn test_slow_down_sets_half_speed() {
        let mut agent = agent_at(2, 2, Direction::Right);
        agent.apply_effect(PowerUpKind::SlowDown, 5.0, 0.0);
        assert_eq!(agent.speed_multiplier(), 0.5);
    }

    #[test]
    fn test_shrink_halves_long_agents() {
        let mut agent = line_agent(9);
        assert_eq!(agent.len(), 10);
        agent.apply_effect(PowerUpKind::Shrink, 5.0, 0.0);
        assert_eq!(agent.len(), 5);
        assert_eq!(agent.head(), Point::new(9, 0));
    }

    #[test]
    fn test_shrink_ignores_short_agents() {
        let mut agent = line_agent(2);
        assert_eq!(agent.len(), 3);
        agent.apply_effect(PowerUpKind::Shrink, 5.0, 0.0);
        assert_eq!(agent.len(), 3);
    }

    #[test]
    fn test_invulnerability_floors_at_zero() {
        let mut agent = agent_at(2, 2, Direction::Right);
        agent.apply_effect(PowerUpKind::WallPhase, 5.0, 0.0);
        agent.tick_timers(1.5, 1.5);
        assert!((agent.invulnerability() - 0.5).abs() < 1e-9);
        agent.tick_timers(1.0, 2.5);
        assert_eq!(agent.invulnerability(), 0.0);
    }

    #[test]
    fn test_dead_agent_does_not_move() {
        let grid = Grid::new(10, 10);
        let mut agent = agent_at(9, 0, Direction::Right);
        assert!(!agent.advance(&grid));
        agent.set_heading(Direction::Down);
        assert!(!agent.advance(&grid));
        assert_eq!(agent.head(), Point::new(9, 0));
    }
}
