use crate::log;
use super::agent::Agent;
use super::events::SimEvent;
use super::food::Food;
use super::grid::Grid;
use super::power_up::{PowerUp, PowerUpSpawner};
use super::rng::SessionRng;
use super::settings::MatchSettings;
use super::types::{AgentColor, AgentId, Direction, MatchMode, Point};

/// Everything that lives on the field during one match. Replaced wholesale on reset.
#[derive(Clone, Debug)]
pub struct Arena {
    pub(crate) grid: Grid,
    pub(crate) agents: Vec<Agent>,
    pub(crate) food: Food,
    pub(crate) spawner: PowerUpSpawner,
    pub(crate) mode: MatchMode,
    pub(crate) score_multiplier_factor: f64,
}

impl Arena {
    pub fn new(settings: &MatchSettings, mode: MatchMode, rng: &mut SessionRng) -> Self {
        let grid = Grid::new(settings.field_width, settings.field_height);
        let agents = start_layout(&grid, mode);
        let mut arena = Self::with_agents(grid, agents, mode, settings);
        arena.respawn_food(rng);
        arena
    }

    /// Builds an arena around a given roster; food starts at the origin until respawned.
    pub fn with_agents(grid: Grid, agents: Vec<Agent>, mode: MatchMode, settings: &MatchSettings) -> Self {
        Self {
            grid,
            agents,
            food: Food::new(Point::new(0, 0), settings.food_value),
            spawner: PowerUpSpawner::new(settings.spawner),
            mode,
            score_multiplier_factor: settings.score_multiplier_factor,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id() == id)
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        self.spawner.active()
    }

    pub fn spawner(&self) -> &PowerUpSpawner {
        &self.spawner
    }

    pub fn spawner_mut(&mut self) -> &mut PowerUpSpawner {
        &mut self.spawner
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// Fastest speed multiplier among living agents, 1.0 when nobody is alive.
    pub fn fastest_multiplier(&self) -> f64 {
        self.agents
            .iter()
            .filter(|a| a.is_alive())
            .map(|a| a.speed_multiplier())
            .reduce(f64::max)
            .unwrap_or(1.0)
    }

    pub fn is_occupied_by_agent(&self, point: Point) -> bool {
        self.agents.iter().any(|a| a.occupies(point))
    }

    pub fn set_food_position(&mut self, position: Point) {
        self.food = Food::new(position, self.food.value());
    }

    pub(crate) fn respawn_food(&mut self, rng: &mut SessionRng) -> Point {
        let agents = &self.agents;
        self.food
            .respawn(&self.grid, rng, |p| !agents.iter().any(|a| a.occupies(p)));
        self.food.position()
    }

    /// Advances continuous-time state: agent timers, effect expiry and power-up spawning.
    /// Dead agents are frozen, so their effects never expire and report nothing.
    pub(crate) fn tick_timers(
        &mut self,
        dt: f64,
        now: f64,
        powerups_enabled: bool,
        rng: &mut SessionRng,
        events: &mut Vec<SimEvent>,
    ) {
        for agent in self.agents.iter_mut().filter(|a| a.is_alive()) {
            for kind in agent.tick_timers(dt, now) {
                log!("{} lost {}", agent.id(), kind);
                events.push(SimEvent::EffectExpired {
                    agent_id: agent.id(),
                    kind,
                });
            }
        }

        if powerups_enabled {
            let agents = &self.agents;
            let food = self.food.position();
            self.spawner.tick(
                dt,
                now,
                &self.grid,
                rng,
                |p| p != food && !agents.iter().any(|a| a.occupies(p)),
                events,
            );
        }
    }
}

/// Player 1 starts a quarter in from the left heading right; player 2 mirrors it.
fn start_layout(grid: &Grid, mode: MatchMode) -> Vec<Agent> {
    let mid_y = grid.height() / 2;
    let mut agents = vec![Agent::new(
        AgentId::new(1),
        AgentColor::NEON_GREEN,
        Point::new(grid.width() / 4, mid_y),
        Direction::Right,
    )];
    if mode == MatchMode::Multi {
        agents.push(Agent::new(
            AgentId::new(2),
            AgentColor::NEON_BLUE,
            Point::new(3 * grid.width() / 4, mid_y),
            Direction::Left,
        ));
    }
    agents
}
