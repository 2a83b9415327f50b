use std::fmt;

use crate::log;
use super::agent::Agent;
use super::arena::Arena;
use super::difficulty::{DifficultyPreset, DifficultySettings};
use super::events::{RoundResult, SimEvent};
use super::food::Food;
use super::power_up::PowerUp;
use super::rng::SessionRng;
use super::settings::MatchSettings;
use super::step::StepContext;
use super::types::{AgentId, Direction, MatchMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchState {
    Menu,
    Playing,
    Paused,
    GameOver,
    HighScores,
    Settings,
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchState::Menu => "menu",
            MatchState::Playing => "playing",
            MatchState::Paused => "paused",
            MatchState::GameOver => "game over",
            MatchState::HighScores => "high scores",
            MatchState::Settings => "settings",
        };
        f.write_str(name)
    }
}

/// Top-level state machine. Owns the arena and runs at most one discrete step per `update`.
pub struct MatchController {
    settings: MatchSettings,
    preset: DifficultyPreset,
    difficulty: DifficultySettings,
    state: MatchState,
    arena: Arena,
    rng: SessionRng,
    clock: f64,
    move_timer: f64,
    tick_count: u64,
    last_round: Option<RoundResult>,
    events: Vec<SimEvent>,
}

impl MatchController {
    pub fn new(settings: MatchSettings, mut rng: SessionRng) -> Self {
        let preset = settings.difficulty;
        let arena = Arena::new(&settings, MatchMode::Single, &mut rng);
        Self {
            settings,
            preset,
            difficulty: preset.settings(),
            state: MatchState::Menu,
            arena,
            rng,
            clock: 0.0,
            move_timer: 0.0,
            tick_count: 0,
            last_round: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn agents(&self) -> &[Agent] {
        self.arena.agents()
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.arena.agent(id)
    }

    pub fn food(&self) -> &Food {
        self.arena.food()
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        self.arena.power_ups()
    }

    /// Simulated seconds spent in the Playing state since the last reset.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn preset(&self) -> DifficultyPreset {
        self.preset
    }

    pub fn difficulty(&self) -> &DifficultySettings {
        &self.difficulty
    }

    pub fn mode(&self) -> MatchMode {
        self.arena.mode()
    }

    pub fn is_multiplayer(&self) -> bool {
        self.arena.mode() == MatchMode::Multi
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn last_round(&self) -> Option<&RoundResult> {
        self.last_round.as_ref()
    }

    /// Seconds between discrete steps at the current speed.
    pub fn move_interval(&self) -> f64 {
        1.0 / (self.difficulty.speed * self.arena.fastest_multiplier())
    }

    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    fn transition(&mut self, to: MatchState) {
        let from = self.state;
        if from == to {
            return;
        }
        log!("State {} -> {}", from, to);
        self.state = to;
        self.events.push(SimEvent::StateChanged { from, to });
    }

    /// Replaces the whole arena and starts playing.
    pub fn reset(&mut self, multiplayer: bool, preset: DifficultyPreset) {
        let mode = MatchMode::from_multiplayer(multiplayer);
        self.preset = preset;
        self.difficulty = preset.settings();
        self.arena = Arena::new(&self.settings, mode, &mut self.rng);
        self.clock = 0.0;
        self.move_timer = 0.0;
        self.tick_count = 0;
        self.last_round = None;
        log!(
            "New {} match on {}x{}, difficulty {}, seed {}",
            mode,
            self.arena.grid().width(),
            self.arena.grid().height(),
            preset,
            self.rng.seed()
        );
        self.transition(MatchState::Playing);
    }

    pub fn start(&mut self, mode: MatchMode) -> bool {
        if self.state != MatchState::Menu {
            return false;
        }
        self.reset(mode == MatchMode::Multi, self.preset);
        true
    }

    pub fn pause(&mut self) -> bool {
        self.transition_from(&[MatchState::Playing], MatchState::Paused)
    }

    pub fn resume(&mut self) -> bool {
        self.transition_from(&[MatchState::Paused], MatchState::Playing)
    }

    /// Fresh match in the same mode, from the pause screen or after the round ended.
    pub fn restart(&mut self) -> bool {
        if !matches!(self.state, MatchState::Paused | MatchState::GameOver) {
            return false;
        }
        self.reset(self.is_multiplayer(), self.preset);
        true
    }

    /// Abandons a paused match, or leaves the game-over, high-score and settings screens.
    pub fn back_to_menu(&mut self) -> bool {
        self.transition_from(
            &[
                MatchState::Paused,
                MatchState::GameOver,
                MatchState::HighScores,
                MatchState::Settings,
            ],
            MatchState::Menu,
        )
    }

    pub fn open_high_scores(&mut self) -> bool {
        self.transition_from(&[MatchState::Menu], MatchState::HighScores)
    }

    pub fn open_settings(&mut self) -> bool {
        self.transition_from(&[MatchState::Menu], MatchState::Settings)
    }

    /// Picks the difficulty for the next match.
    pub fn set_difficulty(&mut self, preset: DifficultyPreset) -> bool {
        if !matches!(self.state, MatchState::Menu | MatchState::Settings) {
            return false;
        }
        self.preset = preset;
        self.difficulty = preset.settings();
        log!("Difficulty set to {}", preset);
        true
    }

    fn transition_from(&mut self, allowed: &[MatchState], to: MatchState) -> bool {
        if !allowed.contains(&self.state) {
            return false;
        }
        self.transition(to);
        true
    }

    /// Queues a heading change for the next step. Only living agents in a running match steer.
    pub fn set_heading(&mut self, agent_id: AgentId, direction: Direction) -> bool {
        if self.state != MatchState::Playing {
            return false;
        }
        match self.arena.agent_mut(agent_id) {
            Some(agent) if agent.is_alive() => agent.set_heading(direction),
            _ => false,
        }
    }

    /// Advances real time by `dt` seconds and returns every event produced since the last call.
    pub fn update(&mut self, dt: f64) -> Vec<SimEvent> {
        if self.state == MatchState::Playing && dt > 0.0 {
            self.advance(dt);
        }
        self.take_events()
    }

    fn advance(&mut self, dt: f64) {
        self.clock += dt;
        self.arena.tick_timers(
            dt,
            self.clock,
            self.difficulty.powerups_enabled,
            &mut self.rng,
            &mut self.events,
        );

        let interval = self.move_interval();
        self.move_timer += dt;
        if self.move_timer < interval {
            return;
        }
        self.move_timer = 0.0;
        self.tick_count += 1;

        let mut ctx = StepContext {
            now: self.clock,
            difficulty: &self.difficulty,
            rng: &mut self.rng,
        };
        if let Some(result) = self.arena.step(&mut ctx, &mut self.events) {
            match result.winner {
                Some(winner) => log!("Round over after {} ticks, {} wins", self.tick_count, winner),
                None => log!("Round over after {} ticks", self.tick_count),
            }
            self.events.push(SimEvent::RoundEnded(result.clone()));
            self.last_round = Some(result);
            self.transition(MatchState::GameOver);
        }
    }
}
