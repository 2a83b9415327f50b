use std::fmt;

use super::agent::Agent;
use super::types::BoundaryMode;

pub const SPEED_BOOST_MULTIPLIER: f64 = 2.0;
pub const SLOW_DOWN_MULTIPLIER: f64 = 0.5;
pub const WALL_PHASE_INVULNERABILITY_SECS: f64 = 2.0;
const KIND_COUNT: usize = 6;

/// Shrinking only happens to agents longer than this.
pub const SHRINK_MIN_LENGTH: usize = 3;

/// Power-up kinds and the effect each one has on the agent that collects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    SpeedBoost,
    SlowDown,
    DoublePoints,
    Shrink,
    WallPhase,
    ScoreMultiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; KIND_COUNT] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::SlowDown,
        PowerUpKind::DoublePoints,
        PowerUpKind::Shrink,
        PowerUpKind::WallPhase,
        PowerUpKind::ScoreMultiplier,
    ];

    fn slot(self) -> usize {
        match self {
            PowerUpKind::SpeedBoost => 0,
            PowerUpKind::SlowDown => 1,
            PowerUpKind::DoublePoints => 2,
            PowerUpKind::Shrink => 3,
            PowerUpKind::WallPhase => 4,
            PowerUpKind::ScoreMultiplier => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "speed boost",
            PowerUpKind::SlowDown => "slow down",
            PowerUpKind::DoublePoints => "double points",
            PowerUpKind::Shrink => "shrink",
            PowerUpKind::WallPhase => "wall phase",
            PowerUpKind::ScoreMultiplier => "score multiplier",
        }
    }

    /// Structural side effect of the first application.
    pub(crate) fn apply(self, agent: &mut Agent) {
        match self {
            PowerUpKind::SpeedBoost => agent.speed_multiplier = SPEED_BOOST_MULTIPLIER,
            PowerUpKind::SlowDown => agent.speed_multiplier = SLOW_DOWN_MULTIPLIER,
            PowerUpKind::Shrink => {
                let len = agent.body.len();
                if len > SHRINK_MIN_LENGTH {
                    agent.body.truncate(len / 2);
                }
            }
            PowerUpKind::WallPhase => {
                agent.boundary = BoundaryMode::Wrapping;
                agent.invulnerability = WALL_PHASE_INVULNERABILITY_SECS;
            }
            // Read at scoring time.
            PowerUpKind::DoublePoints | PowerUpKind::ScoreMultiplier => {}
        }
    }

    pub(crate) fn revert(self, agent: &mut Agent) {
        match self {
            PowerUpKind::SpeedBoost | PowerUpKind::SlowDown => agent.speed_multiplier = 1.0,
            PowerUpKind::WallPhase => agent.boundary = BoundaryMode::Blocking,
            PowerUpKind::Shrink | PowerUpKind::DoublePoints | PowerUpKind::ScoreMultiplier => {}
        }
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expiry timestamp per effect kind; at most one entry per kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectSet {
    expiries: [Option<f64>; KIND_COUNT],
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, kind: PowerUpKind) -> bool {
        self.expiries[kind.slot()].is_some()
    }

    pub fn expiry(&self, kind: PowerUpKind) -> Option<f64> {
        self.expiries[kind.slot()]
    }

    /// Sets the expiry and reports whether the kind was newly added.
    pub(crate) fn insert(&mut self, kind: PowerUpKind, expires_at: f64) -> bool {
        self.expiries[kind.slot()].replace(expires_at).is_none()
    }

    pub(crate) fn take_expired(&mut self, now: f64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            if let Some(at) = self.expiries[kind.slot()]
                && at <= now
            {
                self.expiries[kind.slot()] = None;
                expired.push(kind);
            }
        }
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = (PowerUpKind, f64)> + '_ {
        PowerUpKind::ALL
            .into_iter()
            .filter_map(|kind| self.expiries[kind.slot()].map(|at| (kind, at)))
    }

    pub fn len(&self) -> usize {
        self.expiries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
