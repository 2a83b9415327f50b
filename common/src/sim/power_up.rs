use crate::log;
use super::effects::PowerUpKind;
use super::events::SimEvent;
use super::grid::{Grid, SPAWN_ATTEMPTS};
use super::rng::SessionRng;
use super::types::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub position: Point,
    /// How long the effect lasts once collected.
    pub duration: f64,
    pub spawned_at: f64,
}

impl PowerUp {
    pub fn age(&self, now: f64) -> f64 {
        now - self.spawned_at
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnerSettings {
    pub spawn_interval: f64,
    pub max_lifetime: f64,
    pub max_active: usize,
    pub effect_duration: f64,
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            spawn_interval: 10.0,
            max_lifetime: 15.0,
            max_active: 3,
            effect_duration: 5.0,
        }
    }
}

/// Owns the uncollected power-ups on the field and decides when new ones appear.
#[derive(Clone, Debug)]
pub struct PowerUpSpawner {
    settings: SpawnerSettings,
    active: Vec<PowerUp>,
    spawn_timer: f64,
}

impl PowerUpSpawner {
    pub fn new(settings: SpawnerSettings) -> Self {
        Self {
            settings,
            active: Vec::new(),
            spawn_timer: 0.0,
        }
    }

    pub fn active(&self) -> &[PowerUp] {
        &self.active
    }

    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    pub fn settings(&self) -> &SpawnerSettings {
        &self.settings
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.active.iter().any(|p| p.position == point)
    }

    /// Ages out stale power-ups and spawns a new one when the interval has elapsed.
    /// `is_free` rejects cells held by agents or food.
    pub fn tick(
        &mut self,
        dt: f64,
        now: f64,
        grid: &Grid,
        rng: &mut SessionRng,
        is_free: impl Fn(Point) -> bool,
        events: &mut Vec<SimEvent>,
    ) {
        self.spawn_timer += dt;

        let max_lifetime = self.settings.max_lifetime;
        self.active.retain(|p| {
            if p.age(now) > max_lifetime {
                log!("{} power-up at {} expired uncollected", p.kind, p.position);
                events.push(SimEvent::PowerUpExpired {
                    kind: p.kind,
                    position: p.position,
                });
                false
            } else {
                true
            }
        });

        if self.spawn_timer > self.settings.spawn_interval && self.active.len() < self.settings.max_active {
            if let Some(power_up) = self.spawn(now, grid, rng, &is_free) {
                events.push(SimEvent::PowerUpSpawned {
                    kind: power_up.kind,
                    position: power_up.position,
                });
                self.active.push(power_up);
                self.spawn_timer = 0.0;
            } else {
                log!("No free cell found for a power-up, retrying next frame");
            }
        }
    }

    fn spawn(
        &self,
        now: f64,
        grid: &Grid,
        rng: &mut SessionRng,
        is_free: impl Fn(Point) -> bool,
    ) -> Option<PowerUp> {
        let kind = *rng.choose(&PowerUpKind::ALL)?;
        let position = grid.random_free_cell(rng, SPAWN_ATTEMPTS, |p| is_free(p) && !self.occupies(p))?;
        log!("Spawned {} power-up at {}", kind, position);
        Some(PowerUp {
            kind,
            position,
            duration: self.settings.effect_duration,
            spawned_at: now,
        })
    }

    /// Removes and returns the power-up lying on `position`, if any.
    pub fn collect_at(&mut self, position: Point) -> Option<PowerUp> {
        let index = self.active.iter().position(|p| p.position == position)?;
        Some(self.active.remove(index))
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, power_up: PowerUp) {
        self.active.push(power_up);
    }
}
