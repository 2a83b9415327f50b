use crate::log;
use super::grid::{Grid, SPAWN_ATTEMPTS};
use super::rng::SessionRng;
use super::types::Point;

pub const DEFAULT_FOOD_VALUE: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct Food {
    position: Point,
    value: u32,
}

impl Food {
    pub fn new(position: Point, value: u32) -> Self {
        Self { position, value }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Points for eating this food before per-agent bonuses.
    pub fn base_points(&self, score_multiplier: f64) -> u32 {
        (self.value as f64 * score_multiplier).floor() as u32
    }

    /// Moves the food to a uniformly random cell accepted by `is_free`.
    /// Falls back to scanning the whole grid when sampling keeps hitting occupied cells,
    /// and stays put when no free cell exists at all.
    pub fn respawn(
        &mut self,
        grid: &Grid,
        rng: &mut SessionRng,
        is_free: impl Fn(Point) -> bool,
    ) -> bool {
        if let Some(cell) = grid.random_free_cell(rng, SPAWN_ATTEMPTS, &is_free) {
            self.position = cell;
            return true;
        }

        let free = grid.free_cells(&is_free);
        match rng.choose(&free) {
            Some(&cell) => {
                self.position = cell;
                true
            }
            None => {
                log!("No free cell left for food, keeping it at {}", self.position);
                false
            }
        }
    }
}
