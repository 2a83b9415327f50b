use super::rng::SessionRng;
use super::types::{BoundaryMode, Direction, Point};

/// Rejection-sampling budget for placing food and power-ups.
pub const SPAWN_ATTEMPTS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    fn wrapping_inc(value: usize, max: usize) -> usize {
        if value + 1 >= max { 0 } else { value + 1 }
    }

    fn wrapping_dec(value: usize, max: usize) -> usize {
        if value == 0 { max - 1 } else { value - 1 }
    }

    /// The neighbouring cell in `direction`, or `None` when a blocking edge is crossed.
    pub fn step(&self, from: Point, direction: Direction, mode: BoundaryMode) -> Option<Point> {
        match mode {
            BoundaryMode::Blocking => match direction {
                Direction::Up => from.y.checked_sub(1).map(|y| Point::new(from.x, y)),
                Direction::Down => {
                    (from.y + 1 < self.height).then(|| Point::new(from.x, from.y + 1))
                }
                Direction::Left => from.x.checked_sub(1).map(|x| Point::new(x, from.y)),
                Direction::Right => {
                    (from.x + 1 < self.width).then(|| Point::new(from.x + 1, from.y))
                }
            },
            BoundaryMode::Wrapping => Some(match direction {
                Direction::Up => Point::new(from.x, Self::wrapping_dec(from.y, self.height)),
                Direction::Down => Point::new(from.x, Self::wrapping_inc(from.y, self.height)),
                Direction::Left => Point::new(Self::wrapping_dec(from.x, self.width), from.y),
                Direction::Right => Point::new(Self::wrapping_inc(from.x, self.width), from.y),
            }),
        }
    }

    /// Uniformly samples cells until one satisfies `is_free`, giving up after `attempts` tries.
    pub fn random_free_cell(
        &self,
        rng: &mut SessionRng,
        attempts: usize,
        is_free: impl Fn(Point) -> bool,
    ) -> Option<Point> {
        (0..attempts)
            .map(|_| {
                Point::new(
                    rng.random_range(0..self.width),
                    rng.random_range(0..self.height),
                )
            })
            .find(|&p| is_free(p))
    }

    pub fn free_cells(&self, is_free: impl Fn(Point) -> bool) -> Vec<Point> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Point::new(x, y)))
            .filter(|&p| is_free(p))
            .collect()
    }
}
