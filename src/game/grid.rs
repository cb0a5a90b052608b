use super::direction::Direction;
use super::snake::Snake;
use super::speed::Speed;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Positions, Rect, Size};

/// The dimensions of the wrap-around playing field, in cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }
}

impl From<Size> for Bounds {
    fn from(size: Size) -> Bounds {
        Bounds {
            width: size.width,
            height: size.height,
        }
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds::from(consts::GRID_SIZE)
    }
}

/// Everything about a single game in progress.
///
/// This is plain data; the rules about how & when it changes live in
/// [`Game`][super::Game].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(super) bounds: Bounds,
    pub(super) snake: Snake,

    /// The direction the snake moved in on the most recent tick
    pub(super) direction: Direction,

    /// The direction the snake will move in on the next tick
    pub(super) pending: Direction,

    /// `None` only when the snake covers the entire grid
    pub(super) food: Option<Position>,

    pub(super) score: u32,

    /// Ticks per second at the current score
    pub(super) tick_rate: u32,
}

impl Grid {
    const START_DIRECTION: Direction = Direction::Right;

    pub(crate) fn new<R: Rng>(bounds: Bounds, speed: Speed, rng: &mut R) -> Grid {
        let mut grid = Grid {
            bounds,
            snake: Snake::new(
                bounds.center(),
                Self::START_DIRECTION,
                consts::INITIAL_SNAKE_LENGTH,
                bounds,
            ),
            direction: Self::START_DIRECTION,
            pending: Self::START_DIRECTION,
            food: None,
            score: 0,
            tick_rate: speed.rate(0),
        };
        grid.place_food(rng);
        grid
    }

    /// Put everything back to how it is at the start of a game, including a
    /// freshly-placed food
    pub(crate) fn reset<R: Rng>(&mut self, speed: Speed, rng: &mut R) {
        *self = Grid::new(self.bounds, speed, rng);
    }

    /// Queue a turn for the next tick.  A turn straight back into the
    /// snake's neck is ignored.
    pub(crate) fn request_direction(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.pending = direction;
        }
    }

    /// Place the food on a random cell not occupied by the snake, or clear it
    /// if there are no such cells.
    pub(crate) fn place_food<R: Rng>(&mut self, rng: &mut R) {
        if self.snake.len() >= self.bounds.area() {
            self.food = None;
            return;
        }
        for _ in 0..consts::FOOD_SAMPLING_ATTEMPTS {
            let candidate = Position::new(
                rng.random_range(0..self.bounds.width),
                rng.random_range(0..self.bounds.height),
            );
            if !self.snake.contains(candidate) {
                self.food = Some(candidate);
                return;
            }
        }
        let snake = &self.snake;
        self.food = self
            .bounds
            .positions()
            .filter(|&p| !snake.contains(p))
            .choose(rng);
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }
}
