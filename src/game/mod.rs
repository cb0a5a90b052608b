mod direction;
mod grid;
mod snake;
mod speed;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::{Bounds, Grid};
pub(crate) use self::speed::Speed;
use crate::command::Command;
use crate::highscore::{SaveError, ScoreStore};
use rand::Rng;
use std::time::Duration;

/// The game engine: the grid, the high score, and the state machine that
/// moves between the menu, play, and the end of a game
#[derive(Clone, Debug)]
pub(crate) struct Game<S, R = rand::rngs::ThreadRng> {
    rng: R,
    store: S,
    speed: Speed,
    grid: Grid,
    state: GameState,
    high_score: u32,

    /// Set when the most recent high score could not be saved
    unsaved: bool,
}

impl<S: ScoreStore> Game<S, rand::rngs::ThreadRng> {
    pub(crate) fn new(store: S, speed: Speed) -> Self {
        Game::new_with_rng(store, speed, rand::rng())
    }
}

impl<S: ScoreStore, R: Rng> Game<S, R> {
    pub(crate) fn new_with_rng(store: S, speed: Speed, mut rng: R) -> Game<S, R> {
        let high_score = store.load();
        let grid = Grid::new(Bounds::default(), speed, &mut rng);
        Game {
            rng,
            store,
            speed,
            grid,
            state: GameState::Menu,
            high_score,
            unsaved: false,
        }
    }

    /// Apply a command from the player.  Commands that mean nothing in the
    /// current state are ignored.
    pub(crate) fn handle(&mut self, cmd: Command) {
        match (self.state, cmd) {
            (GameState::Exiting, _) => (),
            (_, Command::Exit) => {
                tracing::info!(score = self.grid.score(), "Exiting");
                self.state = GameState::Exiting;
            }
            (_, Command::Restart) => self.start(),
            (GameState::Playing, Command::Pause) => self.state = GameState::Paused,
            (GameState::Paused, Command::Pause) => self.state = GameState::Playing,
            (GameState::Playing, _) => {
                if let Some(d) = cmd.direction() {
                    self.grid.request_direction(d);
                }
            }
            _ => (),
        }
    }

    /// Advance the game by one step.  Does nothing unless a game is being
    /// played and isn't paused.
    pub(crate) fn tick(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let grid = &mut self.grid;
        grid.direction = grid.pending;
        let new_head = grid.direction.advance(grid.snake.head(), grid.bounds);
        // The tail hasn't moved out of the way yet, so running into it counts.
        if grid.snake.contains(new_head) {
            self.end(Ending::Collision);
            return;
        }
        grid.snake.push_head(new_head);
        if grid.food == Some(new_head) {
            grid.score += 1;
            grid.tick_rate = self.speed.rate(grid.score);
            grid.place_food(&mut self.rng);
            if grid.food.is_none() {
                self.end(Ending::BoardFull);
            }
        } else {
            grid.snake.pop_tail();
        }
    }

    /// Retry saving a high score that previously failed to save
    pub(crate) fn flush(&mut self) -> Result<(), SaveError> {
        if self.unsaved {
            self.store.save(self.high_score)?;
            self.unsaved = false;
        }
        Ok(())
    }

    fn start(&mut self) {
        self.grid.reset(self.speed, &mut self.rng);
        self.state = GameState::Playing;
        tracing::debug!(food = ?self.grid.food(), "Starting new game");
    }

    fn end(&mut self, ending: Ending) {
        let score = self.grid.score();
        tracing::info!(score, ?ending, "Game over");
        self.state = GameState::GameOver(ending);
        if score > self.high_score {
            self.high_score = score;
            if let Err(e) = self.store.save(score) {
                tracing::warn!(error = %e, score, "Could not save high score; will retry on exit");
                self.unsaved = true;
            } else {
                self.unsaved = false;
            }
        }
    }
}

impl<S, R> Game<S, R> {
    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    pub(crate) fn exiting(&self) -> bool {
        self.state == GameState::Exiting
    }

    /// Time between ticks at the current tick rate
    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.grid.tick_rate.max(1)
    }

    /// Everything the renderer needs to draw the current frame
    pub(crate) fn view(&self) -> View<'_> {
        View {
            state: self.state,
            grid: &self.grid,
            high_score: self.high_score,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Menu,
    Playing,
    Paused,
    GameOver(Ending),
    Exiting,
}

/// How a game came to an end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    /// The snake ran into itself
    Collision,

    /// The snake has filled the board and there are no more spaces to place
    /// food in.
    BoardFull,
}

/// A read-only snapshot of a [`Game`] for rendering
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct View<'a> {
    pub(crate) state: GameState,
    pub(crate) grid: &'a Grid,
    pub(crate) high_score: u32,
}
