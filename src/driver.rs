use crate::consts;
use crate::display::DisplaySink;
use crate::game::{Game, GameState};
use crate::highscore::ScoreStore;
use crate::input::CommandSource;
use crate::render::render;
use rand::Rng;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// How long the control loop waits at each point
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Timing {
    /// Time between frames when no game is running
    pub(crate) idle: Duration,

    /// Sleep at the end of every loop iteration
    pub(crate) slice: Duration,

    /// How long the farewell screen is shown
    pub(crate) farewell: Duration,
}

impl Default for Timing {
    fn default() -> Timing {
        Timing {
            idle: consts::IDLE_INTERVAL,
            slice: consts::LOOP_SLICE,
            farewell: consts::FAREWELL_HOLD,
        }
    }
}

/// The control loop: feeds commands to the game, advances it at the right
/// pace, and sends each new frame to the display
#[derive(Debug)]
pub(crate) struct Driver<C, D, S, R = rand::rngs::ThreadRng> {
    controls: C,
    display: D,
    game: Game<S, R>,
    timing: Timing,
}

impl<C: CommandSource, D: DisplaySink, S: ScoreStore, R: Rng> Driver<C, D, S, R> {
    pub(crate) fn new(controls: C, display: D, game: Game<S, R>, timing: Timing) -> Self {
        Driver {
            controls,
            display,
            game,
            timing,
        }
    }

    /// Run until the player exits or the display fails, then save anything
    /// unsaved and blank the display
    pub(crate) fn run(&mut self) -> io::Result<()> {
        let r = self.run_loop();
        tracing::info!(
            score = self.game.grid().score(),
            high_score = self.game.high_score(),
            "Shutting down"
        );
        if let Err(e) = self.game.flush() {
            tracing::warn!(error = %e, "Could not save high score on exit");
        }
        if let Err(e) = self.display.clear() {
            tracing::warn!(error = %e, "Could not clear display");
        }
        r
    }

    fn run_loop(&mut self) -> io::Result<()> {
        let mut last_update: Option<Instant> = None;
        loop {
            if self.game.exiting() {
                self.show()?;
                thread::sleep(self.timing.farewell);
                return Ok(());
            }
            let now = Instant::now();
            if let Some(cmd) = self.controls.next_command(now) {
                tracing::trace!(?cmd, "Received command");
                self.game.handle(cmd);
            }
            let cadence = if self.game.state() == GameState::Playing {
                self.game.tick_interval()
            } else {
                self.timing.idle
            };
            if last_update.is_none_or(|t| now.saturating_duration_since(t) >= cadence) {
                self.game.tick();
                self.show()?;
                last_update = Some(now);
            }
            thread::sleep(self.timing.slice);
        }
    }

    fn show(&mut self) -> io::Result<()> {
        let frame = render(&self.game.view());
        self.display.show(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::display::testing::RecordingDisplay;
    use crate::game::testing::MemoryStore;
    use crate::game::Speed;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::Position;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// Hands out a fixed sequence of polls, then asks to exit forever
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct ScriptedCommands(VecDeque<Option<Command>>);

    impl ScriptedCommands {
        fn new<I: IntoIterator<Item = Option<Command>>>(script: I) -> ScriptedCommands {
            ScriptedCommands(script.into_iter().collect())
        }
    }

    impl CommandSource for ScriptedCommands {
        fn next_command(&mut self, _now: Instant) -> Option<Command> {
            self.0.pop_front().unwrap_or(Some(Command::Exit))
        }
    }

    type TestDriver = Driver<ScriptedCommands, RecordingDisplay, MemoryStore, ChaCha12Rng>;

    /// A driver that ticks a running game on every loop iteration
    fn driver(script: ScriptedCommands, display: RecordingDisplay) -> TestDriver {
        let speed = Speed::new(1000, 1000).unwrap();
        let game = Game::new_with_rng(
            MemoryStore::default(),
            speed,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        let timing = Timing {
            idle: Duration::ZERO,
            slice: Duration::from_millis(1),
            farewell: Duration::ZERO,
        };
        Driver::new(script, display, game, timing)
    }

    #[test]
    fn exit_from_menu() {
        let mut d = driver(ScriptedCommands::default(), RecordingDisplay::default());
        d.run().unwrap();
        assert!(d.game.exiting());
        // One frame after the Exit command, then the farewell
        assert_eq!(d.display.frames, 2);
        assert_eq!(d.display.last, Some(render(&d.game.view())));
        assert!(d.display.cleared);
    }

    #[test]
    fn game_advances_once_per_iteration() {
        let script = std::iter::once(Some(Command::Restart)).chain(std::iter::repeat_n(None, 20));
        let mut d = driver(ScriptedCommands::new(script), RecordingDisplay::default());
        d.run().unwrap();
        // 21 ticks to the right of the center, wrapping around
        assert_eq!(d.game.grid().snake().head(), Position::new(13, 8));
        assert!(d.game.exiting());
    }

    #[test]
    fn paused_game_stands_still() {
        let script = [Some(Command::Restart), Some(Command::Pause)]
            .into_iter()
            .chain(std::iter::repeat_n(None, 10));
        let mut d = driver(ScriptedCommands::new(script), RecordingDisplay::default());
        d.run().unwrap();
        assert_eq!(d.game.grid().snake().head(), Position::new(9, 8));
    }

    #[test]
    fn turns_are_applied() {
        let script = [
            Some(Command::Restart),
            Some(Command::MoveUp),
            Some(Command::MoveLeft),
        ];
        let mut d = driver(ScriptedCommands::new(script), RecordingDisplay::default());
        d.run().unwrap();
        // Right, Up, Left
        assert_eq!(d.game.grid().snake().head(), Position::new(8, 7));
    }

    #[test]
    fn display_failure_is_fatal() {
        let display = RecordingDisplay {
            fail_after: Some(2),
            ..RecordingDisplay::default()
        };
        let script = std::iter::once(Some(Command::Restart)).chain(std::iter::repeat_n(None, 20));
        let mut d = driver(ScriptedCommands::new(script), display);
        assert!(d.run().is_err());
        assert_eq!(d.display.frames, 2);
        assert!(d.display.cleared);
        assert_eq!(d.game.state(), GameState::Playing);
    }
}
