//! Turning button presses into [`Command`]s
mod terminal;
mod threaded;
pub(crate) use self::terminal::TerminalInput;
pub(crate) use self::threaded::InputThread;
use crate::command::Command;
use crate::consts;
use enum_dispatch::enum_dispatch;
use enum_map::{Enum, EnumMap};
use std::io;
use std::time::{Duration, Instant};

/// The physical buttons on the device.
///
/// The variants are listed in priority order: when more than one line is
/// asserted during a poll, the first one listed wins.
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum InputLine {
    Up,
    Down,
    Left,
    Right,
    /// Pressing the joystick in
    Select,
    Key1,
    Key2,
    Key3,
}

impl InputLine {
    pub(crate) fn command(self) -> Command {
        match self {
            InputLine::Up => Command::MoveUp,
            InputLine::Down => Command::MoveDown,
            InputLine::Left => Command::MoveLeft,
            InputLine::Right => Command::MoveRight,
            InputLine::Select | InputLine::Key1 => Command::Pause,
            InputLine::Key2 => Command::Restart,
            InputLine::Key3 => Command::Exit,
        }
    }
}

/// Which lines are asserted (pressed) at a moment in time
pub(crate) type LineState = EnumMap<InputLine, bool>;

/// A device that can report which buttons are currently pressed
pub(crate) trait InputSource {
    fn poll(&mut self) -> io::Result<LineState>;
}

/// Converts successive line readings into at most one command per poll.
///
/// Direction lines are level-triggered: holding one re-requests the same
/// direction on every poll, which is harmless.  Pause, Restart, and Exit fire
/// once per press: the first poll in which their line wins consumes the
/// press, and the line must be released before it can fire again.  Pause and
/// Restart are additionally ignored until `debounce` has passed since the
/// last one of them fired; Exit is never delayed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Normalizer {
    debounce: Duration,

    /// Toggle lines whose current press has already been consumed
    consumed: LineState,

    last_toggle: Option<Instant>,
}

impl Normalizer {
    pub(crate) fn new(debounce: Duration) -> Normalizer {
        Normalizer {
            debounce,
            consumed: LineState::default(),
            last_toggle: None,
        }
    }

    pub(crate) fn normalize(&mut self, lines: LineState, now: Instant) -> Option<Command> {
        for (line, consumed) in &mut self.consumed {
            *consumed &= lines[line];
        }
        let line = lines
            .iter()
            .find(|&(_, &pressed)| pressed)
            .map(|(line, _)| line)?;
        let cmd = line.command();
        if cmd.is_toggle() {
            if self.consumed[line] {
                return None;
            }
            // A press rejected by the debounce is a bounce and stays consumed
            self.consumed[line] = true;
            if cmd != Command::Exit {
                let settled = self
                    .last_toggle
                    .is_none_or(|t| now.saturating_duration_since(t) >= self.debounce);
                if !settled {
                    return None;
                }
                self.last_toggle = Some(now);
            }
        }
        Some(cmd)
    }

    /// Read `source` and normalize the result.  A failed read produces no
    /// command.
    pub(crate) fn poll<I: InputSource>(&mut self, source: &mut I, now: Instant) -> Option<Command> {
        match source.poll() {
            Ok(lines) => self.normalize(lines, now),
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read input; ignoring");
                None
            }
        }
    }
}

impl Default for Normalizer {
    fn default() -> Normalizer {
        Normalizer::new(consts::DEBOUNCE_INTERVAL)
    }
}

/// Somewhere the control loop can fetch the player's next command from
#[enum_dispatch]
pub(crate) trait CommandSource {
    fn next_command(&mut self, now: Instant) -> Option<Command>;
}

/// An input source read directly on the control loop
#[derive(Clone, Debug)]
pub(crate) struct Polled<I> {
    source: I,
    normalizer: Normalizer,
}

impl<I: InputSource> Polled<I> {
    pub(crate) fn new(source: I, normalizer: Normalizer) -> Polled<I> {
        Polled { source, normalizer }
    }
}

impl<I: InputSource> CommandSource for Polled<I> {
    fn next_command(&mut self, now: Instant) -> Option<Command> {
        self.normalizer.poll(&mut self.source, now)
    }
}

/// The ways the keyboard can be wired up to the control loop
#[enum_dispatch(CommandSource)]
#[derive(Debug)]
pub(crate) enum Controls {
    Polled(Polled<TerminalInput>),
    Threaded(InputThread),
}
