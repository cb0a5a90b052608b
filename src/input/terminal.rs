use super::{InputLine, InputSource, LineState};
use crossterm::event::{poll, read, KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::time::Duration;

/// Reads the device's buttons from the keyboard.
///
/// Terminals only report key presses, so a press asserts its line for the
/// single poll that picks it up.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalInput;

impl TerminalInput {
    /// Upper bound on the number of queued events handled by one poll
    const MAX_EVENTS_PER_POLL: usize = 32;
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<LineState> {
        let mut lines = LineState::default();
        for _ in 0..Self::MAX_EVENTS_PER_POLL {
            if !poll(Duration::ZERO)? {
                break;
            }
            if let Some(line) = read()?
                .as_key_press_event()
                .and_then(InputLine::from_key_event)
            {
                lines[line] = true;
            }
        }
        Ok(lines)
    }
}

impl InputLine {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<InputLine> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(InputLine::Key3),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(InputLine::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => {
                Some(InputLine::Down)
            }
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => {
                Some(InputLine::Left)
            }
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => {
                Some(InputLine::Right)
            }
            (_, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char(' ')) => {
                Some(InputLine::Select)
            }
            (KeyModifiers::NONE, KeyCode::Char('1' | 'p')) => Some(InputLine::Key1),
            (KeyModifiers::NONE, KeyCode::Char('2' | 'r')) => Some(InputLine::Key2),
            (KeyModifiers::NONE, KeyCode::Char('3' | 'q')) | (_, KeyCode::Esc) => {
                Some(InputLine::Key3)
            }
            _ => None,
        }
    }
}
