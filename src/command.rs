use crate::game::Direction;

/// Everything the player can ask the game to do
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Pause,
    Restart,
    Exit,
}

impl Command {
    /// Return the direction to steer in, if this is a movement command
    pub(crate) fn direction(self) -> Option<Direction> {
        match self {
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            Command::Pause | Command::Restart | Command::Exit => None,
        }
    }

    /// Is this a command that should only fire once per button press?
    pub(crate) fn is_toggle(self) -> bool {
        self.direction().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Command::MoveUp, Some(Direction::Up))]
    #[case(Command::MoveDown, Some(Direction::Down))]
    #[case(Command::MoveLeft, Some(Direction::Left))]
    #[case(Command::MoveRight, Some(Direction::Right))]
    #[case(Command::Pause, None)]
    #[case(Command::Restart, None)]
    #[case(Command::Exit, None)]
    fn test_direction(#[case] cmd: Command, #[case] d: Option<Direction>) {
        assert_eq!(cmd.direction(), d);
        assert_eq!(cmd.is_toggle(), d.is_none());
    }
}
