use super::grid::Bounds;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction.  Stepping off an
    /// edge of `bounds` re-enters from the opposite edge.
    pub(crate) fn advance(self, pos: Position, bounds: Bounds) -> Position {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = decrement_wrapping(y, bounds.height),
            Direction::Down => y = increment_wrapping(y, bounds.height),
            Direction::Left => x = decrement_wrapping(x, bounds.width),
            Direction::Right => x = increment_wrapping(x, bounds.width),
        }
        Position { x, y }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

fn decrement_wrapping(x: u16, max: u16) -> u16 {
    match x.checked_sub(1) {
        Some(x2) if x2 < max => x2,
        _ => max.saturating_sub(1),
    }
}

fn increment_wrapping(x: u16, max: u16) -> u16 {
    x.checked_add(1).filter(|&x2| x2 < max).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BOUNDS: Bounds = Bounds {
        width: 10,
        height: 15,
    };

    #[rstest]
    #[case(Direction::Up, Position::new(2, 7), Position::new(2, 6))]
    #[case(Direction::Down, Position::new(2, 7), Position::new(2, 8))]
    #[case(Direction::Right, Position::new(2, 7), Position::new(3, 7))]
    #[case(Direction::Left, Position::new(2, 7), Position::new(1, 7))]
    #[case(Direction::Up, Position::new(2, 0), Position::new(2, 14))]
    #[case(Direction::Down, Position::new(2, 14), Position::new(2, 0))]
    #[case(Direction::Right, Position::new(9, 7), Position::new(0, 7))]
    #[case(Direction::Left, Position::new(0, 7), Position::new(9, 7))]
    #[case(Direction::Left, Position::new(0, 0), Position::new(9, 0))]
    fn test_direction_advance(
        #[case] d: Direction,
        #[case] pos: Position,
        #[case] r: Position,
    ) {
        assert_eq!(d.advance(pos, BOUNDS), r);
    }

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn reverse_is_involution(#[case] d: Direction) {
        assert_ne!(d.reverse(), d);
        assert_eq!(d.reverse().reverse(), d);
    }

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn reverse_undoes_advance(#[case] d: Direction) {
        let start = Position::new(0, 14);
        assert_eq!(d.reverse().advance(d.advance(start, BOUNDS), BOUNDS), start);
    }
}
