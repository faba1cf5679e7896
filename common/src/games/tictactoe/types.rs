pub const BOARD_SIDE: usize = 3;
pub const BOARD_CELLS: usize = BOARD_SIDE * BOARD_SIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Player,
    Computer,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Player => '1',
            Cell::Computer => '2',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Cell::Empty),
            '1' => Some(Cell::Player),
            '2' => Some(Cell::Computer),
            _ => None,
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Cell::Player,
            Side::Computer => Cell::Computer,
        }
    }
}

/// One of the two parties that can put a mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Turn {
    #[default]
    None,
    Player,
    Computer,
}

impl From<Side> for Turn {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Turn::Player,
            Side::Computer => Turn::Computer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    PlayerWin,
    ComputerWin,
    Draw,
}
