use super::types::{Cell, BOARD_CELLS};

const COLUMNS: [[usize; 3]; 3] = [[0, 3, 6], [1, 4, 7], [2, 5, 8]];
const ROWS: [[usize; 3]; 3] = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];
const DIAGONALS: [[usize; 3]; 2] = [[0, 4, 8], [2, 4, 6]];

fn line_owned_by(cells: &[Cell; BOARD_CELLS], line: &[usize; 3], mark: Cell) -> bool {
    line.iter().all(|&i| cells[i] == mark)
}

fn first_winner<'a>(
    cells: &[Cell; BOARD_CELLS],
    lines: impl IntoIterator<Item = &'a [usize; 3]>,
) -> Option<Cell> {
    for line in lines {
        if line_owned_by(cells, line, Cell::Player) {
            return Some(Cell::Player);
        }
        if line_owned_by(cells, line, Cell::Computer) {
            return Some(Cell::Computer);
        }
    }
    None
}

/// Columns first, then rows, then both diagonals with every Player line ahead
/// of the Computer ones.
pub fn check_win(cells: &[Cell; BOARD_CELLS]) -> Option<Cell> {
    if let Some(winner) = first_winner(cells, &COLUMNS) {
        return Some(winner);
    }
    if let Some(winner) = first_winner(cells, &ROWS) {
        return Some(winner);
    }
    if DIAGONALS.iter().any(|line| line_owned_by(cells, line, Cell::Player)) {
        return Some(Cell::Player);
    }
    if DIAGONALS.iter().any(|line| line_owned_by(cells, line, Cell::Computer)) {
        return Some(Cell::Computer);
    }
    None
}

#[cfg(test)]
pub(crate) fn has_line(cells: &[Cell; BOARD_CELLS], mark: Cell) -> bool {
    if mark == Cell::Empty {
        return false;
    }
    COLUMNS
        .iter()
        .chain(ROWS.iter())
        .chain(DIAGONALS.iter())
        .any(|line| line_owned_by(cells, line, mark))
}
