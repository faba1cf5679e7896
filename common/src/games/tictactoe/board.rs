use crate::games::SessionRng;
use super::error::GameError;
use super::types::{Cell, Outcome, Side, Turn, BOARD_CELLS};
use super::win_detector::check_win;

/// A 3x3 grid indexed 0..9 in row-major order.
///
/// `Board` is `Copy`, so the search can branch on independent snapshots without
/// ever touching the caller's board. Marks are only ever added through [`Board::place`]
/// or [`Board::successors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
    move_count: usize,
    whose_turn: Turn,
    first_turn: Turn,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn whose_turn(&self) -> Turn {
        self.whose_turn
    }

    pub fn set_whose_turn(&mut self, turn: Turn) {
        self.whose_turn = turn;
    }

    pub fn first_turn(&self) -> Turn {
        self.first_turn
    }

    pub fn set_first_turn(&mut self, turn: Turn) {
        self.first_turn = turn;
    }

    pub fn choose_first_player(&mut self, rng: &mut SessionRng) {
        let first = if rng.random_bool() {
            Side::Player
        } else {
            Side::Computer
        };
        self.first_turn = first.into();
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_legal(&self, index: usize) -> bool {
        self.cell(index) == Some(Cell::Empty)
    }

    pub fn place(&mut self, side: Side, index: usize) -> Result<(), GameError> {
        if !self.is_legal(index) {
            return Err(GameError::InvalidMove { index });
        }

        self.cells[index] = side.into();
        self.move_count += 1;
        Ok(())
    }

    /// Boards reachable by `side` marking one empty cell, in ascending cell order.
    /// Each successor has `whose_turn` set to `side`.
    pub fn successors(&self, side: Side) -> impl Iterator<Item = Board> + '_ {
        self.legal_moves().into_iter().map(move |index| {
            let mut next = *self;
            next.cells[index] = side.into();
            next.move_count += 1;
            next.whose_turn = side.into();
            next
        })
    }

    pub fn outcome(&self) -> Outcome {
        match check_win(&self.cells) {
            Some(Cell::Player) => Outcome::PlayerWin,
            Some(Cell::Computer) => Outcome::ComputerWin,
            _ if self.move_count == BOARD_CELLS => Outcome::Draw,
            _ => Outcome::InProgress,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome() != Outcome::InProgress
    }

    /// Nine characters, one per cell: `1` player, `2` computer, `-` empty.
    pub fn encode(&self) -> String {
        self.cells.iter().map(|cell| cell.to_char()).collect()
    }

    pub fn decode(encoded: &str) -> Result<Self, GameError> {
        let chars: Vec<char> = encoded.chars().collect();
        if chars.len() != BOARD_CELLS {
            return Err(GameError::InvalidEncoding(format!(
                "expected {} cells, got {}",
                BOARD_CELLS,
                chars.len()
            )));
        }

        let mut board = Self::new();
        for (index, c) in chars.into_iter().enumerate() {
            let cell = Cell::from_char(c).ok_or_else(|| {
                GameError::InvalidEncoding(format!("unknown cell '{}' at {}", c, index))
            })?;
            board.cells[index] = cell;
            if cell != Cell::Empty {
                board.move_count += 1;
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::win_detector::has_line;

    fn visit_reachable(board: Board, side: Side, visit: &mut impl FnMut(&Board)) {
        visit(&board);
        if board.is_over() {
            return;
        }
        for index in board.legal_moves() {
            let mut next = board;
            next.place(side, index).unwrap();
            visit_reachable(next, side.opponent(), visit);
        }
    }

    fn for_each_reachable_board(mut visit: impl FnMut(&Board)) {
        visit_reachable(Board::new(), Side::Player, &mut visit);
        visit_reachable(Board::new(), Side::Computer, &mut visit);
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();

        assert_eq!(board.move_count(), 0);
        assert_eq!(board.legal_moves(), (0..9).collect::<Vec<_>>());
        assert_eq!(board.whose_turn(), Turn::None);
        assert_eq!(board.first_turn(), Turn::None);
        assert_eq!(board.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_place_marks_cell_and_counts_move() {
        let mut board = Board::new();
        board.place(Side::Computer, 4).unwrap();
        board.place(Side::Player, 0).unwrap();

        assert_eq!(board.cell(4), Some(Cell::Computer));
        assert_eq!(board.cell(0), Some(Cell::Player));
        assert_eq!(board.move_count(), 2);
        assert_eq!(board.legal_moves(), vec![1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_place_on_occupied_cell_fails_and_leaves_board_untouched() {
        let mut board = Board::new();
        board.place(Side::Player, 3).unwrap();
        let before = board;

        let result = board.place(Side::Computer, 3);

        assert_eq!(result, Err(GameError::InvalidMove { index: 3 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_out_of_range_fails() {
        let mut board = Board::new();

        assert!(!board.is_legal(9));
        assert_eq!(
            board.place(Side::Player, 9),
            Err(GameError::InvalidMove { index: 9 })
        );
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_successors_mark_each_empty_cell_in_order() {
        let board = Board::decode("12-1-2-21").unwrap();
        let children: Vec<Board> = board.successors(Side::Player).collect();

        let encoded: Vec<String> = children.iter().map(Board::encode).collect();
        assert_eq!(encoded, vec!["1211-2-21", "12-112-21", "12-1-2121"]);
        for child in &children {
            assert_eq!(child.move_count(), board.move_count() + 1);
            assert_eq!(child.whose_turn(), Turn::Player);
        }
        assert_eq!(board.encode(), "12-1-2-21");
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = Board::decode("121122211").unwrap();

        assert_eq!(board.move_count(), 9);
        assert_eq!(board.outcome(), Outcome::Draw);
        assert!(board.is_over());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_win_detected_before_board_is_full() {
        let board = Board::decode("222-11--1").unwrap();

        assert_eq!(board.outcome(), Outcome::ComputerWin);
        assert!(board.is_over());
    }

    #[test]
    fn test_win_on_last_move_is_not_draw() {
        let board = Board::decode("121212112").unwrap();

        assert_eq!(board.outcome(), Outcome::PlayerWin);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let mut board = Board::new();
        board.place(Side::Player, 0).unwrap();
        board.place(Side::Computer, 4).unwrap();
        board.place(Side::Player, 8).unwrap();

        let encoded = board.encode();
        assert_eq!(encoded, "1---2---1");

        let decoded = Board::decode(&encoded).unwrap();
        assert_eq!(decoded.cells(), board.cells());
        assert_eq!(decoded.move_count(), board.move_count());
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        assert!(matches!(
            Board::decode("12-"),
            Err(GameError::InvalidEncoding(_))
        ));
        assert!(matches!(
            Board::decode("12-x-----"),
            Err(GameError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_choose_first_player_is_reproducible_with_seed() {
        let mut first = Board::new();
        let mut second = Board::new();

        first.choose_first_player(&mut SessionRng::new(99));
        second.choose_first_player(&mut SessionRng::new(99));

        assert_ne!(first.first_turn(), Turn::None);
        assert_eq!(first.first_turn(), second.first_turn());
    }

    #[test]
    fn test_reachable_boards_never_have_two_winners() {
        let mut visited = 0usize;
        for_each_reachable_board(|board| {
            visited += 1;
            assert!(
                !(has_line(board.cells(), Cell::Player) && has_line(board.cells(), Cell::Computer)),
                "both sides own a line on {}",
                board.encode()
            );
        });
        assert!(visited > 0);
    }

    #[test]
    fn test_legal_moves_match_remaining_cells() {
        for_each_reachable_board(|board| {
            assert_eq!(board.legal_moves().len(), 9 - board.move_count());
        });
    }
}
