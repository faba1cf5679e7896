use super::board::Board;
use super::error::GameError;
use super::types::{Outcome, Side, Turn};

/// Ply budget of the full-strength search; enough to reach the end of any game.
pub const SEARCH_DEPTH: usize = 8;

const PLAYER_WIN_SCORE: i32 = 0;
const NEUTRAL_SCORE: i32 = 50;
const COMPUTER_WIN_SCORE: i32 = 100;

/// Static score of a position from the computer's point of view.
pub fn judge(board: &Board) -> i32 {
    match board.outcome() {
        Outcome::ComputerWin => COMPUTER_WIN_SCORE,
        Outcome::PlayerWin => PLAYER_WIN_SCORE,
        Outcome::InProgress | Outcome::Draw => NEUTRAL_SCORE,
    }
}

fn simulated_mover(depth: usize) -> Side {
    if depth % 2 == 0 {
        Side::Computer
    } else {
        Side::Player
    }
}

/// Scores `board` by playing out every continuation up to `depth` plies.
///
/// The side moving at each level is picked by the parity of `depth`, not by the
/// board's move count. Player levels keep the highest child score and computer
/// levels keep the lowest.
pub fn evaluate(board: &Board, depth: usize) -> i32 {
    if depth == 0 || board.is_over() {
        return judge(board);
    }

    let mover = simulated_mover(depth);
    let children = board.successors(mover).map(|child| evaluate(&child, depth - 1));
    match mover {
        Side::Player => children.fold(PLAYER_WIN_SCORE, i32::max),
        Side::Computer => children.fold(COMPUTER_WIN_SCORE, i32::min),
    }
}

pub fn best_move(board: &Board) -> Result<usize, GameError> {
    best_move_with_depth(board, SEARCH_DEPTH)
}

/// Picks the computer's move. Candidates are tried in ascending index order and
/// a later one only wins on a strict improvement, so ties go to the lowest index.
pub fn best_move_with_depth(board: &Board, depth: usize) -> Result<usize, GameError> {
    if board.is_over() {
        return Err(GameError::NoLegalMoves);
    }

    let prefer_higher = board.whose_turn() == Turn::Computer;
    let mut best: Option<(usize, i32)> = None;

    for index in board.legal_moves() {
        let mut branch = *board;
        branch.place(Side::Computer, index)?;
        let score = evaluate(&branch, depth);

        let improves = match best {
            None => true,
            Some((_, best_score)) if prefer_higher => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index).ok_or(GameError::NoLegalMoves)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer_to_move(encoded: &str) -> Board {
        let mut board = Board::decode(encoded).unwrap();
        board.set_whose_turn(Turn::Computer);
        board
    }

    #[test]
    fn test_judge_scores() {
        assert_eq!(judge(&Board::decode("222-11--1").unwrap()), 100);
        assert_eq!(judge(&Board::decode("111-22---").unwrap()), 0);
        assert_eq!(judge(&Board::decode("121122211").unwrap()), 50);
        assert_eq!(judge(&Board::new()), 50);
    }

    #[test]
    fn test_evaluate_returns_judge_at_depth_zero() {
        let board = Board::decode("22-11----").unwrap();
        assert_eq!(evaluate(&board, 0), 50);
    }

    #[test]
    fn test_evaluate_returns_judge_on_finished_board() {
        let board = Board::decode("111-22---").unwrap();
        assert_eq!(evaluate(&board, 5), 0);
    }

    #[test]
    fn test_player_ply_keeps_highest_score() {
        // Depth 1 is a player ply: the player completing 3-4-5 scores 0, every
        // other reply scores 50, and the level keeps the 50.
        let board = Board::decode("22-11----").unwrap();
        assert_eq!(evaluate(&board, 1), 50);
    }

    #[test]
    fn test_computer_ply_keeps_lowest_score() {
        // Depth 2 is a computer ply: completing 0-1-2 scores 100 but the level
        // keeps the lowest child.
        let board = Board::decode("22-11----").unwrap();
        assert_eq!(evaluate(&board, 2), 50);
    }

    #[test]
    fn test_evaluate_does_not_mutate_input() {
        let board = Board::decode("1---2----").unwrap();
        let before = board;
        evaluate(&board, SEARCH_DEPTH);
        assert_eq!(board, before);
    }

    #[test]
    fn test_full_depth_scores() {
        assert_eq!(evaluate(&Board::new(), SEARCH_DEPTH), 50);
        assert_eq!(evaluate(&Board::decode("1--------").unwrap(), SEARCH_DEPTH), 0);
    }

    #[test]
    fn test_best_move_on_empty_board_is_first_cell() {
        let board = computer_to_move("---------");
        assert_eq!(best_move(&board), Ok(0));
    }

    #[test]
    fn test_best_move_is_stable_across_calls() {
        let board = computer_to_move("1---2----");
        let first = best_move(&board).unwrap();
        for _ in 0..3 {
            assert_eq!(best_move(&board).unwrap(), first);
        }
    }

    #[test]
    fn test_best_move_completes_bottom_row() {
        let board = computer_to_move("1---1-22-");
        assert_eq!(best_move(&board), Ok(8));
    }

    #[test]
    fn test_best_move_blocks_open_row() {
        let board = computer_to_move("11--2----");
        assert_eq!(best_move(&board), Ok(2));
    }

    #[test]
    fn test_best_move_prefers_lower_scores_when_not_computer_turn() {
        let mut board = Board::new();
        assert_eq!(best_move(&board), Ok(1));

        board.set_whose_turn(Turn::Player);
        assert_eq!(best_move(&board), Ok(1));
    }

    #[test]
    fn test_best_move_on_finished_board_fails() {
        let full = computer_to_move("121122211");
        assert_eq!(best_move(&full), Err(GameError::NoLegalMoves));

        let won = computer_to_move("111-22---");
        assert_eq!(best_move(&won), Err(GameError::NoLegalMoves));
    }

    #[test]
    fn test_shallow_search_still_returns_legal_move() {
        let board = computer_to_move("1-2-1----");
        for depth in 0..=SEARCH_DEPTH {
            let index = best_move_with_depth(&board, depth).unwrap();
            assert!(board.is_legal(index));
        }
    }

    #[test]
    fn test_scripted_game_is_deterministic() {
        // Computer opens; the player always takes the lowest free cell.
        let mut board = Board::new();
        let mut side = Side::Computer;
        let mut history = Vec::new();

        while !board.is_over() {
            board.set_whose_turn(side.into());
            let index = match side {
                Side::Computer => best_move(&board).unwrap(),
                Side::Player => board.legal_moves()[0],
            };
            board.place(side, index).unwrap();
            history.push(index);
            side = side.opponent();
        }

        assert_eq!(history, vec![0, 1, 3, 2, 4, 5, 6]);
        assert_eq!(board.outcome(), Outcome::ComputerWin);
    }
}
