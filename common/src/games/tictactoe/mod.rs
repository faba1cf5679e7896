mod board;
mod error;
mod search;
mod types;
mod win_detector;

pub use board::Board;
pub use error::GameError;
pub use search::{best_move, best_move_with_depth, evaluate, judge, SEARCH_DEPTH};
pub use types::{Cell, Outcome, Side, Turn, BOARD_CELLS, BOARD_SIDE};
pub use win_detector::check_win;
