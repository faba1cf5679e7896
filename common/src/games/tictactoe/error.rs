#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidMove { index: usize },
    NoLegalMoves,
    InvalidEncoding(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidMove { index } => {
                write!(f, "Invalid move: cell {} is occupied or out of range", index)
            }
            GameError::NoLegalMoves => write!(f, "No legal moves left on the board"),
            GameError::InvalidEncoding(reason) => write!(f, "Invalid board encoding: {}", reason),
        }
    }
}

impl std::error::Error for GameError {}
