//! Newline-delimited text protocol spoken between the server and the client.
//!
//! The server sends either a 9-character board (it is waiting for a move or
//! reporting the final position) or a `#`-prefixed game-over line. The client
//! answers with a cell index, `#NG` for a new game or `#CG` to close.

use crate::games::tictactoe::{Board, Outcome};

pub const PLAYER_WON: &str = "#P";
pub const COMPUTER_WON: &str = "#C";
pub const TIE: &str = "#T";
pub const NEW_GAME: &str = "#NG";
pub const CLOSE_GAME: &str = "#CG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Board(String),
    GameOver(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Move(i64),
    NewGame,
    CloseGame,
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    EmptyLine,
    UnknownCommand(String),
    MalformedBoard(String),
    NotAGameOver(Outcome),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::EmptyLine => write!(f, "Empty protocol line"),
            ProtocolError::UnknownCommand(line) => write!(f, "Unknown command: {}", line),
            ProtocolError::MalformedBoard(line) => write!(f, "Malformed board: {}", line),
            ProtocolError::NotAGameOver(outcome) => {
                write!(f, "Outcome {:?} does not end a game", outcome)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

impl ServerMessage {
    pub fn board(board: &Board) -> Self {
        ServerMessage::Board(board.encode())
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        let line = match self {
            ServerMessage::Board(encoded) => encoded.as_str(),
            ServerMessage::GameOver(Outcome::PlayerWin) => PLAYER_WON,
            ServerMessage::GameOver(Outcome::ComputerWin) => COMPUTER_WON,
            ServerMessage::GameOver(Outcome::Draw) => TIE,
            ServerMessage::GameOver(outcome @ Outcome::InProgress) => {
                return Err(ProtocolError::NotAGameOver(*outcome));
            }
        };
        Ok(format!("{}\n", line))
    }

    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ProtocolError::EmptyLine);
        }

        match line {
            PLAYER_WON => Ok(ServerMessage::GameOver(Outcome::PlayerWin)),
            COMPUTER_WON => Ok(ServerMessage::GameOver(Outcome::ComputerWin)),
            TIE => Ok(ServerMessage::GameOver(Outcome::Draw)),
            _ if line.starts_with('#') => Err(ProtocolError::UnknownCommand(line.to_string())),
            _ => Board::decode(line)
                .map(|board| ServerMessage::Board(board.encode()))
                .map_err(|_| ProtocolError::MalformedBoard(line.to_string())),
        }
    }
}

impl ClientMessage {
    pub fn encode(&self) -> String {
        match self {
            ClientMessage::Move(index) => format!("{}\n", index),
            ClientMessage::NewGame => format!("{}\n", NEW_GAME),
            ClientMessage::CloseGame => format!("{}\n", CLOSE_GAME),
            ClientMessage::Unrecognized(line) => format!("{}\n", line),
        }
    }

    /// Returns `None` for blank lines, which both sides skip.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let message = match line {
            NEW_GAME => ClientMessage::NewGame,
            CLOSE_GAME => ClientMessage::CloseGame,
            _ => match line.parse::<i64>() {
                Ok(index) => ClientMessage::Move(index),
                Err(_) => ClientMessage::Unrecognized(line.to_string()),
            },
        };
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Side;

    #[test]
    fn test_board_message_uses_display_encoding() {
        let mut board = Board::new();
        board.place(Side::Player, 0).unwrap();
        board.place(Side::Computer, 8).unwrap();

        let line = ServerMessage::board(&board).encode().unwrap();
        assert_eq!(line, "1-------2\n");
        assert_eq!(
            ServerMessage::parse(&line),
            Ok(ServerMessage::Board("1-------2".to_string()))
        );
    }

    #[test]
    fn test_game_over_lines() {
        assert_eq!(ServerMessage::GameOver(Outcome::PlayerWin).encode().unwrap(), "#P\n");
        assert_eq!(ServerMessage::GameOver(Outcome::ComputerWin).encode().unwrap(), "#C\n");
        assert_eq!(ServerMessage::GameOver(Outcome::Draw).encode().unwrap(), "#T\n");
        assert_eq!(ServerMessage::parse("#T"), Ok(ServerMessage::GameOver(Outcome::Draw)));
    }

    #[test]
    fn test_in_progress_is_not_a_game_over_line() {
        assert_eq!(
            ServerMessage::GameOver(Outcome::InProgress).encode(),
            Err(ProtocolError::NotAGameOver(Outcome::InProgress))
        );
    }

    #[test]
    fn test_server_parse_rejects_garbage() {
        assert_eq!(ServerMessage::parse("   "), Err(ProtocolError::EmptyLine));
        assert!(matches!(
            ServerMessage::parse("#X"),
            Err(ProtocolError::UnknownCommand(_))
        ));
        assert!(matches!(
            ServerMessage::parse("12"),
            Err(ProtocolError::MalformedBoard(_))
        ));
    }

    #[test]
    fn test_client_parse() {
        assert_eq!(ClientMessage::parse(" 4 \r"), Some(ClientMessage::Move(4)));
        assert_eq!(ClientMessage::parse("-1"), Some(ClientMessage::Move(-1)));
        assert_eq!(ClientMessage::parse("#NG"), Some(ClientMessage::NewGame));
        assert_eq!(ClientMessage::parse("#CG"), Some(ClientMessage::CloseGame));
        assert_eq!(
            ClientMessage::parse("abc"),
            Some(ClientMessage::Unrecognized("abc".to_string()))
        );
        assert_eq!(ClientMessage::parse(""), None);
    }

    #[test]
    fn test_client_encode() {
        assert_eq!(ClientMessage::Move(7).encode(), "7\n");
        assert_eq!(ClientMessage::NewGame.encode(), "#NG\n");
        assert_eq!(ClientMessage::CloseGame.encode(), "#CG\n");
    }
}
