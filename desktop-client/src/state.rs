use common::games::tictactoe::{Board, Outcome};
use common::protocol::ServerMessage;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    PlaceMark(usize),
    NewGame,
    CloseGame,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
    Failed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
}

#[derive(Debug, Clone)]
pub struct GameView {
    pub board: Board,
    pub awaiting_move: bool,
    pub result: Option<Outcome>,
    pub tally: Tally,
    pub connection: ConnectionStatus,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            board: Board::new(),
            awaiting_move: false,
            result: None,
            tally: Tally::default(),
            connection: ConnectionStatus::Connecting,
        }
    }
}

impl GameView {
    pub fn apply(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Board(encoded) => {
                if let Ok(board) = Board::decode(&encoded) {
                    // A finished board is the final position, the result line follows.
                    self.awaiting_move = !board.is_over();
                    self.board = board;
                    self.result = None;
                }
            }
            ServerMessage::GameOver(outcome) => {
                self.awaiting_move = false;
                self.result = Some(outcome);
                match outcome {
                    Outcome::PlayerWin => self.tally.wins += 1,
                    Outcome::ComputerWin => self.tally.losses += 1,
                    Outcome::Draw => self.tally.ties += 1,
                    Outcome::InProgress => {}
                }
            }
        }
    }

    pub fn can_place(&self, index: usize) -> bool {
        self.awaiting_move
            && self.connection == ConnectionStatus::Connected
            && self.board.is_legal(index)
    }
}

#[derive(Clone, Default)]
pub struct SharedState {
    view: Arc<Mutex<GameView>>,
    should_close: Arc<Mutex<bool>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> GameView {
        lock(&self.view).clone()
    }

    pub fn apply_server_message(&self, message: ServerMessage) {
        lock(&self.view).apply(message);
    }

    /// Stops further clicks until the server answers with the next board.
    pub fn mark_move_sent(&self) {
        lock(&self.view).awaiting_move = false;
    }

    pub fn set_connection(&self, status: ConnectionStatus) {
        let mut view = lock(&self.view);
        if status != ConnectionStatus::Connected {
            view.awaiting_move = false;
        }
        view.connection = status;
    }

    pub fn set_should_close(&self) {
        *lock(&self.should_close) = true;
    }

    pub fn should_close(&self) -> bool {
        *lock(&self.should_close)
    }
}
