use common::games::SessionRng;
use common::games::tictactoe::{best_move_with_depth, Board, GameError, Outcome, Side, Turn};
use common::log;
use common::protocol::{ClientMessage, ProtocolError, ServerMessage};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::server_config::{FirstPlayerMode, ServerConfig};

#[derive(Debug)]
pub enum SessionError {
    Io(std::io::Error),
    Game(GameError),
    Protocol(ProtocolError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "IO error: {}", e),
            SessionError::Game(e) => write!(f, "Game error: {}", e),
            SessionError::Protocol(e) => write!(f, "Protocol error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<GameError> for SessionError {
    fn from(e: GameError) -> Self {
        SessionError::Game(e)
    }
}

impl From<ProtocolError> for SessionError {
    fn from(e: ProtocolError) -> Self {
        SessionError::Protocol(e)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub search_depth: usize,
    pub first_player: FirstPlayerMode,
}

impl From<&ServerConfig> for SessionSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            search_depth: config.search_depth,
            first_player: config.first_player,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub games_finished: usize,
    pub player_wins: usize,
    pub computer_wins: usize,
    pub draws: usize,
}

impl SessionSummary {
    fn record(&mut self, outcome: Outcome) {
        self.games_finished += 1;
        match outcome {
            Outcome::PlayerWin => self.player_wins += 1,
            Outcome::ComputerWin => self.computer_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }
}

/// Each connection gets `base + id` so a seeded server replays the same
/// first-player sequence per connection.
pub fn connection_rng(base_seed: Option<u64>, connection_id: u64) -> SessionRng {
    match base_seed {
        Some(seed) => SessionRng::new(seed.wrapping_add(connection_id)),
        None => SessionRng::from_random(),
    }
}

enum TurnResult {
    Played,
    Closed,
}

/// One client connection: plays games against the search until the client
/// closes the game or hangs up.
pub struct GameSession<R, W> {
    label: String,
    reader: R,
    writer: W,
    settings: SessionSettings,
    rng: SessionRng,
}

impl<R, W> GameSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        label: String,
        reader: R,
        writer: W,
        settings: SessionSettings,
        rng: SessionRng,
    ) -> Self {
        Self {
            label,
            reader,
            writer,
            settings,
            rng,
        }
    }

    pub async fn run(mut self) -> Result<SessionSummary, SessionError> {
        let mut summary = SessionSummary::default();

        loop {
            let Some(outcome) = self.play_game().await? else {
                break;
            };
            summary.record(outcome);

            if !self.wants_new_game().await? {
                break;
            }
            log!("[{}] Client asked for a new game", self.label);
        }

        Ok(summary)
    }

    /// Returns `None` when the client left before the game finished.
    async fn play_game(&mut self) -> Result<Option<Outcome>, SessionError> {
        let mut board = Board::new();
        self.settings.first_player.apply(&mut board, &mut self.rng);
        log!("[{}] New game, first turn: {:?}", self.label, board.first_turn());

        let order = if board.first_turn() == Turn::Computer {
            [Side::Computer, Side::Player]
        } else {
            [Side::Player, Side::Computer]
        };

        while !board.is_over() {
            for side in order {
                if board.is_over() {
                    break;
                }
                match side {
                    Side::Computer => self.computer_turn(&mut board).await?,
                    Side::Player => {
                        if let TurnResult::Closed = self.player_turn(&mut board).await? {
                            log!("[{}] Client left during the game", self.label);
                            return Ok(None);
                        }
                    }
                }
            }
        }

        let outcome = board.outcome();
        self.send(&ServerMessage::board(&board)).await?;
        self.send(&ServerMessage::GameOver(outcome)).await?;
        log!("[{}] Game over: {:?} after {} moves", self.label, outcome, board.move_count());

        Ok(Some(outcome))
    }

    async fn computer_turn(&mut self, board: &mut Board) -> Result<(), SessionError> {
        board.set_whose_turn(Turn::Computer);

        let snapshot = *board;
        let depth = self.settings.search_depth;
        let index = tokio::task::spawn_blocking(move || best_move_with_depth(&snapshot, depth))
            .await
            .map_err(std::io::Error::other)??;

        board.place(Side::Computer, index)?;
        log!("[{}] Computer plays {}", self.label, index);
        Ok(())
    }

    async fn player_turn(&mut self, board: &mut Board) -> Result<TurnResult, SessionError> {
        board.set_whose_turn(Turn::Player);

        loop {
            self.send(&ServerMessage::board(board)).await?;

            match self.next_message().await? {
                None | Some(ClientMessage::CloseGame) => return Ok(TurnResult::Closed),
                Some(ClientMessage::Move(index)) => {
                    if let Ok(index) = usize::try_from(index)
                        && board.is_legal(index)
                    {
                        board.place(Side::Player, index)?;
                        log!("[{}] Player plays {}", self.label, index);
                        return Ok(TurnResult::Played);
                    }
                    log!("[{}] Rejected move {}", self.label, index);
                }
                Some(other) => {
                    log!("[{}] Expected a move, got {:?}", self.label, other);
                }
            }
        }
    }

    async fn wants_new_game(&mut self) -> Result<bool, SessionError> {
        loop {
            match self.next_message().await? {
                Some(ClientMessage::NewGame) => return Ok(true),
                None | Some(ClientMessage::CloseGame) => return Ok(false),
                Some(other) => {
                    log!("[{}] Ignoring {:?} after game over", self.label, other);
                }
            }
        }
    }

    /// Next non-blank client line, or `None` once the connection is closed.
    async fn next_message(&mut self) -> Result<Option<ClientMessage>, SessionError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line).await? == 0 {
                return Ok(None);
            }
            if let Some(message) = ClientMessage::parse(&line) {
                return Ok(Some(message));
            }
        }
    }

    async fn send(&mut self, message: &ServerMessage) -> Result<(), SessionError> {
        let line = message.encode()?;
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
