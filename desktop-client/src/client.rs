use common::log;
use common::protocol::{ClientMessage, ProtocolError, ServerMessage};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::state::{ClientCommand, ConnectionStatus, SharedState};

pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

pub async fn connection_task(
    address: String,
    shared_state: SharedState,
    command_rx: mpsc::UnboundedReceiver<ClientCommand>,
) -> Result<(), ClientError> {
    shared_state.set_connection(ConnectionStatus::Connecting);
    let stream = TcpStream::connect(&address).await?;
    log!("Connected to {}", address);
    shared_state.set_connection(ConnectionStatus::Connected);

    let (reader, writer) = stream.into_split();
    run_connection(BufReader::new(reader), writer, shared_state, command_rx).await
}

fn to_client_message(command: ClientCommand) -> ClientMessage {
    match command {
        ClientCommand::PlaceMark(index) => ClientMessage::Move(index as i64),
        ClientCommand::NewGame => ClientMessage::NewGame,
        ClientCommand::CloseGame => ClientMessage::CloseGame,
    }
}

/// Relays UI commands to the server and server lines to the shared state until
/// either side hangs up or the user closes the game.
pub async fn run_connection<R, W>(
    reader: R,
    mut writer: W,
    shared_state: SharedState,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
) -> Result<(), ClientError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    loop {
        tokio::select! {
            command = command_rx.recv() => {
                let Some(command) = command else {
                    break;
                };

                let message = to_client_message(command);
                log!("Sending {:?}", message);
                writer.write_all(message.encode().as_bytes()).await?;
                writer.flush().await?;

                match command {
                    ClientCommand::PlaceMark(_) => shared_state.mark_move_sent(),
                    ClientCommand::CloseGame => {
                        shared_state.set_connection(ConnectionStatus::Disconnected);
                        shared_state.set_should_close();
                        break;
                    }
                    ClientCommand::NewGame => {}
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    log!("Server closed the connection");
                    shared_state.set_connection(ConnectionStatus::Disconnected);
                    break;
                };

                match ServerMessage::parse(&line) {
                    Ok(message) => shared_state.apply_server_message(message),
                    Err(ProtocolError::EmptyLine) => {}
                    Err(e) => log!("Ignoring server line: {}", e),
                }
            }
        }
    }

    Ok(())
}
