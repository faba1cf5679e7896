mod connection_tracker;
mod server_config;
mod session;

use clap::Parser;
use common::config::Validate;
use common::games::SessionRng;
use common::{log, logger};
use connection_tracker::ConnectionTracker;
use server_config::get_config_manager;
use session::{GameSession, SessionSettings};
use std::net::SocketAddr;
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    /// Path to the YAML config file
    #[arg(long)]
    config: Option<String>,

    /// Address to listen on, overrides the config file
    #[arg(long)]
    address: Option<String>,

    /// Base seed for first-player selection
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

async fn handle_connection(
    id: u64,
    stream: TcpStream,
    addr: SocketAddr,
    settings: SessionSettings,
    rng: SessionRng,
) {
    let seed = rng.seed();
    let (reader, writer) = stream.into_split();
    let session = GameSession::new(
        format!("#{} {}", id, addr),
        BufReader::new(reader),
        writer,
        settings,
        rng,
    );

    log!("Client #{} connected from {} (seed {})", id, addr, seed);

    match session.run().await {
        Ok(summary) => log!(
            "Client #{} done: {} games, {} player wins, {} computer wins, {} draws",
            id,
            summary.games_finished,
            summary.player_wins,
            summary.computer_wins,
            summary.draws
        ),
        Err(e) => log!("Client #{} session failed: {}", id, e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = get_config_manager(args.config.as_deref()).get_config()?;
    if let Some(address) = args.address {
        config.address = address;
    }
    config.validate()?;

    let settings = SessionSettings::from(&config);
    let listener = TcpListener::bind(&config.address).await?;
    let tracker = ConnectionTracker::new();

    log!(
        "Tic-tac-toe server listening on {} (search depth {}, first player {:?})",
        config.address,
        config.search_depth,
        config.first_player
    );

    let shutdown_signal = tokio::signal::ctrl_c();
    tokio::pin!(shutdown_signal);

    loop {
        tokio::select! {
            result = &mut shutdown_signal => {
                result?;
                log!(
                    "Shutdown signal received, {} session(s) still open",
                    tracker.active_count().await
                );
                break;
            }
            accepted = listener.accept() => {
                let (stream, addr) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        log!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let id = tracker.add_connection(addr).await;
                let rng = session::connection_rng(args.seed, id);

                let tracker = tracker.clone();
                tokio::spawn(async move {
                    handle_connection(id, stream, addr, settings, rng).await;
                    tracker.remove_connection(id).await;
                    log!("Client #{} disconnected", id);
                });
            }
        }
    }

    log!("Server shut down gracefully");

    Ok(())
}
