mod client;
mod config;
mod state;
mod ui;

use clap::Parser;
use common::{log, logger};
use egui::ViewportBuilder;
use tokio::sync::mpsc;

use client::connection_task;
use config::get_config_manager;
use state::{ConnectionStatus, SharedState};
use ui::TicTacToeApp;

#[derive(Parser)]
#[command(name = "tictactoe_client")]
struct Args {
    /// Server address, overrides the config file
    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = get_config_manager().get_config()?;
    let server_address = args.address.unwrap_or(config.server.address);

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let shared_state_clone = shared_state.clone();
    let server_address_clone = server_address.clone();

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                shared_state_clone.set_connection(ConnectionStatus::Failed(e.to_string()));
                return;
            }
        };
        rt.block_on(async {
            if let Err(e) = connection_task(
                server_address_clone,
                shared_state_clone.clone(),
                command_rx,
            )
            .await
            {
                log!("Connection error: {}", e);
                shared_state_clone.set_connection(ConnectionStatus::Failed(e.to_string()));
            }
        });
    });

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([560.0, 420.0])
            .with_title(format!("Tic-Tac-Toe - {}", server_address)),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe Client",
        options,
        Box::new(|_cc| Ok(Box::new(TicTacToeApp::new(shared_state, command_tx)))),
    )?;

    Ok(())
}
