use common::games::tictactoe::{Cell, Outcome, BOARD_CELLS, BOARD_SIDE};
use common::log;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::state::{ClientCommand, ConnectionStatus, GameView, SharedState};

pub struct TicTacToeApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<ClientCommand>,
    last_hover: Option<usize>,
    close_sent: bool,
}

impl TicTacToeApp {
    const BOARD_PADDING: f32 = 20.0;
    const MIN_CELL_SIZE: f32 = 40.0;
    const MAX_CELL_SIZE: f32 = 140.0;
    const LINE_WIDTH: f32 = 2.0;

    pub fn new(
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<ClientCommand>,
    ) -> Self {
        Self {
            shared_state,
            command_tx,
            last_hover: None,
            close_sent: false,
        }
    }

    fn send(&mut self, command: ClientCommand) {
        if command == ClientCommand::CloseGame {
            if self.close_sent {
                return;
            }
            self.close_sent = true;
        }
        if self.command_tx.send(command).is_err() {
            log!("Connection task is gone, dropping {:?}", command);
        }
    }

    fn calculate_cell_size(available_width: f32, available_height: f32) -> f32 {
        let board_space =
            (available_width.min(available_height) - Self::BOARD_PADDING * 2.0).max(0.0);
        (board_space / BOARD_SIDE as f32).clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE)
    }

    fn cell_rect(board_rect: egui::Rect, index: usize, cell_size: f32) -> egui::Rect {
        let row = index / BOARD_SIDE;
        let col = index % BOARD_SIDE;
        egui::Rect::from_min_size(
            egui::pos2(
                board_rect.left() + col as f32 * cell_size,
                board_rect.top() + row as f32 * cell_size,
            ),
            egui::vec2(cell_size, cell_size),
        )
    }

    fn render_board(&mut self, ui: &mut egui::Ui, view: &GameView) {
        let cell_size = Self::calculate_cell_size(ui.available_width(), ui.available_height());
        let board_size = cell_size * BOARD_SIDE as f32;

        ui.add_space(Self::BOARD_PADDING);
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(board_size, board_size),
            egui::Sense::click(),
        );

        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(240, 240, 240));

        for i in 0..=BOARD_SIDE {
            let offset = i as f32 * cell_size;
            let stroke = egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK);
            painter.line_segment(
                [
                    egui::pos2(rect.left() + offset, rect.top()),
                    egui::pos2(rect.left() + offset, rect.bottom()),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    egui::pos2(rect.left(), rect.top() + offset),
                    egui::pos2(rect.right(), rect.top() + offset),
                ],
                stroke,
            );
        }

        for index in 0..BOARD_CELLS {
            let cell_rect = Self::cell_rect(rect, index, cell_size);
            match view.board.cell(index) {
                Some(Cell::Player) => Self::draw_x(painter, cell_rect),
                Some(Cell::Computer) => Self::draw_o(painter, cell_rect),
                _ => {}
            }
        }

        self.last_hover = response.hover_pos().and_then(|pos| {
            let col = ((pos.x - rect.left()) / cell_size) as usize;
            let row = ((pos.y - rect.top()) / cell_size) as usize;
            let index = row * BOARD_SIDE + col;
            (col < BOARD_SIDE && row < BOARD_SIDE && view.can_place(index)).then_some(index)
        });

        if let Some(index) = self.last_hover {
            painter.rect_filled(
                Self::cell_rect(rect, index, cell_size),
                0.0,
                egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
            );
        }

        if response.clicked()
            && let Some(index) = self.last_hover
        {
            self.send(ClientCommand::PlaceMark(index));
            self.shared_state.mark_move_sent();
        }
    }

    fn draw_x(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(220, 50, 50));

        painter.line_segment(
            [
                egui::pos2(rect.left() + padding, rect.top() + padding),
                egui::pos2(rect.right() - padding, rect.bottom() - padding),
            ],
            stroke,
        );
        painter.line_segment(
            [
                egui::pos2(rect.right() - padding, rect.top() + padding),
                egui::pos2(rect.left() + padding, rect.bottom() - padding),
            ],
            stroke,
        );
    }

    fn draw_o(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let radius = (rect.width() / 2.0) - padding;
        let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(50, 50, 220));

        painter.circle_stroke(rect.center(), radius, stroke);
    }

    fn status_text(view: &GameView) -> String {
        match (&view.connection, view.result) {
            (ConnectionStatus::Connecting, _) => "Connecting...".to_string(),
            (ConnectionStatus::Failed(error), _) => format!("Connection failed: {}", error),
            (_, Some(Outcome::PlayerWin)) => "You won this game!".to_string(),
            (_, Some(Outcome::ComputerWin)) => "The computer won this game.".to_string(),
            (_, Some(Outcome::Draw)) => "This game ended in a tie.".to_string(),
            (ConnectionStatus::Disconnected, _) => "Disconnected from server".to_string(),
            (ConnectionStatus::Connected, _) if view.awaiting_move => "Your move".to_string(),
            (ConnectionStatus::Connected, _) => "Waiting for the computer...".to_string(),
        }
    }

    fn render_info_panel(&mut self, ui: &mut egui::Ui, view: &GameView) {
        ui.heading("Tic-Tac-Toe");
        ui.separator();

        ui.label(Self::status_text(view));
        let waiting_for_server = view.connection == ConnectionStatus::Connected
            && view.result.is_none()
            && !view.awaiting_move;
        if waiting_for_server {
            ui.spinner();
        }

        ui.separator();
        ui.label(format!("Wins: {}", view.tally.wins));
        ui.label(format!("Ties: {}", view.tally.ties));
        ui.label(format!("Losses: {}", view.tally.losses));
        ui.separator();

        let connected = view.connection == ConnectionStatus::Connected;
        if view.result.is_some() && connected && ui.button("New game").clicked() {
            self.send(ClientCommand::NewGame);
        }
        if ui.button("Quit").clicked() {
            if connected {
                self.send(ClientCommand::CloseGame);
            } else {
                self.shared_state.set_should_close();
            }
        }
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.send(ClientCommand::CloseGame);
        }

        if self.shared_state.should_close() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let view = self.shared_state.view();

        egui::SidePanel::right("info_panel")
            .resizable(false)
            .min_width(180.0)
            .show(ctx, |ui| self.render_info_panel(ui, &view));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| self.render_board(ui, &view));
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
