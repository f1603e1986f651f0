use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{apply_event, ConsoleView};
use crate::ui::{panels, widgets};

const FORM_PANEL_WIDTH: f32 = 340.0;

pub struct ConsoleApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ConsoleView,
}

impl ConsoleApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: ConsoleView {
                status: "Starting backend worker".to_string(),
                ..ConsoleView::default()
            },
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_event(&mut self.view, event);
        }
    }

    fn queue(&mut self, commands: Vec<BackendCommand>) {
        for cmd in commands {
            if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.view.status) {
                break;
            }
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let text = egui::RichText::new(&self.view.status).small();
            match &self.view.backend_error {
                Some(_) => ui.colored_label(widgets::ERROR_TEXT, text),
                None => ui.label(text.color(widgets::MUTED_TEXT)),
            };
        });
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);

        let mut commands = Vec::new();

        egui::SidePanel::left("form_panel")
            .resizable(false)
            .exact_width(FORM_PANEL_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("form_scroll")
                    .show(ui, |ui| {
                        commands.extend(panels::form_panel(ui, &mut self.view));
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = self.view.state.error_message() {
                if widgets::error_banner(ui, message) {
                    commands.push(BackendCommand::DismissError);
                }
                ui.add_space(8.0);
            }
            egui::ScrollArea::vertical()
                .id_salt("users_scroll")
                .show(ui, |ui| {
                    commands.extend(panels::users_panel(ui, &self.view));
                });
        });

        self.queue(commands);
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
