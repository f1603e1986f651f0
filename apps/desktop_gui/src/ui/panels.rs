//! Form and user list panels. Panels never talk to the backend directly; they
//! return the commands the app shell should queue.

use chrono::Utc;
use eframe::egui;
use shared::domain::{avatar_url, AvatarStyle, DraftField, UserRecord};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::ConsoleView;
use crate::ui::widgets;

pub fn form_panel(ui: &mut egui::Ui, view: &mut ConsoleView) -> Vec<BackendCommand> {
    let mut commands = Vec::new();
    let busy = view.busy();

    ui.heading(view.state.form_title());
    ui.add_space(8.0);

    for field in DraftField::ALL {
        let error = view.state.field_errors.get(field);
        widgets::labeled_input(ui, field, view.draft.value_mut(field), error);

        if field == DraftField::ImgUrl {
            ui.horizontal(|ui| {
                let stamp = Utc::now().timestamp_millis();
                if ui.button("Boy").clicked() {
                    view.draft.img_url = avatar_url(AvatarStyle::Boy, stamp);
                }
                if ui.button("Girl").clicked() {
                    view.draft.img_url = avatar_url(AvatarStyle::Girl, stamp);
                }
            });
            ui.add_space(6.0);
        }
    }

    ui.horizontal(|ui| {
        let submit = ui.add_enabled(!busy, egui::Button::new(view.state.submit_label()));
        if submit.clicked() {
            commands.push(BackendCommand::Submit {
                draft: view.draft.clone(),
            });
        }
        if ui.button("Cancel").clicked() {
            commands.push(BackendCommand::CancelEdit);
        }
    });

    commands
}

pub fn users_panel(ui: &mut egui::Ui, view: &ConsoleView) -> Vec<BackendCommand> {
    let mut commands = Vec::new();
    let busy = view.busy();

    ui.horizontal(|ui| {
        ui.heading("Users");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.add_enabled(!busy, egui::Button::new("Refresh")).clicked() {
                commands.push(BackendCommand::Refresh);
            }
        });
    });
    ui.add_space(8.0);

    if view.state.loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading...");
        });
    }

    if view.state.show_empty_placeholder() {
        ui.label(egui::RichText::new("No users found").color(widgets::MUTED_TEXT));
        return commands;
    }

    for user in &view.state.users {
        if let Some(cmd) = user_card(ui, user, busy) {
            commands.push(cmd);
        }
        ui.add_space(6.0);
    }

    commands
}

fn user_card(ui: &mut egui::Ui, user: &UserRecord, busy: bool) -> Option<BackendCommand> {
    let mut command = None;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(user.full_name()).strong());
                ui.label(&user.email);
                ui.label(
                    egui::RichText::new(format!("Birthday: {}", user.birthday))
                        .color(widgets::MUTED_TEXT),
                );
                if let Some(url) = user.avatar() {
                    ui.hyperlink_to("Avatar", url);
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                if ui.add_enabled(!busy, egui::Button::new("Delete")).clicked() {
                    command = Some(BackendCommand::Delete { id: user.id });
                }
                if ui.button("Edit").clicked() {
                    command = Some(BackendCommand::BeginEdit {
                        record: user.clone(),
                    });
                }
            });
        });
    });
    command
}
