use eframe::egui;
use shared::domain::DraftField;

pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(185, 28, 28);
pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(254, 226, 226);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(107, 114, 128);

/// Label, single-line input and the field's validation message, stacked.
pub fn labeled_input(
    ui: &mut egui::Ui,
    field: DraftField,
    value: &mut String,
    error: Option<&str>,
) -> egui::Response {
    ui.label(egui::RichText::new(field.label()).strong());
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .id_salt(field.key())
            .password(field == DraftField::Password)
            .hint_text(hint_for(field))
            .desired_width(f32::INFINITY),
    );
    field_message(ui, error);
    ui.add_space(6.0);
    response
}

pub fn field_message(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(message) = error {
        ui.label(egui::RichText::new(message).small().color(ERROR_TEXT));
    }
}

fn hint_for(field: DraftField) -> &'static str {
    match field {
        DraftField::Email => "name@example.com",
        DraftField::Birthday => "YYYY-MM-DD",
        DraftField::ImgUrl => "https://…",
        _ => "",
    }
}

/// Returns true when the dismiss button was clicked.
pub fn error_banner(ui: &mut egui::Ui, message: &str) -> bool {
    let mut dismissed = false;
    egui::Frame::group(ui.style())
        .fill(ERROR_FILL)
        .stroke(egui::Stroke::new(1.0, ERROR_TEXT))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(ERROR_TEXT, message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    dismissed = ui.small_button("Dismiss").clicked();
                });
            });
        });
    dismissed
}
