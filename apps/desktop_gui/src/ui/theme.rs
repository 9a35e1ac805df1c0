use eframe::egui;

pub const APP_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);
pub const CARD_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);
pub const FIELD_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(55, 65, 81);
pub const BORDER: egui::Color32 = egui::Color32::from_rgb(75, 85, 99);
pub const BUTTON_BUSY: egui::Color32 = egui::Color32::from_rgb(75, 85, 99);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(6, 182, 212);
pub const ACCENT_HOVER: egui::Color32 = egui::Color32::from_rgb(8, 145, 178);
pub const TITLE: egui::Color32 = egui::Color32::from_rgb(34, 211, 238);
pub const RESULT_TITLE: egui::Color32 = egui::Color32::from_rgb(103, 232, 249);

pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = APP_BACKGROUND;
    visuals.window_fill = CARD_BACKGROUND;
    visuals.extreme_bg_color = FIELD_BACKGROUND;
    visuals.override_text_color = Some(egui::Color32::WHITE);
    visuals.selection.bg_fill = ACCENT;

    visuals.widgets.inactive.weak_bg_fill = FIELD_BACKGROUND;
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    visuals.widgets.hovered.weak_bg_fill = ACCENT_HOVER;
    visuals.widgets.active.weak_bg_fill = ACCENT_HOVER;
    visuals.window_stroke = egui::Stroke::new(1.0, BORDER);
    visuals
}

pub fn apply(ctx: &egui::Context) {
    ctx.set_visuals(visuals());
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(12.0, 8.0);
    });
}
