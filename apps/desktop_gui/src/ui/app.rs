use std::time::Duration;

use arboard::Clipboard;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::EmailType;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{FormState, ViewState};
use crate::ui::theme;

const CONTEXT_HINT: &str = "e.g. Apologize to a customer for delay in delivery";
const RESULT_PANEL_ENTER_SECS: f32 = 0.3;
const RESULT_PANEL_SLIDE: f32 = 10.0;
const CARD_MAX_WIDTH: f32 = 576.0;
const CARD_ENTER_SECS: f32 = 0.6;
const CARD_ENTER_RISE: f32 = 40.0;

/// Text kept on screen while the result panel fades out.
#[derive(Default)]
struct ResultPanelState {
    shown_text: String,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    form: FormState,
    result_panel: ResultPanelState,
    clipboard_status: Option<String>,
    card_mounted: bool,
}

impl DesktopGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: FormState::default(),
            result_panel: ResultPanelState::default(),
            clipboard_status: None,
            card_mounted: false,
        }
    }

    /// Entrance progress of the form card, from 0 on the first frame up to 1.
    fn card_intro_progress(&mut self, ctx: &egui::Context) -> f32 {
        let t = ctx.animate_bool_with_time(
            egui::Id::new("form_card_intro"),
            self.card_mounted,
            CARD_ENTER_SECS,
        );
        self.card_mounted = true;
        t
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.form.handle_event(event);
            if let Some(kind) = self.form.last_failure() {
                tracing::debug!(?kind, "result panel showing generic failure");
            }
        }
    }

    fn generate(&mut self) {
        self.clipboard_status = None;
        let Some(cmd) = self.form.begin_generate() else {
            return;
        };
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.form.fail_dispatch(err);
        }
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        let intro = self.card_intro_progress(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.min(CARD_MAX_WIDTH);
            ui.add_space((avail.y * 0.05).clamp(12.0, 48.0) + card_rise(intro));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                ui.multiply_opacity(intro);
                egui::Frame::new()
                    .fill(theme::CARD_BACKGROUND)
                    .corner_radius(16.0)
                    .inner_margin(egui::Margin::same(24))
                    .shadow(egui::Shadow {
                        offset: [0, 12],
                        blur: 32,
                        spread: 0,
                        color: egui::Color32::from_black_alpha(120),
                    })
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new("EmailMe!")
                                    .size(30.0)
                                    .strong()
                                    .color(theme::TITLE),
                            );
                        });
                        ui.add_space(8.0);

                        self.show_type_selector(ui);
                        ui.add_space(6.0);
                        self.show_context_field(ui);
                        ui.add_space(6.0);
                        self.show_trigger(ui);
                        self.show_result_panel(ui);
                    });
            });
        });
    }

    fn show_type_selector(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Select Email Type").strong());
        let mut selected = self.form.selected_type();
        egui::ComboBox::from_id_salt("email_type")
            .selected_text(selected.label())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for email_type in EmailType::ALL {
                    ui.selectable_value(&mut selected, email_type, email_type.label());
                }
            });
        if selected != self.form.selected_type() {
            tracing::debug!(email_type = selected.label(), "email type selected");
            self.form.select_type(selected);
        }
    }

    fn show_context_field(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Enter the Context").strong());
        let mut context_buf = self.form.context().to_string();
        let edit = egui::TextEdit::multiline(&mut context_buf)
            .id_salt("email_context")
            .hint_text(
                egui::RichText::new(CONTEXT_HINT)
                    .color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
            )
            .desired_rows(4)
            .desired_width(f32::INFINITY);
        if ui.add(edit).changed() {
            self.form.edit_context(context_buf);
        }
    }

    fn show_trigger(&mut self, ui: &mut egui::Ui) {
        let loading = self.form.is_loading();
        let fill = if loading {
            theme::BUTTON_BUSY
        } else {
            theme::ACCENT
        };
        let button = egui::Button::new(
            egui::RichText::new(self.form.trigger_label())
                .strong()
                .size(16.0),
        )
        .fill(fill)
        .corner_radius(8.0)
        .min_size(egui::vec2(ui.available_width(), 40.0));

        let response = ui.add_enabled(self.form.trigger_enabled(), button);
        if loading {
            let spinner_rect = egui::Rect::from_center_size(
                response.rect.left_center() + egui::vec2(24.0, 0.0),
                egui::vec2(18.0, 18.0),
            );
            ui.put(
                spinner_rect,
                egui::Spinner::new().size(18.0).color(egui::Color32::WHITE),
            );
        }
        if response.clicked() {
            self.generate();
        }
    }

    fn show_result_panel(&mut self, ui: &mut egui::Ui) {
        let visible = self.form.view_state() == ViewState::Result;
        if visible && self.result_panel.shown_text != self.form.generated_response() {
            self.result_panel.shown_text = self.form.generated_response().to_string();
        }

        // Called every frame so the first appearance animates in from zero.
        let t = ui.ctx().animate_bool_with_time(
            egui::Id::new("result_panel"),
            visible,
            RESULT_PANEL_ENTER_SECS,
        );
        if t <= 0.0 {
            self.result_panel.shown_text.clear();
            return;
        }

        let slide = if visible {
            (1.0 - t) * RESULT_PANEL_SLIDE
        } else {
            0.0
        };
        ui.add_space(8.0 + slide);

        let text = self.result_panel.shown_text.clone();
        let mut copy_clicked = false;
        ui.scope(|ui| {
            ui.multiply_opacity(t);
            egui::Frame::new()
                .fill(theme::FIELD_BACKGROUND)
                .stroke(egui::Stroke::new(1.0, theme::BORDER))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new("Generated Email:")
                                .strong()
                                .color(theme::RESULT_TITLE),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            copy_clicked = ui.add_enabled(visible, egui::Button::new("Copy")).clicked();
                        });
                    });
                    ui.add(
                        egui::Label::new(egui::RichText::new(&text).size(13.0))
                            .wrap_mode(egui::TextWrapMode::Wrap)
                            .selectable(true),
                    );
                    if let Some(status) = &self.clipboard_status {
                        ui.small(egui::RichText::new(status).weak());
                    }
                });
        });

        if copy_clicked {
            self.clipboard_status = Some(copy_to_clipboard(&text));
        }
    }

    fn show_context_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.form.alert() else {
            return;
        };
        let message = alert.to_string();

        let modal = egui::Modal::new(egui::Id::new("context_required_alert")).show(ctx, |ui| {
            ui.set_width(300.0);
            ui.label(egui::RichText::new(message).strong());
            ui.add_space(8.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(egui::Button::new("OK").fill(theme::ACCENT)).clicked()
            })
            .inner
        });

        if modal.inner || modal.should_close() {
            self.form.dismiss_alert();
        }
    }
}

fn card_rise(progress: f32) -> f32 {
    (1.0 - progress.clamp(0.0, 1.0)) * CARD_ENTER_RISE
}

fn copy_to_clipboard(text: &str) -> String {
    match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_owned())) {
        Ok(()) => "Copied to clipboard".to_string(),
        Err(err) => {
            tracing::warn!("clipboard unavailable: {err}");
            "Clipboard unavailable".to_string()
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_form(ctx);
        self.show_context_alert(ctx);

        if self.form.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
