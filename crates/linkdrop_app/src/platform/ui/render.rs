use std::collections::HashMap;

use eframe::egui;
use linkdrop_core::{AppViewModel, Msg, PanelView, Source};

use super::constants::*;

/// Remembers the last log revision drawn per source, so a panel scrolls to
/// its newest line only when something was appended.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    seen: HashMap<Source, u64>,
}

impl ScrollTracker {
    fn take_new(&mut self, source: Source, revision: u64) -> bool {
        self.seen.insert(source, revision) != Some(revision)
    }
}

/// Draws one frame and returns the messages produced by user interaction.
pub fn render(ctx: &egui::Context, view: &AppViewModel, scroll: &mut ScrollTracker) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            for tab in &view.tabs {
                if ui.selectable_label(tab.active, &tab.label).clicked() {
                    msgs.push(Msg::TabClicked(tab.id.clone()));
                }
            }
        });
    });

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.label(&view.status_line);
    });

    egui::CentralPanel::default().show(ctx, |ui| match view.active_panel() {
        Some(panel) => render_panel(ui, panel, scroll, &mut msgs),
        None => {
            ui.label("No panel selected.");
        }
    });

    if let Some(alert) = &view.alert {
        render_alert(ctx, alert, &mut msgs);
    }

    msgs
}

fn render_panel(
    ui: &mut egui::Ui,
    panel: &PanelView,
    scroll: &mut ScrollTracker,
    msgs: &mut Vec<Msg>,
) {
    let source = panel.source;
    let name = source.display_name();

    ui.heading(format!("{name} Downloader"));
    ui.horizontal(|ui| {
        let label = ui.label(format!("{name} link:"));
        let mut input = panel.input.clone();
        let response = ui
            .add(
                egui::TextEdit::singleline(&mut input)
                    .hint_text(format!("Paste a {name} URL"))
                    .desired_width(INPUT_WIDTH),
            )
            .labelled_by(label.id);
        if response.changed() {
            msgs.push(Msg::InputChanged {
                source,
                text: input,
            });
        }
        if ui.button("Confirm").clicked() {
            msgs.push(Msg::ConfirmClicked(source));
        }
    });

    ui.separator();

    let scroll_to_end = scroll.take_new(source, panel.log_revision);
    egui::ScrollArea::vertical()
        .id_salt(source.tab_id())
        .stick_to_bottom(true)
        .show(ui, |ui| {
            // `&str` makes the text edit read-only.
            let mut text = panel.log_text.as_str();
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY)
                    .desired_rows(LOG_ROWS),
            );
            if scroll_to_end {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}

fn render_alert(ctx: &egui::Context, alert: &str, msgs: &mut Vec<Msg>) {
    let mut dismissed = false;
    let modal = egui::Modal::new(egui::Id::new(ALERT_ID)).show(ctx, |ui| {
        ui.set_width(ALERT_WIDTH);
        ui.heading("Backend unavailable");
        ui.label(alert);
        ui.add_space(8.0);
        if ui.button("OK").clicked() {
            dismissed = true;
        }
    });
    if dismissed || modal.should_close() {
        msgs.push(Msg::AlertDismissed);
    }
}
