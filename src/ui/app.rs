use std::path::PathBuf;

use anyhow::Result;
use eframe::egui::{self, Color32, RichText};
use tracing::error;

use crate::alarm::host::{AlarmHost, DraftHost};
use crate::alarm::model::AlarmRecord;
use crate::emit_saved_alarm;
use crate::ui::dialog::AlarmDialog;

pub fn run_gui(alarm: AlarmRecord, output: Option<PathBuf>) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Alarm Editor")
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };

    let app = AlarmEditorApp::new(alarm, output);

    eframe::run_native(
        "Alarm Editor",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch alarm editor window: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(226, 234, 246));
    visuals.panel_fill = Color32::from_rgb(8, 16, 26);
    visuals.window_fill = Color32::from_rgb(16, 24, 38);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(22, 32, 48);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(26, 42, 62);
    visuals.widgets.active.bg_fill = Color32::from_rgb(34, 60, 88);
    visuals.selection.bg_fill = Color32::from_rgb(43, 148, 178);
    ctx.set_visuals(visuals);
}

struct AlarmEditorApp {
    host: DraftHost,
    dialog: AlarmDialog,
    output: Option<PathBuf>,
    emit_error: Option<String>,
    closing: bool,
}

impl AlarmEditorApp {
    fn new(alarm: AlarmRecord, output: Option<PathBuf>) -> Self {
        Self {
            dialog: AlarmDialog::new(&alarm),
            host: DraftHost::new(alarm),
            output,
            emit_error: None,
            closing: false,
        }
    }

    fn finish(&mut self, ctx: &egui::Context) {
        if let Some(alarm) = self.host.saved().last()
            && let Err(err) = emit_saved_alarm(alarm, self.output.as_deref())
        {
            error!("failed to emit saved alarm: {err:#}");
            self.emit_error = Some(format!("Saving failed: {err:#}"));
            return;
        }
        self.closing = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for AlarmEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(
                RichText::new(format!("Editing alarm {}", self.host.alarm().id))
                    .color(Color32::from_rgb(161, 180, 201)),
            );
            if let Some(message) = &self.emit_error {
                ui.label(RichText::new(message).color(Color32::from_rgb(255, 106, 106)));
            }
        });

        if self.host.is_open() {
            self.dialog.show(ctx, &mut self.host);
        } else if !self.closing && self.emit_error.is_none() {
            self.finish(ctx);
        }
    }
}
