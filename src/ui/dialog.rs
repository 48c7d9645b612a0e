use eframe::egui::{self, Align2, Color32, RichText, TextEdit, Ui};

use crate::alarm::form::{AlarmForm, ValidationAlert};
use crate::alarm::host::AlarmHost;
use crate::alarm::model::{AlarmRecord, DayLabel};

const LABEL: Color32 = Color32::from_rgb(104, 221, 205);
const MUTED: Color32 = Color32::from_rgb(161, 180, 201);
const CONFIRMED: Color32 = Color32::from_rgb(104, 218, 131);
const ALERT: Color32 = Color32::from_rgb(255, 106, 106);

/// egui view over an [`AlarmForm`]. Alerts are shown inline under the field
/// row until the next accepted edit replaces or clears them.
pub struct AlarmDialog {
    form: AlarmForm,
    alert: Option<ValidationAlert>,
    // The minute field loses focus on the press that later clicks "Save Time".
    // Set by that blur's alert so the click does not confirm over it.
    pending_blur_alert: bool,
}

impl AlarmDialog {
    pub fn new(alarm: &AlarmRecord) -> Self {
        Self {
            form: AlarmForm::new(alarm),
            alert: None,
            pending_blur_alert: false,
        }
    }

    pub fn alert(&self) -> Option<&ValidationAlert> {
        self.alert.as_ref()
    }

    pub fn show<H: AlarmHost>(&mut self, ctx: &egui::Context, host: &mut H) {
        self.form.sync_from_record(host.alarm());
        egui::Window::new("Add New Alarm")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                self.show_text_fields(ui, host);
                ui.separator();
                self.show_time_picker(ui, host);
                ui.separator();
                self.show_sound_choice(ui, host);
                ui.separator();
                self.show_frequency(ui, host);
                ui.separator();
                self.show_buttons(ui, host);
            });
    }

    fn accept_edit(&mut self) {
        self.alert = None;
        self.pending_blur_alert = false;
    }

    pub fn title_edited<H: AlarmHost>(&mut self, host: &mut H, value: String) {
        if self.form.change_title(host, value) {
            self.accept_edit();
        }
    }

    pub fn description_edited<H: AlarmHost>(&mut self, host: &mut H, value: String) {
        if self.form.change_description(host, value) {
            self.accept_edit();
        }
    }

    pub fn hour_edited(&mut self, value: &str) {
        self.form.change_hour(value);
        self.accept_edit();
    }

    pub fn hour_lost_focus(&mut self) {
        self.form.blur_hour();
    }

    pub fn minute_edited(&mut self, value: &str) {
        self.form.change_minute(value);
        self.accept_edit();
    }

    pub fn minute_lost_focus(&mut self) {
        if let Err(alert) = self.form.blur_minute() {
            self.alert = Some(alert);
            self.pending_blur_alert = true;
        }
    }

    pub fn period_clicked(&mut self) {
        self.form.toggle_period();
        self.accept_edit();
    }

    pub fn save_time_clicked<H: AlarmHost>(&mut self, host: &mut H) {
        if self.pending_blur_alert {
            self.pending_blur_alert = false;
            return;
        }
        self.alert = self.form.confirm_time(host).err();
    }

    pub fn sound_chosen<H: AlarmHost>(&mut self, host: &mut H, sound: bool) {
        self.form.set_sound(host, sound);
        self.accept_edit();
    }

    pub fn day_toggled<H: AlarmHost>(&mut self, host: &mut H, day: DayLabel) {
        self.form.toggle_day(host, day);
        self.accept_edit();
    }

    pub fn save_clicked<H: AlarmHost>(&mut self, host: &mut H) {
        self.alert = self.form.save(host).err();
    }

    pub fn cancel_clicked<H: AlarmHost>(&mut self, host: &mut H) {
        self.form.cancel(host);
    }

    fn show_text_fields<H: AlarmHost>(&mut self, ui: &mut Ui, host: &mut H) {
        ui.label(RichText::new("Alarm Title").color(LABEL).strong());
        let mut title = host.alarm().title.clone();
        if ui
            .add(TextEdit::singleline(&mut title).hint_text("Alarm").desired_width(280.0))
            .changed()
        {
            self.title_edited(host, title);
        }
        ui.horizontal(|ui| {
            ui.label(RichText::new("16 letters maximum").color(MUTED).small());
            ui.label(
                RichText::new(self.form.title_counter(host.alarm()))
                    .color(MUTED)
                    .small(),
            );
        });

        ui.add_space(6.0);
        ui.label(RichText::new("Alarm Description").color(LABEL).strong());
        let mut description = host.alarm().description.clone();
        if ui
            .add(
                TextEdit::singleline(&mut description)
                    .hint_text("e.g., Take iron pill, Go for a run, etc.")
                    .desired_width(280.0),
            )
            .changed()
        {
            self.description_edited(host, description);
        }
        ui.label(
            RichText::new(self.form.description_counter(host.alarm()))
                .color(MUTED)
                .small(),
        );
    }

    fn show_time_picker<H: AlarmHost>(&mut self, ui: &mut Ui, host: &mut H) {
        ui.label(RichText::new("Select Alarm Time").color(LABEL).strong());
        ui.horizontal(|ui| {
            let mut hour = self.form.hour_text();
            let hour_response = ui.add(TextEdit::singleline(&mut hour).desired_width(32.0));
            if hour_response.changed() {
                self.hour_edited(&hour);
            }
            if hour_response.lost_focus() {
                self.hour_lost_focus();
            }

            ui.label(":");

            let mut minute = self.form.minute_text().to_string();
            let minute_response = ui.add(TextEdit::singleline(&mut minute).desired_width(32.0));
            if minute_response.changed() {
                self.minute_edited(&minute);
            }
            if minute_response.lost_focus() {
                self.minute_lost_focus();
            }

            if ui.button(self.form.period().as_str()).clicked() {
                self.period_clicked();
            }

            if ui.button(RichText::new("Save Time").strong()).clicked() {
                self.save_time_clicked(host);
            }
        });
        if let Some(time) = self.form.confirmed_time() {
            ui.label(RichText::new(format!("Confirmed Time: {time}")).color(CONFIRMED));
        }
        if let Some(alert) = self.alert() {
            ui.label(RichText::new(alert.to_string()).color(ALERT));
        }
    }

    fn show_sound_choice<H: AlarmHost>(&mut self, ui: &mut Ui, host: &mut H) {
        ui.label(RichText::new("Sound Alarm?").color(LABEL).strong());
        let sound = host.alarm().sound;
        ui.horizontal(|ui| {
            if ui.radio(sound, "Yes").clicked() {
                self.sound_chosen(host, true);
            }
            ui.add_space(20.0);
            if ui.radio(!sound, "No").clicked() {
                self.sound_chosen(host, false);
            }
        });
    }

    fn show_frequency<H: AlarmHost>(&mut self, ui: &mut Ui, host: &mut H) {
        ui.label(RichText::new("Alarm Frequency").color(LABEL).strong());
        ui.horizontal_wrapped(|ui| {
            for day in DayLabel::ALL {
                let mut checked = self.form.is_day_selected(host.alarm(), day);
                if ui.checkbox(&mut checked, day.label()).changed() {
                    self.day_toggled(host, day);
                }
            }
        });
    }

    fn show_buttons<H: AlarmHost>(&mut self, ui: &mut Ui, host: &mut H) {
        ui.horizontal(|ui| {
            let save = egui::Button::new(RichText::new("Save").strong())
                .fill(Color32::from_rgb(28, 82, 67))
                .min_size(egui::vec2(90.0, 26.0));
            if ui.add_enabled(self.form.can_save(), save).clicked() {
                self.save_clicked(host);
            }
            if ui
                .add(egui::Button::new("Cancel").min_size(egui::vec2(90.0, 26.0)))
                .clicked()
            {
                self.cancel_clicked(host);
            }
        });
        if !self.form.can_save() {
            ui.label(
                RichText::new(
                    "Please confirm the alarm time by clicking \"Save Time\" before saving.",
                )
                .color(MUTED)
                .small(),
            );
        }
    }
}
