use thiserror::Error;
use tracing::{debug, info, warn};

use crate::alarm::host::{AlarmHost, TextField};
use crate::alarm::model::{AlarmRecord, AlarmTime, DayLabel, Period};

const DEFAULT_HOUR: u8 = 1;
const DEFAULT_MINUTE: &str = "00";

/// User-facing validation feedback. These are not faults: the form has already
/// recovered (field reset or save withheld) by the time one is returned.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ValidationAlert {
    #[error("Invalid input ({entered}). Please enter a value between 0 and 59. \nMinute will be reset to 00.")]
    MinuteOutOfRange { entered: u32 },
    #[error("Please confirm the alarm time by clicking 'Save Time' before saving.")]
    TimeNotConfirmed,
}

/// Local editing state of the alarm dialog.
///
/// Title, description, sound and frequency edits go straight to the host. The
/// time picker is buffered here and only reaches the record through
/// [`AlarmForm::confirm_time`].
#[derive(Debug, Clone)]
pub struct AlarmForm {
    hour: Option<u8>,
    minute: String,
    period: Period,
    confirmed_time: Option<AlarmTime>,
    synced_time: Option<AlarmTime>,
}

impl AlarmForm {
    pub fn new(alarm: &AlarmRecord) -> Self {
        let mut form = Self {
            hour: Some(DEFAULT_HOUR),
            minute: DEFAULT_MINUTE.to_string(),
            period: Period::Am,
            confirmed_time: None,
            synced_time: None,
        };
        form.sync_from_record(alarm);
        form
    }

    /// Re-derives hour, minute and period when the record's time differs from
    /// the last value seen. Returns whether anything was re-derived.
    pub fn sync_from_record(&mut self, alarm: &AlarmRecord) -> bool {
        if alarm.time == self.synced_time {
            return false;
        }
        self.synced_time = alarm.time;
        let Some(time) = alarm.time else {
            return false;
        };
        self.hour = Some(time.hour());
        self.minute = format!("{:02}", time.minute());
        self.period = time.period();
        debug!(alarm_id = %alarm.id, %time, "time picker resynced from record");
        true
    }

    pub fn hour_text(&self) -> String {
        self.hour.map(|hour| hour.to_string()).unwrap_or_default()
    }

    pub fn minute_text(&self) -> &str {
        &self.minute
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn confirmed_time(&self) -> Option<AlarmTime> {
        self.confirmed_time
    }

    pub fn can_save(&self) -> bool {
        self.confirmed_time.is_some()
    }

    pub fn change_title<H: AlarmHost>(&mut self, host: &mut H, value: String) -> bool {
        change_text(host, TextField::Title, value)
    }

    pub fn change_description<H: AlarmHost>(&mut self, host: &mut H, value: String) -> bool {
        change_text(host, TextField::Description, value)
    }

    pub fn title_counter(&self, alarm: &AlarmRecord) -> String {
        counter(&alarm.title, TextField::Title)
    }

    pub fn description_counter(&self, alarm: &AlarmRecord) -> String {
        counter(&alarm.description, TextField::Description)
    }

    pub fn change_hour(&mut self, value: &str) {
        if value.is_empty() {
            self.hour = None;
            return;
        }
        match leading_integer(value) {
            Some(hour) if (1..=12).contains(&hour) => self.hour = Some(hour as u8),
            _ => debug!(value, "ignored out-of-range hour"),
        }
    }

    pub fn blur_hour(&mut self) {
        if self.hour.is_none() {
            self.hour = Some(DEFAULT_HOUR);
        }
    }

    pub fn change_minute(&mut self, value: &str) {
        if value.len() <= 2 && value.bytes().all(|b| b.is_ascii_digit()) {
            self.minute = value.to_string();
        } else {
            debug!(value, "ignored minute keystroke");
        }
    }

    pub fn blur_minute(&mut self) -> Result<(), ValidationAlert> {
        if self.minute.is_empty() {
            self.minute = DEFAULT_MINUTE.to_string();
            return Ok(());
        }
        let Some(minute) = leading_integer(&self.minute) else {
            return Ok(());
        };
        if minute > 59 {
            warn!(minute, "minute out of range, reset to 00");
            self.minute = DEFAULT_MINUTE.to_string();
            return Err(ValidationAlert::MinuteOutOfRange { entered: minute });
        }
        self.minute = format!("{minute:02}");
        Ok(())
    }

    pub fn toggle_period(&mut self) {
        self.period = self.period.toggled();
    }

    /// "Save Time". Pending hour/minute edits are committed first, the same
    /// way the inputs would lose focus when the button is clicked; a minute
    /// rejected there aborts the confirmation.
    pub fn confirm_time<H: AlarmHost>(
        &mut self,
        host: &mut H,
    ) -> Result<AlarmTime, ValidationAlert> {
        self.blur_hour();
        self.blur_minute()?;

        let hour = self.hour.unwrap_or(DEFAULT_HOUR);
        let minute = self.minute.parse::<u8>().unwrap_or(0);
        let time = AlarmTime::new(hour, minute, self.period).ok_or(
            ValidationAlert::MinuteOutOfRange {
                entered: u32::from(minute),
            },
        )?;

        self.confirmed_time = Some(time);
        let mut alarm = host.alarm().clone();
        alarm.time = Some(time);
        host.set_alarm(alarm);
        self.sync_from_record(host.alarm());
        info!(alarm_id = %host.alarm().id, %time, "alarm time confirmed");
        Ok(time)
    }

    pub fn set_sound<H: AlarmHost>(&mut self, host: &mut H, sound: bool) {
        let mut alarm = host.alarm().clone();
        alarm.sound = sound;
        host.set_alarm(alarm);
    }

    pub fn toggle_day<H: AlarmHost>(&mut self, host: &mut H, day: DayLabel) {
        host.frequency_changed(day);
    }

    pub fn is_day_selected(&self, alarm: &AlarmRecord, day: DayLabel) -> bool {
        alarm.has_day(day)
    }

    pub fn save<H: AlarmHost>(&mut self, host: &mut H) -> Result<(), ValidationAlert> {
        if self.confirmed_time.is_none() {
            warn!(alarm_id = %host.alarm().id, "save blocked until time is confirmed");
            return Err(ValidationAlert::TimeNotConfirmed);
        }
        host.save_alarm();
        Ok(())
    }

    pub fn cancel<H: AlarmHost>(&mut self, host: &mut H) {
        info!(alarm_id = %host.alarm().id, "alarm dialog cancelled");
        host.close_dialog();
    }
}

fn change_text<H: AlarmHost>(host: &mut H, field: TextField, value: String) -> bool {
    let len = value.chars().count();
    if len > field.max_chars() {
        debug!(field = field.name(), len, "ignored keystroke past character cap");
        return false;
    }
    host.input_changed(field, value);
    true
}

fn counter(text: &str, field: TextField) -> String {
    format!("{}/{}", text.chars().count(), field.max_chars())
}

/// Integer prefix of `value`, ignoring leading whitespace. `None` when no digit
/// leads or the number does not fit.
fn leading_integer(value: &str) -> Option<u32> {
    let trimmed = value.trim_start();
    let end = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
