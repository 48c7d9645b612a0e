use tracing::{debug, info};

use crate::alarm::model::{AlarmRecord, DESCRIPTION_MAX_CHARS, DayLabel, TITLE_MAX_CHARS};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TextField {
    Title,
    Description,
}

impl TextField {
    pub fn name(self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::Description => "description",
        }
    }

    pub fn max_chars(self) -> usize {
        match self {
            TextField::Title => TITLE_MAX_CHARS,
            TextField::Description => DESCRIPTION_MAX_CHARS,
        }
    }
}

/// The owner of the alarm record being edited.
///
/// The dialog never stores the record itself; every write goes through these
/// methods so the owner decides how edits, toggles, saves and closes land.
pub trait AlarmHost {
    fn alarm(&self) -> &AlarmRecord;
    fn set_alarm(&mut self, alarm: AlarmRecord);
    fn input_changed(&mut self, field: TextField, value: String);
    fn frequency_changed(&mut self, day: DayLabel);
    fn save_alarm(&mut self);
    fn close_dialog(&mut self);
}

/// In-memory host: keeps one draft record and the records saved from it.
#[derive(Debug, Clone)]
pub struct DraftHost {
    alarm: AlarmRecord,
    saved: Vec<AlarmRecord>,
    open: bool,
}

impl DraftHost {
    pub fn new(alarm: AlarmRecord) -> Self {
        Self {
            alarm,
            saved: Vec::new(),
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn saved(&self) -> &[AlarmRecord] {
        &self.saved
    }
}

impl AlarmHost for DraftHost {
    fn alarm(&self) -> &AlarmRecord {
        &self.alarm
    }

    fn set_alarm(&mut self, alarm: AlarmRecord) {
        self.alarm = alarm;
    }

    fn input_changed(&mut self, field: TextField, value: String) {
        match field {
            TextField::Title => self.alarm.title = value,
            TextField::Description => self.alarm.description = value,
        }
    }

    fn frequency_changed(&mut self, day: DayLabel) {
        self.alarm.toggle_day(day);
        debug!(alarm_id = %self.alarm.id, %day, selected = self.alarm.has_day(day), "frequency toggled");
    }

    fn save_alarm(&mut self) {
        info!(alarm_id = %self.alarm.id, time = ?self.alarm.time.map(|time| time.to_string()), "alarm saved");
        self.saved.push(self.alarm.clone());
        self.open = false;
    }

    fn close_dialog(&mut self) {
        self.open = false;
        debug!(alarm_id = %self.alarm.id, "dialog closed");
    }
}

/// Wraps a [`DraftHost`] and records which callbacks the dialog invoked.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordingHost {
    pub inner: DraftHost,
    pub frequency_calls: Vec<DayLabel>,
    pub save_calls: usize,
    pub close_calls: usize,
}

#[cfg(test)]
impl RecordingHost {
    pub fn new(alarm: AlarmRecord) -> Self {
        Self {
            inner: DraftHost::new(alarm),
            frequency_calls: Vec::new(),
            save_calls: 0,
            close_calls: 0,
        }
    }
}

#[cfg(test)]
impl AlarmHost for RecordingHost {
    fn alarm(&self) -> &AlarmRecord {
        self.inner.alarm()
    }

    fn set_alarm(&mut self, alarm: AlarmRecord) {
        self.inner.set_alarm(alarm);
    }

    fn input_changed(&mut self, field: TextField, value: String) {
        self.inner.input_changed(field, value);
    }

    fn frequency_changed(&mut self, day: DayLabel) {
        self.frequency_calls.push(day);
        self.inner.frequency_changed(day);
    }

    fn save_alarm(&mut self) {
        self.save_calls += 1;
        self.inner.save_alarm();
    }

    fn close_dialog(&mut self) {
        self.close_calls += 1;
        self.inner.close_dialog();
    }
}
