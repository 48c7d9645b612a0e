use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Local};
use serde::Deserialize;
use serde_json::{Map, Value, json};

pub const TITLE_MAX_CHARS: usize = 16;
pub const DESCRIPTION_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AlarmRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub time: Option<AlarmTime>,
    pub frequency: Vec<DayLabel>,
    pub sound: bool,
    pub active: bool,
    pub has_rung: Option<bool>,
}

impl AlarmRecord {
    pub fn new_draft(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            time: None,
            frequency: Vec::new(),
            sound: false,
            active: true,
            has_rung: None,
        }
    }

    pub fn has_day(&self, day: DayLabel) -> bool {
        self.frequency.contains(&day)
    }

    /// Removes `day` when present, otherwise appends it.
    pub fn toggle_day(&mut self, day: DayLabel) {
        if let Some(index) = self.frequency.iter().position(|existing| *existing == day) {
            self.frequency.remove(index);
        } else {
            self.frequency.push(day);
        }
    }
}

pub fn generate_alarm_id(now: DateTime<Local>) -> String {
    format!("alarm-{}", now.timestamp_millis())
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Am => "AM",
            Period::Pm => "PM",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Period::Am => Period::Pm,
            Period::Pm => Period::Am,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "AM" => Some(Period::Am),
            "PM" => Some(Period::Pm),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Twelve-hour time of day, rendered as `"9:05 PM"`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct AlarmTime {
    hour: u8,
    minute: u8,
    period: Period,
}

impl AlarmTime {
    pub fn new(hour: u8, minute: u8, period: Period) -> Option<Self> {
        if !(1..=12).contains(&hour) || minute > 59 {
            return None;
        }
        Some(Self {
            hour,
            minute,
            period,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn period(&self) -> Period {
        self.period
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.period)
    }
}

pub fn parse_alarm_time(input: &str) -> Result<AlarmTime> {
    let invalid = || anyhow!("invalid time '{input}', expected H:MM AM|PM");
    let (hour_text, rest) = input.split_once(':').ok_or_else(invalid)?;
    let (minute_text, period_text) = rest.split_once(' ').ok_or_else(invalid)?;
    if minute_text.is_empty()
        || minute_text.len() > 2
        || !minute_text.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    let hour: u8 = hour_text.parse().map_err(|_| invalid())?;
    let minute: u8 = minute_text.parse().map_err(|_| invalid())?;
    let period = Period::parse(period_text).ok_or_else(invalid)?;
    AlarmTime::new(hour, minute, period).ok_or_else(invalid)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum DayLabel {
    Sun,
    Mon,
    Tues,
    Wed,
    Thurs,
    Fri,
    Sat,
}

impl DayLabel {
    pub const ALL: [DayLabel; 7] = [
        DayLabel::Sun,
        DayLabel::Mon,
        DayLabel::Tues,
        DayLabel::Wed,
        DayLabel::Thurs,
        DayLabel::Fri,
        DayLabel::Sat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DayLabel::Sun => "Sun",
            DayLabel::Mon => "Mon",
            DayLabel::Tues => "Tues",
            DayLabel::Wed => "Wed",
            DayLabel::Thurs => "Thurs",
            DayLabel::Fri => "Fri",
            DayLabel::Sat => "Sat",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.label() == label)
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn load_alarm_record(path: &Path) -> Result<AlarmRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read alarm file {}", path.display()))?;
    parse_alarm_record_text(&content)
}

pub fn parse_alarm_record_text(content: &str) -> Result<AlarmRecord> {
    let raw = serde_json::from_str::<AlarmRecordFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.id.trim().is_empty() {
        bail!("alarm id must not be empty");
    }
    if raw.title.chars().count() > TITLE_MAX_CHARS {
        bail!(
            "alarm '{}' title exceeds {TITLE_MAX_CHARS} characters",
            raw.id
        );
    }
    if raw.description.chars().count() > DESCRIPTION_MAX_CHARS {
        bail!(
            "alarm '{}' description exceeds {DESCRIPTION_MAX_CHARS} characters",
            raw.id
        );
    }

    let time = match raw.time.as_deref() {
        None | Some("") => None,
        Some(text) => Some(
            parse_alarm_time(text).with_context(|| format!("alarm '{}' has a bad time", raw.id))?,
        ),
    };

    let mut frequency = Vec::with_capacity(raw.frequency.len());
    for label in &raw.frequency {
        let day = DayLabel::from_label(label).ok_or_else(|| {
            anyhow!(
                "alarm '{}' has unknown weekday '{label}', expected one of Sun, Mon, Tues, Wed, Thurs, Fri, Sat",
                raw.id
            )
        })?;
        if frequency.contains(&day) {
            bail!("alarm '{}' lists weekday '{label}' more than once", raw.id);
        }
        frequency.push(day);
    }

    Ok(AlarmRecord {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        time,
        frequency,
        sound: raw.sound,
        active: raw.active,
        has_rung: raw.has_rung,
    })
}

pub fn alarm_record_to_json(alarm: &AlarmRecord) -> Value {
    let mut obj = Map::new();
    obj.insert("id".to_string(), Value::String(alarm.id.clone()));
    obj.insert("title".to_string(), Value::String(alarm.title.clone()));
    obj.insert(
        "description".to_string(),
        Value::String(alarm.description.clone()),
    );
    obj.insert(
        "time".to_string(),
        alarm
            .time
            .map(|time| Value::String(time.to_string()))
            .unwrap_or(Value::Null),
    );
    let days = alarm
        .frequency
        .iter()
        .map(|day| Value::String(day.label().to_string()))
        .collect::<Vec<_>>();
    obj.insert("frequency".to_string(), Value::Array(days));
    obj.insert("sound".to_string(), Value::Bool(alarm.sound));
    obj.insert("active".to_string(), Value::Bool(alarm.active));
    if let Some(has_rung) = alarm.has_rung {
        obj.insert("hasRung".to_string(), json!(has_rung));
    }
    Value::Object(obj)
}

pub fn write_alarm_record(path: &Path, alarm: &AlarmRecord) -> Result<()> {
    let text = serde_json::to_string_pretty(&alarm_record_to_json(alarm))?;
    fs::write(path, format!("{text}\n"))
        .with_context(|| format!("unable to write alarm file {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct AlarmRecordFile {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    frequency: Vec<String>,
    #[serde(default)]
    sound: bool,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default, rename = "hasRung")]
    has_rung: Option<bool>,
}

fn default_active() -> bool {
    true
}
