use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

use crate::alarm::form::{AlarmForm, ValidationAlert};
use crate::alarm::host::{AlarmHost, DraftHost};
use crate::alarm::model::{AlarmRecord, DayLabel};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormEvent {
    Title(String),
    Description(String),
    Hour(String),
    Minute(String),
    BlurHour,
    BlurMinute,
    TogglePeriod,
    ConfirmTime,
    Sound(bool),
    ToggleDay(DayLabel),
    Save,
    Cancel,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScriptLine {
    pub number: usize,
    pub event: FormEvent,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ScriptOutcome {
    Saved(AlarmRecord),
    Cancelled,
    Open(AlarmRecord),
}

#[derive(Debug, Clone)]
pub struct ScriptReport {
    pub alerts: Vec<(usize, ValidationAlert)>,
    pub outcome: ScriptOutcome,
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read script {}", path.display()))?;
    parse_script(&content)
}

pub fn parse_script(content: &str) -> Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let number = index + 1;
        if let Some(event) =
            parse_event_line(raw).with_context(|| format!("script line {number}"))?
        {
            lines.push(ScriptLine { number, event });
        }
    }
    Ok(lines)
}

/// Parses one script line. Blank lines and `#` comments yield `None`.
pub fn parse_event_line(raw: &str) -> Result<Option<FormEvent>> {
    let line = raw.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let (keyword, arg) = match trimmed.split_once(' ') {
        Some((keyword, arg)) => (keyword, arg),
        None => (trimmed.trim_end(), ""),
    };

    let event = match keyword {
        "title" => FormEvent::Title(arg.to_string()),
        "description" => FormEvent::Description(arg.to_string()),
        "hour" => FormEvent::Hour(arg.trim().to_string()),
        "minute" => FormEvent::Minute(arg.trim().to_string()),
        "blur" => match arg.trim() {
            "hour" => FormEvent::BlurHour,
            "minute" => FormEvent::BlurMinute,
            other => bail!("cannot blur '{other}', expected hour or minute"),
        },
        "period" => FormEvent::TogglePeriod,
        "confirm" => FormEvent::ConfirmTime,
        "sound" => match arg.trim() {
            "yes" => FormEvent::Sound(true),
            "no" => FormEvent::Sound(false),
            other => bail!("invalid sound choice '{other}', expected yes or no"),
        },
        "day" => {
            let label = arg.trim();
            let day = DayLabel::from_label(label).ok_or_else(|| {
                anyhow!("unknown weekday '{label}', expected one of Sun, Mon, Tues, Wed, Thurs, Fri, Sat")
            })?;
            FormEvent::ToggleDay(day)
        }
        "save" => FormEvent::Save,
        "cancel" => FormEvent::Cancel,
        other => bail!("unknown event '{other}'"),
    };
    Ok(Some(event))
}

pub fn run_script(alarm: AlarmRecord, lines: &[ScriptLine]) -> Result<ScriptReport> {
    let mut form = AlarmForm::new(&alarm);
    let mut host = DraftHost::new(alarm);
    let mut alerts = Vec::new();

    for line in lines {
        if !host.is_open() {
            bail!("script line {}: dialog is already closed", line.number);
        }
        debug!(line = line.number, event = ?line.event, "applying form event");
        if let Err(alert) = apply_event(&mut form, &mut host, &line.event) {
            alerts.push((line.number, alert));
        }
        form.sync_from_record(host.alarm());
    }

    let outcome = if let Some(saved) = host.saved().last() {
        ScriptOutcome::Saved(saved.clone())
    } else if host.is_open() {
        ScriptOutcome::Open(host.alarm().clone())
    } else {
        ScriptOutcome::Cancelled
    };
    Ok(ScriptReport { alerts, outcome })
}

fn apply_event<H: AlarmHost>(
    form: &mut AlarmForm,
    host: &mut H,
    event: &FormEvent,
) -> Result<(), ValidationAlert> {
    match event {
        FormEvent::Title(text) => {
            form.change_title(host, text.clone());
        }
        FormEvent::Description(text) => {
            form.change_description(host, text.clone());
        }
        FormEvent::Hour(text) => form.change_hour(text),
        FormEvent::Minute(text) => form.change_minute(text),
        FormEvent::BlurHour => form.blur_hour(),
        FormEvent::BlurMinute => form.blur_minute()?,
        FormEvent::TogglePeriod => form.toggle_period(),
        FormEvent::ConfirmTime => {
            form.confirm_time(host)?;
        }
        FormEvent::Sound(sound) => form.set_sound(host, *sound),
        FormEvent::ToggleDay(day) => form.toggle_day(host, *day),
        FormEvent::Save => form.save(host)?,
        FormEvent::Cancel => form.cancel(host),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> AlarmRecord {
        AlarmRecord::new_draft("scripted")
    }

    #[test]
    fn parses_events_and_skips_comments() {
        let lines = parse_script(
            "# morning alarm\n\ntitle Morning run\nhour 9\nblur minute\nday Thurs\nsound yes\n",
        )
        .expect("valid script");
        let events: Vec<_> = lines.iter().map(|line| line.event.clone()).collect();
        assert_eq!(
            events,
            vec![
                FormEvent::Title("Morning run".to_string()),
                FormEvent::Hour("9".to_string()),
                FormEvent::BlurMinute,
                FormEvent::ToggleDay(DayLabel::Thurs),
                FormEvent::Sound(true),
            ]
        );
        assert_eq!(lines[0].number, 3);
    }

    #[test]
    fn bare_minute_event_means_empty_field() {
        assert_eq!(
            parse_event_line("minute").expect("valid line"),
            Some(FormEvent::Minute(String::new()))
        );
    }

    #[test]
    fn rejects_unknown_events_with_line_number() {
        let err = parse_script("hour 9\nsnooze 5\n").expect_err("unknown event");
        let text = format!("{err:#}");
        assert!(text.contains("script line 2"));
        assert!(text.contains("unknown event 'snooze'"));
    }

    #[test]
    fn rejects_unknown_weekday() {
        let err = parse_event_line("day Tue").expect_err("Tue is not a label");
        assert!(err.to_string().contains("unknown weekday 'Tue'"));
    }

    #[test]
    fn full_script_saves_confirmed_alarm() {
        let lines = parse_script(
            "title Iron pill\nhour 9\nblur hour\nminute 5\nblur minute\nperiod\nconfirm\nday Mon\nday Wed\nday Mon\nsound yes\nsave\n",
        )
        .expect("valid script");
        let report = run_script(draft(), &lines).expect("script runs");
        assert!(report.alerts.is_empty());
        let ScriptOutcome::Saved(alarm) = report.outcome else {
            panic!("expected saved outcome");
        };
        assert_eq!(alarm.title, "Iron pill");
        assert_eq!(alarm.time.map(|t| t.to_string()).as_deref(), Some("9:05 PM"));
        assert_eq!(alarm.frequency, vec![DayLabel::Wed]);
        assert!(alarm.sound);
    }

    #[test]
    fn unconfirmed_save_reports_alert_and_stays_open() {
        let lines = parse_script("hour 7\nminute 75\nblur minute\nsave\n").expect("valid script");
        let report = run_script(draft(), &lines).expect("script runs");
        assert_eq!(
            report.alerts,
            vec![
                (3, ValidationAlert::MinuteOutOfRange { entered: 75 }),
                (4, ValidationAlert::TimeNotConfirmed),
            ]
        );
        assert!(matches!(report.outcome, ScriptOutcome::Open(_)));
    }

    #[test]
    fn events_after_close_are_errors() {
        let lines = parse_script("cancel\ntitle late\n").expect("valid script");
        let err = run_script(draft(), &lines).expect_err("dialog closed");
        assert!(err.to_string().contains("script line 2: dialog is already closed"));
    }

    #[test]
    fn cancel_discards_edits() {
        let lines = parse_script("title Gone\ncancel\n").expect("valid script");
        let report = run_script(draft(), &lines).expect("script runs");
        assert_eq!(report.outcome, ScriptOutcome::Cancelled);
    }
}
