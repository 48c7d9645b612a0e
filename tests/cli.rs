use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn existing_alarm_json() -> &'static str {
    r#"
{
  "id": "wake-1",
  "title": "Wake up",
  "description": "",
  "time": "7:30 AM",
  "frequency": ["Mon", "Tues"],
  "sound": false,
  "active": true
}
"#
}

#[test]
fn confirmed_script_prints_saved_alarm() {
    let dir = tempdir().expect("tempdir");
    let script = dir.path().join("new.alarm-script");
    fs::write(
        &script,
        "title Iron pill\nhour 9\nminute 5\nblur minute\nperiod\nconfirm\nday Fri\nsound yes\nsave\n",
    )
    .expect("write script");

    let mut cmd = cargo_bin_cmd!("alarm-editor");
    cmd.arg("--script")
        .arg(script)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""time": "9:05 PM""#))
        .stdout(predicate::str::contains(r#""title": "Iron pill""#))
        .stdout(predicate::str::contains(r#""sound": true"#));
}

#[test]
fn save_without_confirmation_reports_alert() {
    let dir = tempdir().expect("tempdir");
    let script = dir.path().join("unconfirmed.alarm-script");
    fs::write(&script, "hour 6\nsave\n").expect("write script");

    let mut cmd = cargo_bin_cmd!("alarm-editor");
    cmd.arg("--script")
        .arg(script)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "alert at line 2: Please confirm the alarm time",
        ))
        .stdout(predicate::str::contains("dialog left open"));
}

#[test]
fn existing_alarm_is_edited_and_written_to_output() {
    let dir = tempdir().expect("tempdir");
    let alarm = dir.path().join("alarm.json");
    let script = dir.path().join("edit.alarm-script");
    let output = dir.path().join("saved.json");
    fs::write(&alarm, existing_alarm_json()).expect("write alarm");
    fs::write(&script, "day Mon\nminute 45\nconfirm\nsave\n").expect("write script");

    let mut cmd = cargo_bin_cmd!("alarm-editor");
    cmd.arg("--alarm")
        .arg(&alarm)
        .arg("--script")
        .arg(script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "wake-1""#));

    let saved = fs::read_to_string(&output).expect("read output");
    assert!(saved.contains(r#""time": "7:45 AM""#));
    assert!(saved.contains(r#""frequency": [
    "Tues"
  ]"#));
}

#[test]
fn cancel_saves_nothing() {
    let dir = tempdir().expect("tempdir");
    let script = dir.path().join("cancel.alarm-script");
    fs::write(&script, "title Discard me\nconfirm\ncancel\n").expect("write script");

    let mut cmd = cargo_bin_cmd!("alarm-editor");
    cmd.arg("--script")
        .arg(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled; no alarm saved"))
        .stdout(predicate::str::contains("Discard me").not());
}

#[test]
fn malformed_alarm_file_fails_with_clear_error() {
    let dir = tempdir().expect("tempdir");
    let alarm = dir.path().join("alarm.json");
    let script = dir.path().join("noop.alarm-script");
    fs::write(&alarm, "{ not-valid-json ").expect("write invalid json");
    fs::write(&script, "cancel\n").expect("write script");

    let mut cmd = cargo_bin_cmd!("alarm-editor");
    cmd.arg("--alarm")
        .arg(alarm)
        .arg("--script")
        .arg(script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn unknown_script_event_fails_with_line_number() {
    let dir = tempdir().expect("tempdir");
    let script = dir.path().join("bad.alarm-script");
    fs::write(&script, "hour 9\nsnooze 10\n").expect("write script");

    let mut cmd = cargo_bin_cmd!("alarm-editor");
    cmd.arg("--script")
        .arg(script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("script line 2"))
        .stderr(predicate::str::contains("unknown event 'snooze'"));
}
