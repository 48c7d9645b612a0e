mod alarm;
mod script;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::alarm::model::{
    AlarmRecord, alarm_record_to_json, generate_alarm_id, load_alarm_record, write_alarm_record,
};
use crate::script::{ScriptOutcome, load_script, run_script};

#[derive(Parser, Debug)]
#[command(
    name = "alarm-editor",
    version,
    about = "Create or edit a recurring alarm"
)]
struct Cli {
    /// Existing alarm record (JSON) to edit; a new alarm is drafted when omitted.
    #[arg(long)]
    alarm: Option<PathBuf>,

    /// Replay form events from a script instead of opening the window.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Also write the saved alarm record to this file.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let alarm = match &cli.alarm {
        Some(path) => load_alarm_record(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => AlarmRecord::new_draft(generate_alarm_id(Local::now())),
    };

    match &cli.script {
        Some(path) => run_headless(alarm, path, cli.output.as_deref()),
        None => ui::app::run_gui(alarm, cli.output),
    }
}

fn run_headless(alarm: AlarmRecord, script_path: &Path, output: Option<&Path>) -> Result<()> {
    let lines = load_script(script_path)
        .with_context(|| format!("failed to load {}", script_path.display()))?;
    let report = run_script(alarm, &lines)?;

    for (line, alert) in &report.alerts {
        println!("alert at line {line}: {}", alert.to_string().replace('\n', " "));
    }
    match &report.outcome {
        ScriptOutcome::Saved(alarm) => emit_saved_alarm(alarm, output)?,
        ScriptOutcome::Cancelled => println!("cancelled; no alarm saved"),
        ScriptOutcome::Open(alarm) => {
            println!("dialog left open; alarm {} not saved", alarm.id)
        }
    }
    Ok(())
}

pub fn emit_saved_alarm(alarm: &AlarmRecord, output: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(&alarm_record_to_json(alarm))?;
    println!("{text}");
    if let Some(path) = output {
        write_alarm_record(path, alarm)?;
    }
    Ok(())
}
