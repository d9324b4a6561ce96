use crate::config::{default_log_path, load_settings, locate_settings, save_settings, Settings};
use crate::grid::build_schedule;
use crate::logging;
use crate::model::{CalendarDate, WeekStart};
use crate::render::grid_text;
use crate::ui;
use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use std::path::Path;

pub fn init(config: Option<&Path>) -> Result<()> {
    logging::init_stderr();
    let location = locate_settings(config)?;
    if location.path.exists() {
        println!("Settings already at {}", location.path.display());
    } else {
        save_settings(&location, &Settings::default())?;
        println!("Wrote default settings to {}", location.path.display());
    }
    Ok(())
}

pub fn grid(config: Option<&Path>, month: Option<String>, week_start: Option<WeekStart>) -> Result<()> {
    logging::init_stderr();
    let mut settings = load_settings(&locate_settings(config)?)?;
    if let Some(start) = week_start {
        if start != settings.week_start {
            settings.week_start = start;
            settings.weekday_labels = None;
        }
    }
    let now = Local::now().naive_local();
    let reference = parse_month(month.as_deref(), now.date())?;
    let schedule = build_schedule(reference, settings.week_start);
    print!(
        "{}",
        grid_text(&schedule, &settings.header_labels(), CalendarDate::of(now))
    );
    Ok(())
}

pub fn tui(config: Option<&Path>, month: Option<String>) -> Result<()> {
    let settings = load_settings(&locate_settings(config)?)?;
    let log_path = match &settings.log_file {
        Some(path) => path.clone(),
        None => default_log_path()?,
    };
    logging::init_file(&log_path)?;
    let reference = parse_month(month.as_deref(), Local::now().date_naive())?;
    log::info!("starting interface on {}", reference.format("%B %Y"));
    ui::run(settings, reference)
}

/// Parses `YYYY-MM` into the first day of that month.
fn parse_month(input: Option<&str>, fallback: NaiveDate) -> Result<NaiveDate> {
    let raw = match input {
        Some(r) => r.trim(),
        None => return Ok(fallback),
    };
    if raw.is_empty() {
        return Ok(fallback);
    }
    NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid month (use YYYY-MM): {}", raw))
}
