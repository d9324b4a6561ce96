use crate::grid::{weekday_labels, WEEK_LEN};
use crate::model::WeekStart;
use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub week_start: WeekStart,
    /// Replaces the built-in weekday header when set; must list seven labels
    /// in column order.
    pub weekday_labels: Option<Vec<String>>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            week_start: WeekStart::Monday,
            weekday_labels: None,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn header_labels(&self) -> Vec<String> {
        match &self.weekday_labels {
            Some(labels) => labels.clone(),
            None => weekday_labels(self.week_start)
                .iter()
                .map(|l| l.to_string())
                .collect(),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(labels) = &self.weekday_labels {
            if labels.len() != WEEK_LEN {
                bail!(
                    "weekday_labels needs {} entries, found {}",
                    WEEK_LEN,
                    labels.len()
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SettingsLocation {
    pub path: PathBuf,
}

pub fn locate_settings(explicit: Option<&Path>) -> Result<SettingsLocation> {
    if let Some(path) = explicit {
        return Ok(SettingsLocation {
            path: path.to_path_buf(),
        });
    }
    let dirs = project_dirs()?;
    Ok(SettingsLocation {
        path: dirs.config_dir().join("config.yml"),
    })
}

/// Reads the settings file, writing the defaults first when it is missing.
pub fn load_settings(location: &SettingsLocation) -> Result<Settings> {
    if !location.path.exists() {
        let settings = Settings::default();
        save_settings(location, &settings)?;
        return Ok(settings);
    }
    let data = fs::read_to_string(&location.path)
        .with_context(|| format!("reading {:?}", location.path))?;
    let settings: Settings = serde_yaml::from_str(&data).context("parsing settings file")?;
    settings
        .validate()
        .with_context(|| format!("invalid settings in {:?}", location.path))?;
    Ok(settings)
}

pub fn save_settings(location: &SettingsLocation, settings: &Settings) -> Result<()> {
    if let Some(parent) = location.path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let serialized = serde_yaml::to_string(settings).context("serializing settings")?;
    fs::write(&location.path, serialized)
        .with_context(|| format!("writing {:?}", location.path))?;
    Ok(())
}

pub fn default_log_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("daygrid.log"))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "daygrid").context("locating config directory")
}
