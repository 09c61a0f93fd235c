use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{core::Result, speed::Speed};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Warn
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub cols: Option<usize>,
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub speed: Option<Speed>,
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Settings {
    pub const DEFAULT_COLS: usize = 60;
    pub const DEFAULT_ROWS: usize = 37;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_size(mut self, cols: usize, rows: usize) -> Self {
        self.cols = Some(cols);
        self.rows = Some(rows);
        self
    }

    pub fn get_size(&self) -> (usize, usize) {
        (
            self.cols.unwrap_or(Self::DEFAULT_COLS),
            self.rows.unwrap_or(Self::DEFAULT_ROWS),
        )
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_speed(mut self, value: Speed) -> Self {
        self.speed = Some(value);
        self
    }

    pub fn get_speed(&self) -> Speed {
        self.speed.unwrap_or_default()
    }

    pub fn set_log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mazestep")
            .join("settings.ron")
    }

    pub fn parse(text: &str) -> Result<Self> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(text)?)
    }

    /// Reads settings from `path`, writing the bundled defaults there first if it doesn't exist.
    pub fn load(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            log::warn!("no settings at {:?}, writing defaults", path);
            Self::reset_config(path.clone())?;
        }

        let text = fs::read_to_string(&path)?;
        Self::parse(&text)
    }

    pub fn reset_config(path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, DEFAULT_SETTINGS)?;
        Ok(())
    }

    pub fn save(&self, path: PathBuf) -> Result<()> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, text)?;
        Ok(())
    }
}
