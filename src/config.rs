//! TOML settings for the command line and other shells.
//!
//! ```toml
//! method = "ISNA"
//! asr = "Hanafi"
//! high_lats = "OneSeventh"
//! log_level = "debug"
//!
//! [tuning]
//! isha = 2
//!
//! [calendar]
//! pacing_secs = 15
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::engine::EngineOptions;
use crate::error::ConfigError;
use crate::method::{AsrFactor, HighLatitudeRule, Midnight, ParameterOverrides, Rule};
use crate::times::{TimeFormat, TuningOffsets};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub method: String,
    pub asr: Option<AsrFactor>,
    pub high_lats: Option<HighLatitudeRule>,
    pub midnight: Option<Midnight>,
    pub dhuhr_minutes: Option<f64>,
    pub imsak_minutes: Option<f64>,
    pub refine: bool,
    pub format: TimeFormat,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_level: String,
    pub tuning: TuningOffsets,
    pub calendar: CalendarSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            method: "MWL".into(),
            asr: None,
            high_lats: None,
            midnight: None,
            dhuhr_minutes: None,
            imsak_minutes: None,
            refine: EngineOptions::default().refine,
            format: TimeFormat::default(),
            log_level: "warn".into(),
            tuning: TuningOffsets::default(),
            calendar: CalendarSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Delay between two event submissions.
    pub pacing_secs: u64,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self { pacing_secs: 15 }
    }
}

impl CalendarSettings {
    pub fn pacing(&self) -> Duration {
        Duration::from_secs(self.pacing_secs)
    }
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            imsak: self.imsak_minutes.map(Rule::Minutes),
            dhuhr_minutes: self.dhuhr_minutes,
            asr: self.asr,
            midnight: self.midnight,
            high_lats: self.high_lats,
            ..Default::default()
        }
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            refine: self.refine,
        }
    }
}
