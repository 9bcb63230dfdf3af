//! Error types.
//!
//! The engine itself has no error path: unknown methods fall back to the
//! default and astronomical gaps are carried as `PrayerTime::Unavailable`.
//! Everything here belongs to the shell around it.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-level error returned by the shell and the command line.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Method(#[from] MethodError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected location or date parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("{field} must be a number, got '{value}'")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Strict parsing of method names and method settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MethodError {
    #[error("unknown calculation method '{0}'")]
    UnknownMethod(String),

    #[error("unknown {setting} '{value}'")]
    UnknownSetting { setting: &'static str, value: String },
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure reported by a calendar backend for a single event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("calendar rejected event: {0}")]
    Rejected(String),

    #[error("calendar unreachable: {0}")]
    Unavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
