//! Request parsing and JSON response bodies for an HTTP front end.
//!
//! Partial results are successful responses: entries the sun never reaches
//! read `-----` and are listed under `unavailable`. Only malformed input
//! produces an error status.

use chrono::NaiveDate;
use serde::Serialize;

use crate::easy::EasyTimes24;
use crate::engine::{Computed, Coordinates};
use crate::error::QueryError;
use crate::times::Prayer;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Validated location parameters of a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub coordinates: Coordinates,
    pub timezone: f64,
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, QueryError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QueryError::NotNumeric {
            field,
            value: value.to_string(),
        })
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, QueryError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(QueryError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Validate latitude, longitude and timezone as they arrive in a path or
/// query string.
pub fn parse_location(lat: &str, lng: &str, timezone: &str) -> Result<Location, QueryError> {
    let latitude = check_range("latitude", parse_number("latitude", lat)?, -90.0, 90.0)?;
    let longitude = check_range("longitude", parse_number("longitude", lng)?, -180.0, 180.0)?;
    let timezone = check_range("timezone", parse_number("timezone", timezone)?, -12.0, 14.0)?;
    Ok(Location {
        coordinates: Coordinates::new(latitude, longitude),
        timezone,
    })
}

/// Parse an ISO `YYYY-MM-DD` date parameter.
pub fn parse_date(value: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| QueryError::InvalidDate(value.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinatesBody {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of a successful prayer times response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesResponse {
    pub date: NaiveDate,
    pub status: u16,
    pub timezone: f64,
    pub method: String,
    pub coordinates: CoordinatesBody,
    pub times: EasyTimes24,
    pub unavailable: Vec<Prayer>,
}

impl From<&Computed> for TimesResponse {
    fn from(computed: &Computed) -> Self {
        Self {
            date: computed.date,
            status: STATUS_OK,
            timezone: computed.timezone,
            method: computed.method.to_string(),
            coordinates: CoordinatesBody {
                latitude: computed.coordinates.latitude,
                longitude: computed.coordinates.longitude,
            },
            times: computed.times.to_easy24(),
            unavailable: computed.times.unavailable(),
        }
    }
}

/// Body of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
}

impl From<&QueryError> for ErrorResponse {
    fn from(err: &QueryError) -> Self {
        Self {
            status: STATUS_BAD_REQUEST,
            error: err.to_string(),
        }
    }
}
