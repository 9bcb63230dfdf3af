//! Calendar events built from computed prayer times, and paced submission
//! of those events to a calendar backend.

use std::io::Write;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::Computed;
use crate::error::SinkError;
use crate::times::PrayerTime;

pub const EVENT_DURATION_MINUTES: i64 = 30;
pub const REMINDER_MINUTES: u32 = 7;
/// Sage green in Google Calendar's palette.
pub const COLOR_ID: &str = "2";

/// Event record in the shape the Google Calendar v3 API accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    pub reminders: Reminders,
    pub color_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    /// RFC 3339 timestamp carrying the query's UTC offset.
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

fn offset_minutes(timezone: f64) -> i32 {
    (timezone * 60.0).round() as i32
}

/// `GMT+03:00` style label for a timezone offset in hours.
pub fn timezone_label(timezone: f64) -> String {
    let minutes = offset_minutes(timezone);
    let sign = if minutes < 0 { '-' } else { '+' };
    let minutes = minutes.abs();
    format!("GMT{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

fn utc_offset(timezone: f64) -> Option<FixedOffset> {
    FixedOffset::east_opt(offset_minutes(timezone) * 60)
}

/// Start of the minute `time` rounds to, on the computed date. Hours past 24
/// or below 0 land on the neighbouring day.
fn event_start(computed: &Computed, hours: f64) -> Option<DateTime<FixedOffset>> {
    let offset = utc_offset(computed.timezone)?;
    let minutes = (hours * 60.0).round() as i64;
    let local = computed
        .date
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::try_minutes(minutes)?)?;
    local.and_local_timezone(offset).single()
}

/// One event per available entry of a computed day.
pub fn events_for_day(computed: &Computed) -> Vec<CalendarEvent> {
    let label = timezone_label(computed.timezone);
    computed
        .times
        .iter()
        .filter_map(|(prayer, time)| {
            let PrayerTime::At(hours) = time else {
                return None;
            };
            let start = event_start(computed, hours)?;
            let end = start + TimeDelta::minutes(EVENT_DURATION_MINUTES);
            Some(CalendarEvent {
                summary: prayer.name().to_string(),
                start: EventTime {
                    date_time: start.to_rfc3339(),
                    time_zone: label.clone(),
                },
                end: EventTime {
                    date_time: end.to_rfc3339(),
                    time_zone: label.clone(),
                },
                reminders: Reminders {
                    use_default: false,
                    overrides: vec![ReminderOverride {
                        method: "popup".into(),
                        minutes: REMINDER_MINUTES,
                    }],
                },
                color_id: COLOR_ID.into(),
            })
        })
        .collect()
}

/// Destination for calendar events. Implementations own transport and
/// credentials.
pub trait CalendarSink {
    /// Create one event and return its identifier.
    fn insert(&mut self, event: &CalendarEvent) -> Result<String, SinkError>;
}

/// Writes each event as one JSON line, for dry runs and piping into other
/// tools.
pub struct JsonLinesSink<W> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CalendarSink for JsonLinesSink<W> {
    fn insert(&mut self, event: &CalendarEvent) -> Result<String, SinkError> {
        let line =
            serde_json::to_string(event).map_err(|e| SinkError::Rejected(e.to_string()))?;
        writeln!(self.writer, "{line}").map_err(|e| SinkError::Unavailable(e.to_string()))?;
        self.written += 1;
        Ok(format!("line-{}", self.written))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    pub summary: String,
    pub start: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedEvent {
    pub summary: String,
    pub start: String,
    pub error: SinkError,
}

/// Per-event outcome of a submission batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: Vec<CreatedEvent>,
    pub failed: Vec<FailedEvent>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Submit events one at a time, waiting `pacing` between requests to stay
/// under the backend's rate limit. Failures are recorded and the batch
/// carries on; nothing is retried.
pub fn submit_paced<S: CalendarSink>(
    sink: &mut S,
    events: &[CalendarEvent],
    pacing: Duration,
) -> SyncReport {
    let mut report = SyncReport::default();
    for (i, event) in events.iter().enumerate() {
        if i > 0 && !pacing.is_zero() {
            thread::sleep(pacing);
        }
        match sink.insert(event) {
            Ok(id) => {
                info!(summary = %event.summary, start = %event.start.date_time, %id, "event created");
                report.created.push(CreatedEvent {
                    summary: event.summary.clone(),
                    start: event.start.date_time.clone(),
                    id,
                });
            }
            Err(error) => {
                warn!(summary = %event.summary, start = %event.start.date_time, %error, "event failed");
                report.failed.push(FailedEvent {
                    summary: event.summary.clone(),
                    start: event.start.date_time.clone(),
                    error,
                });
            }
        }
    }
    report
}
