//! Prayer names, computed times and their display formats.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MethodError;
use crate::math::fix_hour;

/// Display sentinel for a time the sun never reaches.
pub const INVALID_TIME: &str = "-----";

/// The canonical daily sequence, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    Imsak,
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
    Midnight,
}

impl Prayer {
    pub const COUNT: usize = 9;

    pub const ALL: [Prayer; Prayer::COUNT] = [
        Prayer::Imsak,
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Sunset,
        Prayer::Maghrib,
        Prayer::Isha,
        Prayer::Midnight,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Imsak => "Imsak",
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Sunset => "Sunset",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
            Self::Midnight => "Midnight",
        }
    }

    /// Events before solar noon, solved as noon minus an hour angle.
    pub const fn is_morning(self) -> bool {
        matches!(self, Self::Imsak | Self::Fajr | Self::Sunrise)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One resolved entry of a day's schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrayerTime {
    /// Local clock hours. Not reduced to `[0, 24)`: an Isha after midnight
    /// reads `24.3`, which keeps entries comparable within a day.
    At(f64),
    Unavailable,
}

impl PrayerTime {
    pub fn hours(self) -> Option<f64> {
        match self {
            Self::At(hours) => Some(hours),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Self::At(_))
    }

    pub(crate) fn from_hours(hours: Option<f64>) -> Self {
        match hours {
            Some(h) if h.is_finite() => Self::At(h),
            _ => Self::Unavailable,
        }
    }

    pub(crate) fn shift_minutes(self, minutes: f64) -> Self {
        match self {
            Self::At(h) => Self::At(h + minutes / 60.0),
            Self::Unavailable => Self::Unavailable,
        }
    }

    pub fn format(self, format: TimeFormat) -> String {
        match self {
            Self::At(h) => format_time(h, format),
            Self::Unavailable => INVALID_TIME.into(),
        }
    }
}

/// Clock style for formatted output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `05:07`
    #[default]
    #[serde(rename = "24h")]
    H24,
    /// `5:07 am`
    #[serde(rename = "12h")]
    H12,
    /// `5:07`
    #[serde(rename = "12hNS")]
    H12NoSuffix,
}

impl FromStr for TimeFormat {
    type Err = MethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Self::H24),
            "12h" => Ok(Self::H12),
            "12hNS" | "12hns" => Ok(Self::H12NoSuffix),
            _ => Err(MethodError::UnknownSetting {
                setting: "time format",
                value: s.to_string(),
            }),
        }
    }
}

/* convert float hours to 24h format */
pub fn float_time_to_time24(time: f64) -> String {
    format_time(time, TimeFormat::H24)
}

fn format_time(time: f64, format: TimeFormat) -> String {
    if !time.is_finite() {
        return INVALID_TIME.into();
    }
    let (hours, minutes) = get_float_time_parts(time);
    match format {
        TimeFormat::H24 => format!("{:02}:{:02}", hours, minutes),
        TimeFormat::H12 => {
            let suffix = if hours < 12 { "am" } else { "pm" };
            format!("{}:{:02} {}", (hours + 11) % 12 + 1, minutes, suffix)
        }
        TimeFormat::H12NoSuffix => format!("{}:{:02}", (hours + 11) % 12 + 1, minutes),
    }
}

/* get hours and minutes parts of a float time */
fn get_float_time_parts(time: f64) -> (u32, u32) {
    let time = fix_hour(time + 0.5 / 60.); // add 0.5 minutes to round
    let hours = time.floor();
    let minutes = ((time - hours) * 60.).floor();
    (hours as u32, (minutes as u32).min(59))
}

/// A full day's schedule over the canonical sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerTimes {
    times: [PrayerTime; Prayer::COUNT],
}

impl PrayerTimes {
    pub(crate) fn new(times: [PrayerTime; Prayer::COUNT]) -> Self {
        Self { times }
    }

    pub fn get(&self, prayer: Prayer) -> PrayerTime {
        self.times[prayer.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, PrayerTime)> + '_ {
        Prayer::ALL.into_iter().zip(self.times.iter().copied())
    }

    /// Every entry that could not be resolved. Any of them may be missing,
    /// not only Fajr and Isha.
    pub fn unavailable(&self) -> Vec<Prayer> {
        self.iter()
            .filter(|(_, time)| !time.is_available())
            .map(|(prayer, _)| prayer)
            .collect()
    }

    /// Whether the available entries among `prayers` never go backwards.
    pub fn is_chronological(&self, prayers: &[Prayer]) -> bool {
        let hours: Vec<f64> = prayers.iter().filter_map(|p| self.get(*p).hours()).collect();
        hours.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn formatted(&self, format: TimeFormat) -> Vec<(Prayer, String)> {
        self.iter().map(|(p, t)| (p, t.format(format))).collect()
    }
}

impl Index<Prayer> for PrayerTimes {
    type Output = PrayerTime;

    fn index(&self, prayer: Prayer) -> &PrayerTime {
        &self.times[prayer.index()]
    }
}

/// Per-prayer minute corrections applied after everything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningOffsets {
    pub imsak: f64,
    pub fajr: f64,
    pub sunrise: f64,
    pub dhuhr: f64,
    pub asr: f64,
    pub sunset: f64,
    pub maghrib: f64,
    pub isha: f64,
    pub midnight: f64,
}

impl TuningOffsets {
    pub fn get(&self, prayer: Prayer) -> f64 {
        match prayer {
            Prayer::Imsak => self.imsak,
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Sunset => self.sunset,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
            Prayer::Midnight => self.midnight,
        }
    }

    pub fn with(mut self, prayer: Prayer, minutes: f64) -> Self {
        let slot = match prayer {
            Prayer::Imsak => &mut self.imsak,
            Prayer::Fajr => &mut self.fajr,
            Prayer::Sunrise => &mut self.sunrise,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Sunset => &mut self.sunset,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
            Prayer::Midnight => &mut self.midnight,
        };
        *slot = minutes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest_minute() {
        assert_eq!(float_time_to_time24(5.0 + 29.6 / 3600.0), "05:00");
        assert_eq!(float_time_to_time24(5.0 + 45.0 / 3600.0), "05:01");
        assert_eq!(float_time_to_time24(23.999), "00:00");
    }

    #[test]
    fn wraps_unreduced_hours() {
        assert_eq!(PrayerTime::At(24.5).format(TimeFormat::H24), "00:30");
        assert_eq!(PrayerTime::At(-0.25).format(TimeFormat::H24), "23:45");
    }

    #[test]
    fn twelve_hour_formats() {
        assert_eq!(PrayerTime::At(0.25).format(TimeFormat::H12), "12:15 am");
        assert_eq!(PrayerTime::At(12.0).format(TimeFormat::H12), "12:00 pm");
        assert_eq!(PrayerTime::At(17.5).format(TimeFormat::H12NoSuffix), "5:30");
    }

    #[test]
    fn unavailable_is_sentinel() {
        assert_eq!(PrayerTime::Unavailable.format(TimeFormat::H12), INVALID_TIME);
        assert_eq!(float_time_to_time24(f64::NAN), INVALID_TIME);
    }

    #[test]
    fn chronology_skips_missing_entries() {
        let mut times = [PrayerTime::At(0.0); Prayer::COUNT];
        for (i, t) in times.iter_mut().enumerate() {
            *t = PrayerTime::At(i as f64 + 4.0);
        }
        times[Prayer::Fajr as usize] = PrayerTime::Unavailable;
        let times = PrayerTimes::new(times);
        assert!(times.is_chronological(&Prayer::ALL));
        assert_eq!(times.unavailable(), vec![Prayer::Fajr]);
        assert_eq!(times[Prayer::Sunrise], PrayerTime::At(6.0));
    }

    #[test]
    fn tuning_builder() {
        let tuning = TuningOffsets::default().with(Prayer::Isha, 5.0);
        assert_eq!(tuning.get(Prayer::Isha), 5.0);
        assert_eq!(tuning.get(Prayer::Fajr), 0.0);
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("12hNS".parse::<TimeFormat>(), Ok(TimeFormat::H12NoSuffix));
        assert!("36h".parse::<TimeFormat>().is_err());
    }
}
