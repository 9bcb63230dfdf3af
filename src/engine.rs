//! Prayer times facade: one query in, one day's schedule out.

use chrono::{Days, NaiveDate};
use rayon::prelude::*;
use tracing::trace;

use crate::adjust::{Adjustment, EventSolution, SolarEvents, SOLAR_EVENTS};
use crate::ephemeris::{julian_day, sun_position, SunPosition};
use crate::method::{Method, MethodRegistry, ParameterOverrides, Parameters, Rule};
use crate::solver::{asr_hour_angle, hour_angle, HourAngle};
use crate::times::{Prayer, PrayerTimes, TuningOffsets};

/// Sun depression at sunrise and sunset: refraction plus the solar radius.
pub const RISE_SET_ANGLE: f64 = 0.833;

/// Starting guesses, in hours, for events the first pass could not place.
const DEFAULT_TIMES: [f64; SOLAR_EVENTS.len()] = [5., 5., 6., 12., 13., 18., 18., 18.];

/// Observer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Degrees, north positive. Range: [-90, 90].
    pub latitude: f64,
    /// Degrees, east positive. Range: [-180, 180].
    pub longitude: f64,
    /// Metres above sea level. Lowers the visible horizon.
    pub elevation: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: 0.0,
        }
    }

    pub fn with_elevation(self, elevation: f64) -> Self {
        Self { elevation, ..self }
    }

    fn rise_set_angle(&self) -> f64 {
        RISE_SET_ANGLE + 0.0347 * self.elevation.max(0.0).sqrt()
    }
}

/// Everything one computation depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query<'a> {
    /// Method name; unknown names fall back to the default method.
    pub method: &'a str,
    pub overrides: ParameterOverrides,
    pub tuning: TuningOffsets,
    pub coordinates: Coordinates,
    pub date: NaiveDate,
    /// Hours east of UTC, fractions allowed.
    pub timezone: f64,
}

impl<'a> Query<'a> {
    pub fn new(method: &'a str, coordinates: Coordinates, date: NaiveDate, timezone: f64) -> Self {
        Self {
            method,
            overrides: ParameterOverrides::default(),
            tuning: TuningOffsets::default(),
            coordinates,
            date,
            timezone,
        }
    }

    pub fn with_overrides(self, overrides: ParameterOverrides) -> Self {
        Self { overrides, ..self }
    }

    pub fn with_tuning(self, tuning: TuningOffsets) -> Self {
        Self { tuning, ..self }
    }

    pub fn on(self, date: NaiveDate) -> Self {
        Self { date, ..self }
    }
}

/// One computed day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Computed {
    /// The method actually used, which differs from the requested name
    /// when that name was not recognized.
    pub method: Method,
    pub date: NaiveDate,
    pub timezone: f64,
    pub coordinates: Coordinates,
    pub times: PrayerTimes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Re-solve each event with the sun's position at its first-pass time
    /// instead of at solar noon.
    pub refine: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { refine: true }
    }
}

/// Stateless prayer times calculator. Cheap to copy and safe to share
/// between threads.
#[derive(Debug, Clone, Copy)]
pub struct PrayerTimesEngine {
    registry: &'static MethodRegistry,
    options: EngineOptions,
}

impl Default for PrayerTimesEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl PrayerTimesEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            registry: MethodRegistry::global(),
            options,
        }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn compute(&self, query: &Query) -> Computed {
        let (method, preset) = self.registry.lookup(query.method);
        let params = preset.with_overrides(&query.overrides);
        trace!(%method, date = %query.date, "computing prayer times");

        let events = self.solve_day(&params, query.coordinates, query.date);
        let times = Adjustment {
            params: &params,
            tuning: &query.tuning,
            longitude: query.coordinates.longitude,
            timezone: query.timezone,
        }
        .apply(&events);

        Computed {
            method,
            date: query.date,
            timezone: query.timezone,
            coordinates: query.coordinates,
            times,
        }
    }

    /// `days` consecutive dates starting at `query.date`, computed in
    /// parallel and returned in date order.
    pub fn compute_days(&self, query: &Query, days: u32) -> Vec<Computed> {
        (0..days)
            .into_par_iter()
            .filter_map(|offset| query.date.checked_add_days(Days::new(u64::from(offset))))
            .map(|date| self.compute(&query.on(date)))
            .collect()
    }

    /// Same as [`compute_days`](Self::compute_days) on the calling thread.
    pub fn compute_days_sequential(&self, query: &Query, days: u32) -> Vec<Computed> {
        (0..days)
            .filter_map(|offset| query.date.checked_add_days(Days::new(u64::from(offset))))
            .map(|date| self.compute(&query.on(date)))
            .collect()
    }

    fn solve_day(&self, params: &Parameters, coords: Coordinates, date: NaiveDate) -> SolarEvents {
        // local solar midnight at the observer's meridian
        let jd = julian_day(date) - coords.longitude / (15. * 24.);

        let noon = sun_position(jd + 0.5);
        let first = solve_events(params, coords, |_| noon);
        if !self.options.refine {
            return first;
        }

        let mut estimates = DEFAULT_TIMES;
        for (i, prayer) in SOLAR_EVENTS.into_iter().enumerate() {
            if let Some(t) = first.get(prayer).and_then(|e| e.solar_time(prayer)) {
                estimates[i] = t;
            }
        }
        solve_events(params, coords, |i| sun_position(jd + estimates[i] / 24.))
    }
}

/* compute hour angles of every solar event */
fn solve_events(
    params: &Parameters,
    coords: Coordinates,
    position_at: impl Fn(usize) -> SunPosition,
) -> SolarEvents {
    let lat = coords.latitude;
    let by_rule = |rule: Rule, declination: f64| match rule {
        Rule::Angle(angle) => hour_angle(lat, declination, angle),
        Rule::Minutes(_) => HourAngle::NoSolution,
    };

    let entries = std::array::from_fn(|i| {
        let sun = position_at(i);
        let d = sun.declination;
        let offset = match SOLAR_EVENTS[i] {
            Prayer::Imsak => by_rule(params.imsak, d),
            Prayer::Fajr => hour_angle(lat, d, params.fajr),
            Prayer::Sunrise | Prayer::Sunset => hour_angle(lat, d, coords.rise_set_angle()),
            Prayer::Dhuhr => HourAngle::Valid(0.0),
            Prayer::Asr => asr_hour_angle(lat, d, params.asr.shadow_factor()),
            Prayer::Maghrib => by_rule(params.maghrib, d),
            Prayer::Isha => by_rule(params.isha, d),
            Prayer::Midnight => HourAngle::NoSolution,
        };
        EventSolution {
            equation_of_time: sun.equation_of_time,
            hour_angle: offset,
        }
    });
    SolarEvents::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::{AsrFactor, HighLatitudeRule};
    use crate::times::{PrayerTime, TimeFormat};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn minutes(time: PrayerTime) -> f64 {
        time.hours().expect("time should be available") * 60.0
    }

    #[test]
    fn test_times() {
        let engine = PrayerTimesEngine::default();
        let query = Query::new("MWL", Coordinates::new(36., 10.), date(2022, 11, 27), 1.);
        let computed = engine.compute(&query);
        let formatted: Vec<String> = computed
            .times
            .formatted(TimeFormat::H24)
            .into_iter()
            .map(|(_, t)| t)
            .collect();
        assert_eq!(
            &formatted[..8],
            ["05:28", "05:38", "07:08", "12:08", "14:48", "17:07", "17:07", "18:32"]
        );
    }

    #[test]
    fn refinement_moves_times_by_seconds() {
        let query = Query::new("MWL", Coordinates::new(43., -80.), date(2011, 2, 9), -5.);
        let refined = PrayerTimesEngine::default().compute(&query);
        let single = PrayerTimesEngine::new(EngineOptions { refine: false }).compute(&query);
        for prayer in Prayer::ALL {
            let delta = minutes(refined.times[prayer]) - minutes(single.times[prayer]);
            assert!(delta.abs() < 1.0, "{prayer}: {delta} min");
        }
    }

    #[test]
    fn elevation_widens_the_day() {
        let coords = Coordinates::new(21.4225, 39.8262);
        let sea = PrayerTimesEngine::default().compute(&Query::new("MWL", coords, date(2024, 3, 15), 3.));
        let hill = PrayerTimesEngine::default().compute(&Query::new(
            "MWL",
            coords.with_elevation(900.),
            date(2024, 3, 15),
            3.,
        ));
        assert!(hill.times[Prayer::Sunrise].hours() < sea.times[Prayer::Sunrise].hours());
        assert!(hill.times[Prayer::Sunset].hours() > sea.times[Prayer::Sunset].hours());
        assert_eq!(hill.times[Prayer::Dhuhr], sea.times[Prayer::Dhuhr]);
    }

    #[test]
    fn overrides_apply_per_query_only() {
        let engine = PrayerTimesEngine::default();
        let base = Query::new("MWL", Coordinates::new(36., 10.), date(2022, 11, 27), 1.);
        let hanafi = base.with_overrides(ParameterOverrides {
            asr: Some(AsrFactor::Hanafi),
            ..Default::default()
        });

        let first = engine.compute(&base);
        let with_override = engine.compute(&hanafi);
        let after = engine.compute(&base);
        assert!(minutes(with_override.times[Prayer::Asr]) > minutes(first.times[Prayer::Asr]));
        assert_eq!(first, after);
    }

    #[test]
    fn reykjavik_summer_solstice() {
        let query = Query::new("MWL", Coordinates::new(64.1466, -21.9426), date(2024, 6, 21), 0.);

        let none = PrayerTimesEngine::default().compute(&query.with_overrides(ParameterOverrides {
            high_lats: Some(HighLatitudeRule::None),
            ..Default::default()
        }));
        assert_eq!(none.times[Prayer::Fajr], PrayerTime::Unavailable);
        assert_eq!(none.times[Prayer::Isha], PrayerTime::Unavailable);
        assert_eq!(none.times[Prayer::Imsak], PrayerTime::Unavailable);
        assert!(none.times[Prayer::Sunrise].is_available());

        let middle = PrayerTimesEngine::default().compute(&query);
        let sunset = minutes(middle.times[Prayer::Sunset]);
        let isha = minutes(middle.times[Prayer::Isha]);
        let midnight = minutes(middle.times[Prayer::Midnight]);
        assert_eq!(isha, midnight);
        assert!(isha > sunset);
    }

    #[test]
    fn dhuhr_is_never_unavailable() {
        let engine = PrayerTimesEngine::default();
        let polar = engine.compute(&Query::new("MWL", Coordinates::new(80., 0.), date(2024, 12, 21), 0.));
        assert!(polar.times[Prayer::Dhuhr].is_available());
        assert_eq!(polar.times[Prayer::Sunrise], PrayerTime::Unavailable);
        assert_eq!(polar.times[Prayer::Midnight], PrayerTime::Unavailable);
    }

    #[test]
    fn batch_is_date_ordered() {
        let query = Query::new("ISNA", Coordinates::new(40.7, -74.0), date(2024, 12, 29), -5.);
        let week = PrayerTimesEngine::default().compute_days(&query, 7);
        let dates: Vec<_> = week.iter().map(|c| c.date).collect();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], date(2024, 12, 29));
        assert_eq!(dates[6], date(2025, 1, 4));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }
}
