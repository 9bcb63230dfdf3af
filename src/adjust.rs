//! Turns solved hour angles into local clock times.

use crate::math::{fix_hour, time_diff};
use crate::method::{Midnight, Parameters, Rule};
use crate::solver::HourAngle;
use crate::times::{Prayer, PrayerTime, PrayerTimes, TuningOffsets};

/// Events located directly from the sun, in canonical order. Midnight is
/// derived from the others.
pub(crate) const SOLAR_EVENTS: [Prayer; 8] = [
    Prayer::Imsak,
    Prayer::Fajr,
    Prayer::Sunrise,
    Prayer::Dhuhr,
    Prayer::Asr,
    Prayer::Sunset,
    Prayer::Maghrib,
    Prayer::Isha,
];

/// Solver output for a single event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventSolution {
    /// Equation of time in hours at the instant the event was solved for.
    pub equation_of_time: f64,
    /// Offset from solar noon. Dhuhr is always `Valid(0.0)`; events placed
    /// by a minute rule carry `NoSolution` until adjustment.
    pub hour_angle: HourAngle,
}

impl EventSolution {
    /// Apparent solar noon in local mean time at the observer's meridian.
    fn noon(self) -> f64 {
        fix_hour(12.0 - self.equation_of_time)
    }

    /// Unshifted clock hours for `prayer`, if the sun reaches it.
    pub(crate) fn solar_time(self, prayer: Prayer) -> Option<f64> {
        let offset = self.hour_angle.hours()?;
        Some(if prayer.is_morning() {
            self.noon() - offset
        } else {
            self.noon() + offset
        })
    }
}

/// Solver output for every event in [`SOLAR_EVENTS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarEvents {
    entries: [EventSolution; SOLAR_EVENTS.len()],
}

impl SolarEvents {
    pub fn new(entries: [EventSolution; SOLAR_EVENTS.len()]) -> Self {
        Self { entries }
    }

    pub fn get(&self, prayer: Prayer) -> Option<EventSolution> {
        SOLAR_EVENTS
            .iter()
            .position(|p| *p == prayer)
            .map(|i| self.entries[i])
    }
}

/// Clock-time stage of a computation: everything after the astronomy.
#[derive(Debug, Clone, Copy)]
pub struct Adjustment<'a> {
    pub params: &'a Parameters,
    pub tuning: &'a TuningOffsets,
    pub longitude: f64,
    pub timezone: f64,
}

/// Working table indexed by `Prayer as usize`.
type Clock = [Option<f64>; Prayer::COUNT];

impl Adjustment<'_> {
    pub fn apply(&self, events: &SolarEvents) -> PrayerTimes {
        let mut clock: Clock = [None; Prayer::COUNT];

        let shift = self.timezone - self.longitude / 15.0;
        for prayer in SOLAR_EVENTS {
            clock[prayer as usize] = events
                .get(prayer)
                .and_then(|e| e.solar_time(prayer))
                .map(|t| t + shift);
        }

        self.adjust_high_lats(&mut clock);
        self.apply_minute_rules(&mut clock);

        if let Some(dhuhr) = clock[Prayer::Dhuhr as usize].as_mut() {
            *dhuhr += self.params.dhuhr_minutes / 60.0;
        }

        clock[Prayer::Midnight as usize] = self.midnight(&clock);

        let mut times = [PrayerTime::Unavailable; Prayer::COUNT];
        for prayer in Prayer::ALL {
            times[prayer as usize] = PrayerTime::from_hours(clock[prayer as usize])
                .shift_minutes(self.tuning.get(prayer));
        }
        PrayerTimes::new(times)
    }

    /* adjust twilight times for locations in higher latitudes */
    fn adjust_high_lats(&self, clock: &mut Clock) {
        let (Some(sunrise), Some(sunset)) = (
            clock[Prayer::Sunrise as usize],
            clock[Prayer::Sunset as usize],
        ) else {
            return;
        };
        let night = time_diff(sunset, sunrise);

        let p = self.params;
        let rules = [
            (Prayer::Imsak, p.imsak.angle(), sunrise, true),
            (Prayer::Fajr, Some(p.fajr), sunrise, true),
            (Prayer::Isha, p.isha.angle(), sunset, false),
            (Prayer::Maghrib, p.maghrib.angle(), sunset, false),
        ];
        for (prayer, angle, base, before_base) in rules {
            let Some(angle) = angle else {
                continue;
            };
            let Some(portion) = p.high_lats.night_portion(angle) else {
                continue;
            };
            let portion = portion * night;
            let slot = &mut clock[prayer as usize];

            let too_far = match *slot {
                None => true,
                Some(time) if before_base => time_diff(time, base) > portion,
                Some(time) => time_diff(base, time) > portion,
            };
            if too_far {
                *slot = Some(if before_base {
                    base - portion
                } else {
                    base + portion
                });
            }
        }
    }

    /* place events defined as a delay from another event */
    fn apply_minute_rules(&self, clock: &mut Clock) {
        if let Rule::Minutes(m) = self.params.imsak {
            clock[Prayer::Imsak as usize] = clock[Prayer::Fajr as usize].map(|t| t - m / 60.0);
        }
        if let Rule::Minutes(m) = self.params.maghrib {
            clock[Prayer::Maghrib as usize] =
                clock[Prayer::Sunset as usize].map(|t| t + m / 60.0);
        }
        if let Rule::Minutes(m) = self.params.isha {
            clock[Prayer::Isha as usize] = clock[Prayer::Maghrib as usize].map(|t| t + m / 60.0);
        }
    }

    fn midnight(&self, clock: &Clock) -> Option<f64> {
        let sunset = clock[Prayer::Sunset as usize]?;
        let end = match self.params.midnight {
            Midnight::Standard => clock[Prayer::Sunrise as usize]?,
            Midnight::Jafari => clock[Prayer::Fajr as usize]?,
        };
        Some(sunset + time_diff(sunset, end) / 2.0)
    }
}
