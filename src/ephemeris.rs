//! Low-precision solar ephemeris.
//!
//! Declination and equation of time from the short series published at
//! praytimes.org/calculation: good to about an arc-minute, which is plenty
//! for civil prayer times.

use chrono::{Datelike, NaiveDate};

use crate::math::{darcsin, darctan2, dcos, dsin, fix_angle, fix_hour};

/// Julian day of the J2000.0 epoch.
const J2000: f64 = 2451545.0;

/// Sun position at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Solar declination in degrees.
    pub declination: f64,
    /// Equation of time in hours (apparent minus mean solar time).
    pub equation_of_time: f64,
}

/* compute declination angle of sun and equation of time */
pub fn sun_position(jd: f64) -> SunPosition {
    let d = jd - J2000;
    let g = fix_angle(357.529 + 0.98560028 * d);
    let q = fix_angle(280.459 + 0.98564736 * d);
    let l = fix_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2. * g));

    let e = 23.439 - 0.00000036 * d;

    let declination = darcsin(dsin(e) * dsin(l));
    let ra = fix_hour(darctan2(dcos(e) * dsin(l), dcos(l)) / 15.0);

    // mean longitude and right ascension wrap independently
    let mut equation_of_time = q / 15.0 - ra;
    if equation_of_time > 12.0 {
        equation_of_time -= 24.0;
    } else if equation_of_time < -12.0 {
        equation_of_time += 24.0;
    }

    SunPosition {
        declination,
        equation_of_time,
    }
}

/// Julian day at 0h UT of a Gregorian calendar date.
pub fn julian_day(date: NaiveDate) -> f64 {
    let (mut year, mut month) = (date.year() as f64, date.month() as f64);
    if month <= 2. {
        year -= 1.;
        month += 12.;
    }

    let a = (year / 100.).floor();
    let b = 2. - a + (a / 4.).floor();

    (365.25 * (year + 4716.)).floor() + (30.6001 * (month + 1.)).floor() + date.day() as f64 + b
        - 1524.5
}
