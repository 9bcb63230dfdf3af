/*-------------------------- In the name of God ----------------------------*\

    praytimes (rust)
    Islamic prayer times engine and calendar shell
    Based on prayer_times (rust) by Nbiba Bedis
    Based on PrayTimes 2.3 JavaScript library

----------------------------- Copyright Block --------------------------------

Copyright (C) 2007-2011 PrayTimes.org

Based on Rust Code By: Nbiba Bedis <bedis at nbiba at gmail dot com>
Based on a JavaScript Code By: Hamid Zarrabi-Zadeh

License: GNU GPL v3.0

TERMS OF USE:
    Permission is granted to use this code, with or
    without modification, in any website or application
    provided that credit is given to the original work
    with a link back to PrayTimes.org.

This program is distributed in the hope that it will
be useful, but WITHOUT ANY WARRANTY.

PLEASE DO NOT REMOVE THIS COPYRIGHT BLOCK.

------------------------------------------------------------------------------

User's Manual:
http://praytimes.org/manual

Calculating Formulas:
http://praytimes.org/calculation

\*--------------------------------------------------------------------------*/

//! Islamic prayer times.
//!
//! [`PrayerTimesEngine::compute`] turns a method name, coordinates, a date and
//! a UTC offset into the nine daily times from Imsak to Midnight. The engine
//! is a pure function of its [`Query`]: no I/O, no shared mutable state, so
//! days can be computed in parallel.
//!
//! ```
//! use chrono::NaiveDate;
//! use praytimes::{Coordinates, Prayer, PrayerTimesEngine, Query, TimeFormat};
//!
//! let date = NaiveDate::from_ymd_opt(2022, 11, 27).unwrap();
//! let query = Query::new("MWL", Coordinates::new(36., 10.), date, 1.);
//! let computed = PrayerTimesEngine::default().compute(&query);
//! assert_eq!(computed.times[Prayer::Dhuhr].format(TimeFormat::H24), "12:08");
//! ```
//!
//! The [`api`] and [`calendar`] modules hold the shell around the engine:
//! request validation, JSON bodies and calendar events.

mod adjust;
pub mod api;
pub mod calendar;
pub mod config;
pub mod easy;
mod engine;
pub mod ephemeris;
pub mod error;
mod math;
mod method;
pub mod solver;
mod times;

pub use adjust::{Adjustment, EventSolution, SolarEvents};
pub use engine::{Computed, Coordinates, EngineOptions, PrayerTimesEngine, Query, RISE_SET_ANGLE};
pub use error::{Error, Result};
pub use math::fix_hour;
pub use method::{
    AsrFactor, HighLatitudeRule, Method, MethodRegistry, Midnight, ParameterOverrides, Parameters,
    Rule,
};
pub use times::{
    float_time_to_time24, Prayer, PrayerTime, PrayerTimes, TimeFormat, TuningOffsets,
    INVALID_TIME,
};
