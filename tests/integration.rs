#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use nanoserde::DeJson;
    use proptest::prelude::*;

    use praytimes::api::{parse_location, TimesResponse};
    use praytimes::ephemeris::sun_position;
    use praytimes::{
        AsrFactor, Coordinates, HighLatitudeRule, Method, ParameterOverrides, Prayer, PrayerTime,
        PrayerTimesEngine, Query,
    };

    const DAYTIME: [Prayer; 7] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Sunset,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn minutes(time: PrayerTime) -> f64 {
        time.hours().expect("time should be available") * 60.0
    }

    fn with_high_lats(rule: HighLatitudeRule) -> ParameterOverrides {
        ParameterOverrides {
            high_lats: Some(rule),
            ..Default::default()
        }
    }

    proptest! {
    #[test]
    fn times_are_chronological(
        year in 1900..2100i32, month in 1..=12u32, day in 1..=28u32,
        lat in -59.9..59.9f64, lng in -180.0..180.0f64, quarter_hours in -48..56i32,
    ) {
        let query = Query::new("MWL", Coordinates::new(lat, lng), date(year, month, day), quarter_hours as f64 / 4.);
        let computed = PrayerTimesEngine::default().compute(&query);
        prop_assert!(computed.times.is_chronological(&DAYTIME), "{:?}", computed);
        prop_assert!(computed.times.is_chronological(&[Prayer::Imsak, Prayer::Fajr]));
    }

    #[test]
    fn ephemeris_is_deterministic(jd in 2_415_020.0..2_488_070.0f64) {
        prop_assert_eq!(sun_position(jd), sun_position(jd));
    }

    #[test]
    fn hanafi_asr_is_never_earlier(
        year in 1950..2050i32, month in 1..=12u32, day in 1..=28u32,
        lat in -58.0..58.0f64, lng in -180.0..180.0f64,
    ) {
        let query = Query::new("MWL", Coordinates::new(lat, lng), date(year, month, day), 0.);
        let engine = PrayerTimesEngine::default();
        let standard = engine.compute(&query);
        let hanafi = engine.compute(&query.with_overrides(ParameterOverrides {
            asr: Some(AsrFactor::Hanafi),
            ..Default::default()
        }));
        prop_assert!(minutes(hanafi.times[Prayer::Asr]) >= minutes(standard.times[Prayer::Asr]));
    }

    #[test]
    fn timezone_shifts_every_entry(
        year in 1950..2050i32, month in 1..=12u32, day in 1..=28u32,
        lat in -70.0..70.0f64, lng in -180.0..180.0f64,
        tz in -12..=14i32, delta in -6..=6i32,
    ) {
        let engine = PrayerTimesEngine::default();
        let query = Query::new("ISNA", Coordinates::new(lat, lng), date(year, month, day), tz as f64);
        let base = engine.compute(&query);
        let shifted = engine.compute(&Query { timezone: (tz + delta) as f64, ..query });

        prop_assert_eq!(base.times.unavailable(), shifted.times.unavailable());
        for prayer in Prayer::ALL {
            if let (Some(a), Some(b)) = (base.times[prayer].hours(), shifted.times[prayer].hours()) {
                prop_assert!((b - a - delta as f64).abs() < 1e-9, "{}: {} -> {}", prayer, a, b);
            }
        }
    }
    }

    #[test]
    fn mwl_reference_makkah() {
        // Masjid al-Haram, 15 March 2024, UTC+3
        let query = Query::new("MWL", Coordinates::new(21.4225, 39.8262), date(2024, 3, 15), 3.);
        let computed = PrayerTimesEngine::default().compute(&query);
        for (prayer, expected) in [
            (Prayer::Fajr, 5 * 60 + 15),
            (Prayer::Sunrise, 6 * 60 + 29),
            (Prayer::Dhuhr, 12 * 60 + 29),
            (Prayer::Asr, 15 * 60 + 54),
            (Prayer::Maghrib, 18 * 60 + 30),
            (Prayer::Isha, 19 * 60 + 40),
        ] {
            let got = minutes(computed.times[prayer]);
            assert!((got - expected as f64).abs() <= 1.0, "{prayer}: {got} vs {expected}");
        }
    }

    #[test]
    fn mwl_reference_waterloo() {
        let query = Query::new("MWL", Coordinates::new(43., -80.), date(2011, 2, 9), -5.);
        let times = PrayerTimesEngine::default().get_prayer_times_easy24(&query);
        assert_eq!(times.fajr, "05:50");
        assert_eq!(times.sunrise, "07:26");
        assert_eq!(times.dhuhr, "12:34");
        assert_eq!(times.asr, "15:18");
        assert_eq!(times.maghrib, "17:43");
        assert_eq!(times.midnight, "00:34");
    }

    #[test]
    fn unknown_method_falls_back_to_mwl() {
        let engine = PrayerTimesEngine::default();
        let base = Query::new("MWL", Coordinates::new(36., 10.), date(2022, 11, 27), 1.);
        let unknown = engine.compute(&Query {
            method: "NotAMethod",
            ..base
        });
        assert_eq!(unknown.method, Method::MWL);
        assert_eq!(unknown.times, engine.compute(&base).times);
    }

    #[test]
    fn arctic_twilight_needs_a_rule() {
        // Rovaniemi, early June: the sun sets but never reaches 18 degrees
        let query = Query::new("MWL", Coordinates::new(66.5, 25.7), date(2024, 6, 1), 3.);
        let engine = PrayerTimesEngine::default();

        let none = engine.compute(&query.with_overrides(with_high_lats(HighLatitudeRule::None)));
        assert_eq!(none.times[Prayer::Fajr], PrayerTime::Unavailable);
        assert_eq!(none.times[Prayer::Isha], PrayerTime::Unavailable);

        let seventh =
            engine.compute(&query.with_overrides(with_high_lats(HighLatitudeRule::OneSeventh)));
        let sunrise = minutes(seventh.times[Prayer::Sunrise]);
        let sunset = minutes(seventh.times[Prayer::Sunset]);
        let fajr = minutes(seventh.times[Prayer::Fajr]);
        let isha = minutes(seventh.times[Prayer::Isha]);
        assert!(fajr > sunset - 1440.0 && fajr < sunrise, "fajr {fajr}");
        assert!(isha > sunset && isha < sunrise + 1440.0, "isha {isha}");
        assert!(seventh.times.unavailable().is_empty());
    }

    #[test]
    fn midnight_sun_has_no_night_to_divide() {
        let query = Query::new("MWL", Coordinates::new(66.5, 25.7), date(2024, 6, 21), 3.)
            .with_overrides(with_high_lats(HighLatitudeRule::OneSeventh));
        let computed = PrayerTimesEngine::default().compute(&query);
        for prayer in [Prayer::Fajr, Prayer::Sunrise, Prayer::Sunset, Prayer::Isha, Prayer::Midnight] {
            assert_eq!(computed.times[prayer], PrayerTime::Unavailable, "{prayer}");
        }
        assert!(computed.times[Prayer::Dhuhr].is_available());
    }

    #[test]
    fn parallel_week_matches_sequential() {
        let engine = PrayerTimesEngine::default();
        for (method, lat, lng, tz) in [
            ("MWL", 36., 10., 1.),
            ("Jafari", 35.69, 51.39, 3.5),
            ("Makkah", 59.33, 18.07, 2.),
        ] {
            let query = Query::new(method, Coordinates::new(lat, lng), date(2024, 6, 17), tz);
            let parallel = engine.compute_days(&query, 7);
            let sequential = engine.compute_days_sequential(&query, 7);
            assert_eq!(parallel, sequential, "{method}");
        }
    }

    #[test]
    fn json_response_reads_back() {
        #[derive(DeJson, Debug)]
        struct CoordinatesJson {
            latitude: f64,
            longitude: f64,
        }
        #[derive(DeJson, Debug)]
        struct TimesJson {
            imsak: String,
            fajr: String,
            sunrise: String,
            dhuhr: String,
            asr: String,
            sunset: String,
            maghrib: String,
            isha: String,
            midnight: String,
        }
        #[derive(DeJson, Debug)]
        struct ResponseJson {
            date: String,
            status: u16,
            timezone: f64,
            method: String,
            coordinates: CoordinatesJson,
            times: TimesJson,
            unavailable: Vec<String>,
        }

        let location = parse_location("21.4225", "39.8262", "3").unwrap();
        let query = Query::new("Mwl", location.coordinates, date(2024, 3, 15), location.timezone);
        let computed = PrayerTimesEngine::default().compute(&query);
        let body = serde_json::to_string(&TimesResponse::from(&computed)).unwrap();

        let response: ResponseJson = DeJson::deserialize_json(&body).unwrap();
        assert_eq!(response.date, "2024-03-15");
        assert_eq!(response.status, 200);
        assert_eq!(response.timezone, 3.0);
        assert_eq!(response.method, "MWL");
        assert_eq!(response.coordinates.latitude, 21.4225);
        assert_eq!(response.coordinates.longitude, 39.8262);
        assert_eq!(response.times.fajr, "05:15");
        assert_eq!(response.times.imsak, "05:05");
        assert_eq!(response.times.sunrise, "06:29");
        assert_eq!(response.times.dhuhr, "12:29");
        assert_eq!(response.times.asr, "15:54");
        assert_eq!(response.times.sunset, response.times.maghrib);
        assert_eq!(response.times.isha, "19:40");
        assert_eq!(response.times.midnight, "00:30");
        assert!(response.unavailable.is_empty());
    }
}
