use serde::{Deserialize, Serialize};

use crate::engine::{Computed, PrayerTimesEngine, Query};
use crate::times::{Prayer, PrayerTimes, TimeFormat};

impl PrayerTimesEngine {
    pub fn get_prayer_times_easy24(&self, query: &Query) -> EasyTimes24 {
        self.compute(query).times.to_easy24()
    }
}

impl PrayerTimes {
    pub fn to_easy24(&self) -> EasyTimes24 {
        let f = |prayer| self.get(prayer).format(TimeFormat::H24);
        EasyTimes24 {
            imsak: f(Prayer::Imsak),
            fajr: f(Prayer::Fajr),
            sunrise: f(Prayer::Sunrise),
            dhuhr: f(Prayer::Dhuhr),
            asr: f(Prayer::Asr),
            sunset: f(Prayer::Sunset),
            maghrib: f(Prayer::Maghrib),
            isha: f(Prayer::Isha),
            midnight: f(Prayer::Midnight),
        }
    }
}

impl From<&Computed> for EasyTimes24 {
    fn from(computed: &Computed) -> Self {
        computed.times.to_easy24()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasyTimes24 {
    pub imsak: String,
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub sunset: String,
    pub maghrib: String,
    pub isha: String,
    pub midnight: String,
}
