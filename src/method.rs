//! Calculation methods and their parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MethodError;

/// How a twilight prayer is placed: by sun depression or by a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    /// Degrees of sun depression below the horizon.
    Angle(f64),
    /// Minutes relative to the reference event (Fajr for Imsak, Sunset for
    /// Maghrib, Maghrib for Isha).
    Minutes(f64),
}

impl Rule {
    pub fn angle(self) -> Option<f64> {
        match self {
            Self::Angle(a) => Some(a),
            Self::Minutes(_) => None,
        }
    }
}

// Juristic Methods
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsrFactor {
    #[default]
    Standard, // Shafii, Maliki, Jafari and Hanbali (shadow factor 1)
    Hanafi, // shadow factor 2
}

impl AsrFactor {
    pub fn shadow_factor(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Hanafi => 2.0,
        }
    }
}

/// Convention for the end of the Isha window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Midnight {
    /// Halfway from Sunset to Sunrise.
    #[default]
    Standard,
    /// Halfway from Sunset to Fajr.
    Jafari,
}

// Adjusting Methods for Higher Latitudes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighLatitudeRule {
    None, // No adjustment
    #[default]
    NightFraction, // middle of night
    AngleBased, // angle/60th of night
    OneSeventh, // 1/7th of night
}

impl HighLatitudeRule {
    /// Share of the night allowed between the base event and a twilight
    /// prayer with the given angle.
    pub(crate) fn night_portion(self, angle: f64) -> Option<f64> {
        match self {
            Self::None => None,
            Self::NightFraction => Some(1.0 / 2.0),
            Self::AngleBased => Some(angle / 60.0),
            Self::OneSeventh => Some(1.0 / 7.0),
        }
    }
}

macro_rules! setting_from_str {
    ($ty:ty, $setting:literal, { $($name:literal => $value:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = MethodError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($name) {
                        return Ok($value);
                    }
                )+
                Err(MethodError::UnknownSetting {
                    setting: $setting,
                    value: s.to_string(),
                })
            }
        }
    };
}

setting_from_str!(AsrFactor, "asr", {
    "Standard" => AsrFactor::Standard,
    "Hanafi" => AsrFactor::Hanafi,
});
setting_from_str!(Midnight, "midnight", {
    "Standard" => Midnight::Standard,
    "Jafari" => Midnight::Jafari,
});
setting_from_str!(HighLatitudeRule, "high-latitude rule", {
    "None" => HighLatitudeRule::None,
    "NightFraction" => HighLatitudeRule::NightFraction,
    "NightMiddle" => HighLatitudeRule::NightFraction,
    "AngleBased" => HighLatitudeRule::AngleBased,
    "OneSeventh" => HighLatitudeRule::OneSeventh,
});

/// Full parameter set for one computation. Always a value: presets hand out
/// copies and overrides produce new values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub imsak: Rule,
    /// Fajr sun depression in degrees.
    pub fajr: f64,
    /// Minutes after solar noon for Dhuhr.
    pub dhuhr_minutes: f64,
    pub asr: AsrFactor,
    pub maghrib: Rule,
    pub isha: Rule,
    pub midnight: Midnight,
    pub high_lats: HighLatitudeRule,
}

const DEFAULT_PARAMETERS: Parameters = Parameters {
    imsak: Rule::Minutes(10.0),
    fajr: 18.0,
    dhuhr_minutes: 0.0,
    asr: AsrFactor::Standard,
    maghrib: Rule::Minutes(0.0),
    isha: Rule::Angle(17.0),
    midnight: Midnight::Standard,
    high_lats: HighLatitudeRule::NightFraction,
};

/// Caller-supplied replacements for individual preset fields.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterOverrides {
    pub imsak: Option<Rule>,
    pub fajr: Option<f64>,
    pub dhuhr_minutes: Option<f64>,
    pub asr: Option<AsrFactor>,
    pub maghrib: Option<Rule>,
    pub isha: Option<Rule>,
    pub midnight: Option<Midnight>,
    pub high_lats: Option<HighLatitudeRule>,
}

impl ParameterOverrides {
    /// Fields set in `other` win over fields set in `self`.
    pub fn merge(self, other: &ParameterOverrides) -> Self {
        Self {
            imsak: other.imsak.or(self.imsak),
            fajr: other.fajr.or(self.fajr),
            dhuhr_minutes: other.dhuhr_minutes.or(self.dhuhr_minutes),
            asr: other.asr.or(self.asr),
            maghrib: other.maghrib.or(self.maghrib),
            isha: other.isha.or(self.isha),
            midnight: other.midnight.or(self.midnight),
            high_lats: other.high_lats.or(self.high_lats),
        }
    }
}

impl Parameters {
    pub fn with_overrides(self, overrides: &ParameterOverrides) -> Self {
        Self {
            imsak: overrides.imsak.unwrap_or(self.imsak),
            fajr: overrides.fajr.unwrap_or(self.fajr),
            dhuhr_minutes: overrides.dhuhr_minutes.unwrap_or(self.dhuhr_minutes),
            asr: overrides.asr.unwrap_or(self.asr),
            maghrib: overrides.maghrib.unwrap_or(self.maghrib),
            isha: overrides.isha.unwrap_or(self.isha),
            midnight: overrides.midnight.unwrap_or(self.midnight),
            high_lats: overrides.high_lats.unwrap_or(self.high_lats),
        }
    }
}

// Calculation Methods
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    #[default]
    MWL, // Muslim World League
    ISNA,    // Islamic Society of North America
    Egypt,   // Egyptian General Authority of Survey
    Makkah,  // Umm al-Qura, Makkah
    Karachi, // University of Islamic Sciences, Karachi
    Tehran,  // Institute of Geophysics, University of Tehran
    Jafari,  // Shia Ithna Ashari, Leva Institute, Qum
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::MWL,
        Method::ISNA,
        Method::Egypt,
        Method::Makkah,
        Method::Karachi,
        Method::Tehran,
        Method::Jafari,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::MWL => "MWL",
            Self::ISNA => "ISNA",
            Self::Egypt => "Egypt",
            Self::Makkah => "Makkah",
            Self::Karachi => "Karachi",
            Self::Tehran => "Tehran",
            Self::Jafari => "Jafari",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::MWL => "Muslim World League",
            Self::ISNA => "Islamic Society of North America (ISNA)",
            Self::Egypt => "Egyptian General Authority of Survey",
            Self::Makkah => "Umm Al-Qura University, Makkah",
            Self::Karachi => "University of Islamic Sciences, Karachi",
            Self::Tehran => "Institute of Geophysics, University of Tehran",
            Self::Jafari => "Shia Ithna-Ashari, Leva Institute, Qum",
        }
    }

    pub const fn parameters(self) -> Parameters {
        match self {
            Self::MWL => DEFAULT_PARAMETERS,
            Self::ISNA => Parameters {
                fajr: 15.0,
                isha: Rule::Angle(15.0),
                ..DEFAULT_PARAMETERS
            },
            Self::Egypt => Parameters {
                fajr: 19.5,
                isha: Rule::Angle(17.5),
                ..DEFAULT_PARAMETERS
            },
            Self::Makkah => Parameters {
                fajr: 18.5,
                isha: Rule::Minutes(90.0),
                ..DEFAULT_PARAMETERS
            },
            Self::Karachi => Parameters {
                fajr: 18.0,
                isha: Rule::Angle(18.0),
                ..DEFAULT_PARAMETERS
            },
            Self::Tehran => Parameters {
                fajr: 17.7,
                maghrib: Rule::Angle(4.5),
                isha: Rule::Angle(14.0),
                midnight: Midnight::Jafari,
                ..DEFAULT_PARAMETERS
            },
            Self::Jafari => Parameters {
                fajr: 16.0,
                maghrib: Rule::Angle(4.0),
                isha: Rule::Angle(14.0),
                midnight: Midnight::Jafari,
                ..DEFAULT_PARAMETERS
            },
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = MethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MethodError::UnknownMethod(s.to_string()))
    }
}

/// Fixed table of the built-in presets.
#[derive(Debug)]
pub struct MethodRegistry {
    presets: [(Method, Parameters); Method::ALL.len()],
}

static BUILTIN: MethodRegistry = MethodRegistry::builtin();

impl MethodRegistry {
    const fn builtin() -> Self {
        const fn preset(method: Method) -> (Method, Parameters) {
            (method, method.parameters())
        }
        Self {
            presets: [
                preset(Method::MWL),
                preset(Method::ISNA),
                preset(Method::Egypt),
                preset(Method::Makkah),
                preset(Method::Karachi),
                preset(Method::Tehran),
                preset(Method::Jafari),
            ],
        }
    }

    pub fn global() -> &'static MethodRegistry {
        &BUILTIN
    }

    /// Parameters for `name`, falling back to the default method when the
    /// name is not recognized. The returned method is the one actually used.
    pub fn lookup(&self, name: &str) -> (Method, Parameters) {
        match name.parse::<Method>() {
            Ok(method) => (method, self.get(method)),
            Err(_) => {
                tracing::debug!(requested = name, fallback = %Method::default(), "unknown method");
                (Method::default(), self.get(Method::default()))
            }
        }
    }

    pub fn get(&self, method: Method) -> Parameters {
        self.presets
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, params)| *params)
            .unwrap_or(DEFAULT_PARAMETERS)
    }

    pub fn list(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.presets.iter().map(|(m, _)| m.name())
    }
}
