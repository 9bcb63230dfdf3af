//! Hour-angle solvers for horizon angles and Asr shadow lengths.

use crate::math::{darccos, darccot, dcos, dsin, dtan};

/// Time between solar noon and the moment the sun crosses a given altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HourAngle {
    /// Offset from solar noon in hours, always in `[0, 12]`.
    Valid(f64),
    /// The sun never reaches the requested altitude on this day.
    NoSolution,
}

impl HourAngle {
    pub fn hours(self) -> Option<f64> {
        match self {
            Self::Valid(hours) => Some(hours),
            Self::NoSolution => None,
        }
    }
}

/// Hour angle at which the sun stands `angle` degrees below the horizon.
///
/// Negative angles put the sun above the horizon, which is how Asr is solved.
pub fn hour_angle(latitude: f64, declination: f64, angle: f64) -> HourAngle {
    let x = (-dsin(angle) - dsin(latitude) * dsin(declination))
        / (dcos(latitude) * dcos(declination));
    if (-1.0..=1.0).contains(&x) {
        HourAngle::Valid(darccos(x) / 15.0)
    } else {
        // also catches NaN at the poles
        HourAngle::NoSolution
    }
}

/// Hour angle at which an object's shadow equals `shadow_factor` times its
/// height plus its noon shadow.
pub fn asr_hour_angle(latitude: f64, declination: f64, shadow_factor: f64) -> HourAngle {
    let angle = -darccot(shadow_factor + dtan((latitude - declination).abs()));
    hour_angle(latitude, declination, angle)
}
