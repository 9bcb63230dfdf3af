//! Degree-based trigonometry and range reduction.

/* ---------------------- Trigonometric Functions ----------------------- */

/* degree sin */
pub(crate) fn dsin(d: f64) -> f64 {
    d.to_radians().sin()
}

/* degree cos */
pub(crate) fn dcos(d: f64) -> f64 {
    d.to_radians().cos()
}

/* degree tan */
pub(crate) fn dtan(d: f64) -> f64 {
    d.to_radians().tan()
}

/* degree arcsin */
pub(crate) fn darcsin(x: f64) -> f64 {
    x.asin().to_degrees()
}

/* degree arccos */
pub(crate) fn darccos(x: f64) -> f64 {
    x.acos().to_degrees()
}

/* degree arctan2 */
pub(crate) fn darctan2(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/* degree arccot */
pub(crate) fn darccot(x: f64) -> f64 {
    (1.0 / x).atan().to_degrees()
}

/* ---------------------- Range Reduction ----------------------- */

fn fix(a: f64, b: f64) -> f64 {
    let a = a - b * (a / b).floor();
    if a < 0.0 {
        a + b
    } else {
        a
    }
}

/// Reduce an angle in degrees to `[0, 360)`.
pub(crate) fn fix_angle(a: f64) -> f64 {
    fix(a, 360.0)
}

/// Reduce hours to `[0, 24)`.
pub fn fix_hour(a: f64) -> f64 {
    fix(a, 24.0)
}

/// Hours from `time1` forward to `time2`, wrapping across midnight.
pub(crate) fn time_diff(time1: f64, time2: f64) -> f64 {
    fix_hour(time2 - time1)
}
