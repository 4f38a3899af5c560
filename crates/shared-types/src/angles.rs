//! Numeric comparison helpers for round-trip checks.

/// Relative tolerance used when comparing re-exported values.
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Compare two values within [`RELATIVE_TOLERANCE`].
///
/// Values near zero fall back to an absolute comparison at the same scale.
pub fn relative_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= RELATIVE_TOLERANCE * scale
}

/// Map a longitude into [-180, 180].
pub fn normalize_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        return longitude;
    }
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    // Keep +180 as given rather than folding it to -180.
    if wrapped == -180.0 && longitude > 0.0 {
        180.0
    } else {
        wrapped
    }
}

/// Compare longitudes modulo 360 degrees.
pub fn longitude_equivalent(a: f64, b: f64) -> bool {
    let diff = (a - b).rem_euclid(360.0);
    relative_eq(diff, 0.0) || relative_eq(diff, 360.0)
}
