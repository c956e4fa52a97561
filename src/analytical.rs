//! Closed-form solar zenith and azimuth from hour angle, declination and
//! latitude.
//!
//! These are the textbook spherical-trigonometry identities. All angles are
//! in radians here, unlike the degree-based ephemeris API: the inputs come
//! straight from [`crate::series`] declinations and converted hour angles,
//! and staying in radians avoids a round of unit churn in the middle of the
//! trigonometry. NaN inputs propagate to NaN outputs.

use crate::math::snap_to_unit_interval;
use core::f64::consts::PI;

/// Tolerance for snapping the azimuth cosine onto [-1, 1] and for treating
/// the azimuth denominator as zero at the poles.
const AZIMUTH_ATOL: f64 = 1e-8;

/// Solar zenith angle in radians from latitude, hour angle and declination,
/// all in radians.
///
/// Implements `acos(cos δ · cos φ · cos ω + sin δ · sin φ)`.
#[must_use]
pub fn solar_zenith_analytical(latitude: f64, hour_angle: f64, declination: f64) -> f64 {
    (declination.cos() * latitude.cos() * hour_angle.cos()
        + declination.sin() * latitude.sin())
    .acos()
}

/// Solar azimuth angle in radians, measured clockwise from North, from
/// latitude, hour angle, declination and the zenith angle, all in radians.
///
/// The zenith argument should come from [`solar_zenith_analytical`] (or an
/// equivalent geometric zenith) for the same instant.
///
/// Two degenerate geometries are handled explicitly. At the poles the
/// denominator `sin z · cos φ` vanishes and the azimuth cosine is pinned to
/// 1, and when the sun crosses the meridian, rounding can push the cosine
/// marginally outside [-1, 1], so it is snapped back before `acos`. The sign
/// of the hour angle places the sun east (morning) or west (afternoon) of
/// the meridian.
#[must_use]
pub fn solar_azimuth_analytical(
    latitude: f64,
    hour_angle: f64,
    declination: f64,
    zenith: f64,
) -> f64 {
    let numer = zenith.cos() * latitude.sin() - declination.sin();
    let denom = zenith.sin() * latitude.cos();

    let cos_azi = if denom.abs() <= AZIMUTH_ATOL {
        1.0
    } else {
        snap_to_unit_interval(numer / denom, AZIMUTH_ATOL)
    };

    // signum(0.0) is 1.0 in Rust; an hour angle of exactly zero must carry
    // sign zero so the meridian case collapses to the midpoint of the
    // east/west branches instead of jumping to one of them
    let sign = if hour_angle == 0.0 {
        0.0
    } else {
        hour_angle.signum()
    };
    sign * cos_azi.acos() + PI
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_zenith_equator_equinox_noon() {
        // sun directly overhead
        assert!(solar_zenith_analytical(0.0, 0.0, 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_zenith_noon_mid_latitude() {
        // at solar noon the zenith is |latitude - declination|
        let latitude = 39.0_f64.to_radians();
        let declination = 23.44_f64.to_radians();
        let zenith = solar_zenith_analytical(latitude, 0.0, declination);
        assert!((zenith - (latitude - declination)).abs() < EPSILON);
    }

    #[test]
    fn test_azimuth_noon_points_south() {
        let latitude = 39.0_f64.to_radians();
        let declination = 23.44_f64.to_radians();
        let zenith = solar_zenith_analytical(latitude, 0.0, declination);
        let azimuth = solar_azimuth_analytical(latitude, 0.0, declination, zenith);
        assert!((azimuth - PI).abs() < 1e-6);
    }

    #[test]
    fn test_azimuth_morning_east_afternoon_west() {
        let latitude = 39.0_f64.to_radians();
        let declination = 23.44_f64.to_radians();
        let hour_angle = 0.5; // mid-afternoon

        let zenith_pm = solar_zenith_analytical(latitude, hour_angle, declination);
        let azimuth_pm = solar_azimuth_analytical(latitude, hour_angle, declination, zenith_pm);
        let zenith_am = solar_zenith_analytical(latitude, -hour_angle, declination);
        let azimuth_am = solar_azimuth_analytical(latitude, -hour_angle, declination, zenith_am);

        assert!(azimuth_am < PI, "morning sun should be east of south");
        assert!(azimuth_pm > PI, "afternoon sun should be west of south");
        // symmetric about the meridian
        assert!((azimuth_am + azimuth_pm - 2.0 * PI).abs() < EPSILON);
    }

    #[test]
    fn test_azimuth_noon_sun_due_north() {
        // declination above the latitude puts the noon sun due north, where
        // the azimuth cosine is -1; the two signed branches land on 0 and
        // 2π, and an hour angle of exactly zero takes the midpoint π
        let latitude = 0.2;
        let declination = 0.4;

        let at = |hour_angle: f64| {
            let zenith = solar_zenith_analytical(latitude, hour_angle, declination);
            solar_azimuth_analytical(latitude, hour_angle, declination, zenith)
        };

        assert!((at(0.0) - PI).abs() < EPSILON);
        assert!((at(-0.0) - PI).abs() < EPSILON);
        assert!(at(-1e-9) < 1e-3, "just before noon should be near 0");
        assert!(
            (at(1e-9) - 2.0 * PI).abs() < 1e-3,
            "just after noon should be near 2π"
        );
    }

    #[test]
    fn test_azimuth_pole_degenerate_denominator() {
        let latitude = core::f64::consts::FRAC_PI_2;
        let declination = 0.2;
        let zenith = solar_zenith_analytical(latitude, 1.0, declination);
        let azimuth = solar_azimuth_analytical(latitude, 1.0, declination, zenith);
        assert!(azimuth.is_finite());
        // cos_azi pinned to 1 makes the acos term vanish
        assert!((azimuth - PI).abs() < EPSILON);
    }

    #[test]
    fn test_nan_propagation() {
        assert!(solar_zenith_analytical(f64::NAN, 0.0, 0.0).is_nan());
        assert!(solar_azimuth_analytical(0.5, f64::NAN, 0.1, 0.5).is_nan());
    }
}
