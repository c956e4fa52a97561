//! Geometric sunrise, sunset and transit times.
//!
//! "Geometric" means the sun is treated as a point crossing an unobstructed
//! horizon with no atmospheric refraction: the sunset hour angle satisfies
//! `cos ω = -tan δ · tan φ`. The caller supplies declination and equation of
//! time for each day, typically from [`crate::series`], which keeps this
//! module free of any particular ephemeris choice.

use crate::error::{check_aligned, check_coordinates};
use crate::time::{local_time_from_hours_since_midnight, utc_offset_hours};
use crate::types::SunriseResult;
use crate::{Error, Result};
use chrono::{DateTime, TimeZone};

/// Sunrise, transit and sunset as local wall-clock hours since midnight.
///
/// On polar days and nights `sunrise` and `sunset` are NaN while `transit`
/// stays finite. Hours may fall outside [0, 24) when a sun event lands on an
/// adjacent calendar day, which happens with large timezone offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDayHours {
    /// Local hours since midnight of sunrise, NaN if the sun never crosses
    /// the horizon that day.
    pub sunrise: f64,
    /// Local hours since midnight of solar transit.
    pub transit: f64,
    /// Local hours since midnight of sunset, NaN if the sun never crosses
    /// the horizon that day.
    pub sunset: f64,
}

/// Sunset hour angle in degrees for a latitude in degrees and a declination
/// in radians.
///
/// Returns NaN when the sun never crosses the horizon at that latitude and
/// declination (polar day or night); sunrise is the negation.
#[must_use]
pub fn sunset_hour_angle(latitude: f64, declination: f64) -> f64 {
    (-declination.tan() * latitude.to_radians().tan())
        .acos()
        .to_degrees()
}

/// Converts an hour angle in degrees to local hours since midnight for one
/// timestamp. Inverse of the hour-angle formula; NaN passes through.
fn hour_angle_to_hours<Tz: TimeZone>(
    time: &DateTime<Tz>,
    hour_angle: f64,
    longitude: f64,
    equation_of_time: f64,
) -> f64 {
    (hour_angle - longitude - equation_of_time / 4.0) / 15.0 + 12.0 + utc_offset_hours(time)
}

/// Computes geometric sunrise, transit and sunset for each day as local
/// wall-clock hours since midnight.
///
/// # Arguments
/// * `times` - One timezone-aware timestamp per day; only its calendar date
///   and UTC offset matter
/// * `latitude` - Latitude in degrees, north positive
/// * `longitude` - Longitude in degrees, east positive
/// * `declination` - Solar declination in radians, aligned with `times`
/// * `equation_of_time` - Equation of time in minutes, aligned with `times`
///
/// # Errors
/// Returns `InvalidLatitude`, `InvalidLongitude` or `LengthMismatch` for
/// malformed input.
pub fn sun_rise_set_transit_geometric_hours<Tz: TimeZone>(
    times: &[DateTime<Tz>],
    latitude: f64,
    longitude: f64,
    declination: &[f64],
    equation_of_time: &[f64],
) -> Result<Vec<SolarDayHours>> {
    check_coordinates(latitude, longitude)?;
    check_aligned(times.len(), declination.len())?;
    check_aligned(times.len(), equation_of_time.len())?;

    Ok(times
        .iter()
        .zip(declination.iter().zip(equation_of_time))
        .map(|(time, (&decl, &eot))| {
            let sunset_angle = sunset_hour_angle(latitude, decl);
            SolarDayHours {
                sunrise: hour_angle_to_hours(time, -sunset_angle, longitude, eot),
                transit: hour_angle_to_hours(time, 0.0, longitude, eot),
                sunset: hour_angle_to_hours(time, sunset_angle, longitude, eot),
            }
        })
        .collect())
}

/// Computes geometric sunrise, transit and sunset for each day as local
/// timestamps, classifying polar days explicitly.
///
/// The instant-valued counterpart of [`sun_rise_set_transit_geometric_hours`]:
/// days where the sun never crosses the horizon come back as
/// [`SunriseResult::AllDay`] or [`SunriseResult::AllNight`] with only the
/// transit populated, instead of NaN hours.
///
/// # Errors
/// Same input conditions as [`sun_rise_set_transit_geometric_hours`], plus
/// `InvalidDateTime` if a computed local time falls in a daylight-saving gap
/// and therefore does not exist.
pub fn sun_rise_set_transit_geometric<Tz: TimeZone>(
    times: &[DateTime<Tz>],
    latitude: f64,
    longitude: f64,
    declination: &[f64],
    equation_of_time: &[f64],
) -> Result<Vec<SunriseResult<DateTime<Tz>>>> {
    check_coordinates(latitude, longitude)?;
    check_aligned(times.len(), declination.len())?;
    check_aligned(times.len(), equation_of_time.len())?;

    times
        .iter()
        .zip(declination.iter().zip(equation_of_time))
        .map(|(time, (&decl, &eot))| {
            let to_local = |hours: f64| {
                local_time_from_hours_since_midnight(time, hours)
                    .ok_or(Error::invalid_datetime("local time does not exist"))
            };

            let transit = to_local(hour_angle_to_hours(time, 0.0, longitude, eot))?;

            let cos_sunset = -decl.tan() * latitude.to_radians().tan();
            if cos_sunset > 1.0 {
                return Ok(SunriseResult::AllNight { transit });
            }
            if cos_sunset < -1.0 {
                return Ok(SunriseResult::AllDay { transit });
            }

            let sunset_angle = cos_sunset.acos().to_degrees();
            Ok(SunriseResult::RegularDay {
                sunrise: to_local(hour_angle_to_hours(time, -sunset_angle, longitude, eot))?,
                transit,
                sunset: to_local(hour_angle_to_hours(time, sunset_angle, longitude, eot))?,
            })
        })
        .collect()
}
