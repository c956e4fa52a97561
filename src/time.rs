//! Time and angle conversions for solar geometry.
//!
//! The converters here translate between timezone-aware instants, local
//! wall-clock hours since midnight, and hour angle in degrees. Hour angle is
//! zero at local solar noon and advances 15° per hour, so converting correctly
//! requires the UTC offset embedded in each timestamp: the same physical
//! instant must map to the same physical hour angle no matter which timezone
//! its wall clock is expressed in.

#![allow(clippy::unreadable_literal)]

use crate::error::{check_aligned, check_longitude};
use crate::math::polynomial;
use crate::{Error, Result};
use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, Duration, Offset, TimeZone, Timelike, Utc};

/// Nanoseconds per hour.
const NANOS_PER_HOUR: f64 = 3_600.0e9;

/// Unix timestamp of the Dublin Julian Day epoch (1899-12-31 12:00:00 UTC).
const DJD_EPOCH_UNIX_SECONDS: f64 = -2_209_032_000.0;

/// Default ΔT in seconds, adequate for energy-modelling work in the 2000s
/// when no measured or predicted value is supplied.
pub const DEFAULT_DELTA_T: f64 = 67.0;

/// Local wall-clock hours elapsed since local midnight, including fractions.
///
/// Daylight-saving transitions are deliberately ignored: this reads the wall
/// clock, which is what the hour-angle arithmetic expects.
#[must_use]
pub fn hours_since_midnight<Tz: TimeZone>(time: &DateTime<Tz>) -> f64 {
    let local = time.naive_local().time();
    f64::from(local.num_seconds_from_midnight()) / 3_600.0
        + f64::from(local.nanosecond()) / NANOS_PER_HOUR
}

/// UTC offset of a timestamp in decimal hours, east positive.
pub(crate) fn utc_offset_hours<Tz: TimeZone>(time: &DateTime<Tz>) -> f64 {
    f64::from(time.offset().fix().local_minus_utc()) / 3_600.0
}

/// Hour angle in local solar time, in degrees. Zero at local solar noon.
///
/// Computes `15° × (hours − 12) + longitude + eot/4`, where `hours` is the
/// wall-clock time corrected by the timestamp's own UTC offset. Timestamps
/// carrying different offsets for the same instant therefore yield the same
/// physical hour angle.
///
/// # Arguments
/// * `times` - Timezone-aware timestamps
/// * `longitude` - Longitude in degrees, east positive
/// * `equation_of_time` - Equation of time in minutes, aligned with `times`
///
/// # Returns
/// Hour angles in degrees, aligned with `times`. Values are not wrapped; a
/// timestamp whose local calendar date differs from its UTC date comes out
/// shifted by a full 360° turn, which downstream trigonometry absorbs.
///
/// # Errors
/// Returns `InvalidLongitude` or `LengthMismatch` for malformed input.
pub fn hour_angle<Tz: TimeZone>(
    times: &[DateTime<Tz>],
    longitude: f64,
    equation_of_time: &[f64],
) -> Result<Vec<f64>> {
    check_longitude(longitude)?;
    check_aligned(times.len(), equation_of_time.len())?;

    Ok(times
        .iter()
        .zip(equation_of_time)
        .map(|(time, eot)| {
            let hours = hours_since_midnight(time) - utc_offset_hours(time);
            15.0 * (hours - 12.0) + longitude + eot / 4.0
        })
        .collect())
}

/// Converts hour angles in degrees back to local wall-clock hours since
/// midnight. Exact inverse of [`hour_angle`].
///
/// The result may fall outside [0, 24): with large timezone offsets a sunrise
/// hour angle can land on the previous or next calendar day, and that must
/// survive the conversion rather than being clamped.
///
/// # Errors
/// Returns `InvalidLongitude` or `LengthMismatch` for malformed input.
pub fn hour_angle_to_hours_since_midnight<Tz: TimeZone>(
    times: &[DateTime<Tz>],
    hourangle: &[f64],
    longitude: f64,
    equation_of_time: &[f64],
) -> Result<Vec<f64>> {
    check_longitude(longitude)?;
    check_aligned(times.len(), hourangle.len())?;
    check_aligned(times.len(), equation_of_time.len())?;

    Ok(times
        .iter()
        .zip(hourangle.iter().zip(equation_of_time))
        .map(|(time, (ha, eot))| {
            (ha - longitude - eot / 4.0) / 15.0 + 12.0 + utc_offset_hours(time)
        })
        .collect())
}

/// Builds a local timestamp from an anchor's calendar date plus wall-clock
/// hours since that date's midnight.
///
/// `hours` may be negative or exceed 24, rolling into the adjacent days.
/// Returns `None` for non-finite `hours` (the instant-valued rendition of a
/// NaN hour, e.g. a polar day without sunrise) and for local times that do
/// not exist because of a daylight-saving gap; ambiguous local times resolve
/// to the earlier instant.
#[must_use]
pub fn local_time_from_hours_since_midnight<Tz: TimeZone>(
    anchor: &DateTime<Tz>,
    hours: f64,
) -> Option<DateTime<Tz>> {
    if !hours.is_finite() {
        return None;
    }

    let nanos = hours * NANOS_PER_HOUR;
    if nanos.abs() >= i64::MAX as f64 {
        return None;
    }

    let midnight = anchor.naive_local().date().and_hms_opt(0, 0, 0)?;
    let target = midnight + Duration::nanoseconds(nanos.round() as i64);
    match anchor.timezone().from_local_datetime(&target) {
        LocalResult::Single(t) => Some(t),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => None,
    }
}

/// Array form of [`local_time_from_hours_since_midnight`], aligned with `times`.
///
/// # Errors
/// Returns `LengthMismatch` if `hours` is not aligned with `times`.
pub fn local_times_from_hours_since_midnight<Tz: TimeZone>(
    times: &[DateTime<Tz>],
    hours: &[f64],
) -> Result<Vec<Option<DateTime<Tz>>>> {
    check_aligned(times.len(), hours.len())?;
    Ok(times
        .iter()
        .zip(hours)
        .map(|(time, &h)| local_time_from_hours_since_midnight(time, h))
        .collect())
}

/// Converts a timestamp to Dublin Julian Day (days since 1899-12-31 12:00 UTC).
///
/// This is the day-fraction time unit the attribute root finder iterates in.
#[must_use]
pub fn datetime_to_djd<Tz: TimeZone>(time: &DateTime<Tz>) -> f64 {
    let unix = fractional_unix_seconds(time);
    (unix - DJD_EPOCH_UNIX_SECONDS) / 86_400.0
}

/// Converts a Dublin Julian Day value back to a UTC timestamp.
///
/// # Errors
/// Returns `InvalidDateTime` if the day fraction is non-finite or outside the
/// representable timestamp range.
pub fn djd_to_datetime(djd: f64) -> Result<DateTime<Utc>> {
    let unix = djd * 86_400.0 + DJD_EPOCH_UNIX_SECONDS;
    if !unix.is_finite() {
        return Err(Error::invalid_datetime("day fraction is not finite"));
    }

    let mut secs = unix.floor();
    let mut nanos = ((unix - secs) * 1e9).round();
    if nanos >= 1e9 {
        secs += 1.0;
        nanos -= 1e9;
    }

    DateTime::from_timestamp(secs as i64, nanos as u32)
        .ok_or(Error::invalid_datetime("day fraction outside timestamp range"))
}

fn fractional_unix_seconds<Tz: TimeZone>(time: &DateTime<Tz>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) / 1e9
}

/// UTC calendar pieces the iterative ephemeris solver consumes: year,
/// one-based day of year, and decimal hour of day.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UtcParts {
    pub year: i32,
    pub day_of_year: f64,
    pub decimal_hour: f64,
}

pub(crate) fn utc_parts<Tz: TimeZone>(time: &DateTime<Tz>) -> UtcParts {
    let utc = time.with_timezone(&Utc);
    UtcParts {
        year: utc.year(),
        day_of_year: f64::from(utc.ordinal()),
        decimal_hour: f64::from(utc.hour())
            + f64::from(utc.minute()) / 60.0
            + f64::from(utc.second()) / 3_600.0
            + f64::from(utc.nanosecond()) / NANOS_PER_HOUR,
    }
}

/// ΔT (Delta T) estimation.
///
/// ΔT is the difference between Terrestrial Time and Universal Time (UT1) in
/// seconds. It is an input to high-precision ephemeris backends, not something
/// this crate derives; the estimator below is the published Espenak & Meeus
/// polynomial fit, provided so callers have a year/month-indexed prediction
/// table when no measured value is at hand.
pub struct DeltaT;

impl DeltaT {
    /// Estimates ΔT in seconds for a decimal year between 1900 and 3000.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` for years outside 1900–3000.
    pub fn estimate(decimal_year: f64) -> Result<f64> {
        let year = decimal_year;
        if !year.is_finite() || !(1900.0..=3000.0).contains(&year) {
            return Err(Error::invalid_datetime(
                "ΔT estimates only available for years 1900 to 3000",
            ));
        }

        let delta_t = if year < 1920.0 {
            let t = year - 1900.0;
            polynomial(&[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197], t)
        } else if year < 1941.0 {
            let t = year - 1920.0;
            polynomial(&[21.20, 0.84493, -0.076100, 0.0020936], t)
        } else if year < 1961.0 {
            let t = year - 1950.0;
            polynomial(&[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0], t)
        } else if year < 1986.0 {
            let t = year - 1975.0;
            polynomial(&[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0], t)
        } else if year < 2005.0 {
            let t = year - 2000.0;
            polynomial(
                &[
                    63.86,
                    0.3345,
                    -0.060374,
                    0.0017275,
                    0.000651814,
                    0.00002373599,
                ],
                t,
            )
        } else if year < 2015.0 {
            let t = year - 2005.0;
            polynomial(&[64.69, 0.2930], t)
        } else {
            let t = year - 2015.0;
            polynomial(&[67.62, 0.3645, 0.0039755], t)
        };

        Ok(delta_t)
    }

    /// Estimates ΔT from year and month, using the month midpoint as the
    /// decimal year.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` for an invalid month or out-of-range year.
    pub fn estimate_from_date(year: i32, month: u32) -> Result<f64> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_datetime("month must be between 1 and 12"));
        }
        Self::estimate(f64::from(year) + (f64::from(month) - 0.5) / 12.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn fixed(s: &str) -> DateTime<FixedOffset> {
        s.parse().unwrap()
    }

    #[test]
    fn test_hours_since_midnight() {
        assert!((hours_since_midnight(&fixed("2023-06-21T06:30:00Z")) - 6.5).abs() < 1e-12);
        // reads the wall clock of the timestamp's own zone
        assert!((hours_since_midnight(&fixed("2023-06-21T06:30:00-07:00")) - 6.5).abs() < 1e-12);
        let with_nanos = fixed("2023-06-21T00:00:00.000000360Z");
        assert!((hours_since_midnight(&with_nanos) - 1e-13) < 1e-9);
    }

    #[test]
    fn test_hour_angle_solar_noon() {
        // At longitude 0, 12:00 UTC with zero equation of time is solar noon.
        let times = vec![fixed("2023-03-21T12:00:00Z")];
        let ha = hour_angle(&times, 0.0, &[0.0]).unwrap();
        assert!(ha[0].abs() < 1e-12);
    }

    #[test]
    fn test_hour_angle_timezone_invariance() {
        // Same physical instant expressed in two zones, same local date.
        let utc = vec![fixed("2023-06-21T18:00:00Z")];
        let denver = vec![fixed("2023-06-21T11:00:00-07:00")];
        let ha_utc = hour_angle(&utc, -105.0, &[-1.5]).unwrap();
        let ha_denver = hour_angle(&denver, -105.0, &[-1.5]).unwrap();
        assert!((ha_utc[0] - ha_denver[0]).abs() < 1e-9);
    }

    #[test]
    fn test_hour_angle_round_trip() {
        let times = vec![
            fixed("2023-06-21T05:17:23+02:00"),
            fixed("2023-12-01T22:45:00-09:30"),
            fixed("2024-02-29T13:00:01Z"),
        ];
        let eot = vec![-1.5, 11.2, -13.4];
        let longitude = -105.0;

        let ha = hour_angle(&times, longitude, &eot).unwrap();
        let hours = hour_angle_to_hours_since_midnight(&times, &ha, longitude, &eot).unwrap();

        for (time, recovered) in times.iter().zip(&hours) {
            assert!((hours_since_midnight(time) - recovered).abs() < 1e-9);
        }
    }

    #[test]
    fn test_hour_angle_input_validation() {
        let times = vec![fixed("2023-06-21T12:00:00Z")];
        assert!(hour_angle(&times, 200.0, &[0.0]).is_err());
        assert!(hour_angle(&times, 0.0, &[0.0, 1.0]).is_err());
    }

    #[test]
    fn test_local_time_from_hours() {
        let anchor = fixed("2023-06-21T15:00:00-07:00");

        let morning = local_time_from_hours_since_midnight(&anchor, 5.5).unwrap();
        assert_eq!(morning, fixed("2023-06-21T05:30:00-07:00"));

        // hours outside [0, 24) roll into adjacent days instead of clamping
        let next_day = local_time_from_hours_since_midnight(&anchor, 26.0).unwrap();
        assert_eq!(next_day, fixed("2023-06-22T02:00:00-07:00"));
        let previous_day = local_time_from_hours_since_midnight(&anchor, -1.0).unwrap();
        assert_eq!(previous_day, fixed("2023-06-20T23:00:00-07:00"));

        assert!(local_time_from_hours_since_midnight(&anchor, f64::NAN).is_none());
        assert!(local_time_from_hours_since_midnight(&anchor, f64::INFINITY).is_none());
    }

    #[test]
    fn test_djd_epoch_and_round_trip() {
        let epoch = fixed("1899-12-31T12:00:00Z");
        assert!(datetime_to_djd(&epoch).abs() < 1e-12);

        let half_day = fixed("1900-01-01T00:00:00Z");
        assert!((datetime_to_djd(&half_day) - 0.5).abs() < 1e-12);

        let modern = fixed("2023-06-21T18:00:00Z");
        let recovered = djd_to_datetime(datetime_to_djd(&modern)).unwrap();
        let diff = (recovered - modern.with_timezone(&Utc))
            .num_nanoseconds()
            .unwrap()
            .abs();
        // double precision holds ~microseconds at this epoch distance
        assert!(diff < 10_000, "round trip drifted {diff} ns");

        assert!(djd_to_datetime(f64::NAN).is_err());
        assert!(djd_to_datetime(1e300).is_err());
    }

    #[test]
    fn test_utc_parts() {
        let parts = utc_parts(&fixed("2023-06-21T11:30:00-07:00"));
        assert_eq!(parts.year, 2023);
        assert_eq!(parts.day_of_year, 172.0);
        assert!((parts.decimal_hour - 18.5).abs() < 1e-12);
    }

    #[test]
    fn test_delta_t_estimates() {
        let dt_2000 = DeltaT::estimate(2000.0).unwrap();
        assert!(dt_2000 > 60.0 && dt_2000 < 70.0);

        let dt_2023 = DeltaT::estimate_from_date(2023, 6).unwrap();
        assert!(dt_2023 > 65.0 && dt_2023 < 75.0);

        // generally increasing in the modern era
        assert!(dt_2023 > dt_2000);

        assert!(DeltaT::estimate(1800.0).is_err());
        assert!(DeltaT::estimate(3001.0).is_err());
        assert!(DeltaT::estimate(f64::NAN).is_err());
        assert!(DeltaT::estimate_from_date(2023, 13).is_err());
    }
}
