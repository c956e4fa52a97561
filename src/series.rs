//! Day-angle series approximations of the equation of time and solar
//! declination.
//!
//! These are cheap truncated-Fourier-series fits indexed by day of year. They
//! carry no timezone or sub-daily information, so they are accurate to a
//! fraction of a degree at best; the iterative solver in [`crate::ephemeris`]
//! is the precise alternative. Day of year is taken as `f64` so callers can
//! pass fractional days, and every function here propagates NaN input to NaN
//! output instead of erroring.

use crate::{Error, Result};
use core::f64::consts::PI;

/// Radians of day angle per day of year.
const DAY_ANGLE_RATE: f64 = 2.0 * PI / 365.0;

/// Day-of-year origin convention for the simple day angle.
///
/// The Spencer series number days from 1, the ASCE formulation from 0; the
/// two conventions shift the day angle by one day's worth of arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayAngleConvention {
    /// Day of year 1 maps to a day angle of zero (Spencer 1971).
    Spencer,
    /// Day of year 0 maps to a day angle of zero (ASCE).
    Asce,
}

impl DayAngleConvention {
    /// Maps a numeric day-of-year offset to a convention: 1 selects
    /// [`Spencer`](Self::Spencer), 0 selects [`Asce`](Self::Asce).
    ///
    /// # Errors
    /// Returns `UnsupportedOption` for any other offset.
    pub const fn from_offset(offset: u32) -> Result<Self> {
        match offset {
            1 => Ok(Self::Spencer),
            0 => Ok(Self::Asce),
            _ => Err(Error::unsupported_option(
                "day angle offset must be 0 (ASCE) or 1 (Spencer)",
            )),
        }
    }

    const fn offset(self) -> f64 {
        match self {
            Self::Spencer => 1.0,
            Self::Asce => 0.0,
        }
    }
}

/// Simple day angle in radians for a (possibly fractional) day of year.
#[must_use]
pub fn day_angle(day_of_year: f64, convention: DayAngleConvention) -> f64 {
    DAY_ANGLE_RATE * (day_of_year - convention.offset())
}

/// Equation of time in minutes, Spencer (1971) Fourier series.
///
/// Positive values mean the sundial runs ahead of clock time. Accurate to
/// roughly a quarter minute.
#[must_use]
pub fn equation_of_time_spencer71(day_of_year: f64) -> f64 {
    let b = day_angle(day_of_year, DayAngleConvention::Spencer);
    (1_440.0 / (2.0 * PI))
        * (0.000_007_5 + 0.001_868 * b.cos() - 0.032_077 * b.sin()
            - 0.014_615 * (2.0 * b).cos()
            - 0.040_849 * (2.0 * b).sin())
}

/// Equation of time in minutes, PVCDROM three-term approximation.
///
/// Coarser than [`equation_of_time_spencer71`] but common in photovoltaic
/// teaching material. Its day angle is referenced to day 81, near the March
/// equinox.
#[must_use]
pub fn equation_of_time_pvcdrom(day_of_year: f64) -> f64 {
    let bday = day_angle(day_of_year, DayAngleConvention::Spencer) - DAY_ANGLE_RATE * 80.0;
    9.87 * (2.0 * bday).sin() - 7.53 * bday.cos() - 1.5 * bday.sin()
}

/// Solar declination in radians, Spencer (1971) Fourier series.
#[must_use]
pub fn declination_spencer71(day_of_year: f64) -> f64 {
    let b = day_angle(day_of_year, DayAngleConvention::Spencer);
    0.006_918 - 0.399_912 * b.cos() + 0.070_257 * b.sin() - 0.006_758 * (2.0 * b).cos()
        + 0.000_907 * (2.0 * b).sin()
        - 0.002_697 * (3.0 * b).cos()
        + 0.001_48 * (3.0 * b).sin()
}

/// Solar declination in radians, Cooper (1969) single-sine approximation.
#[must_use]
pub fn declination_cooper69(day_of_year: f64) -> f64 {
    let shifted = day_angle(day_of_year, DayAngleConvention::Spencer) + DAY_ANGLE_RATE * 285.0;
    (23.45 * shifted.sin()).to_radians()
}
