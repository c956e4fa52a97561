//! Core data types for solar geometry calculations.

use crate::error::{check_pressure, check_temperature};
use crate::Result;

/// Atmospheric conditions used by the refraction correction.
///
/// Refraction bends light near the horizon, lifting the apparent sun above its
/// geometric position. The correction scales with pressure and temperature;
/// a pressure of 0 Pa disables it entirely, which is the conventional way to
/// ask for purely geometric results.
///
/// # Example
/// ```
/// # use solar_geometry::AtmosphericConditions;
/// let standard = AtmosphericConditions::standard();
/// assert_eq!(standard.pressure(), 101_325.0);
/// assert_eq!(standard.temperature(), 12.0);
///
/// let geometric = AtmosphericConditions::refraction_disabled();
/// assert_eq!(geometric.pressure(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericConditions {
    /// Atmospheric pressure in pascals.
    pressure: f64,
    /// Air temperature in degrees Celsius.
    temperature: f64,
}

impl AtmosphericConditions {
    /// Creates atmospheric conditions from pressure (Pa) and temperature (°C).
    ///
    /// # Errors
    /// Returns `InvalidPressure` or `InvalidTemperature` for out-of-range values.
    pub fn new(pressure: f64, temperature: f64) -> Result<Self> {
        check_pressure(pressure)?;
        check_temperature(temperature)?;
        Ok(Self {
            pressure,
            temperature,
        })
    }

    /// Standard conditions used throughout the crate as the single default:
    /// 101325 Pa (one standard atmosphere) and 12 °C yearly average.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            pressure: 101_325.0,
            temperature: 12.0,
        }
    }

    /// Conditions with zero pressure, which turn the refraction term off.
    #[must_use]
    pub const fn refraction_disabled() -> Self {
        Self {
            pressure: 0.0,
            temperature: 12.0,
        }
    }

    /// Gets the atmospheric pressure in pascals.
    #[must_use]
    pub const fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Gets the air temperature in degrees Celsius.
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl Default for AtmosphericConditions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Sun position and solar time for one timestamp, as produced by the
/// iterative ephemeris solver.
///
/// Angles are in degrees. `apparent_*` fields include the atmospheric
/// refraction correction, the plain fields are geometric. The complements
/// `zenith = 90 - elevation` and `apparent_zenith = 90 - apparent_elevation`
/// hold by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarEphemeris {
    /// Geometric elevation angle above the horizon (degrees).
    pub elevation: f64,
    /// Refraction-corrected elevation angle (degrees).
    pub apparent_elevation: f64,
    /// Azimuth angle in degrees (0° = North, increasing clockwise, [0, 360)).
    pub azimuth: f64,
    /// True solar time in hours (12.0 at solar noon).
    pub solar_time: f64,
}

impl SolarEphemeris {
    /// Geometric zenith angle in degrees (90° − elevation).
    #[must_use]
    pub fn zenith(&self) -> f64 {
        90.0 - self.elevation
    }

    /// Refraction-corrected zenith angle in degrees (90° − apparent elevation).
    #[must_use]
    pub fn apparent_zenith(&self) -> f64 {
        90.0 - self.apparent_elevation
    }

    /// Checks if the geometric sun center is above the horizon.
    #[must_use]
    pub fn is_sun_up(&self) -> bool {
        self.elevation > 0.0
    }
}

/// Result of a sunrise/sunset calculation for a given day.
///
/// At extreme latitudes the sun can stay above or below the horizon for the
/// whole day; those days have a transit (the sun's closest approach to the
/// local meridian) but no sunrise or sunset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SunriseResult<T> {
    /// Regular day with distinct sunrise, transit (solar noon), and sunset.
    RegularDay {
        /// Time of sunrise.
        sunrise: T,
        /// Time of solar transit.
        transit: T,
        /// Time of sunset.
        sunset: T,
    },
    /// Polar day: the sun never sets.
    AllDay {
        /// Time of solar transit.
        transit: T,
    },
    /// Polar night: the sun never rises.
    AllNight {
        /// Time of solar transit (still below the horizon).
        transit: T,
    },
}

impl<T> SunriseResult<T> {
    /// Gets the transit time, which exists for every variant.
    pub const fn transit(&self) -> &T {
        match self {
            Self::RegularDay { transit, .. }
            | Self::AllDay { transit }
            | Self::AllNight { transit } => transit,
        }
    }

    /// Gets sunrise time if this is a regular day.
    pub const fn sunrise(&self) -> Option<&T> {
        if let Self::RegularDay { sunrise, .. } = self {
            Some(sunrise)
        } else {
            None
        }
    }

    /// Gets sunset time if this is a regular day.
    pub const fn sunset(&self) -> Option<&T> {
        if let Self::RegularDay { sunset, .. } = self {
            Some(sunset)
        } else {
            None
        }
    }
}
