//! Error types for solar geometry calculations.

use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during solar geometry calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid atmospheric pressure for refraction correction.
    InvalidPressure {
        /// The invalid pressure value in pascals.
        value: f64,
    },
    /// Invalid air temperature for refraction correction.
    InvalidTemperature {
        /// The invalid temperature value in degrees Celsius.
        value: f64,
    },
    /// Two arrays that must be index-aligned have different lengths.
    LengthMismatch {
        /// Length of the timestamp array.
        expected: usize,
        /// Length of the offending companion array.
        actual: usize,
    },
    /// Invalid date/time value or a local time that does not exist.
    InvalidDateTime {
        /// Description of the date/time constraint violation.
        message: &'static str,
    },
    /// An iterative solver failed to converge within its iteration cap.
    ConvergenceFailed {
        /// The iteration cap that was exhausted.
        iterations: u32,
    },
    /// A root-finding bracket does not contain a sign change.
    InvalidBracket {
        /// Function value at the lower bound.
        f_lower: f64,
        /// Function value at the upper bound.
        f_upper: f64,
    },
    /// An unrecognized algorithm-selection value was passed in.
    UnsupportedOption {
        /// Description of the unsupported option.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidPressure { value } => {
                write!(f, "invalid pressure {value} Pa (must be 0 to 200000 Pa)")
            }
            Self::InvalidTemperature { value } => {
                write!(
                    f,
                    "invalid temperature {value}°C (must be above absolute zero)"
                )
            }
            Self::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "array length mismatch: expected {expected} elements, got {actual}"
                )
            }
            Self::InvalidDateTime { message } => {
                write!(f, "invalid date/time: {message}")
            }
            Self::ConvergenceFailed { iterations } => {
                write!(f, "solver did not converge within {iterations} iterations")
            }
            Self::InvalidBracket { f_lower, f_upper } => {
                write!(
                    f,
                    "bracket does not contain a sign change (f(lower)={f_lower}, f(upper)={f_upper})"
                )
            }
            Self::UnsupportedOption { message } => {
                write!(f, "unsupported option: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid date/time error.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Creates an unsupported-option error.
    #[must_use]
    pub const fn unsupported_option(message: &'static str) -> Self {
        Self::UnsupportedOption { message }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::InvalidLatitude { value: latitude });
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::InvalidLongitude { value: longitude });
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates pressure in pascals.
///
/// Zero is allowed: it disables the refraction correction.
///
/// # Errors
/// Returns `InvalidPressure` if pressure is not between 0 and 200000 Pa.
pub fn check_pressure(pressure: f64) -> Result<()> {
    if !pressure.is_finite() || !(0.0..=200_000.0).contains(&pressure) {
        return Err(Error::InvalidPressure { value: pressure });
    }
    Ok(())
}

/// Validates temperature is above absolute zero and plausible for air.
///
/// # Errors
/// Returns `InvalidTemperature` if temperature is outside -273.15 to 100°C.
pub fn check_temperature(temperature: f64) -> Result<()> {
    if !(-273.15..=100.0).contains(&temperature) {
        return Err(Error::InvalidTemperature { value: temperature });
    }
    Ok(())
}

/// Validates that a companion array is aligned with the timestamp array.
///
/// # Errors
/// Returns `LengthMismatch` if the lengths differ.
pub fn check_aligned(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::LengthMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_validation() {
        assert!(check_latitude(0.0).is_ok());
        assert!(check_latitude(90.0).is_ok());
        assert!(check_latitude(-90.0).is_ok());

        assert!(check_latitude(91.0).is_err());
        assert!(check_latitude(-91.0).is_err());
        assert!(check_latitude(f64::NAN).is_err());
    }

    #[test]
    fn test_longitude_validation() {
        assert!(check_longitude(180.0).is_ok());
        assert!(check_longitude(-180.0).is_ok());

        assert!(check_longitude(181.0).is_err());
        assert!(check_longitude(f64::INFINITY).is_err());
    }

    #[test]
    fn test_pressure_validation() {
        assert!(check_pressure(101_325.0).is_ok());
        // zero pressure disables refraction, so it is valid input
        assert!(check_pressure(0.0).is_ok());

        assert!(check_pressure(-100.0).is_err());
        assert!(check_pressure(300_000.0).is_err());
        assert!(check_pressure(f64::NAN).is_err());
    }

    #[test]
    fn test_temperature_validation() {
        assert!(check_temperature(12.0).is_ok());
        assert!(check_temperature(-40.0).is_ok());

        assert!(check_temperature(-300.0).is_err());
        assert!(check_temperature(150.0).is_err());
        assert!(check_temperature(f64::NAN).is_err());
    }

    #[test]
    fn test_aligned_validation() {
        assert!(check_aligned(3, 3).is_ok());
        assert_eq!(
            check_aligned(3, 2),
            Err(Error::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidLatitude { value: 95.0 };
        assert_eq!(
            err.to_string(),
            "invalid latitude 95° (must be between -90° and +90°)"
        );

        let err = Error::ConvergenceFailed { iterations: 100 };
        assert_eq!(
            err.to_string(),
            "solver did not converge within 100 iterations"
        );

        let err = Error::InvalidBracket {
            f_lower: 1.0,
            f_upper: 2.0,
        };
        assert!(err.to_string().contains("sign change"));
    }
}
