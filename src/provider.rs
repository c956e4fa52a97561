//! Sun ephemeris providers.
//!
//! [`SunEphemeris`] is the seam between the attribute root finder and any
//! concrete ephemeris: given a UTC instant it reports the sun's altitude,
//! azimuth and distance for a fixed observer. [`ReferenceEphemeris`] is the
//! built-in provider backed by [`crate::ephemeris`]; callers with access to
//! a higher-precision backend can implement the trait themselves and the
//! root finder will use it unchanged.

use crate::ephemeris::{earthsun_distance, solar_position_single};
use crate::error::check_coordinates;
use crate::types::AtmosphericConditions;
use crate::{Error, Result};
use chrono::{DateTime, Utc};

/// A fixed observation site: coordinates, elevation, atmosphere and the
/// altitude of the local horizon.
///
/// # Example
/// ```
/// # use solar_geometry::Observer;
/// let observer = Observer::new(39.0, -105.0)
///     .unwrap()
///     .with_elevation(1730.0)
///     .with_horizon(-0.833);
/// assert_eq!(observer.latitude(), 39.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    latitude: f64,
    longitude: f64,
    elevation: f64,
    conditions: AtmosphericConditions,
    horizon: f64,
}

impl Observer {
    /// Creates an observer at sea level with standard atmosphere and a
    /// horizon at 0°.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for bad coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
            elevation: 0.0,
            conditions: AtmosphericConditions::standard(),
            horizon: 0.0,
        })
    }

    /// Sets the site elevation above sea level in meters.
    #[must_use]
    pub const fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    /// Sets the atmospheric conditions used for refraction.
    #[must_use]
    pub const fn with_conditions(mut self, conditions: AtmosphericConditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// Sets the horizon altitude in degrees. The conventional -0.833°
    /// accounts for the solar radius and average refraction at rise and set.
    #[must_use]
    pub const fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Gets the latitude in degrees, north positive.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees, east positive.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Gets the elevation above sea level in meters.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Gets the atmospheric conditions.
    #[must_use]
    pub const fn conditions(&self) -> AtmosphericConditions {
        self.conditions
    }

    /// Gets the horizon altitude in degrees.
    #[must_use]
    pub const fn horizon(&self) -> f64 {
        self.horizon
    }
}

/// The sun as seen from an observer at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunState {
    /// Refraction-corrected altitude above the horizontal plane, degrees.
    pub altitude: f64,
    /// Azimuth in degrees, 0° = North, increasing clockwise.
    pub azimuth: f64,
    /// Earth-sun distance in astronomical units.
    pub earth_distance: f64,
}

/// A sun attribute the root finder can solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarAttribute {
    /// Altitude above the horizontal plane, degrees.
    Altitude,
    /// Azimuth clockwise from North, degrees.
    Azimuth,
}

impl SolarAttribute {
    /// Looks up an attribute by name, for callers driven by configuration.
    ///
    /// # Errors
    /// Returns `UnsupportedOption` for names other than `"altitude"` and
    /// `"azimuth"`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "altitude" => Ok(Self::Altitude),
            "azimuth" => Ok(Self::Azimuth),
            _ => Err(Error::unsupported_option(
                "attribute must be \"altitude\" or \"azimuth\"",
            )),
        }
    }

    /// Reads this attribute out of a [`SunState`].
    #[must_use]
    pub const fn extract(self, state: &SunState) -> f64 {
        match self {
            Self::Altitude => state.altitude,
            Self::Azimuth => state.azimuth,
        }
    }
}

/// Source of sun states for a fixed observer.
///
/// Takes `&mut self` so implementations may keep caches or other per-query
/// state.
pub trait SunEphemeris {
    /// Computes the sun state at a UTC instant.
    ///
    /// # Errors
    /// Implementation-specific; the built-in provider surfaces solver
    /// failures.
    fn sun_at(&mut self, time: DateTime<Utc>) -> Result<SunState>;
}

/// The built-in provider, backed by the iterative ephemeris solver.
#[derive(Debug, Clone)]
pub struct ReferenceEphemeris {
    observer: Observer,
}

impl ReferenceEphemeris {
    /// Creates a provider for the given observer.
    #[must_use]
    pub const fn new(observer: Observer) -> Self {
        Self { observer }
    }

    /// Gets the observer this provider reports for.
    #[must_use]
    pub const fn observer(&self) -> &Observer {
        &self.observer
    }
}

impl SunEphemeris for ReferenceEphemeris {
    fn sun_at(&mut self, time: DateTime<Utc>) -> Result<SunState> {
        let position = solar_position_single(
            &time,
            self.observer.latitude,
            self.observer.longitude,
            self.observer.conditions,
        )?;
        let distance = earthsun_distance(core::slice::from_ref(&time))?;

        Ok(SunState {
            altitude: position.apparent_elevation,
            azimuth: position.azimuth,
            earth_distance: distance[0],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_construction() {
        let observer = Observer::new(39.0, -105.0)
            .unwrap()
            .with_elevation(1_730.0)
            .with_conditions(AtmosphericConditions::refraction_disabled())
            .with_horizon(-0.833);

        assert_eq!(observer.latitude(), 39.0);
        assert_eq!(observer.longitude(), -105.0);
        assert_eq!(observer.elevation(), 1_730.0);
        assert_eq!(observer.conditions().pressure(), 0.0);
        assert_eq!(observer.horizon(), -0.833);

        assert!(Observer::new(91.0, 0.0).is_err());
        assert!(Observer::new(0.0, 200.0).is_err());
    }

    #[test]
    fn test_attribute_lookup() {
        assert_eq!(
            SolarAttribute::from_name("altitude"),
            Ok(SolarAttribute::Altitude)
        );
        assert_eq!(
            SolarAttribute::from_name("azimuth"),
            Ok(SolarAttribute::Azimuth)
        );
        assert!(SolarAttribute::from_name("declination").is_err());

        let state = SunState {
            altitude: 42.0,
            azimuth: 180.0,
            earth_distance: 1.0,
        };
        assert_eq!(SolarAttribute::Altitude.extract(&state), 42.0);
        assert_eq!(SolarAttribute::Azimuth.extract(&state), 180.0);
    }

    #[test]
    fn test_reference_ephemeris_reports_sun_state() {
        let observer = Observer::new(39.0, -105.0).unwrap();
        let mut provider = ReferenceEphemeris::new(observer);

        let time = "2023-06-21T19:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let state = provider.sun_at(time).unwrap();

        // near local solar noon at midsummer
        assert!(state.altitude > 70.0 && state.altitude < 80.0);
        assert!(state.azimuth > 0.0 && state.azimuth < 360.0);
        assert!(state.earth_distance > 1.0 && state.earth_distance < 1.02);
    }
}
