//! Solar position, solar time and sunrise/sunset geometry for energy
//! modelling.
//!
//! The crate provides several layers, from cheap approximations to an
//! iterative ephemeris solver:
//!
//! - [`series`]: day-angle Fourier series for the equation of time and solar
//!   declination
//! - [`time`]: conversions between timestamps, hours since midnight and hour
//!   angle, plus Dublin Julian Day and ΔT estimation
//! - [`analytical`]: closed-form zenith and azimuth from hour angle and
//!   declination
//! - [`ephemeris`]: sun position, solar time and earth-sun distance from
//!   low-precision orbital elements, with atmospheric refraction
//! - [`sunrise`]: geometric sunrise, sunset and transit times
//! - [`provider`] and [`rootfind`]: a pluggable ephemeris trait and a Brent
//!   root finder for locating attribute crossings such as horizon passages
//!
//! Latitudes and longitudes are degrees (north and east positive).
//! Timestamps are timezone-aware `chrono` values; results respect the
//! timezone of their inputs.
//!
//! # Example
//!
//! ```
//! use chrono::DateTime;
//! use solar_geometry::{solar_position, AtmosphericConditions};
//!
//! let times = vec![DateTime::parse_from_rfc3339("2023-06-21T19:00:00Z").unwrap()];
//! let positions =
//!     solar_position(&times, 39.0, -105.0, AtmosphericConditions::standard()).unwrap();
//!
//! // near local solar noon on the summer solstice
//! assert!(positions[0].elevation > 72.0);
//! assert!((positions[0].solar_time - 12.0).abs() < 0.1);
//! ```

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::doc_markdown,
    clippy::similar_names,
    clippy::suboptimal_flops
)]

pub mod analytical;
pub mod ephemeris;
mod error;
mod math;
pub mod provider;
pub mod rootfind;
pub mod series;
pub mod sunrise;
pub mod time;
mod types;

pub use analytical::{solar_azimuth_analytical, solar_zenith_analytical};
pub use ephemeris::{earthsun_distance, solar_position, solar_position_single};
pub use error::{Error, Result};
pub use provider::{Observer, ReferenceEphemeris, SolarAttribute, SunEphemeris, SunState};
pub use rootfind::{brentq, find_attribute_crossing, find_attribute_crossing_with_tolerance};
pub use series::{
    day_angle, declination_cooper69, declination_spencer71, equation_of_time_pvcdrom,
    equation_of_time_spencer71, DayAngleConvention,
};
pub use sunrise::{
    sun_rise_set_transit_geometric, sun_rise_set_transit_geometric_hours, sunset_hour_angle,
    SolarDayHours,
};
pub use time::{DeltaT, DEFAULT_DELTA_T};
pub use types::{AtmosphericConditions, SolarEphemeris, SunriseResult};
