//! Root finding for solar attribute crossings.
//!
//! Answers questions like "when does the sun's altitude cross -0.833° this
//! evening": the crossing instant is a root of `attribute(t) - target`, and
//! [`brentq`] locates it with Brent's method, which combines bisection,
//! secant steps and inverse quadratic interpolation without ever leaving the
//! bracketing interval. Time is iterated as Dublin Julian Day fractions so
//! the whole search runs in plain `f64`.

#![allow(clippy::many_single_char_names)]

use crate::provider::{SolarAttribute, SunEphemeris};
use crate::time::{datetime_to_djd, djd_to_datetime};
use crate::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};

/// Default absolute tolerance on the root, in days. 1e-12 days is below a
/// microsecond, well past the precision of any supported ephemeris.
pub const DEFAULT_XTOL: f64 = 1e-12;

/// Iteration cap for [`brentq`]. Brent's method is superlinear, so a bracket
/// that needs this many iterations indicates a pathological objective.
const MAX_ITERATIONS: u32 = 100;

/// Finds a root of `f` in `[lower, upper]` with Brent's method.
///
/// The objective is fallible so that expensive evaluations (an ephemeris
/// query, say) can surface their own errors; any such error aborts the
/// search immediately.
///
/// # Errors
/// Returns `InvalidBracket` if `f(lower)` and `f(upper)` have the same sign,
/// `ConvergenceFailed` if the iteration cap is exhausted, and whatever error
/// `f` itself produces.
pub fn brentq<F>(mut f: F, lower: f64, upper: f64, xtol: f64) -> Result<f64>
where
    F: FnMut(f64) -> Result<f64>,
{
    let mut a = lower;
    let mut b = upper;
    let mut fa = f(a)?;
    let mut fb = f(b)?;

    if (fa > 0.0 && fb > 0.0) || (fa < 0.0 && fb < 0.0) {
        return Err(Error::InvalidBracket {
            f_lower: fa,
            f_upper: fb,
        });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            // root no longer bracketed by b and c; bring c back to a
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * xtol;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol1 || fb == 0.0 {
            return Ok(b);
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // attempt inverse quadratic interpolation (secant when a == c)
            let s = fb / fa;
            let mut p;
            let mut q;
            if a == c {
                p = 2.0 * xm * s;
                q = 1.0 - s;
            } else {
                let qq = fa / fc;
                let r = fb / fc;
                p = s * (2.0 * xm * qq * (qq - r) - (b - a) * (r - 1.0));
                q = (qq - 1.0) * (r - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                // interpolation acceptable
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol1 {
            b += d;
        } else {
            b += tol1.copysign(xm);
        }
        fb = f(b)?;
    }

    Err(Error::ConvergenceFailed {
        iterations: MAX_ITERATIONS,
    })
}

/// Finds the instant within a window at which a sun attribute crosses a
/// target value, using the default tolerance.
///
/// The attribute must cross the target exactly once between `window_start`
/// and `window_end`: pick the window from a coarse pass (the geometric
/// sunrise estimate, say) so that it brackets a single crossing.
///
/// # Errors
/// Returns `InvalidBracket` when the attribute does not change sides of the
/// target across the window, `ConvergenceFailed` if the search stalls, and
/// any error the provider raises.
pub fn find_attribute_crossing<Tz: TimeZone, E: SunEphemeris>(
    provider: &mut E,
    attribute: SolarAttribute,
    target: f64,
    window_start: &DateTime<Tz>,
    window_end: &DateTime<Tz>,
) -> Result<DateTime<Utc>> {
    find_attribute_crossing_with_tolerance(
        provider,
        attribute,
        target,
        window_start,
        window_end,
        DEFAULT_XTOL,
    )
}

/// [`find_attribute_crossing`] with an explicit tolerance in days.
///
/// # Errors
/// Same conditions as [`find_attribute_crossing`].
pub fn find_attribute_crossing_with_tolerance<Tz: TimeZone, E: SunEphemeris>(
    provider: &mut E,
    attribute: SolarAttribute,
    target: f64,
    window_start: &DateTime<Tz>,
    window_end: &DateTime<Tz>,
    xtol: f64,
) -> Result<DateTime<Utc>> {
    let lower = datetime_to_djd(window_start);
    let upper = datetime_to_djd(window_end);

    let root = brentq(
        |djd| {
            let state = provider.sun_at(djd_to_datetime(djd)?)?;
            Ok(attribute.extract(&state) - target)
        },
        lower,
        upper,
        xtol,
    )?;

    djd_to_datetime(root)
}
