//! Small numeric helpers shared by the solar geometry algorithms.

/// Computes a polynomial using Horner's method for numerical stability.
///
/// Coefficients are ordered [a₀, a₁, a₂, ...] for a₀ + a₁x + a₂x² + ...
pub fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    let Some(&last) = coeffs.last() else {
        return 0.0;
    };

    let mut result = last;
    for &coeff in coeffs.iter().rev().skip(1) {
        result = result.mul_add(x, coeff);
    }
    result
}

/// Normalizes an angle in degrees to the range [0, 360).
pub fn normalize_degrees_0_to_360(degrees: f64) -> f64 {
    let normalized = degrees % 360.0;
    if normalized < 0.0 {
        normalized + 360.0
    } else {
        normalized
    }
}

/// Snaps a cosine-like value to ±1 when it is within `atol` of either bound.
///
/// Floating-point round-up can push the argument of `acos` marginally outside
/// [-1, 1], which would produce NaN. Values within `atol` of a bound take the
/// bound itself; anything further out (including NaN) is left untouched.
pub fn snap_to_unit_interval(value: f64, atol: f64) -> f64 {
    if (value - 1.0).abs() <= atol {
        1.0
    } else if (value + 1.0).abs() <= atol {
        -1.0
    } else {
        value
    }
}
