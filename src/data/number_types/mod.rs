//! # Number types
//!
//! All algorithms compute with `f64`. Rounding errors accumulate during pivoting, so every sign,
//! feasibility and integrality test goes through the tolerances and helpers in this module.
use num_traits::Float;

/// Magnitude below which a tableau entry is treated as zero when testing its sign.
pub const EPSILON: f64 = 1e-9;

/// Largest absolute Phase I objective value that still counts as feasible.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Distance to the nearest integer within which a value counts as integral.
///
/// Also used by branch-and-bound when comparing against the incumbent.
pub const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// Whether a value is zero within a tolerance.
pub fn is_zero<F: Float>(value: F, tolerance: F) -> bool {
    value.abs() <= tolerance
}

/// Whether a value is within `tolerance` of the nearest integer.
pub fn is_integral<F: Float>(value: F, tolerance: F) -> bool {
    (value - value.round()).abs() <= tolerance
}

/// The fractional part `value - floor(value)`, always in `[0, 1)`.
///
/// Values within `tolerance` of an integer have fractional part zero, also when they lie just
/// below that integer (e.g. `2.9999999999`). Negative values are handled through the floor, so
/// `-1.25` has fractional part `0.75`.
pub fn fractional_part<F: Float>(value: F, tolerance: F) -> F {
    if is_integral(value, tolerance) {
        F::zero()
    } else {
        value - value.floor()
    }
}

/// Whether the fractional part lies strictly inside `(tolerance, 1 - tolerance)`.
pub fn is_fractional<F: Float>(value: F, tolerance: F) -> bool {
    let fraction = value - value.floor();
    fraction > tolerance && fraction < F::one() - tolerance
}

/// Replace values that are numerically zero by an exact zero.
pub fn clean<F: Float>(value: F, tolerance: F) -> F {
    if is_zero(value, tolerance) { F::zero() } else { value }
}
