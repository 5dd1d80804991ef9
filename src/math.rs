#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Normalizes an angle in degrees to the range [0, 360).
///
/// This function takes any angle value (positive or negative) and converts it
/// to an equivalent angle in the range [0, 360). Values outside this range
/// are wrapped around using modulo arithmetic.
///
/// # Arguments
///
/// * `degrees` - The angle in degrees to normalize
///
/// # Returns
///
/// The normalized angle in degrees, in the range [0, 360)
pub fn normalize_degrees_360(degrees: f64) -> f64 {
    let degrees = degrees / 360.0;
    let mut limited = 360.0 * (degrees - degrees.floor());
    if limited < 0.0 {
        limited += 360.0;
    }
    // A tiny negative input rounds up to exactly one full turn.
    if limited >= 360.0 {
        limited -= 360.0;
    }
    limited
}

/// Normalizes an angle in degrees to the range [-180, 180].
///
/// Used for hour angles, where a value just west of the meridian should read
/// as a small positive angle and one just east as a small negative angle.
pub fn normalize_degrees_180_pm(degrees: f64) -> f64 {
    let degrees = degrees / 360.0;
    let mut limited = 360.0 * (degrees - degrees.floor());
    if limited < -180.0 {
        limited += 360.0;
    } else if limited > 180.0 {
        limited -= 360.0;
    }
    limited
}

/// Normalizes an angle in degrees to the range [0, 180).
pub fn normalize_degrees_180(degrees: f64) -> f64 {
    let degrees = degrees / 180.0;
    let mut limited = 180.0 * (degrees - degrees.floor());
    if limited < 0.0 {
        limited += 180.0;
    }
    if limited >= 180.0 {
        limited -= 180.0;
    }
    limited
}

/// Wraps a value into the unit interval [0, 1), e.g. a fraction of a day.
pub fn normalize_unit_interval(value: f64) -> f64 {
    let mut limited = value - value.floor();
    if limited < 0.0 {
        limited += 1.0;
    }
    if limited >= 1.0 {
        limited -= 1.0;
    }
    limited
}

/// Evaluate a cubic polynomial at `x`.
///
/// Interprets the arguments as coefficients of:
///
/// \(`a_3` x^3 + `a_2` x^2 + `a_1` x + `a_0`\)
///
/// using Horner's method.
pub(crate) fn eval_cubic(a3: f64, a2: f64, a1: f64, a0: f64, x: f64) -> f64 {
    ((a3 * x + a2) * x + a1) * x + a0
}

/// Computes a polynomial using Horner's method.
///
/// Coefficients are ordered [a₀, a₁, a₂, ...] for a₀ + a₁x + a₂x² + ...
pub(crate) fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |result, &coeff| result * x + coeff)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    extern crate std;

    use super::*;
    use std::format;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn wraps_known_angles() {
        assert_abs_diff_eq!(normalize_degrees_360(370.0), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_degrees_360(-30.0), 330.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_degrees_360(720.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_degrees_180_pm(190.0), -170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_degrees_180_pm(-190.0), 170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_degrees_180(200.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_unit_interval(-0.25), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_unit_interval(1.5), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn tiny_negative_angle_stays_below_full_turn() {
        let limited = normalize_degrees_360(-1e-20);
        assert!((0.0..360.0).contains(&limited), "{limited}");
        let limited = normalize_degrees_180(-1e-20);
        assert!((0.0..180.0).contains(&limited), "{limited}");
        let limited = normalize_unit_interval(-1e-20);
        assert!((0.0..1.0).contains(&limited), "{limited}");
    }

    #[test]
    fn polynomial_matches_expanded_form() {
        let x = 0.37;
        let expected = 1.0 + 2.0 * x + 3.0 * x * x + 4.0 * x * x * x;
        assert_abs_diff_eq!(polynomial(&[1.0, 2.0, 3.0, 4.0], x), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(eval_cubic(4.0, 3.0, 2.0, 1.0, x), expected, epsilon = 1e-12);
        assert_eq!(polynomial(&[], x), 0.0);
    }

    proptest! {
        #[test]
        fn degree_wrapping_is_idempotent_and_in_domain(degrees in -1.0e6_f64..1.0e6_f64) {
            let once = normalize_degrees_360(degrees);
            prop_assert!((0.0..360.0).contains(&once));
            assert_abs_diff_eq!(normalize_degrees_360(once), once, epsilon = 1e-9);

            let once = normalize_degrees_180_pm(degrees);
            prop_assert!((-180.0..=180.0).contains(&once));
            assert_abs_diff_eq!(normalize_degrees_180_pm(once), once, epsilon = 1e-9);

            let once = normalize_degrees_180(degrees);
            prop_assert!((0.0..180.0).contains(&once));
            assert_abs_diff_eq!(normalize_degrees_180(once), once, epsilon = 1e-9);
        }

        #[test]
        fn unit_interval_is_idempotent(value in -1.0e4_f64..1.0e4_f64) {
            let once = normalize_unit_interval(value);
            prop_assert!((0.0..1.0).contains(&once));
            assert_abs_diff_eq!(normalize_unit_interval(once), once, epsilon = 1e-9);
        }
    }
}
