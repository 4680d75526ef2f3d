//! Math utilities.

pub mod quadrature;

use special::Beta;

/// Floating-point precision to use for integration.
#[allow(non_camel_case_types)]
pub type fin = f64;

/// Evaluates the logarithm of the beta function,
/// ln B(a, b) = ln Gamma(a) + ln Gamma(b) - ln Gamma(a + b).
///
/// Both shape parameters must be positive.
pub fn ln_beta(a: fin, b: fin) -> fin {
    a.ln_beta(b)
}

/// Evaluates the probability density of the Beta(a, b) distribution at `x`.
///
/// The density is zero outside the open unit interval. Inside, it is
/// evaluated in log-space so that large or small shape parameters
/// neither overflow nor underflow the intermediate normalization.
pub fn beta_density(a: fin, b: fin, x: fin) -> fin {
    if x <= 0.0 || x >= 1.0 {
        return 0.0;
    }
    let ln_normalization = ln_beta(a, b);
    fin::exp((a - 1.0) * fin::ln(x) + (b - 1.0) * fin::ln_1p(-x) - ln_normalization)
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn beta_density_vanishes_outside_unit_interval() {
        for &x in &[-0.5, 0.0, 1.0, 1.5] {
            assert_eq!(beta_density(2.0, 3.0, x), 0.0);
        }
    }

    #[test]
    fn uniform_beta_density_is_one() {
        for &x in &[1e-6, 0.25, 0.5, 0.999] {
            assert_relative_eq!(beta_density(1.0, 1.0, x), 1.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn beta_density_matches_closed_form() {
        // Beta(2, 2) has density 6x(1 - x)
        for &x in &[0.1, 0.3, 0.5, 0.8] {
            assert_relative_eq!(
                beta_density(2.0, 2.0, x),
                6.0 * x * (1.0 - x),
                max_relative = 1e-10
            );
        }
        // Beta(2, 3) has density 12x(1 - x)^2
        let x = 0.4;
        assert_relative_eq!(
            beta_density(2.0, 3.0, x),
            12.0 * x * (1.0 - x) * (1.0 - x),
            max_relative = 1e-10
        );
    }

    #[test]
    fn beta_density_is_symmetric_under_swapped_shapes() {
        let (a, b, x) = (2.5, 7.0, 0.35);
        assert_relative_eq!(
            beta_density(a, b, x),
            beta_density(b, a, 1.0 - x),
            max_relative = 1e-10
        );
    }

    #[test]
    fn beta_density_stays_finite_for_large_shapes() {
        let value = beta_density(400.0, 600.0, 0.4);
        assert!(value.is_finite());
        assert!(value > 0.0);
        assert_abs_diff_eq!(beta_density(400.0, 600.0, 0.9), 0.0, epsilon = 1e-100);
    }

    #[test]
    fn ln_beta_matches_known_values() {
        // B(1, 1) = 1 and B(2, 3) = 1/12
        assert_abs_diff_eq!(ln_beta(1.0, 1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(ln_beta(2.0, 3.0), -(12.0 as fin).ln(), max_relative = 1e-10);
    }
}
