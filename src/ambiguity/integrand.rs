//! The integrand of the ambiguity density.

use super::{
    fam, substitution::substitute, validate_evaluation_point, AmbiguityError, AmbiguityResult,
    AmbiguityType, ShapeParameters,
};
use crate::math::beta_density;

/// Integrand `h(u)` for a fixed evaluation point, ambiguity type and shape parameters.
///
/// The integrand is the Beta(gamma, alpha + beta) density of `u`, times the
/// derivative of the substitution variable, times the symmetrized
/// Beta(alpha, beta) density of the substitution variable. It is zero at and
/// outside the edges of the open interval `(u0, a)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbiguityIntegrand {
    a: fam,
    ambiguity_type: AmbiguityType,
    shape: ShapeParameters,
    lower_bound: fam,
}

impl AmbiguityIntegrand {
    /// Creates the integrand for the given evaluation point, which must lie in (0, 1).
    pub fn new(a: fam, ambiguity_type: AmbiguityType, shape: ShapeParameters) -> AmbiguityResult<Self> {
        let a = validate_evaluation_point(a)?;
        Ok(Self {
            a,
            ambiguity_type,
            shape,
            lower_bound: ambiguity_type.lower_integration_bound(a),
        })
    }

    pub fn lower_bound(&self) -> fam {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> fam {
        self.a
    }

    /// Whether `u` lies strictly inside the support of the integrand.
    pub fn supports(&self, u: fam) -> bool {
        u > self.lower_bound && u < self.a
    }

    /// Evaluates the integrand at `u`.
    pub fn evaluate(&self, u: fam) -> AmbiguityResult<fam> {
        if !self.supports(u) {
            return Ok(0.0);
        }
        let ShapeParameters { alpha, beta, gamma } = self.shape;

        let u_density = beta_density(gamma, alpha + beta, u);
        let substitution = substitute(self.a, u, self.ambiguity_type)?;
        let xi_density = beta_density(alpha, beta, substitution.xi)
            + beta_density(alpha, beta, 1.0 - substitution.xi);

        let value = u_density * substitution.dxi_da * xi_density;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(AmbiguityError::NonFiniteIntegrand {
                a: self.a,
                u,
                value,
            })
        }
    }
}

/// Evaluates the integrand of the ambiguity density at `a` for integration variable `u`.
pub fn evaluate_integrand(
    a: fam,
    u: fam,
    ambiguity_type: AmbiguityType,
    shape: ShapeParameters,
) -> AmbiguityResult<fam> {
    AmbiguityIntegrand::new(a, ambiguity_type, shape)?.evaluate(u)
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_relative_eq;

    fn shape() -> ShapeParameters {
        ShapeParameters::new(2.0, 2.0, 2.0).unwrap()
    }

    #[test]
    fn integrand_vanishes_at_and_beyond_support_edges() {
        for ambiguity_type in [AmbiguityType::Standard, AmbiguityType::Modified] {
            for &u in &[-0.1, 0.0, 0.5, 0.7] {
                assert_eq!(evaluate_integrand(0.5, u, ambiguity_type, shape()), Ok(0.0));
            }
        }
        // Lower edge of the standard type at 2a - 1
        let integrand = AmbiguityIntegrand::new(0.8, AmbiguityType::Standard, shape()).unwrap();
        assert_eq!(integrand.evaluate(integrand.lower_bound()), Ok(0.0));
        assert_eq!(integrand.evaluate(0.3), Ok(0.0));
        assert!(integrand.evaluate(0.7).unwrap() > 0.0);
    }

    #[test]
    fn integrand_is_positive_inside_support() {
        for ambiguity_type in [AmbiguityType::Standard, AmbiguityType::Modified] {
            let integrand = AmbiguityIntegrand::new(0.6, ambiguity_type, shape()).unwrap();
            let (lower, upper) = (integrand.lower_bound(), integrand.upper_bound());
            for idx in 1..10 {
                let u = lower + (upper - lower) * idx as fam / 10.0;
                assert!(integrand.evaluate(u).unwrap() > 0.0);
            }
        }
    }

    #[test]
    fn integrand_matches_composed_densities() {
        let (a, u) = (0.4, 0.1);
        let value = evaluate_integrand(a, u, AmbiguityType::Modified, shape()).unwrap();

        // Beta(2, 4) density is 20u(1 - u)^3 and Beta(2, 2) density is 6x(1 - x)
        let u_density = 20.0 * u * (1.0 - u).powi(3);
        let root = fam::sqrt((1.0 - a) / (1.0 - u));
        let xi = 0.5 * (1.0 - root);
        let dxi_da = 1.0 / (4.0 * (1.0 - u) * root);
        let xi_density = 2.0 * 6.0 * xi * (1.0 - xi);
        assert_relative_eq!(value, u_density * dxi_da * xi_density, max_relative = 1e-10);
    }

    #[test]
    fn bounds_follow_ambiguity_type() {
        let integrand = AmbiguityIntegrand::new(0.75, AmbiguityType::Standard, shape()).unwrap();
        assert_relative_eq!(integrand.lower_bound(), 0.5);
        assert_eq!(integrand.upper_bound(), 0.75);
        let integrand = AmbiguityIntegrand::new(0.75, AmbiguityType::Modified, shape()).unwrap();
        assert_eq!(integrand.lower_bound(), 0.0);
    }

    #[test]
    fn overflowing_integrand_is_reported() {
        // u^(gamma - 1) exceeds the largest float for a subnormal u and small gamma
        let shape = ShapeParameters::new(2.0, 2.0, 1e-3).unwrap();
        let integrand = AmbiguityIntegrand::new(0.5, AmbiguityType::Modified, shape).unwrap();
        let u = 1e-320;
        assert!(integrand.supports(u));
        let err = integrand.evaluate(u).unwrap_err();
        assert!(matches!(
            err,
            AmbiguityError::NonFiniteIntegrand { a, value, .. } if a == 0.5 && value.is_infinite()
        ));
        assert!(err.is_numeric_error());
    }

    #[test]
    fn invalid_evaluation_point_is_rejected() {
        assert_eq!(
            evaluate_integrand(1.0, 0.5, AmbiguityType::Standard, shape()),
            Err(AmbiguityError::PointOutsideUnitInterval(1.0))
        );
    }
}
