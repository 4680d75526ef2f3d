//! Change of variables from the integration variable to the substitution variable.

use super::{fam, AmbiguityError, AmbiguityResult, AmbiguityType};

/// Substitution variable `xi` together with its partial derivative with
/// respect to the evaluation point `a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Substitution {
    pub xi: fam,
    pub dxi_da: fam,
}

/// Computes the substitution variable and its derivative for the given
/// evaluation point `a` and integration variable `u`.
///
/// For the standard type, `xi = (1 - sqrt(2(1 - a)/(1 - u) - 1))/2`, and for the
/// modified type, `xi = (1 - sqrt((1 - a)/(1 - u)))/2`. Inside the integration
/// interval the square root argument is non-negative; an error is returned if it
/// is not.
pub fn substitute(a: fam, u: fam, ambiguity_type: AmbiguityType) -> AmbiguityResult<Substitution> {
    let denominator = 1.0 - u;
    let (argument, derivative_scale) = match ambiguity_type {
        AmbiguityType::Standard => (2.0 * (1.0 - a) / denominator - 1.0, 2.0),
        AmbiguityType::Modified => ((1.0 - a) / denominator, 4.0),
    };
    // Also catches NaN
    if !(argument >= 0.0) {
        return Err(AmbiguityError::NegativeSubstitutionArgument { a, u, argument });
    }
    let root = fam::sqrt(argument);
    Ok(Substitution {
        xi: 0.5 * (1.0 - root),
        dxi_da: 1.0 / (derivative_scale * denominator * root),
    })
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn standard_substitution_matches_closed_form() {
        let (a, u) = (0.6, 0.3);
        let Substitution { xi, dxi_da } = substitute(a, u, AmbiguityType::Standard).unwrap();
        let root = fam::sqrt(2.0 * 0.4 / 0.7 - 1.0);
        assert_relative_eq!(xi, 0.5 * (1.0 - root), max_relative = 1e-14);
        assert_relative_eq!(dxi_da, 1.0 / (2.0 * 0.7 * root), max_relative = 1e-14);
    }

    #[test]
    fn modified_substitution_matches_closed_form() {
        let (a, u) = (0.6, 0.3);
        let Substitution { xi, dxi_da } = substitute(a, u, AmbiguityType::Modified).unwrap();
        let root = fam::sqrt(0.4 / 0.7);
        assert_relative_eq!(xi, 0.5 * (1.0 - root), max_relative = 1e-14);
        assert_relative_eq!(dxi_da, 1.0 / (4.0 * 0.7 * root), max_relative = 1e-14);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let (a, u, h) = (0.45, 0.2, 1e-6);
        for ambiguity_type in [AmbiguityType::Standard, AmbiguityType::Modified] {
            let upper = substitute(a + h, u, ambiguity_type).unwrap().xi;
            let lower = substitute(a - h, u, ambiguity_type).unwrap().xi;
            let derivative = substitute(a, u, ambiguity_type).unwrap().dxi_da;
            assert_relative_eq!((upper - lower) / (2.0 * h), derivative, max_relative = 1e-6);
        }
    }

    #[test]
    fn substitution_variable_lies_in_lower_half() {
        for &(a, u) in &[(0.2, 0.1), (0.5, 0.25), (0.9, 0.85), (0.99, 0.985)] {
            for ambiguity_type in [AmbiguityType::Standard, AmbiguityType::Modified] {
                let xi = substitute(a, u, ambiguity_type).unwrap().xi;
                assert!(xi > 0.0 && xi <= 0.5, "xi = {} for a = {}, u = {}", xi, a, u);
            }
        }
    }

    #[test]
    fn negative_argument_is_reported() {
        // u below 2a - 1 is outside the standard integration interval
        let result = substitute(0.9, 0.2, AmbiguityType::Standard);
        assert!(matches!(
            result,
            Err(AmbiguityError::NegativeSubstitutionArgument { .. })
        ));
        assert!(result.unwrap_err().is_numeric_error());
    }
}
