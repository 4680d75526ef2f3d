//! Closed-form ambiguity measures of class probability vectors and their
//! moments under a Dirichlet posterior.
//!
//! Vectors are laid out with the residual class entries first and the
//! "can't solve" entry last.

use super::{fam, AmbiguityError, AmbiguityResult, AmbiguityType};

/// Smallest value used for `1 - p_cs` in the denominator of the ambiguity.
const MIN_SOLVABLE_PROBABILITY: fam = 1e-7;

impl AmbiguityType {
    /// Computes the ambiguity measure of the given probability vector.
    pub fn measure(&self, probabilities: &[fam]) -> AmbiguityResult<fam> {
        match self {
            Self::Standard => ambiguity(probabilities),
            Self::Modified => modified_ambiguity(probabilities),
        }
    }

    /// Computes the expected ambiguity under a Dirichlet distribution with the given concentrations.
    pub fn expected_measure(&self, concentrations: &[fam]) -> AmbiguityResult<fam> {
        expected_ambiguity(concentrations, *self)
    }

    /// Computes the variance of the ambiguity under a Dirichlet distribution with the given concentrations.
    pub fn measure_variance(&self, concentrations: &[fam]) -> AmbiguityResult<fam> {
        ambiguity_variance(concentrations, *self)
    }
}

fn split_probabilities(probabilities: &[fam]) -> AmbiguityResult<(&[fam], fam)> {
    let (residual, p_cs) = split_last(probabilities)?;
    if let Some(&p) = probabilities
        .iter()
        .find(|&&p| !(p.is_finite() && (0.0..=1.0).contains(&p)))
    {
        return Err(AmbiguityError::InvalidProbability(p));
    }
    Ok((residual, p_cs))
}

fn split_concentrations(concentrations: &[fam]) -> AmbiguityResult<(&[fam], fam)> {
    let (residual, alpha_cs) = split_last(concentrations)?;
    if let Some(&alpha) = concentrations
        .iter()
        .find(|&&alpha| !(alpha.is_finite() && alpha > 0.0))
    {
        return Err(AmbiguityError::InvalidConcentration(alpha));
    }
    Ok((residual, alpha_cs))
}

fn split_last(values: &[fam]) -> AmbiguityResult<(&[fam], fam)> {
    match values.split_last() {
        Some((&last, residual)) if residual.len() >= 2 => Ok((residual, last)),
        _ => Err(AmbiguityError::TooFewClasses(values.len().saturating_sub(1))),
    }
}

/// Computes the ambiguity `1 - sum(p_res^2)/(1 - p_cs)` of a probability vector,
/// which is one when the problem is certainly unsolvable.
pub fn ambiguity(probabilities: &[fam]) -> AmbiguityResult<fam> {
    let (residual, p_cs) = split_probabilities(probabilities)?;
    Ok(unchecked_ambiguity(residual, p_cs))
}

fn unchecked_ambiguity(residual: &[fam], p_cs: fam) -> fam {
    if p_cs < 1.0 {
        let sum_of_squares: fam = residual.iter().map(|p| p * p).sum();
        1.0 - sum_of_squares / fam::max(1.0 - p_cs, MIN_SOLVABLE_PROBABILITY)
    } else {
        1.0
    }
}

/// Computes the modified ambiguity `(C*ambiguity - p_cs)/(C - 1)` of a probability
/// vector with `C` residual classes.
pub fn modified_ambiguity(probabilities: &[fam]) -> AmbiguityResult<fam> {
    let (residual, p_cs) = split_probabilities(probabilities)?;
    let n_classes = residual.len() as fam;
    Ok((n_classes * unchecked_ambiguity(residual, p_cs) - p_cs) / (n_classes - 1.0))
}

/// Computes the expected ambiguity of probability vectors drawn from a Dirichlet
/// distribution with the given concentrations.
pub fn expected_ambiguity(
    concentrations: &[fam],
    ambiguity_type: AmbiguityType,
) -> AmbiguityResult<fam> {
    let (residual, alpha_cs) = split_concentrations(concentrations)?;
    let expected = unchecked_expected_ambiguity(residual, alpha_cs);
    Ok(match ambiguity_type {
        AmbiguityType::Standard => expected,
        AmbiguityType::Modified => {
            let a_0 = alpha_cs + residual.iter().sum::<fam>();
            let n_classes = residual.len() as fam;
            (n_classes * expected - alpha_cs / a_0) / (n_classes - 1.0)
        }
    })
}

fn unchecked_expected_ambiguity(residual: &[fam], alpha_cs: fam) -> fam {
    let b_0: fam = residual.iter().sum();
    let a_0 = b_0 + alpha_cs;
    let second_moment_sum: fam = residual.iter().map(|alpha| alpha * (alpha + 1.0)).sum();
    1.0 - second_moment_sum / (a_0 * (b_0 + 1.0))
}

/// Computes the variance of the ambiguity of probability vectors drawn from a
/// Dirichlet distribution with the given concentrations.
pub fn ambiguity_variance(
    concentrations: &[fam],
    ambiguity_type: AmbiguityType,
) -> AmbiguityResult<fam> {
    let (residual, alpha_cs) = split_concentrations(concentrations)?;
    let b_0: fam = residual.iter().sum();
    let a_0 = b_0 + alpha_cs;

    let denominator = a_0 * (a_0 + 1.0) * (b_0 + 2.0) * (b_0 + 3.0);
    let numerator = (a_0 * (b_0 + 1.0)).powi(2);
    let fourth_moment_excess: fam = residual
        .iter()
        .map(|alpha| {
            let second = alpha * (alpha + 1.0);
            second * ((alpha + 2.0) * (alpha + 3.0) - second)
        })
        .sum();
    let one_minus_expected = 1.0 - unchecked_expected_ambiguity(residual, alpha_cs);
    let variance = fourth_moment_excess / denominator
        + (numerator / denominator - 1.0) * one_minus_expected.powi(2);

    Ok(match ambiguity_type {
        AmbiguityType::Standard => variance,
        AmbiguityType::Modified => {
            let n_classes = residual.len() as fam;
            let p_cs_variance = alpha_cs * b_0 / ((a_0 + 1.0) * a_0 * a_0);
            let covariance = alpha_cs / (a_0 * (a_0 + 1.0)) * one_minus_expected;
            (n_classes * n_classes * variance + p_cs_variance - 2.0 * n_classes * covariance)
                / (n_classes - 1.0).powi(2)
        }
    })
}

/// Computes the expected value of the plug-in ambiguity, i.e. the ambiguity of
/// the observed class frequencies, when `n_trials` outcomes are drawn from a
/// multinomial distribution with the given class probabilities.
pub fn expected_plug_in_ambiguity(n_trials: u32, probabilities: &[fam]) -> AmbiguityResult<fam> {
    if n_trials == 0 {
        return Err(AmbiguityError::NoTrials);
    }
    let (residual, p_cs) = split_probabilities(probabilities)?;
    if p_cs >= 1.0 {
        return Ok(1.0);
    }
    let n_trials = fam::from(n_trials);
    let p_solvable = 1.0 - p_cs;
    // Probability that at least one trial is solvable, divided by the number of trials
    let any_solvable_fraction = (1.0 - p_cs.powf(n_trials)) / n_trials;
    let sum_of_squares: fam = residual.iter().map(|p| p * p).sum();
    Ok(1.0
        - any_solvable_fraction
        - sum_of_squares * (1.0 / p_solvable - any_solvable_fraction / (p_solvable * p_solvable)))
}
