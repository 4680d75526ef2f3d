//! Parallel evaluation of the ambiguity density at many points.

use super::{fam, AmbiguityDensity, AmbiguityResult, AmbiguityType, ShapeParameters};
use crate::{io::Verbosity, math::quadrature::QuadratureConfig};
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

impl AmbiguityDensity {
    /// Computes the density at each of the given points in parallel.
    ///
    /// The result at index `i` corresponds to `a_values[i]`. Each point is
    /// evaluated independently, so an error for one point does not affect
    /// the others.
    pub fn evaluate_batch(
        &self,
        a_values: &[fam],
        verbosity: &Verbosity,
    ) -> Vec<AmbiguityResult<fam>> {
        let n_values = a_values.len();
        if verbosity.print_messages() {
            eprintln!(
                "Evaluating {} density at {} points",
                self.ambiguity_type, n_values
            );
        }
        let mut results = vec![Ok(0.0); n_values];
        results
            .par_iter_mut()
            .zip(a_values.par_iter())
            .progress_with(verbosity.create_progress_bar(n_values))
            .for_each(|(result, &a)| {
                *result = self.evaluate(a);
            });
        results
    }
}

/// Computes the ambiguity density at each of the given points in parallel.
///
/// Invalid shape parameters or tolerance fail the whole batch, while errors
/// for individual points are captured at their own index.
pub fn evaluate_batch(
    a_values: &[fam],
    alpha: fam,
    beta: fam,
    gamma: fam,
    ambiguity_type: AmbiguityType,
    tolerance: fam,
) -> AmbiguityResult<Vec<AmbiguityResult<fam>>> {
    let density = AmbiguityDensity::new(
        ShapeParameters::new(alpha, beta, gamma)?,
        ambiguity_type,
        QuadratureConfig::with_tolerance(tolerance),
    )?;
    Ok(density.evaluate_batch(a_values, &Verbosity::Quiet))
}

/// Splits batch results into density values, with `NaN` in place of each
/// failed evaluation, and the indices of the failed evaluations.
pub fn values_with_nan_for_failures(results: &[AmbiguityResult<fam>]) -> (Vec<fam>, Vec<usize>) {
    let mut failed_indices = Vec::new();
    let values = results
        .iter()
        .enumerate()
        .map(|(idx, result)| match result {
            Ok(value) => *value,
            Err(_) => {
                failed_indices.push(idx);
                fam::NAN
            }
        })
        .collect();
    (values, failed_indices)
}

/// Creates `n_points` evaluation points at the centers of a uniform
/// subdivision of the unit interval.
pub fn uniform_evaluation_points(n_points: usize) -> Vec<fam> {
    (0..n_points)
        .map(|idx| (idx as fam + 0.5) / n_points as fam)
        .collect()
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::ambiguity::{evaluate, AmbiguityError};

    #[test]
    fn batch_matches_single_evaluations() {
        let a_values = uniform_evaluation_points(16);
        for ambiguity_type in [AmbiguityType::Standard, AmbiguityType::Modified] {
            let results = evaluate_batch(&a_values, 2.0, 3.0, 1.5, ambiguity_type, 1e-8).unwrap();
            assert_eq!(results.len(), a_values.len());
            for (&a, result) in a_values.iter().zip(&results) {
                let single = evaluate(a, 2.0, 3.0, 1.5, ambiguity_type, 1e-8).unwrap();
                assert_eq!(result.as_ref().unwrap().to_bits(), single.to_bits());
            }
        }
    }

    #[test]
    fn empty_batch_gives_empty_output() {
        let results = evaluate_batch(&[], 2.0, 2.0, 2.0, AmbiguityType::Standard, 1e-8).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn failing_points_do_not_affect_others() {
        let a_values = [0.25, 1.5, 0.75, 0.0];
        let results = evaluate_batch(&a_values, 2.0, 2.0, 2.0, AmbiguityType::Standard, 1e-8).unwrap();
        assert_eq!(results.len(), 4);
        assert!(results[0].as_ref().unwrap() > &0.0);
        assert_eq!(results[1], Err(AmbiguityError::PointOutsideUnitInterval(1.5)));
        assert!(results[2].as_ref().unwrap() > &0.0);
        assert_eq!(results[3], Err(AmbiguityError::PointOutsideUnitInterval(0.0)));
    }

    #[test]
    fn failed_points_become_nan_without_discarding_others() {
        let a_values = [0.5, 1.5];
        let results = evaluate_batch(&a_values, 2.0, 2.0, 2.0, AmbiguityType::Standard, 1e-8).unwrap();
        let (values, failed_indices) = values_with_nan_for_failures(&results);
        let single = evaluate(0.5, 2.0, 2.0, 2.0, AmbiguityType::Standard, 1e-8).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].to_bits(), single.to_bits());
        assert!(values[1].is_nan());
        assert_eq!(failed_indices, vec![1]);
    }

    #[test]
    fn invalid_parameters_fail_whole_batch() {
        let result = evaluate_batch(&[0.5], 2.0, -2.0, 2.0, AmbiguityType::Modified, 1e-8);
        assert!(matches!(
            result,
            Err(AmbiguityError::NonPositiveShapeParameter { name: "beta", .. })
        ));
    }

    #[test]
    fn uniform_points_lie_inside_unit_interval() {
        let points = uniform_evaluation_points(4);
        assert_eq!(points, vec![0.125, 0.375, 0.625, 0.875]);
        assert!(uniform_evaluation_points(0).is_empty());
    }
}
