//! Adaptive numerical quadrature with local error control.

use super::fin;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for adaptive Simpson quadrature.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadratureConfig {
    /// Absolute error tolerance for the integral over the full interval.
    pub tolerance: fin,
    /// Recursion depth beyond which a subinterval is accepted regardless of
    /// its error estimate.
    pub max_depth: u32,
}

/// Outcome of an adaptive quadrature.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadratureResult {
    /// Estimated value of the integral.
    pub value: fin,
    /// Sum of the absolute error estimates of all accepted subintervals.
    pub error_estimate: fin,
    /// Total number of integrand evaluations.
    pub evaluations: usize,
    /// Number of subintervals accepted only because the depth ceiling was reached.
    pub truncated_intervals: usize,
}

/// Simpson estimate over an interval together with the integrand values
/// at its endpoints and midpoint, which are handed down on subdivision.
#[derive(Clone, Copy, Debug)]
struct SimpsonPanel {
    start: fin,
    end: fin,
    start_value: fin,
    middle_value: fin,
    end_value: fin,
    estimate: fin,
}

impl QuadratureConfig {
    pub const DEFAULT_TOLERANCE: fin = 1e-8;
    pub const DEFAULT_MAX_DEPTH: u32 = 20;
    /// Largest accepted depth ceiling. The number of integrand evaluations
    /// can grow as `2^(max_depth + 2)`.
    pub const MAX_ALLOWED_DEPTH: u32 = 30;

    /// Creates a new configuration with the given tolerance and the default depth ceiling.
    pub fn with_tolerance(tolerance: fin) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Whether the tolerance is a finite positive number.
    pub fn has_valid_tolerance(&self) -> bool {
        self.tolerance.is_finite() && self.tolerance > 0.0
    }

    /// Whether the depth ceiling does not exceed `MAX_ALLOWED_DEPTH`.
    pub fn has_valid_max_depth(&self) -> bool {
        self.max_depth <= Self::MAX_ALLOWED_DEPTH
    }
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

impl QuadratureResult {
    /// Whether every subinterval met its share of the error tolerance.
    pub fn converged(&self) -> bool {
        self.truncated_intervals == 0
    }

    fn leaf(value: fin, error_estimate: fin, truncated: bool) -> Self {
        Self {
            value,
            error_estimate,
            evaluations: 0,
            truncated_intervals: usize::from(truncated),
        }
    }

    fn combined(self, other: Self) -> Self {
        Self {
            value: self.value + other.value,
            error_estimate: self.error_estimate + other.error_estimate,
            evaluations: self.evaluations + other.evaluations,
            truncated_intervals: self.truncated_intervals + other.truncated_intervals,
        }
    }
}

impl SimpsonPanel {
    fn new(start: fin, end: fin, start_value: fin, middle_value: fin, end_value: fin) -> Self {
        let estimate = (end - start) / 6.0 * (start_value + 4.0 * middle_value + end_value);
        Self {
            start,
            end,
            start_value,
            middle_value,
            end_value,
            estimate,
        }
    }

    fn middle(&self) -> fin {
        0.5 * (self.start + self.end)
    }
}

/// Estimates the integral of the given function over the given interval using
/// recursive adaptive Simpson quadrature.
///
/// Each interval is split in half and the two half-interval Simpson estimates are
/// compared against the whole-interval estimate. When their difference is smaller
/// than 15 times the local tolerance, or the depth ceiling is exceeded, the
/// Richardson-extrapolated sum is accepted. Otherwise both halves are refined
/// separately with half the tolerance each, so the accumulated error stays
/// within the original tolerance.
///
/// # Parameters
///
/// - `evaluate_integrand`: Closure evaluating the integrand at a coordinate. Any error
///   it returns aborts the integration.
/// - `start`: Lower limit of integration.
/// - `end`: Upper limit of integration.
/// - `config`: Tolerance and depth ceiling to use.
///
/// # Returns
///
/// A `Result` which is either:
///
/// - `Ok`: Contains the `QuadratureResult` with the integral estimate and diagnostics.
/// - `Err`: Contains the first error returned by `evaluate_integrand`.
///
/// # Type parameters
///
/// - `E`: Function type taking a coordinate and returning a fallible value.
/// - `Err`: Error type of the integrand.
pub fn integrate_adaptive_simpson<E, Err>(
    evaluate_integrand: E,
    start: fin,
    end: fin,
    config: &QuadratureConfig,
) -> Result<QuadratureResult, Err>
where
    E: Fn(fin) -> Result<fin, Err>,
{
    assert!(
        end >= start,
        "Interval end {:?} is smaller than interval start {:?}",
        end,
        start
    );
    let start_value = evaluate_integrand(start)?;
    let middle_value = evaluate_integrand(0.5 * (start + end))?;
    let end_value = evaluate_integrand(end)?;

    let panel = SimpsonPanel::new(start, end, start_value, middle_value, end_value);

    let mut result = refine_panel(&evaluate_integrand, &panel, config.tolerance, 0, config.max_depth)?;
    result.evaluations += 3;
    Ok(result)
}

fn refine_panel<E, Err>(
    evaluate_integrand: &E,
    panel: &SimpsonPanel,
    tolerance: fin,
    depth: u32,
    max_depth: u32,
) -> Result<QuadratureResult, Err>
where
    E: Fn(fin) -> Result<fin, Err>,
{
    let middle = panel.middle();
    let left_middle_value = evaluate_integrand(0.5 * (panel.start + middle))?;
    let right_middle_value = evaluate_integrand(0.5 * (middle + panel.end))?;

    let left = SimpsonPanel::new(
        panel.start,
        middle,
        panel.start_value,
        left_middle_value,
        panel.middle_value,
    );
    let right = SimpsonPanel::new(
        middle,
        panel.end,
        panel.middle_value,
        right_middle_value,
        panel.end_value,
    );
    let error = left.estimate + right.estimate - panel.estimate;

    let within_tolerance = error.abs() < 15.0 * tolerance;
    let mut result = if within_tolerance || depth > max_depth {
        QuadratureResult::leaf(
            left.estimate + right.estimate + error / 15.0,
            error.abs() / 15.0,
            !within_tolerance,
        )
    } else {
        let half_tolerance = 0.5 * tolerance;
        refine_panel(evaluate_integrand, &left, half_tolerance, depth + 1, max_depth)?.combined(
            refine_panel(evaluate_integrand, &right, half_tolerance, depth + 1, max_depth)?,
        )
    };
    result.evaluations += 2;
    Ok(result)
}
