//! Evaluation of the ambiguity density.
//!
//! The density at a point `a` in (0, 1) is the integral over `u` of a product
//! of Beta densities, where the inner Beta density is evaluated at a substitution
//! variable `xi(a, u)` whose form depends on the ambiguity type.

pub mod batch;
pub mod integrand;
pub mod measure;
pub mod substitution;

use self::integrand::AmbiguityIntegrand;
use crate::math::quadrature::{integrate_adaptive_simpson, QuadratureConfig, QuadratureResult};
use std::{error::Error, fmt, str::FromStr};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Floating-point precision to use for ambiguity quantities.
#[allow(non_camel_case_types)]
pub type fam = f64;

/// Which ambiguity measure the density describes.
///
/// Selects the closed-form substitution formula and the lower integration bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum AmbiguityType {
    #[default]
    Standard,
    Modified,
}

/// Positive shape parameters of the nested Beta densities.
///
/// `alpha` and `beta` shape the density of the substitution variable, while
/// `gamma` and `alpha + beta` shape the density of the integration variable.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ShapeParameters {
    alpha: fam,
    beta: fam,
    gamma: fam,
}

/// Errors that can occur when evaluating ambiguity quantities.
#[derive(Clone, Debug, PartialEq)]
pub enum AmbiguityError {
    /// The evaluation point does not lie strictly inside the unit interval.
    PointOutsideUnitInterval(fam),
    /// A shape parameter is not a finite positive number.
    NonPositiveShapeParameter { name: &'static str, value: fam },
    /// The integration tolerance is not a finite positive number.
    InvalidTolerance(fam),
    /// The quadrature depth ceiling exceeds the largest allowed value.
    InvalidMaxDepth(u32),
    /// An expectation over sampled outcomes was requested for zero trials.
    NoTrials,
    /// The argument of the square root in the substitution became negative.
    NegativeSubstitutionArgument { a: fam, u: fam, argument: fam },
    /// The integrand evaluated to infinity or NaN.
    NonFiniteIntegrand { a: fam, u: fam, value: fam },
    /// A probability or concentration vector has too few residual classes.
    TooFewClasses(usize),
    /// A probability is negative, above one or not finite.
    InvalidProbability(fam),
    /// A Dirichlet concentration is not a finite positive number.
    InvalidConcentration(fam),
}

pub type AmbiguityResult<T> = Result<T, AmbiguityError>;

/// Evaluator of the ambiguity density for fixed, validated parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbiguityDensity {
    shape: ShapeParameters,
    ambiguity_type: AmbiguityType,
    config: QuadratureConfig,
}

impl AmbiguityType {
    /// Lower edge of the integration interval `[u0, a)` for the given evaluation point.
    pub fn lower_integration_bound(&self, a: fam) -> fam {
        match self {
            Self::Standard => fam::max(0.0, 2.0 * a - 1.0),
            Self::Modified => 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Modified => "modified",
        }
    }
}

impl fmt::Display for AmbiguityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AmbiguityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "modified" => Ok(Self::Modified),
            _ => Err(format!(
                "Invalid ambiguity type {}, must be `standard` or `modified`",
                s
            )),
        }
    }
}

impl ShapeParameters {
    /// Creates a new set of shape parameters, verifying that each is finite and positive.
    pub fn new(alpha: fam, beta: fam, gamma: fam) -> AmbiguityResult<Self> {
        for (name, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(AmbiguityError::NonPositiveShapeParameter { name, value });
            }
        }
        Ok(Self { alpha, beta, gamma })
    }

    pub fn alpha(&self) -> fam {
        self.alpha
    }

    pub fn beta(&self) -> fam {
        self.beta
    }

    pub fn gamma(&self) -> fam {
        self.gamma
    }
}

impl AmbiguityError {
    /// Whether the error stems from input outside the domain of the density.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            Self::PointOutsideUnitInterval(_)
                | Self::NonPositiveShapeParameter { .. }
                | Self::InvalidTolerance(_)
                | Self::InvalidMaxDepth(_)
                | Self::NoTrials
                | Self::TooFewClasses(_)
                | Self::InvalidProbability(_)
                | Self::InvalidConcentration(_)
        )
    }

    /// Whether the error arose during numerical evaluation of valid input.
    pub fn is_numeric_error(&self) -> bool {
        !self.is_domain_error()
    }
}

impl fmt::Display for AmbiguityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideUnitInterval(a) => {
                write!(f, "Parameter a = {} must lie in (0, 1)", a)
            }
            Self::NonPositiveShapeParameter { name, value } => {
                write!(f, "Shape parameter {} = {} must be positive", name, value)
            }
            Self::InvalidTolerance(tolerance) => {
                write!(f, "Tolerance {} must be positive", tolerance)
            }
            Self::InvalidMaxDepth(max_depth) => write!(
                f,
                "Maximum depth {} must not exceed {}",
                max_depth,
                QuadratureConfig::MAX_ALLOWED_DEPTH
            ),
            Self::NoTrials => write!(f, "Number of trials must be positive"),
            Self::NegativeSubstitutionArgument { a, u, argument } => write!(
                f,
                "Negative substitution argument {} for a = {}, u = {}",
                argument, a, u
            ),
            Self::NonFiniteIntegrand { a, u, value } => {
                write!(f, "Integrand is {} for a = {}, u = {}", value, a, u)
            }
            Self::TooFewClasses(n_classes) => write!(
                f,
                "At least two residual classes are required, got {}",
                n_classes
            ),
            Self::InvalidProbability(p) => write!(f, "Invalid probability {}", p),
            Self::InvalidConcentration(alpha) => {
                write!(f, "Concentration {} must be positive", alpha)
            }
        }
    }
}

impl Error for AmbiguityError {}

impl AmbiguityDensity {
    /// Creates a new evaluator for the given parameters, verifying the tolerance
    /// and depth ceiling.
    pub fn new(
        shape: ShapeParameters,
        ambiguity_type: AmbiguityType,
        config: QuadratureConfig,
    ) -> AmbiguityResult<Self> {
        if !config.has_valid_tolerance() {
            return Err(AmbiguityError::InvalidTolerance(config.tolerance));
        }
        if !config.has_valid_max_depth() {
            return Err(AmbiguityError::InvalidMaxDepth(config.max_depth));
        }
        Ok(Self {
            shape,
            ambiguity_type,
            config,
        })
    }

    pub fn shape(&self) -> &ShapeParameters {
        &self.shape
    }

    pub fn ambiguity_type(&self) -> AmbiguityType {
        self.ambiguity_type
    }

    pub fn config(&self) -> &QuadratureConfig {
        &self.config
    }

    /// Creates the integrand whose integral over `[u0, a]` gives the density at `a`.
    pub fn integrand(&self, a: fam) -> AmbiguityResult<AmbiguityIntegrand> {
        AmbiguityIntegrand::new(a, self.ambiguity_type, self.shape)
    }

    /// Computes the density at `a`.
    pub fn evaluate(&self, a: fam) -> AmbiguityResult<fam> {
        self.evaluate_with_diagnostics(a).map(|result| result.value)
    }

    /// Computes the density at `a`, also returning the error estimate, number of
    /// integrand evaluations and whether the quadrature converged.
    pub fn evaluate_with_diagnostics(&self, a: fam) -> AmbiguityResult<QuadratureResult> {
        let integrand = self.integrand(a)?;
        integrate_adaptive_simpson(
            |u| integrand.evaluate(u),
            integrand.lower_bound(),
            integrand.upper_bound(),
            &self.config,
        )
    }
}

/// Verifies that the given evaluation point lies strictly inside the unit interval.
pub fn validate_evaluation_point(a: fam) -> AmbiguityResult<fam> {
    if a > 0.0 && a < 1.0 {
        Ok(a)
    } else {
        Err(AmbiguityError::PointOutsideUnitInterval(a))
    }
}

/// Computes the ambiguity density at `a`.
///
/// # Parameters
///
/// - `a`: Point in (0, 1) at which to evaluate the density.
/// - `alpha`, `beta`, `gamma`: Positive shape parameters.
/// - `ambiguity_type`: Which ambiguity measure the density describes.
/// - `tolerance`: Absolute error tolerance of the integration.
///
/// # Returns
///
/// An `AmbiguityResult` which is either:
///
/// - `Ok`: Contains the non-negative density value.
/// - `Err`: Contains a domain error for invalid input, or a numeric error if the
///   integrand could not be evaluated.
pub fn evaluate(
    a: fam,
    alpha: fam,
    beta: fam,
    gamma: fam,
    ambiguity_type: AmbiguityType,
    tolerance: fam,
) -> AmbiguityResult<fam> {
    validate_evaluation_point(a)?;
    let shape = ShapeParameters::new(alpha, beta, gamma)?;
    AmbiguityDensity::new(
        shape,
        ambiguity_type,
        QuadratureConfig::with_tolerance(tolerance),
    )?
    .evaluate(a)
}
