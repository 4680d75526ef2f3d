//! Python bindings, exposed as the `amb_pdf` extension module.

use crate::ambiguity::{self, batch, fam, AmbiguityError, AmbiguityType};
use numpy::PyArray1;
use pyo3::{
    exceptions::{PyRuntimeWarning, PyValueError},
    prelude::*,
};

/// Python-facing counterpart of `AmbiguityType`.
#[pyclass(name = "AmbiguityType", eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PyAmbiguityType {
    Standard,
    Modified,
}

impl From<PyAmbiguityType> for AmbiguityType {
    fn from(ambiguity_type: PyAmbiguityType) -> Self {
        match ambiguity_type {
            PyAmbiguityType::Standard => Self::Standard,
            PyAmbiguityType::Modified => Self::Modified,
        }
    }
}

impl From<AmbiguityError> for PyErr {
    fn from(err: AmbiguityError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Compute ambiguity density at a
#[pyfunction]
#[pyo3(signature = (a, alpha, beta, gamma, r#type = PyAmbiguityType::Standard, tol = 1e-8))]
fn pdf(
    a: fam,
    alpha: fam,
    beta: fam,
    gamma: fam,
    r#type: PyAmbiguityType,
    tol: fam,
) -> PyResult<fam> {
    Ok(ambiguity::evaluate(a, alpha, beta, gamma, r#type.into(), tol)?)
}

/// Compute ambiguity density for array of a values.
/// Failed elements are NaN and reported in a RuntimeWarning.
#[pyfunction]
#[pyo3(signature = (a_vals, alpha, beta, gamma, r#type = PyAmbiguityType::Standard, tol = 1e-8))]
fn pdf_batch(
    py: Python<'_>,
    a_vals: Vec<fam>,
    alpha: fam,
    beta: fam,
    gamma: fam,
    r#type: PyAmbiguityType,
    tol: fam,
) -> PyResult<Py<PyArray1<fam>>> {
    let ambiguity_type = AmbiguityType::from(r#type);
    let results = py.allow_threads(|| {
        batch::evaluate_batch(&a_vals, alpha, beta, gamma, ambiguity_type, tol)
    })?;
    let (values, failed_indices) = batch::values_with_nan_for_failures(&results);
    let first_failure = results
        .iter()
        .enumerate()
        .find_map(|(idx, result)| result.as_ref().err().map(|err| (idx, err)));
    if let Some((first_idx, err)) = first_failure {
        let message = format!(
            "Evaluation failed for {} of {} elements (indices {:?}), set to NaN. \
             First failure at index {}: {}",
            failed_indices.len(),
            values.len(),
            failed_indices,
            first_idx,
            err
        );
        PyErr::warn_bound(py, &py.get_type_bound::<PyRuntimeWarning>(), &message, 1)?;
    }
    Ok(PyArray1::from_vec_bound(py, values).unbind())
}

#[pymodule]
fn amb_pdf(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__doc__", "Adaptive Simpson integration for Ambiguity density")?;
    m.add_class::<PyAmbiguityType>()?;
    m.add("Standard", PyAmbiguityType::Standard)?;
    m.add("Modified", PyAmbiguityType::Modified)?;
    m.add_function(wrap_pyfunction!(pdf, m)?)?;
    m.add_function(wrap_pyfunction!(pdf_batch, m)?)?;
    Ok(())
}
