//! Status reporting and output of computed densities.

use crate::ambiguity::{fam, AmbiguityResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
};

#[cfg(feature = "json")]
use serde::Serialize;

/// How much to report about ongoing computations.
#[derive(Clone, Debug)]
pub enum Verbosity {
    Quiet,
    Messages,
    Progress(ProgressStyle),
}

/// Whether existing output files may be replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverwriteMode {
    Always,
    Never,
}

#[cfg(feature = "json")]
#[derive(Serialize)]
struct EvaluationRecord {
    a: fam,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<fam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Verbosity {
    /// Whether status messages should be printed.
    pub fn print_messages(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Creates a progress bar for the given number of items, hidden unless
    /// progress was requested.
    pub fn create_progress_bar(&self, n_items: usize) -> ProgressBar {
        match self {
            Self::Progress(style) => {
                let progress_bar = ProgressBar::new(n_items as u64);
                progress_bar.set_style(style.clone());
                progress_bar
            }
            _ => ProgressBar::hidden(),
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::Quiet
    }
}

/// Creates the output file at the given path, refusing to replace an existing
/// file unless overwriting is allowed.
pub fn create_output_file<P: AsRef<Path>>(
    output_file_path: P,
    overwrite_mode: OverwriteMode,
) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    match overwrite_mode {
        OverwriteMode::Always => options.create(true).truncate(true),
        OverwriteMode::Never => options.create_new(true),
    };
    options.open(output_file_path)
}

/// Writes one `a value` row per evaluation point. Failed evaluations are
/// written as `NaN`.
pub fn write_evaluations_as_text<W: Write>(
    writer: W,
    a_values: &[fam],
    results: &[AmbiguityResult<fam>],
) -> io::Result<()> {
    assert_eq!(
        a_values.len(),
        results.len(),
        "Number of points and results differ"
    );
    let mut writer = BufWriter::new(writer);
    for (a, result) in a_values.iter().zip(results) {
        match result {
            Ok(value) => writeln!(writer, "{:e} {:e}", a, value)?,
            Err(_) => writeln!(writer, "{:e} NaN", a)?,
        }
    }
    writer.flush()
}

/// Writes the evaluations as a JSON array of `{a, value}` or `{a, error}` objects.
#[cfg(feature = "json")]
pub fn write_evaluations_as_json<W: Write>(
    writer: W,
    a_values: &[fam],
    results: &[AmbiguityResult<fam>],
) -> io::Result<()> {
    assert_eq!(
        a_values.len(),
        results.len(),
        "Number of points and results differ"
    );
    let records: Vec<_> = a_values
        .iter()
        .zip(results)
        .map(|(&a, result)| match result {
            Ok(value) => EvaluationRecord {
                a,
                value: Some(*value),
                error: None,
            },
            Err(err) => EvaluationRecord {
                a,
                value: None,
                error: Some(err.to_string()),
            },
        })
        .collect();
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::ambiguity::AmbiguityError;

    #[test]
    fn text_output_has_one_row_per_point() {
        let a_values = [0.25, 0.5, 1.5];
        let results = [
            Ok(0.125),
            Ok(2.0),
            Err(AmbiguityError::PointOutsideUnitInterval(1.5)),
        ];
        let mut buffer = Vec::new();
        write_evaluations_as_text(&mut buffer, &a_values, &results).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["2.5e-1 1.25e-1", "5e-1 2e0", "1.5e0 NaN"]);
    }

    #[test]
    fn existing_file_is_only_replaced_when_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("densities.txt");
        assert!(create_output_file(&path, OverwriteMode::Never).is_ok());
        assert!(create_output_file(&path, OverwriteMode::Never).is_err());
        assert!(create_output_file(&path, OverwriteMode::Always).is_ok());
    }

    #[test]
    fn quiet_verbosity_hides_progress() {
        let verbosity = Verbosity::default();
        assert!(!verbosity.print_messages());
        assert!(verbosity.create_progress_bar(10).is_hidden());
        assert!(Verbosity::Messages.print_messages());
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_output_contains_values_and_errors() {
        let a_values = [0.5, 0.0];
        let results = [Ok(2.0), Err(AmbiguityError::PointOutsideUnitInterval(0.0))];
        let mut buffer = Vec::new();
        write_evaluations_as_json(&mut buffer, &a_values, &results).unwrap();
        let records: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(records[0]["value"], 2.0);
        assert!(records[1]["error"].as_str().unwrap().contains("(0, 1)"));
        assert!(records[1].get("value").is_none());
    }
}
