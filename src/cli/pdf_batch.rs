//! Command line interface for evaluating the ambiguity density at many points.

use super::utils;
use crate::{
    ambiguity::{batch::uniform_evaluation_points, fam},
    exit_on_error, exit_on_false,
    io as amb_io,
};
use clap::{Arg, ArgGroup, ArgMatches, Command};
use std::{
    io::{self, Write},
    path::PathBuf,
};

/// Creates a subcommand for evaluating the density at many points.
pub fn create_pdf_batch_subcommand() -> Command<'static> {
    let command = Command::new("pdf_batch")
        .about("Evaluate the ambiguity density at many points in parallel")
        .long_about(
            "Evaluate the ambiguity density at many points in parallel.\n\
             Each output row holds an evaluation point and the density value.\n\
             Points where the evaluation fails are written with a NaN value.",
        )
        .arg(
            Arg::new("a-values")
                .long("a-values")
                .require_equals(true)
                .use_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_name("VALUES")
                .help("Comma-separated list of points at which to evaluate the density")
                .takes_value(true)
                .multiple_values(true),
        )
        .arg(
            Arg::new("n-points")
                .short('n')
                .long("n-points")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Evaluate at the centers of this many uniform subintervals of (0, 1)")
                .takes_value(true),
        )
        .group(
            ArgGroup::new("points")
                .args(&["a-values", "n-points"])
                .required(true),
        )
        .arg(
            Arg::new("output-file")
                .short('o')
                .long("output-file")
                .require_equals(true)
                .value_name("PATH")
                .help("Path of the file to write the results to [default: standard output]")
                .takes_value(true),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .requires("output-file")
                .help("Automatically overwrite any existing output file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print status messages related to the evaluation to standard error"),
        )
        .arg(
            Arg::new("progress")
                .short('p')
                .long("progress")
                .help("Show progress bar for the evaluation (also implies `verbose`)"),
        );

    #[cfg(feature = "json")]
    let command = command.arg(
        Arg::new("json")
            .long("json")
            .help("Write the results as JSON instead of plain text"),
    );

    utils::add_density_arguments(command)
}

/// Runs the actions for the `pdf_batch` subcommand using the given arguments.
pub fn run_pdf_batch_subcommand(arguments: &ArgMatches) {
    let a_values = if let Some(a_values) =
        utils::get_finite_float_values_from_parseable_argument(arguments, "a-values")
    {
        a_values
    } else {
        let n_points: usize = utils::get_value_from_required_parseable_argument(arguments, "n-points");
        exit_on_false!(n_points > 0, "Error: n-points must be larger than zero");
        uniform_evaluation_points(n_points)
    };
    let density = utils::construct_ambiguity_density_from_options(arguments);
    let verbosity = utils::parse_verbosity(arguments, true);

    let results = density.evaluate_batch(&a_values, &verbosity);

    for (a, result) in a_values.iter().zip(&results) {
        if let Err(err) = result {
            eprintln!("Warning: Evaluation at a = {} failed: {}", a, err);
        }
    }

    let output_file_path = arguments.value_of("output-file").map(PathBuf::from);
    let write_result = match output_file_path {
        Some(output_file_path) => {
            let file = exit_on_error!(
                amb_io::create_output_file(
                    &output_file_path,
                    utils::overwrite_mode_from_arguments(arguments)
                ),
                "Error: Could not create output file {}: {}",
                output_file_path.display()
            );
            if verbosity.print_messages() {
                eprintln!("Writing results to {}", output_file_path.display());
            }
            write_evaluations(arguments, file, &a_values, &results)
        }
        None => write_evaluations(arguments, io::stdout(), &a_values, &results),
    };
    exit_on_error!(write_result, "Error: Could not write results: {}");

    if verbosity.print_messages() {
        let n_failed = results.iter().filter(|result| result.is_err()).count();
        eprintln!(
            "Evaluated {} points ({} failed)",
            results.len(),
            n_failed
        );
    }
}

#[cfg(feature = "json")]
fn write_evaluations<W: Write>(
    arguments: &ArgMatches,
    writer: W,
    a_values: &[fam],
    results: &[crate::ambiguity::AmbiguityResult<fam>],
) -> io::Result<()> {
    if arguments.is_present("json") {
        amb_io::write_evaluations_as_json(writer, a_values, results)
    } else {
        amb_io::write_evaluations_as_text(writer, a_values, results)
    }
}

#[cfg(not(feature = "json"))]
fn write_evaluations<W: Write>(
    _arguments: &ArgMatches,
    writer: W,
    a_values: &[fam],
    results: &[crate::ambiguity::AmbiguityResult<fam>],
) -> io::Result<()> {
    amb_io::write_evaluations_as_text(writer, a_values, results)
}
