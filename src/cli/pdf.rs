//! Command line interface for evaluating the ambiguity density at a single point.

use super::utils;
use crate::exit_on_error;
use clap::{Arg, ArgMatches, Command};

/// Creates a subcommand for evaluating the density at a single point.
pub fn create_pdf_subcommand() -> Command<'static> {
    let command = Command::new("pdf")
        .about("Evaluate the ambiguity density at a single point")
        .long_about(
            "Evaluate the ambiguity density at a single point.\n\
             The density is computed by adaptive Simpson integration over nested\n\
             Beta densities, and is printed to standard output.",
        )
        .arg(
            Arg::new("a")
                .short('a')
                .long("a")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Point in (0, 1) at which to evaluate the density")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("diagnostics")
                .short('d')
                .long("diagnostics")
                .help("Also print error estimate, number of evaluations and convergence status"),
        );
    utils::add_density_arguments(command)
}

/// Runs the actions for the `pdf` subcommand using the given arguments.
pub fn run_pdf_subcommand(arguments: &ArgMatches) {
    let a = utils::get_finite_float_value_from_required_parseable_argument(arguments, "a");
    let density = utils::construct_ambiguity_density_from_options(arguments);

    let result = exit_on_error!(
        density.evaluate_with_diagnostics(a),
        "Error: Could not evaluate density: {}"
    );
    println!("{}", result.value);

    if arguments.is_present("diagnostics") {
        println!("Error estimate: {:e}", result.error_estimate);
        println!("Integrand evaluations: {}", result.evaluations);
        if result.converged() {
            println!("Converged: yes");
        } else {
            println!(
                "Converged: no ({} subintervals reached the maximum depth)",
                result.truncated_intervals
            );
        }
    }
}
