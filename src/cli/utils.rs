//! Utilities for creating the command line interface.

use crate::{
    ambiguity::{fam, AmbiguityDensity, AmbiguityType, ShapeParameters},
    exit_on_error, exit_on_false,
    io::{OverwriteMode, Verbosity},
    math::quadrature::QuadratureConfig,
};
use clap::{Arg, ArgMatches, Command};
use indicatif::ProgressStyle;
use lazy_static::lazy_static;
use std::str::FromStr;

lazy_static! {
    static ref DEFAULT_PROGRESS_STYLE: ProgressStyle =
        ProgressStyle::default_bar().template("Progress: {bar:40}  {percent}% | ETA: {eta}");
}

/// Adds the arguments specifying the density parameters and quadrature
/// configuration to the given command.
pub fn add_density_arguments(command: Command<'static>) -> Command<'static> {
    command
        .arg(
            Arg::new("alpha")
                .long("alpha")
                .require_equals(true)
                .value_name("VALUE")
                .help("First shape parameter of the Beta density of the substitution variable")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("beta")
                .long("beta")
                .require_equals(true)
                .value_name("VALUE")
                .help("Second shape parameter of the Beta density of the substitution variable")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("gamma")
                .long("gamma")
                .require_equals(true)
                .value_name("VALUE")
                .help("First shape parameter of the Beta density of the integration variable")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .require_equals(true)
                .value_name("TYPE")
                .help("Which ambiguity measure the density describes")
                .takes_value(true)
                .possible_values(["standard", "modified"])
                .default_value("standard"),
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .require_equals(true)
                .value_name("VALUE")
                .help("Absolute error tolerance for the integration")
                .takes_value(true)
                .default_value("1e-8"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .require_equals(true)
                .value_name("NUMBER")
                .long_help(
                    "Maximum recursion depth of the adaptive quadrature, at most 30.\n\
                     Subintervals beyond this depth are accepted regardless of their error.\n\
                     The number of integrand evaluations can grow as 2^(depth + 2)",
                )
                .next_line_help(true)
                .takes_value(true)
                .default_value("20"),
        )
}

pub fn parse_value_string<T>(argument_name: &str, value_string: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    exit_on_error!(
        value_string.parse(),
        "Error: Could not parse value for {0}: {1}",
        argument_name
    )
}

fn parse_value_strings<'a, 'b, T, I>(argument_name: &'a str, value_strings: I) -> Vec<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
    I: Iterator<Item = &'b str>,
{
    value_strings
        .filter_map(|value_string| {
            if value_string.is_empty() {
                None
            } else {
                Some(parse_value_string(argument_name, value_string))
            }
        })
        .collect()
}

fn verify_finite_float_value(argument_name: &str, value: fam) {
    exit_on_false!(value.is_finite(), "Error: {} must be finite", argument_name);
}

pub fn get_value_from_required_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    parse_value_string(
        argument_name,
        arguments
            .value_of(argument_name)
            .expect("No value for required argument"),
    )
}

pub fn get_finite_float_value_from_required_parseable_argument(
    arguments: &ArgMatches,
    argument_name: &str,
) -> fam {
    let value = get_value_from_required_parseable_argument(arguments, argument_name);
    verify_finite_float_value(argument_name, value);
    value
}

pub fn get_values_from_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> Option<Vec<T>>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    arguments
        .values_of(argument_name)
        .map(|values| parse_value_strings(argument_name, values))
}

pub fn get_finite_float_values_from_parseable_argument(
    arguments: &ArgMatches,
    argument_name: &str,
) -> Option<Vec<fam>> {
    let values = get_values_from_parseable_argument(arguments, argument_name);
    if let Some(values) = values.as_ref() {
        values
            .iter()
            .for_each(|&value| verify_finite_float_value(argument_name, value))
    };
    values
}

/// Determines quadrature configuration parameters based on provided options.
pub fn construct_quadrature_config_from_options(arguments: &ArgMatches) -> QuadratureConfig {
    let tolerance = get_finite_float_value_from_required_parseable_argument(arguments, "tolerance");
    let max_depth = get_value_from_required_parseable_argument(arguments, "max-depth");
    QuadratureConfig {
        tolerance,
        max_depth,
    }
}

/// Creates an ambiguity density evaluator based on provided options.
pub fn construct_ambiguity_density_from_options(arguments: &ArgMatches) -> AmbiguityDensity {
    let alpha = get_finite_float_value_from_required_parseable_argument(arguments, "alpha");
    let beta = get_finite_float_value_from_required_parseable_argument(arguments, "beta");
    let gamma = get_finite_float_value_from_required_parseable_argument(arguments, "gamma");
    let ambiguity_type: AmbiguityType = get_value_from_required_parseable_argument(arguments, "type");
    let config = construct_quadrature_config_from_options(arguments);

    let shape = exit_on_error!(
        ShapeParameters::new(alpha, beta, gamma),
        "Error: Invalid shape parameters: {}"
    );
    exit_on_error!(
        AmbiguityDensity::new(shape, ambiguity_type, config),
        "Error: Invalid quadrature configuration: {}"
    )
}

pub fn overwrite_mode_from_arguments(arguments: &ArgMatches) -> OverwriteMode {
    if arguments.is_present("overwrite") {
        OverwriteMode::Always
    } else {
        OverwriteMode::Never
    }
}

pub fn parse_verbosity(arguments: &ArgMatches, support_progress: bool) -> Verbosity {
    if support_progress && arguments.is_present("progress") {
        Verbosity::Progress(DEFAULT_PROGRESS_STYLE.clone())
    } else if arguments.is_present("verbose") {
        Verbosity::Messages
    } else {
        Verbosity::Quiet
    }
}
