//! Function for running the command line program.

use super::{
    build, completions::run_completions_subcommand, pdf::run_pdf_subcommand,
    pdf_batch::run_pdf_batch_subcommand,
};
use clap::ArgMatches;
use std::time::Instant;

/// Runs the `ambiguity` command line program.
pub fn run() {
    let command = build::build();
    run_with_args(command.get_matches());
}

/// Runs the `ambiguity` command line program with the given parsed arguments.
pub fn run_with_args(arguments: ArgMatches) {
    let start_instant = Instant::now();

    if let Some(pdf_arguments) = arguments.subcommand_matches("pdf") {
        run_pdf_subcommand(pdf_arguments);
    }
    if let Some(pdf_batch_arguments) = arguments.subcommand_matches("pdf_batch") {
        run_pdf_batch_subcommand(pdf_batch_arguments);
    }
    if let Some(completions_arguments) = arguments.subcommand_matches("completions") {
        run_completions_subcommand(completions_arguments);
    }

    if arguments.is_present("timing") {
        eprintln!("Elapsed time: {} s", start_instant.elapsed().as_secs_f64());
    }
}
