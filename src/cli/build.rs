//! Function for building the command line hierarchy.

use super::{
    completions::create_completions_subcommand, pdf::create_pdf_subcommand,
    pdf_batch::create_pdf_batch_subcommand,
};
use clap::{self, Arg, Command};

/// Build the `ambiguity` command line hierarchy.
pub fn build() -> Command<'static> {
    Command::new("ambiguity")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about(clap::crate_description!())
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .help("Display elapsed time when done"),
        )
        .subcommand(create_pdf_subcommand())
        .subcommand(create_pdf_batch_subcommand())
        .subcommand(create_completions_subcommand())
}
