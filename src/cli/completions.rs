//! Command line interface for generating a command line completion script.

use super::build;
use crate::exit_on_error;
use clap::{Arg, ArgMatches, Command};
use clap_complete::Shell;
use std::io;

/// Creates a subcommand for generating a completion script.
pub fn create_completions_subcommand() -> Command<'static> {
    Command::new("completions")
        .about("Generate tab-completion script for your shell")
        .hide(true)
        .arg(
            Arg::new("shell")
                .value_name("SHELL")
                .required(true)
                .possible_values(["bash", "zsh", "fish"])
                .help("The shell to generate the script for"),
        )
        .after_help(
            "DISCUSSION\n    \
             The script is written to `stdout`. For Bash, a typical setup is\n\n        \
             $ ambiguity completions bash >> ~/.local/share/bash-completion/completions/ambiguity\n\n    \
             after which you may have to log out and back in for the completions to take effect.",
        )
}

/// Runs the actions for the `completions` subcommand using the given arguments.
pub fn run_completions_subcommand(arguments: &ArgMatches) {
    let shell: Shell = exit_on_error!(
        arguments
            .value_of("shell")
            .expect("No value for required argument")
            .parse(),
        "Error: Invalid shell: {}"
    );
    let mut command = build::build();
    clap_complete::generate(shell, &mut command, "ambiguity", &mut io::stdout());
}
