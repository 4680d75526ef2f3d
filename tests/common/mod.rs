use ambiguity_density::{ambiguity::fam, cli, exit_on_error};
use clap::Command;
use lazy_static::lazy_static;
use std::{
    ffi::OsString,
    fs,
    path::Path,
    process::{self, Output},
};

lazy_static! {
    static ref COMMAND: Command<'static> = cli::build::build();
}

pub fn run<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = std::iter::once(OsString::from("ambiguity"))
        .chain(args.into_iter().map(Into::into))
        .collect();
    cli::run::run_with_args(COMMAND.clone().get_matches_from(args));
}

/// Runs the compiled `ambiguity` binary as a separate process, so that its
/// standard output can be captured.
pub fn run_binary<I, T>(args: I) -> Output
where
    I: IntoIterator<Item = T>,
    T: AsRef<std::ffi::OsStr>,
{
    let output = exit_on_error!(
        process::Command::new(env!("CARGO_BIN_EXE_ambiguity"))
            .args(args)
            .output(),
        "Error: Could not run ambiguity binary: {}"
    );
    assert!(
        output.status.success(),
        "ambiguity binary failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

pub fn path_arg<P: AsRef<Path>>(flag: &str, path: P) -> String {
    format!("{}={}", flag, path.as_ref().to_string_lossy())
}

/// Reads the `a value` rows written by the `pdf_batch` subcommand.
pub fn read_evaluations<P: AsRef<Path>>(file_path: P) -> Vec<(fam, fam)> {
    let file_path = file_path.as_ref();
    let text = exit_on_error!(
        fs::read_to_string(file_path),
        "Error: Could not read {}: {}",
        file_path.to_string_lossy()
    );
    parse_evaluations(&text)
}

/// Parses `a value` rows, panicking on any line that is not such a row.
pub fn parse_evaluations(text: &str) -> Vec<(fam, fam)> {
    text.lines()
        .map(|line| {
            let mut columns = line.split_whitespace();
            let a = columns.next().expect("Missing a column").parse().unwrap();
            let value = columns.next().expect("Missing value column").parse().unwrap();
            assert!(columns.next().is_none(), "Unexpected column in {}", line);
            (a, value)
        })
        .collect()
}
