//! Command line interface.

pub mod build;
pub mod completions;
pub mod pdf;
pub mod pdf_batch;
pub mod run;
pub mod utils;
