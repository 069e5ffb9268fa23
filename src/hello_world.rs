use crate::error::prelude::*;
use std::ffi::OsString;
use std::io::{self, Write};

/// Print Hello World and exit. Arguments are accepted and ignored; this
/// command has no inputs.
#[derive(Clone, Debug, clap::Args)]
pub struct Args {
  #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
  pub args: Vec<OsString>,
}

impl Args {
  pub fn call(self) -> Result<(), Error> {
    run(&mut io::stdout().lock())
  }
}

pub fn run(out: &mut impl Write) -> Result<(), Error> {
  writeln!(out, "Hello World!").map_err(Error::Write)
}

#[non_exhaustive]
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
  #[error("Failed to write to standard output: {0}")]
  Write(#[source] io::Error),
}
