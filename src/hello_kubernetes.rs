use crate::error::prelude::*;
use crate::{printer, resource};
use std::io::{self, Write};

const TEMPLATE: &str = "Hello {.metadata.name} {.kind}\n";

/// Print the name and kind of resources from a file or from stdin.
///
/// JSON and YAML manifests are accepted.
#[derive(Clone, Debug, clap::Args)]
pub struct Args {
  #[command(flatten)]
  pub filename_options: resource::FilenameOptions,
  /// Namespace to resolve manifests against. When set, manifests declaring a
  /// different namespace are rejected.
  #[arg(short, long, value_name = "NS")]
  pub namespace: Option<String>,
  #[arg(hide = true)]
  pub args: Vec<String>,
}

impl Args {
  pub fn call(self) -> Result<(), Error> {
    if !self.filename_options.has_sources() {
      let mut err = io::stderr().lock();
      let _ = writeln!(err, "Error: must specify one of -f and -k\n");
      let _ = write_help(&mut err);
      return Err(Error::MissingSource);
    }
    self.validate()?;
    let printer = printer::TemplatePrinter::new(TEMPLATE)?;
    self.run(&printer, &mut io::stdout().lock())
  }

  fn validate(&self) -> Result<(), Error> {
    if !self.args.is_empty() {
      return Err(Error::UnexpectedArgs(self.args.join(" ")));
    }
    Ok(())
  }

  fn run(&self, printer: &printer::TemplatePrinter, out: &mut impl Write) -> Result<(), Error> {
    let list = resource::Builder::new(self.filename_options.clone())
      .namespace(self.namespace.as_deref())
      .build()?;

    let mut count = 0;
    for item in list {
      let info = item?;
      count += 1;
      printer.print_obj(&info.object, out)?;
    }
    if count == 0 {
      return Err(Error::NoObjects);
    }
    Ok(())
  }
}

fn write_help(out: &mut impl Write) -> io::Result<()> {
  use clap::CommandFactory;
  let mut cmd = <crate::cli::Args as CommandFactory>::command();
  let help = match cmd.find_subcommand_mut("hello-kubernetes") {
    Some(sub) => sub.render_help(),
    None => cmd.render_help(),
  };
  write!(out, "{help}")
}

#[non_exhaustive]
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
  #[error("must specify one of -f and -k")]
  #[diagnostic(help("see 'clusterctl hello-kubernetes --help' for usage"))]
  MissingSource,
  #[error("Unexpected args: {0}")]
  UnexpectedArgs(String),
  #[error(transparent)]
  #[diagnostic(transparent)]
  Template(#[from] printer::Error),
  #[error(transparent)]
  #[diagnostic(transparent)]
  Resolve(#[from] resource::Error),
  #[error("no objects passed to print")]
  NoObjects,
}
