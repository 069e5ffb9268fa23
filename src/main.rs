use crate::error::prelude::*;

mod cli;
mod error;
mod fs;
mod hello_kubernetes;
mod hello_world;
mod log;
mod manifest;
mod overlay;
mod printer;
mod resource;

fn main() -> miette::Result<()> {
  use cli::CommandKind::*;

  log::init();
  let args: cli::Args = clap::Parser::try_parse().map_err(Error::from)?;
  match args.command {
    HelloWorld(args) => args.call().map_err(|err| Error::from(err).into()),
    HelloKubernetes(args) => args.call().map_err(|err| Error::from(err).into()),
  }
}

#[non_exhaustive]
#[derive(Debug, Error, Diagnostic)]
enum Error {
  #[error(transparent)]
  CliError(#[from] clap::error::Error),
  #[error(transparent)]
  #[diagnostic(transparent)]
  HelloWorldError(#[from] hello_world::Error),
  #[error(transparent)]
  #[diagnostic(transparent)]
  HelloKubernetesError(#[from] hello_kubernetes::Error),
}
