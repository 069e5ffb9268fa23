use crate::{hello_kubernetes, hello_world};

#[derive(Clone, Debug, clap::Parser)]
#[command(name = "clusterctl", version, about = "Cluster management tutorial commands.")]
pub struct Args {
  #[command(subcommand)]
  pub command: CommandKind,
}

#[derive(Clone, Debug, clap::Subcommand)]
pub enum CommandKind {
  /// Print Hello World and exit.
  #[command(name = "hello-world")]
  HelloWorld(hello_world::Args),
  /// Print the name and kind of resources from a file or from stdin.
  #[command(name = "hello-kubernetes")]
  HelloKubernetes(hello_kubernetes::Args),
}
