use crate::error::prelude::*;
use crate::fs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const KUSTOMIZATION_FILE: &str = "kustomization.yaml";

#[derive(Debug, Deserialize)]
struct Kustomization {
  #[serde(default)]
  resources: Vec<String>,
}

/// Expands an overlay directory into the manifest files its
/// `kustomization.yaml` lists, in list order. Relative paths are resolved
/// against the directory. Only resource-list expansion is supported; overlay
/// patching is not.
pub fn resources(dir: &Path) -> Result<Vec<PathBuf>, Error> {
  let path = dir.join(KUSTOMIZATION_FILE);
  let data = fs::read_to_string(&path)?;
  let kustomization: Kustomization =
    serde_yaml::from_str(&data).map_err(|err| Error::Parse(err, path))?;
  Ok(
    kustomization
      .resources
      .iter()
      .map(|resource| dir.join(resource))
      .collect(),
  )
}

#[non_exhaustive]
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
  #[error(transparent)]
  #[diagnostic(transparent)]
  IO(#[from] fs::Error),
  #[error("Failed to parse \"{}\": {}", .1.display(), .0)]
  Parse(#[source] serde_yaml::Error, PathBuf),
}
