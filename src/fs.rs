use crate::error::prelude::*;
use std::path::{Path, PathBuf};
use std::{fs, io};

pub fn read_to_string(path: impl AsRef<Path>) -> Result<String, Error> {
  fs::read_to_string(path.as_ref()).map_err(|err| Error::File(err, path.as_ref().into()))
}

pub fn metadata(path: impl AsRef<Path>) -> Result<fs::Metadata, Error> {
  fs::metadata(path.as_ref()).map_err(|err| Error::File(err, path.as_ref().into()))
}

/// Returns the entries of a directory, sorted lexically by file name.
pub fn read_dir_sorted(path: impl AsRef<Path>) -> Result<Vec<PathBuf>, Error> {
  let entries = fs::read_dir(path.as_ref())
    .map_err(|err| Error::Dir(err, path.as_ref().into()))?
    .collect::<Result<Vec<_>, _>>()
    .map_err(|err| Error::Dir(err, path.as_ref().into()))?;
  let mut paths: Vec<PathBuf> = entries.iter().map(|entry| entry.path()).collect();
  paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
  Ok(paths)
}

#[non_exhaustive]
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
  #[error("Encountered an IO error for file \"{}\": {}", .1.display(), .0)]
  File(#[source] io::Error, PathBuf),
  #[error("Failed to read directory \"{}\": {}", .1.display(), .0)]
  Dir(#[source] io::Error, PathBuf),
}
