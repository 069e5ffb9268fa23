use crate::error::prelude::*;
use crate::{fs, manifest, overlay};
use std::io::Read;
use std::path::{Path, PathBuf};

pub const DEFAULT_NAMESPACE: &str = "default";

const MANIFEST_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Manifest sources accepted by commands that read resources.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct FilenameOptions {
  /// Manifest file, directory, or `-` for standard input. Repeatable.
  #[arg(short, long, value_name = "PATH")]
  pub filename: Vec<String>,
  /// Directory containing a kustomization.yaml overlay.
  #[arg(short, long, value_name = "DIR")]
  pub kustomize: Option<PathBuf>,
}

impl FilenameOptions {
  pub fn has_sources(&self) -> bool {
    !self.filename.is_empty() || self.kustomize.is_some()
  }
}

/// A resolved object together with the source it came from.
#[derive(Clone, Debug)]
pub struct Info {
  pub object: manifest::Object,
  pub source: String,
}

/// Resolves filename options into a flattened stream of objects.
///
/// Failures that invalidate a whole source (a nonexistent path, an unreadable
/// overlay) abort the build. Failures scoped to one item (an unreadable or
/// undecodable file inside a directory, a namespace conflict) are delivered
/// in-stream so the caller can keep visiting past them.
pub struct Builder {
  namespace: String,
  enforce_namespace: bool,
  options: FilenameOptions,
  stdin: Option<Box<dyn Read>>,
}

impl Builder {
  pub fn new(options: FilenameOptions) -> Self {
    Self {
      namespace: DEFAULT_NAMESPACE.to_owned(),
      enforce_namespace: false,
      options,
      stdin: None,
    }
  }

  /// Replaces the reader consumed by `-` sources. Defaults to the process's
  /// standard input.
  pub fn stdin(mut self, reader: impl Read + 'static) -> Self {
    self.stdin = Some(Box::new(reader));
    self
  }

  /// Sets the active namespace. An explicitly requested namespace is
  /// enforced against the namespace manifests declare.
  pub fn namespace(mut self, namespace: Option<&str>) -> Self {
    if let Some(namespace) = namespace {
      self.namespace = namespace.to_owned();
      self.enforce_namespace = true;
    }
    self
  }

  pub fn build(mut self) -> Result<ResourceList, Error> {
    let mut items = Vec::new();
    for source in &self.options.filename {
      if source == "-" {
        let mut data = String::new();
        match self.stdin.take() {
          Some(mut reader) => reader.read_to_string(&mut data),
          None => std::io::stdin().read_to_string(&mut data),
        }
        .map_err(Error::Stdin)?;
        self.decode_source(&data, "<stdin>", &mut items);
      } else {
        self.build_path(Path::new(source), &mut items)?;
      }
    }
    if let Some(dir) = &self.options.kustomize {
      for path in overlay::resources(dir)? {
        self.build_file(&path, &mut items);
      }
    }
    log::debug!("Resolved {} item(s) from {} source(s)", items.len(), self.source_count());
    Ok(ResourceList { items })
  }

  fn source_count(&self) -> usize {
    self.options.filename.len() + self.options.kustomize.iter().count()
  }

  fn build_path(&self, path: &Path, items: &mut Vec<Result<Info, Error>>) -> Result<(), Error> {
    if fs::metadata(path)?.is_dir() {
      for entry in fs::read_dir_sorted(path)? {
        if entry.is_file() && has_manifest_extension(&entry) {
          self.build_file(&entry, items);
        }
      }
    } else {
      self.build_file(path, items);
    }
    Ok(())
  }

  fn build_file(&self, path: &Path, items: &mut Vec<Result<Info, Error>>) {
    let source = path.display().to_string();
    match fs::read_to_string(path) {
      Ok(data) => self.decode_source(&data, &source, items),
      Err(err) => items.push(Err(err.into())),
    }
  }

  fn decode_source(&self, data: &str, source: &str, items: &mut Vec<Result<Info, Error>>) {
    match manifest::decode_all(data, source) {
      Ok(objects) => {
        for object in objects {
          items.push(self.resolve(object, source));
        }
      }
      Err(err) => items.push(Err(err.into())),
    }
  }

  fn resolve(&self, mut object: manifest::Object, source: &str) -> Result<Info, Error> {
    match object.namespace().map(str::to_owned) {
      Some(declared) if self.enforce_namespace && declared != self.namespace => {
        Err(Error::NamespaceMismatch {
          declared,
          expected: self.namespace.clone(),
          origin: source.to_owned(),
        })
      }
      Some(_) => Ok(Info { object, source: source.to_owned() }),
      None => {
        object.set_namespace(&self.namespace);
        Ok(Info { object, source: source.to_owned() })
      }
    }
  }
}

fn has_manifest_extension(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| {
      MANIFEST_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// The outcome of a build: resolved objects and per-item errors, in
/// resolution order.
#[derive(Debug)]
pub struct ResourceList {
  items: Vec<Result<Info, Error>>,
}

impl IntoIterator for ResourceList {
  type Item = Result<Info, Error>;
  type IntoIter = std::vec::IntoIter<Self::Item>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.into_iter()
  }
}

#[non_exhaustive]
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
  #[error(transparent)]
  #[diagnostic(transparent)]
  IO(#[from] fs::Error),
  #[error(transparent)]
  #[diagnostic(transparent)]
  Manifest(#[from] manifest::Error),
  #[error(transparent)]
  #[diagnostic(transparent)]
  Overlay(#[from] overlay::Error),
  #[error("Failed to read standard input: {0}")]
  Stdin(#[source] std::io::Error),
  #[error("The namespace \"{declared}\" from \"{origin}\" does not match the namespace \"{expected}\"")]
  NamespaceMismatch {
    declared: String,
    expected: String,
    origin: String,
  },
}
