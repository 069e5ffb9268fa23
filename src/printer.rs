use crate::error::prelude::*;
use crate::manifest;
use serde_json::Value;
use std::io::{self, Write};

/// Prints objects through a template of literal text and `{.dot.path}`
/// placeholders resolved against the object's fields.
#[derive(Clone, Debug)]
pub struct TemplatePrinter {
  segments: Vec<Segment>,
}

#[derive(Clone, Debug)]
enum Segment {
  Literal(String),
  Field(Vec<String>),
}

impl TemplatePrinter {
  pub fn new(template: &str) -> Result<Self, Error> {
    let mut segments = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
      if start > 0 {
        segments.push(Segment::Literal(rest[..start].to_owned()));
      }
      let end = match rest[start..].find('}') {
        Some(offset) => start + offset,
        None => return Err(Error::UnclosedPlaceholder(template.to_owned())),
      };
      let path = rest[start + 1..end]
        .strip_prefix('.')
        .filter(|path| !path.is_empty() && !path.split('.').any(str::is_empty))
        .ok_or_else(|| Error::BadFieldPath(rest[start + 1..end].to_owned()))?;
      segments.push(Segment::Field(path.split('.').map(str::to_owned).collect()));
      rest = &rest[end + 1..];
    }
    if !rest.is_empty() {
      segments.push(Segment::Literal(rest.to_owned()));
    }
    Ok(Self { segments })
  }

  pub fn print_obj(&self, object: &manifest::Object, out: &mut impl Write) -> Result<(), Error> {
    for segment in &self.segments {
      match segment {
        Segment::Literal(text) => out.write_all(text.as_bytes()).map_err(Error::Write)?,
        Segment::Field(path) => {
          let value = lookup(object.value(), path)
            .ok_or_else(|| Error::MissingField(path.join(".")))?;
          match value {
            Value::String(text) => write!(out, "{text}").map_err(Error::Write)?,
            Value::Bool(_) | Value::Number(_) => write!(out, "{value}").map_err(Error::Write)?,
            _ => return Err(Error::NotAScalar(path.join("."))),
          }
        }
      }
    }
    Ok(())
  }
}

fn lookup<'a>(value: &'a Value, path: &[String]) -> Option<&'a Value> {
  path.iter().try_fold(value, |value, key| value.get(key))
}

#[non_exhaustive]
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
  #[error("Template \"{0}\" has an unclosed placeholder")]
  UnclosedPlaceholder(String),
  #[error("Placeholder \"{{{0}}}\" is not a \".field.path\"")]
  #[diagnostic(help("placeholders look like {{.metadata.name}}"))]
  BadFieldPath(String),
  #[error("The object has no field \"{0}\"")]
  MissingField(String),
  #[error("The field \"{0}\" is not a printable scalar")]
  NotAScalar(String),
  #[error("Failed to write to the output: {0}")]
  Write(#[source] io::Error),
}
