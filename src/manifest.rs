use crate::error::prelude::*;
use serde::Deserialize;
use serde_json::Value;

// fields
const KIND: &str = "kind";
const METADATA: &str = "metadata";
const NAME: &str = "name";
const NAMESPACE: &str = "namespace";
const ITEMS: &str = "items";

const LIST_KIND: &str = "List";

/// An unstructured decoded manifest. Guaranteed by construction to be a
/// mapping with a non-empty `kind` and `metadata.name`.
#[derive(Clone, Debug, PartialEq)]
pub struct Object(Value);

impl Object {
  pub fn kind(&self) -> &str {
    self.0.get(KIND).and_then(Value::as_str).unwrap_or_default()
  }

  pub fn name(&self) -> &str {
    self
      .0
      .get(METADATA)
      .and_then(|metadata| metadata.get(NAME))
      .and_then(Value::as_str)
      .unwrap_or_default()
  }

  pub fn namespace(&self) -> Option<&str> {
    self
      .0
      .get(METADATA)
      .and_then(|metadata| metadata.get(NAMESPACE))
      .and_then(Value::as_str)
  }

  pub fn set_namespace(&mut self, namespace: &str) {
    if let Some(metadata) = self.0.get_mut(METADATA).and_then(Value::as_object_mut) {
      metadata.insert(NAMESPACE.to_owned(), Value::String(namespace.to_owned()));
    }
  }

  pub fn value(&self) -> &Value {
    &self.0
  }
}

/// Decodes every document in a YAML or JSON stream into objects, flattening
/// `List` manifests into their items. `source` labels errors.
pub fn decode_all(data: &str, source: &str) -> Result<Vec<Object>, Error> {
  let mut objects = Vec::new();
  for document in serde_yaml::Deserializer::from_str(data) {
    let value = Value::deserialize(document).map_err(|err| Error::Parse(err, source.to_owned()))?;
    if value.is_null() {
      continue;
    }
    flatten_into(value, source, &mut objects)?;
  }
  Ok(objects)
}

fn flatten_into(value: Value, source: &str, objects: &mut Vec<Object>) -> Result<(), Error> {
  if value.get(KIND).and_then(Value::as_str) != Some(LIST_KIND) {
    objects.push(validate(value, source)?);
    return Ok(());
  }
  let Value::Object(mut map) = value else {
    return Err(Error::NotAMapping(source.to_owned()));
  };
  match map.remove(ITEMS) {
    Some(Value::Array(items)) => {
      for item in items {
        objects.push(validate(item, source)?);
      }
      Ok(())
    }
    _ => Err(Error::BadList(source.to_owned())),
  }
}

fn validate(value: Value, source: &str) -> Result<Object, Error> {
  if !value.is_object() {
    return Err(Error::NotAMapping(source.to_owned()));
  }
  let kind = value.get(KIND).and_then(Value::as_str).unwrap_or_default();
  if kind.is_empty() {
    return Err(Error::MissingField(KIND, source.to_owned()));
  }
  let name = value
    .get(METADATA)
    .and_then(|metadata| metadata.get(NAME))
    .and_then(Value::as_str)
    .unwrap_or_default();
  if name.is_empty() {
    return Err(Error::MissingField("metadata.name", source.to_owned()));
  }
  Ok(Object(value))
}

#[non_exhaustive]
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
  #[error("Failed to parse manifest from \"{1}\": {0}")]
  Parse(#[source] serde_yaml::Error, String),
  #[error("Manifest from \"{0}\" is not a mapping")]
  NotAMapping(String),
  #[error("Manifest from \"{1}\" is missing required field \"{0}\"")]
  MissingField(&'static str, String),
  #[error("The \"items\" of a List manifest from \"{0}\" must be a sequence")]
  BadList(String),
}

#[cfg(test)]
mod tests {
  use super::*;

  fn decode_one(data: &str) -> Object {
    let mut objects = decode_all(data, "test").unwrap();
    assert_eq!(objects.len(), 1);
    objects.pop().unwrap()
  }

  #[test]
  pub fn decodes_yaml() {
    let object = decode_one("kind: Service\nmetadata:\n  name: frontend\n");
    assert_eq!(object.kind(), "Service");
    assert_eq!(object.name(), "frontend");
    assert_eq!(object.namespace(), None);
  }

  #[test]
  pub fn decodes_json() {
    let object = decode_one(r#"{"kind": "Pod", "metadata": {"name": "web"}}"#);
    assert_eq!(object.kind(), "Pod");
    assert_eq!(object.name(), "web");
  }

  #[test]
  pub fn decodes_multi_document_streams() {
    let data = "kind: Service\nmetadata:\n  name: a\n---\nkind: Pod\nmetadata:\n  name: b\n";
    let objects = decode_all(data, "test").unwrap();
    let names: Vec<_> = objects.iter().map(Object::name).collect();
    assert_eq!(names, ["a", "b"]);
  }

  #[test]
  pub fn skips_empty_documents() {
    let data = "---\nkind: Pod\nmetadata:\n  name: only\n---\n";
    assert_eq!(decode_all(data, "test").unwrap().len(), 1);
  }

  #[test]
  pub fn flattens_lists() {
    let data = r#"
kind: List
items:
- kind: Pod
  metadata:
    name: one
- kind: Service
  metadata:
    name: two
"#;
    let objects = decode_all(data, "test").unwrap();
    let kinds: Vec<_> = objects.iter().map(Object::kind).collect();
    assert_eq!(kinds, ["Pod", "Service"]);
  }

  #[test]
  pub fn rejects_missing_kind() {
    let err = decode_all("metadata:\n  name: anonymous\n", "test").unwrap_err();
    assert!(matches!(err, Error::MissingField("kind", _)));
  }

  #[test]
  pub fn rejects_missing_name() {
    let err = decode_all("kind: Pod\nmetadata: {}\n", "test").unwrap_err();
    assert!(matches!(err, Error::MissingField("metadata.name", _)));
  }

  #[test]
  pub fn rejects_scalars() {
    let err = decode_all("just a string\n", "test").unwrap_err();
    assert!(matches!(&err, Error::NotAMapping(_)));
    assert_eq!(err.to_string(), "Manifest from \"test\" is not a mapping");
  }

  #[test]
  pub fn rejects_list_without_items() {
    let err = decode_all("kind: List\nitems: 3\n", "test").unwrap_err();
    assert!(matches!(err, Error::BadList(_)));
  }

  #[test]
  pub fn namespace_can_be_set() {
    let mut object = decode_one("kind: Pod\nmetadata:\n  name: web\n");
    object.set_namespace("staging");
    assert_eq!(object.namespace(), Some("staging"));
  }
}
