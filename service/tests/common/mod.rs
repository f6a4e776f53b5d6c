//! Shared fixtures for exporter integration tests.

#![allow(dead_code)]

use docconv_api::{FnProvider, ProviderError, SchemaProvider};
use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::{json, Value};
use std::path::Path;

/// Provider returning the minimal document used across tests.
pub fn minimal_provider() -> impl SchemaProvider<Schema = Value> {
    FnProvider::new(|| Ok(json!({"openapi": "3.0.0", "paths": {}})))
}

/// Provider whose schema operation always fails.
pub fn failing_provider() -> impl SchemaProvider<Schema = Value> {
    FnProvider::new(|| Err(ProviderError::new("application failed to build its routes")))
}

/// A value that refuses to serialize.
pub struct Unrepresentable;

impl Serialize for Unrepresentable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("value has no textual representation"))
    }
}

#[derive(Serialize)]
pub struct BrokenSchema {
    openapi: &'static str,
    paths: Unrepresentable,
}

/// Provider whose schema contains an unrepresentable value.
pub fn unserializable_provider() -> impl SchemaProvider<Schema = BrokenSchema> {
    FnProvider::new(|| {
        Ok(BrokenSchema {
            openapi: "3.0.0",
            paths: Unrepresentable,
        })
    })
}

/// Parse an exported YAML file back into a JSON value (order preserved).
pub fn read_yaml(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read exported file");
    serde_yaml::from_str(&text).expect("parse exported yaml")
}

/// Names of every entry in `dir`, sorted.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
