//! package.json manifest model and dependency extraction

use crate::types::{DependencyKind, Funding};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The dependency categories of a `package.json`.
///
/// Each field is kept as raw JSON. Only the keys matter here, and a
/// category with an unexpected shape must not fail the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// `dependencies`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Value>,

    /// `devDependencies`
    #[serde(default, rename = "devDependencies", skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<Value>,

    /// `peerDependencies`
    #[serde(default, rename = "peerDependencies", skip_serializing_if = "Option::is_none")]
    pub peer_dependencies: Option<Value>,

    /// `bundleDependencies`
    #[serde(default, rename = "bundleDependencies", skip_serializing_if = "Option::is_none")]
    pub bundle_dependencies: Option<Value>,

    /// `optionalDependencies`
    #[serde(default, rename = "optionalDependencies", skip_serializing_if = "Option::is_none")]
    pub optional_dependencies: Option<Value>,
}

impl Manifest {
    /// Parse a manifest from JSON text
    ///
    /// # Errors
    /// Returns an error if the text is not valid JSON or not a JSON object
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Build a manifest from an already-parsed JSON document
    ///
    /// # Errors
    /// Returns [`Error::NotAnObject`] for anything but a JSON object
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::NotAnObject(json_type_name(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Raw JSON of one category, if present and not null
    pub fn field(&self, kind: DependencyKind) -> Option<&Value> {
        let field = match kind {
            DependencyKind::Runtime => &self.dependencies,
            DependencyKind::Dev => &self.dev_dependencies,
            DependencyKind::Peer => &self.peer_dependencies,
            DependencyKind::Bundle => &self.bundle_dependencies,
            DependencyKind::Optional => &self.optional_dependencies,
        };
        field.as_ref().filter(|v| !v.is_null())
    }

    /// Set one category from a list of names (version specifiers are `"*"`)
    pub fn set_dependencies<I, S>(&mut self, kind: DependencyKind, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let map: serde_json::Map<String, Value> = names
            .into_iter()
            .map(|name| (name.into(), Value::String("*".to_string())))
            .collect();
        let slot = match kind {
            DependencyKind::Runtime => &mut self.dependencies,
            DependencyKind::Dev => &mut self.dev_dependencies,
            DependencyKind::Peer => &mut self.peer_dependencies,
            DependencyKind::Bundle => &mut self.bundle_dependencies,
            DependencyKind::Optional => &mut self.optional_dependencies,
        };
        *slot = Some(Value::Object(map));
    }

    /// Dependency names declared under one category, in document order.
    ///
    /// An object yields its keys. An array yields its string elements, which
    /// is how npm writes `bundleDependencies`. Any other shape yields nothing.
    pub fn dependencies_of(&self, kind: DependencyKind) -> Vec<String> {
        match self.field(kind) {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Every dependency name across all categories.
    ///
    /// Categories are concatenated in [`DependencyKind::ALL`] order. Names
    /// declared under several categories appear once per category.
    pub fn dependency_names(&self) -> Vec<String> {
        DependencyKind::ALL
            .iter()
            .flat_map(|kind| self.dependencies_of(*kind))
            .collect()
    }

    /// Whether no category declares any dependency
    pub fn is_empty(&self) -> bool {
        DependencyKind::ALL
            .iter()
            .all(|kind| self.dependencies_of(*kind).is_empty())
    }
}

/// A registry `/latest` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package name, kept raw so an odd value never fails the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    /// Published version, kept raw like `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,

    /// Dependency categories of the published version
    #[serde(flatten)]
    pub manifest: Manifest,

    /// Declared funding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<Funding>,
}

impl PackageMetadata {
    /// Parse a registry response body
    ///
    /// # Errors
    /// Returns an error if the body is not a JSON object
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        if !value.is_object() {
            return Err(Error::NotAnObject(json_type_name(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Package name, when it is a string
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    /// Published version, when it is a string
    pub fn version(&self) -> Option<&str> {
        self.version.as_ref().and_then(Value::as_str)
    }

    /// Dependency names of this package, see [`Manifest::dependency_names`]
    pub fn dependency_names(&self) -> Vec<String> {
        self.manifest.dependency_names()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
