//! Core types for dependency and funding metadata

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Funding `type` value marking a lightning payment address
pub const LIGHTNING_FUNDING_TYPE: &str = "lightning";

/// Optional scheme prefix carried by some lightning addresses
pub const LIGHTNING_SCHEME: &str = "lightning:";

/// Funding declarations collected per package, in first-visit order.
///
/// A `None` value records a package that was fetched but declares no funding.
pub type FundingMap = IndexMap<String, Option<Funding>>;

/// Lightning address per package
pub type LightningMap = IndexMap<String, String>;

/// Category a dependency is declared under in a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// `dependencies`
    Runtime,
    /// `devDependencies`
    Dev,
    /// `peerDependencies`
    Peer,
    /// `bundleDependencies`
    Bundle,
    /// `optionalDependencies`
    Optional,
}

impl DependencyKind {
    /// Every category, in extraction order
    pub const ALL: [DependencyKind; 5] = [
        DependencyKind::Runtime,
        DependencyKind::Dev,
        DependencyKind::Peer,
        DependencyKind::Bundle,
        DependencyKind::Optional,
    ];

    /// The manifest key holding this category
    pub fn field_name(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "dependencies",
            DependencyKind::Dev => "devDependencies",
            DependencyKind::Peer => "peerDependencies",
            DependencyKind::Bundle => "bundleDependencies",
            DependencyKind::Optional => "optionalDependencies",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// A single `{ type, url }` funding declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingRecord {
    /// Funding channel type (e.g. "github", "opencollective", "lightning")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Funding URL or address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FundingRecord {
    /// Create a record with both fields set
    pub fn new(kind: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            url: Some(url.into()),
        }
    }

    /// Whether the record's type is exactly `"lightning"`
    pub fn is_lightning(&self) -> bool {
        self.kind.as_deref() == Some(LIGHTNING_FUNDING_TYPE)
    }
}

/// One element of a list-form `funding` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FundingSource {
    /// Bare URL string
    Url(String),
    /// `{ type, url }` record
    Record(FundingRecord),
    /// Anything else the registry returned
    Other(Value),
}

impl FundingSource {
    /// The record, if this element is one
    pub fn as_record(&self) -> Option<&FundingRecord> {
        match self {
            FundingSource::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// A package's `funding` field.
///
/// Registries publish a bare URL, one record, or a list of sources. Shapes
/// that fit none of these are kept as [`Funding::Other`] so that one odd
/// field never makes the whole metadata document unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Funding {
    /// Bare URL string
    Text(String),
    // Lists are tried before records: serde accepts a sequence for a struct.
    /// Ordered list of funding sources
    Many(Vec<FundingSource>),
    /// Single `{ type, url }` record
    Single(FundingRecord),
    /// Unrecognized shape
    Other(Value),
}

impl From<FundingRecord> for Funding {
    fn from(record: FundingRecord) -> Self {
        Funding::Single(record)
    }
}

impl From<Vec<FundingRecord>> for Funding {
    fn from(records: Vec<FundingRecord>) -> Self {
        Funding::Many(records.into_iter().map(FundingSource::Record).collect())
    }
}
