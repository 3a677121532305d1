//! # lnfund-deps
//!
//! Manifest model and funding metadata types shared by the lnfund crates.
//!
//! This crate provides:
//! - [`Manifest`]: the five dependency categories of a `package.json`
//! - The dependency extractor ([`Manifest::dependency_names`])
//! - [`PackageMetadata`]: a registry `/latest` document
//! - [`Funding`] and [`FundingRecord`]: every shape a `funding` field can take
//! - [`FundingMap`] and [`LightningMap`]: insertion-ordered result maps
//!
//! ## Example
//!
//! ```rust
//! use lnfund_deps::Manifest;
//!
//! let manifest = Manifest::from_json_str(
//!     r#"{ "dependencies": { "left-pad": "^1.3.0" }, "devDependencies": { "tap": "*" } }"#,
//! )?;
//!
//! assert_eq!(manifest.dependency_names(), vec!["left-pad", "tap"]);
//! # Ok::<(), lnfund_deps::Error>(())
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod manifest;
pub mod types;

pub use error::{Error, Result};
pub use manifest::{Manifest, PackageMetadata};
pub use types::{
    DependencyKind, Funding, FundingMap, FundingRecord, FundingSource, LightningMap,
    LIGHTNING_FUNDING_TYPE, LIGHTNING_SCHEME,
};
