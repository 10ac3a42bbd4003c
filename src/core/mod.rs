//! The asset-collection and dependency-resolution pipeline.
//!
//! ## Stages
//!
//! - `parsers`: script-region extraction and import discovery
//! - `deps`: classification of import specifiers
//! - `collectors`: one collector per item type
//! - `builder`: runs the collectors and writes the output store
//! - `store`: read access to a built store

pub mod builder;
pub mod collectors;
pub mod context;
pub mod deps;
pub mod file_scanner;
pub mod output;
pub mod parsers;
pub mod rewrite;
pub mod schema;
pub mod store;
pub mod types;

pub use builder::{BuildReport, BundleSummary, build_registry};
pub use store::{RegistryStore, StoreEntry};
pub use types::{AssetFile, DependencySets, ItemType, RegistryIndex, RegistryItem};
