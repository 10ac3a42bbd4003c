//! vreg - registry builder for shadcn-vue style component libraries
//!
//! vreg scans a monorepo's element and example packages, discovers each
//! file's imports, classifies them into package and cross-item dependencies,
//! and writes installable item documents plus an index and a bundle.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Collection and dependency-resolution pipeline
//! - `issues`: Non-fatal build problems
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
