//! Source parsers.
//!
//! - `sfc`: pulls analyzable script text out of scanned files (Vue SFC aware)
//! - `script`: TypeScript/JavaScript import extraction (uses swc for AST generation)

pub mod script;
pub mod sfc;

pub use script::parse_imports;
pub use sfc::extract_source;
