//! Non-fatal problems recorded while building a registry.
//!
//! None of these abort a build: the offending fragment, file, or item is
//! skipped and the issue is reported alongside the build summary.

use std::fmt;

use crate::core::types::ItemType;

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildIssue {
    /// A script fragment could not be parsed; it contributed no imports.
    ParseFailure { path: String, message: String },
    /// A source file or directory could not be read; it was left out of its collector.
    UnreadableFile { path: String, message: String },
    /// A file of a target-required type had no resolvable target.
    MissingTarget { path: String, item_type: ItemType },
    /// An assembled item failed the schema gate and was not written.
    InvalidItem {
        item_type: ItemType,
        name: String,
        reasons: Vec<String>,
    },
    /// A pre-authored style/theme definition was unreadable or not a JSON object.
    MalformedDefinition {
        path: String,
        item_type: ItemType,
        message: String,
    },
}

impl BuildIssue {
    pub fn severity(&self) -> Severity {
        match self {
            BuildIssue::ParseFailure { .. } | BuildIssue::UnreadableFile { .. } => {
                Severity::Warning
            }
            BuildIssue::MissingTarget { .. }
            | BuildIssue::InvalidItem { .. }
            | BuildIssue::MalformedDefinition { .. } => Severity::Error,
        }
    }

    /// Short rule-like identifier, used in CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            BuildIssue::ParseFailure { .. } => "parse-failure",
            BuildIssue::UnreadableFile { .. } => "unreadable-file",
            BuildIssue::MissingTarget { .. } => "missing-target",
            BuildIssue::InvalidItem { .. } => "invalid-item",
            BuildIssue::MalformedDefinition { .. } => "malformed-definition",
        }
    }
}

impl fmt::Display for BuildIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildIssue::ParseFailure { path, message } => {
                write!(f, "{}: could not parse imports ({})", path, message)
            }
            BuildIssue::UnreadableFile { path, message } => {
                write!(f, "{}: could not read file ({})", path, message)
            }
            BuildIssue::MissingTarget { path, item_type } => write!(
                f,
                "{}: {} files require a target but none was provided",
                path,
                item_type.as_str()
            ),
            BuildIssue::InvalidItem {
                item_type,
                name,
                reasons,
            } => write!(
                f,
                "{} \"{}\" failed validation: {}",
                item_type,
                name,
                reasons.join("; ")
            ),
            BuildIssue::MalformedDefinition {
                path,
                item_type,
                message,
            } => write!(f, "{}: invalid {} definition ({})", path, item_type, message),
        }
    }
}
