use std::path::{Path, PathBuf};

use glob::Pattern;
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::issues::BuildIssue;
use crate::utils::to_forward_slashes;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Which files of a source subtree a collector wants.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions<'a> {
    /// Allowed extensions without the dot. `None` accepts every file.
    pub extensions: Option<&'a [&'a str]>,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Skip the barrel `index.ts` directly under the scanned directory.
    pub exclude_root_index: bool,
}

impl<'a> ScanOptions<'a> {
    pub fn recursive(extensions: &'a [&'a str]) -> Self {
        Self {
            extensions: Some(extensions),
            recursive: true,
            exclude_root_index: false,
        }
    }

    pub fn top_level(extensions: &'a [&'a str]) -> Self {
        Self {
            extensions: Some(extensions),
            recursive: false,
            exclude_root_index: false,
        }
    }

    pub fn any_file() -> Self {
        Self {
            extensions: None,
            recursive: true,
            exclude_root_index: false,
        }
    }

    pub fn without_root_index(mut self) -> Self {
        self.exclude_root_index = true;
        self
    }

    fn accepts(&self, relative: &str) -> bool {
        if self.exclude_root_index && relative == "index.ts" {
            return false;
        }
        match self.extensions {
            None => true,
            Some(extensions) => relative
                .rsplit_once('.')
                .is_some_and(|(_, ext)| extensions.contains(&ext)),
        }
    }
}

/// A file found under a scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Path relative to the scanned directory, forward-slash separated.
    pub relative: String,
    pub absolute: PathBuf,
}

/// Result of scanning one directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted by relative path.
    pub files: Vec<ScannedFile>,
    /// Entries the walk could not access.
    pub issues: Vec<BuildIssue>,
}

/// Project-wide ignore rules, resolved once from the config.
#[derive(Debug, Default)]
pub struct IgnoreRules {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
    root: PathBuf,
}

impl IgnoreRules {
    /// Literal entries are prefix-matched against `root.join(entry)`; glob
    /// entries are matched against the path relative to `root`.
    pub fn new(root: &Path, ignores: &[String]) -> Self {
        let mut rules = Self {
            root: root.to_path_buf(),
            ..Default::default()
        };

        for p in ignores {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => rules.patterns.push(pattern),
                    Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
                }
            } else {
                rules.literal_paths.push(root.join(p));
            }
        }

        rules
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        if self
            .literal_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            return true;
        }
        if self.patterns.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative = to_forward_slashes(&relative.to_string_lossy());
        self.patterns.iter().any(|p| p.matches(&relative))
    }
}

/// Walk `dir` and return the files `options` accepts.
///
/// A missing directory is an empty result, not an error.
pub fn scan_files(dir: &Path, options: ScanOptions<'_>, ignores: &IgnoreRules) -> ScanResult {
    let mut result = ScanResult::default();

    if !dir.is_dir() {
        debug!(dir = %dir.display(), "source directory not found, nothing to collect");
        return result;
    }

    let walker = if options.recursive {
        WalkDir::new(dir)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().unwrap_or(dir).display().to_string();
                warn!(path = %path, error = %e, "cannot access path");
                result.issues.push(BuildIssue::UnreadableFile {
                    path,
                    message: e.to_string(),
                });
                continue;
            }
        };
        let path = entry.path();

        if !entry.file_type().is_file() || ignores.is_ignored(path) {
            continue;
        }

        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };
        let relative = to_forward_slashes(&relative.to_string_lossy());

        if options.accepts(&relative) {
            result.files.push(ScannedFile {
                relative,
                absolute: path.to_path_buf(),
            });
        }
    }

    result.files.sort_by(|a, b| a.relative.cmp(&b.relative));
    result
}

/// Read every scanned file in parallel.
///
/// Unreadable files are left out and reported; order follows `files`.
pub fn read_files(files: &[ScannedFile]) -> (Vec<(ScannedFile, String)>, Vec<BuildIssue>) {
    let results: Vec<_> = files
        .par_iter()
        .map(|file| (file, std::fs::read_to_string(&file.absolute)))
        .collect();

    let mut contents = Vec::with_capacity(results.len());
    let mut issues = Vec::new();

    for (file, result) in results {
        match result {
            Ok(content) => contents.push((file.clone(), content)),
            Err(e) => {
                warn!(path = %file.absolute.display(), error = %e, "failed to read file");
                issues.push(BuildIssue::UnreadableFile {
                    path: file.absolute.display().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    (contents, issues)
}
