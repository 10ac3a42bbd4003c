//! Report formatting and printing utilities.
//!
//! Separate from the pipeline so `vreg` can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::builder::{BUNDLE_FILE, BuildReport, INDEX_FILE};
use crate::core::types::RegistryItem;
use crate::issues::{BuildIssue, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

/// Print a build summary to stdout and its issues to stderr.
pub fn print_build_report(report: &BuildReport) {
    print_build_report_to(report, &mut io::stdout().lock());
    print_issues_to(&report.issues, &mut io::stderr().lock());
}

pub fn print_build_report_to<W: Write>(report: &BuildReport, writer: &mut W) {
    let total = report.total_written();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Built {} {} into {}",
            total,
            plural(total, "item", "items"),
            report.output_dir.display()
        )
        .green()
    );

    for (item_type, count) in &report.written {
        let _ = writeln!(
            writer,
            "  {:<12} {}",
            item_type.output_dir().cyan(),
            count
        );
    }

    let _ = writeln!(
        writer,
        "  {:<12} {} {}",
        INDEX_FILE.cyan(),
        report.index_items,
        plural(report.index_items, "item", "items")
    );

    match &report.bundle {
        Some(bundle) => {
            let _ = writeln!(
                writer,
                "  {:<12} {} {}, {} {}, {} dev {}",
                BUNDLE_FILE.cyan(),
                bundle.files,
                plural(bundle.files, "file", "files"),
                bundle.dependencies,
                plural(bundle.dependencies, "dependency", "dependencies"),
                bundle.dev_dependencies,
                plural(bundle.dev_dependencies, "dependency", "dependencies"),
            );
        }
        None => {
            let _ = writeln!(
                writer,
                "  {:<12} {}",
                BUNDLE_FILE.cyan(),
                "not written (nothing to bundle)".dimmed()
            );
        }
    }
}

/// Print skipped files and items with a problem count.
pub fn print_issues_to<W: Write>(issues: &[BuildIssue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    for issue in issues {
        let severity = match issue.severity() {
            Severity::Error => "error".bold().red(),
            Severity::Warning => "warning".bold().yellow(),
        };
        let _ = writeln!(
            writer,
            "{}: {}  {}",
            severity,
            issue,
            issue.code().dimmed().cyan()
        );
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warnings = issues.len() - errors;
    let _ = writeln!(
        writer,
        "\n{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        errors,
        plural(errors, "error", "errors").red(),
        warnings,
        plural(warnings, "warning", "warnings").yellow()
    );
}

/// Print index entries as aligned `name  type  title` rows.
pub fn print_item_list(items: &[RegistryItem]) {
    print_item_list_to(items, &mut io::stdout().lock());
}

pub fn print_item_list_to<W: Write>(items: &[RegistryItem], writer: &mut W) {
    if items.is_empty() {
        let _ = writeln!(writer, "{}", "No items found".dimmed());
        return;
    }

    let name_width = items
        .iter()
        .map(|item| UnicodeWidthStr::width(item.name.as_str()))
        .max()
        .unwrap_or(0);

    for item in items {
        let padding = name_width - UnicodeWidthStr::width(item.name.as_str());
        let _ = writeln!(
            writer,
            "{}{:padding$}  {:<20} {}",
            item.name.bold(),
            "",
            item.item_type.as_str().cyan(),
            item.title,
            padding = padding
        );
    }
}
