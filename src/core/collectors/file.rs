use super::Collect;
use super::base::{build_grouped, collect_scanned};
use crate::core::context::CollectorContext;
use crate::core::file_scanner::ScanOptions;
use crate::core::types::{AssetFile, CollectorResult, ItemType};
use crate::issues::BuildIssue;

/// Arbitrary files under `src/files`. Every file needs a target; the default
/// installs it at its path relative to `files/`.
pub struct FileCollector;

impl Collect for FileCollector {
    fn item_type(&self) -> ItemType {
        ItemType::File
    }

    fn collect(&self, ctx: &CollectorContext, issues: &mut Vec<BuildIssue>) -> Vec<AssetFile> {
        collect_scanned(
            ctx,
            self.item_type(),
            ScanOptions::any_file(),
            |rel| Some(rel.to_string()),
            issues,
        )
    }

    fn build_items(
        &self,
        files: Vec<AssetFile>,
        ctx: &CollectorContext,
        issues: &mut Vec<BuildIssue>,
    ) -> CollectorResult {
        build_grouped(self.item_type(), files, ctx, issues, |title| {
            (title.to_string(), format!("{} file.", title))
        })
    }
}
