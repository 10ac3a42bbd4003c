use super::Collect;
use super::base::{build_grouped, collect_scanned};
use crate::core::context::CollectorContext;
use crate::core::file_scanner::ScanOptions;
use crate::core::types::{AssetFile, CollectorResult, ItemType};
use crate::issues::BuildIssue;

/// Utility modules under `src/lib`.
pub struct LibCollector;

impl Collect for LibCollector {
    fn item_type(&self) -> ItemType {
        ItemType::Lib
    }

    fn collect(&self, ctx: &CollectorContext, issues: &mut Vec<BuildIssue>) -> Vec<AssetFile> {
        collect_scanned(
            ctx,
            self.item_type(),
            ScanOptions::recursive(&["ts"]),
            |_| None,
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
            (title.to_string(), format!("{} utility library.", title))
        })
    }
}
