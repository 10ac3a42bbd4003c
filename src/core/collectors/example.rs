use super::Collect;
use super::base::{build_grouped, collect_scanned};
use crate::core::context::CollectorContext;
use crate::core::file_scanner::ScanOptions;
use crate::core::types::{AssetFile, CollectorResult, ItemType};
use crate::issues::BuildIssue;

/// Example blocks: each top-level `.vue` file of the examples package is an item.
pub struct ExampleCollector;

impl Collect for ExampleCollector {
    fn item_type(&self) -> ItemType {
        ItemType::Example
    }

    fn collect(&self, ctx: &CollectorContext, issues: &mut Vec<BuildIssue>) -> Vec<AssetFile> {
        collect_scanned(
            ctx,
            self.item_type(),
            ScanOptions::top_level(&["vue"]),
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
            (
                format!("{} Example", title),
                format!("Example implementation of {}.", title),
            )
        })
    }
}
