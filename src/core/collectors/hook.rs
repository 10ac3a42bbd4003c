use super::Collect;
use super::base::{build_grouped, collect_scanned};
use crate::core::context::CollectorContext;
use crate::core::file_scanner::ScanOptions;
use crate::core::types::{AssetFile, CollectorResult, ItemType};
use crate::issues::BuildIssue;

/// Composables under `src/composables`.
pub struct HookCollector;

impl Collect for HookCollector {
    fn item_type(&self) -> ItemType {
        ItemType::Hook
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
            (title.to_string(), format!("{} composable hook.", title))
        })
    }
}
