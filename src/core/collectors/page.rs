use super::Collect;
use super::base::{build_grouped, collect_scanned};
use crate::core::context::CollectorContext;
use crate::core::file_scanner::ScanOptions;
use crate::core::types::{AssetFile, CollectorResult, ItemType};
use crate::issues::BuildIssue;

/// Pages under `src/pages`. Every file needs a target; the default installs
/// it at its canonical path.
pub struct PageCollector;

impl Collect for PageCollector {
    fn item_type(&self) -> ItemType {
        ItemType::Page
    }

    fn collect(&self, ctx: &CollectorContext, issues: &mut Vec<BuildIssue>) -> Vec<AssetFile> {
        collect_scanned(
            ctx,
            self.item_type(),
            ScanOptions::recursive(&["vue", "ts"]),
            |rel| Some(format!("pages/{}", rel)),
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
            (format!("{} Page", title), format!("{} page component.", title))
        })
    }
}
