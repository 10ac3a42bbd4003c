//! One collector per item type, behind a single dispatch enum.
//!
//! Scanned types go through `collect` then `build_items`. The JSON-only
//! types (style, theme) read pre-authored definitions in `collect_and_build`
//! and skip the scan/group pipeline.

mod base;
mod component;
mod definitions;
mod example;
mod file;
mod hook;
mod lib;
mod page;
mod ui;

use enum_dispatch::enum_dispatch;

pub use base::{collect_dependencies, group_files, item_document};
pub use component::ComponentCollector;
pub use definitions::{StyleCollector, ThemeCollector};
pub use example::ExampleCollector;
pub use file::FileCollector;
pub use hook::HookCollector;
pub use lib::LibCollector;
pub use page::PageCollector;
pub use ui::UiCollector;

use crate::core::context::CollectorContext;
use crate::core::types::{AssetFile, CollectorResult, ItemType};
use crate::issues::BuildIssue;

#[enum_dispatch]
pub trait Collect {
    fn item_type(&self) -> ItemType;

    /// Scan the collector's subtree into rewritten, targeted files.
    fn collect(&self, ctx: &CollectorContext, issues: &mut Vec<BuildIssue>) -> Vec<AssetFile>;

    /// Group files into items and attach dependency metadata.
    fn build_items(
        &self,
        files: Vec<AssetFile>,
        ctx: &CollectorContext,
        issues: &mut Vec<BuildIssue>,
    ) -> CollectorResult;

    /// Produce the whole result in one step. `None` means the collector uses
    /// the regular `collect` / `build_items` flow.
    fn collect_and_build(
        &self,
        _ctx: &CollectorContext,
        _issues: &mut Vec<BuildIssue>,
    ) -> Option<CollectorResult> {
        None
    }
}

#[enum_dispatch(Collect)]
pub enum Collector {
    Component(ComponentCollector),
    Hook(HookCollector),
    Example(ExampleCollector),
    Lib(LibCollector),
    Ui(UiCollector),
    Page(PageCollector),
    File(FileCollector),
    Style(StyleCollector),
    Theme(ThemeCollector),
}

impl Collector {
    pub fn for_type(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Component => ComponentCollector.into(),
            ItemType::Hook => HookCollector.into(),
            ItemType::Example => ExampleCollector.into(),
            ItemType::Lib => LibCollector.into(),
            ItemType::Ui => UiCollector.into(),
            ItemType::Page => PageCollector.into(),
            ItemType::File => FileCollector.into(),
            ItemType::Style => StyleCollector.into(),
            ItemType::Theme => ThemeCollector.into(),
        }
    }
}

/// Every collector, in build order.
pub fn default_collectors() -> Vec<Collector> {
    ItemType::BUILD_ORDER
        .into_iter()
        .map(Collector::for_type)
        .collect()
}
