use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod build;
mod get;
mod init;
mod list;

const BIN_NAME: &str = "vreg";

/// Default output store location, relative to the project root.
pub const OUTPUT_DIR: &str = "packages/registry/server/assets/registry";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with two sibling components: `foo` imports `bar` and lodash.
    pub fn with_components() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(
            "packages/elements/package.json",
            r#"{
  "name": "@repo/elements",
  "dependencies": { "vue": "^3.5.0", "lodash": "^4.17.21", "@repo/shadcn-vue": "workspace:*" },
  "devDependencies": { "typescript": "^5.0.0", "@types/lodash": "^4.17.0" }
}"#,
        )?;
        test.write_file(
            "packages/elements/src/components/foo/Foo.vue",
            r#"<script setup lang="ts">
import Bar from '../bar/Bar.vue'
import FooItem from './FooItem.vue'
import { debounce } from 'lodash'
</script>

<template>
  <Bar />
</template>
"#,
        )?;
        test.write_file("packages/elements/src/components/foo/FooItem.vue", "<template />\n")?;
        test.write_file(
            "packages/elements/src/components/bar/Bar.vue",
            r#"<script setup lang="ts">
import { Button } from '@repo/shadcn-vue/components/ui/button'
</script>
"#,
        )?;
        test.write_file(
            "packages/elements/src/components/index.ts",
            "export * from './foo'\n",
        )?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn build_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("build");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    /// Parse a document of the default output store.
    pub fn read_output(&self, path: &str) -> Result<Value> {
        let content = self.read_file(&format!("{}/{}", OUTPUT_DIR, path))?;
        serde_json::from_str(&content).context("Output should be valid JSON")
    }

    pub fn output_exists(&self, path: &str) -> bool {
        self.project_dir.join(OUTPUT_DIR).join(path).exists()
    }
}
