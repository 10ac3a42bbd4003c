use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::CliTest;

#[test]
fn test_build_sibling_components() -> Result<()> {
    let test = CliTest::with_components()?;

    let output = test.build_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Built 2 items"), "stdout: {}", stdout);

    let foo = test.read_output("components/foo.json")?;
    assert_eq!(foo["name"], "foo");
    assert_eq!(foo["type"], "registry:component");
    assert_eq!(foo["dependencies"], json!(["lodash"]));
    assert_eq!(foo["devDependencies"], json!(["@types/lodash"]));
    assert_eq!(
        foo["registryDependencies"],
        json!(["http://localhost:3001/bar.json"])
    );
    assert_eq!(foo["files"].as_array().map(Vec::len), Some(2));

    let bar = test.read_output("components/bar.json")?;
    assert_eq!(bar["registryDependencies"], json!(["button"]));
    assert!(
        bar["files"][0]["content"]
            .as_str()
            .is_some_and(|c| c.contains("'@/components/ui/button'"))
    );

    Ok(())
}

#[test]
fn test_build_index_and_bundle() -> Result<()> {
    let test = CliTest::with_components()?;
    test.build_command().output()?;

    let index = test.read_output("registry.json")?;
    assert_eq!(index["name"], "self");
    assert_eq!(index["homepage"], "https://example.com");
    let names: Vec<&str> = index["items"]
        .as_array()
        .map(|items| items.iter().filter_map(|i| i["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["bar", "foo"]);

    let all = test.read_output("all.json")?;
    assert_eq!(all["name"], "all");
    assert_eq!(all["title"], "All Elements");
    assert_eq!(all["files"].as_array().map(Vec::len), Some(3));
    assert_eq!(all["dependencies"], json!(["lodash"]));
    assert_eq!(all["registryDependencies"], json!([]));

    Ok(())
}

#[test]
fn test_build_drops_untargeted_files() -> Result<()> {
    let test = CliTest::with_components()?;
    test.write_file(".vregrc.json", r#"{ "inferTargets": false }"#)?;
    test.write_file("packages/elements/src/files/env.ts", "export const env = {}\n")?;

    let output = test.build_command().output()?;
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("files/env.ts"), "stderr: {}", stderr);
    assert!(stderr.contains("missing-target"), "stderr: {}", stderr);

    assert!(!test.output_exists("files/env.json"));
    assert!(test.output_exists("registry.json"));
    assert!(test.output_exists("all.json"));

    Ok(())
}

#[test]
fn test_build_strict_fails_on_issues() -> Result<()> {
    let test = CliTest::with_components()?;
    test.write_file(".vregrc.json", r#"{ "inferTargets": false }"#)?;
    test.write_file("packages/elements/src/files/env.ts", "export const env = {}\n")?;

    let output = test.build_command().arg("--strict").output()?;
    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_build_meta_targets() -> Result<()> {
    let test = CliTest::with_components()?;
    test.write_file(".vregrc.json", r#"{ "inferTargets": false }"#)?;
    test.write_file("packages/elements/src/files/env.ts", "export const env = {}\n")?;
    test.write_file(
        "packages/elements/meta.json",
        r#"{ "targets": { "files/env.ts": "config/env.ts" } }"#,
    )?;

    let output = test.build_command().arg("--strict").output()?;
    assert!(output.status.success());

    let env = test.read_output("files/env.json")?;
    assert_eq!(env["files"][0]["target"], "config/env.ts");
    assert_eq!(env["type"], "registry:file");

    Ok(())
}

#[test]
fn test_build_env_overrides() -> Result<()> {
    let test = CliTest::with_components()?;

    let output = test
        .build_command()
        .env("BASE_URL", "https://registry.example.dev/")
        .env("REGISTRY_TITLE", "Example Elements")
        .args(["--base-name", "acme"])
        .output()?;
    assert!(output.status.success());

    let foo = test.read_output("components/foo.json")?;
    assert_eq!(
        foo["registryDependencies"],
        json!(["https://registry.example.dev/bar.json"])
    );
    assert_eq!(foo["files"][0]["path"], "components/acme/foo/Foo.vue");

    let index = test.read_output("registry.json")?;
    assert_eq!(index["name"], "acme");
    assert_eq!(test.read_output("all.json")?["title"], "Example Elements");

    Ok(())
}

#[test]
fn test_build_output_override() -> Result<()> {
    let test = CliTest::with_components()?;

    let output = test.build_command().args(["--output", "dist/r"]).output()?;
    assert!(output.status.success());
    assert!(test.root().join("dist/r/components/foo.json").exists());
    assert!(!test.output_exists("registry.json"));

    Ok(())
}

#[test]
fn test_build_rejects_invalid_config() -> Result<()> {
    let test = CliTest::with_components()?;
    test.write_file(".vregrc.json", r#"{ "baseName": "a/b" }"#)?;

    let output = test.build_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("baseName"));

    Ok(())
}

#[test]
fn test_build_empty_project() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.build_command().output()?;
    assert!(output.status.success());
    assert!(test.output_exists("registry.json"));
    assert!(!test.output_exists("all.json"));

    Ok(())
}

#[test]
fn test_build_refuses_output_at_project_root() -> Result<()> {
    let test = CliTest::with_components()?;

    let output = test.build_command().args(["--output", "."]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("outputDir"));
    assert!(
        test.root()
            .join("packages/elements/src/components/foo/Foo.vue")
            .exists()
    );

    Ok(())
}
