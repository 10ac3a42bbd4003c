use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::CliTest;

fn get(test: &CliTest, args: &[&str]) -> Result<(Option<i32>, String)> {
    let output = test.command().arg("get").args(args).output()?;
    Ok((
        output.status.code(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
    ))
}

#[test]
fn test_get_item() -> Result<()> {
    let test = CliTest::with_components()?;
    test.build_command().output()?;

    let (code, stdout) = get(&test, &["foo"])?;
    assert_eq!(code, Some(0));

    let doc: Value = serde_json::from_str(&stdout)?;
    assert_eq!(doc["name"], "foo");
    assert_eq!(
        doc["registryDependencies"],
        json!(["http://localhost:3001/bar.json"])
    );

    Ok(())
}

#[test]
fn test_get_lib_document() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("packages/elements/src/lib/utils.ts", "export const cn = () => ''\n")?;
    test.build_command().output()?;

    let (code, stdout) = get(&test, &["utils.json"])?;
    assert_eq!(code, Some(0));
    insta::assert_snapshot!(stdout.trim_end(), @r#"
    {
      "$schema": "https://shadcn-vue.com/schema/registry-item.json",
      "name": "utils",
      "type": "registry:lib",
      "title": "Utils",
      "description": "Utils utility library.",
      "files": [
        {
          "path": "lib/utils.ts",
          "content": "export const cn = () => ''\n",
          "type": "registry:lib"
        }
      ],
      "dependencies": [],
      "devDependencies": [],
      "registryDependencies": []
    }
    "#);

    Ok(())
}

#[test]
fn test_get_resolves_against_registry_url() -> Result<()> {
    let test = CliTest::with_components()?;
    test.write_file(
        "packages/registry/server/assets/registry/hooks/useX.json",
        r#"{ "name": "useX", "registryDependencies": ["button", "useY", "/z.json"] }"#,
    )?;

    let (code, stdout) = get(&test, &["useX", "--registry-url", "https://r.example.dev"])?;
    assert_eq!(code, Some(0));

    let doc: Value = serde_json::from_str(&stdout)?;
    assert_eq!(
        doc["registryDependencies"],
        json!([
            "button",
            "https://r.example.dev/useY.json",
            "https://r.example.dev/z.json"
        ])
    );

    Ok(())
}

#[test]
fn test_get_index_and_bundle() -> Result<()> {
    let test = CliTest::with_components()?;
    test.build_command().output()?;

    let (code, stdout) = get(&test, &["registry"])?;
    assert_eq!(code, Some(0));
    let index: Value = serde_json::from_str(&stdout)?;
    assert_eq!(index["items"].as_array().map(Vec::len), Some(2));

    let (code, stdout) = get(&test, &["all.json"])?;
    assert_eq!(code, Some(0));
    let all: Value = serde_json::from_str(&stdout)?;
    assert_eq!(all["name"], "all");

    Ok(())
}

#[test]
fn test_get_missing_item() -> Result<()> {
    let test = CliTest::with_components()?;
    test.build_command().output()?;

    let output = test.command().args(["get", "nope"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Item \"nope\" not found"));

    Ok(())
}
