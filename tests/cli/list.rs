use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_list_items() -> Result<()> {
    let test = CliTest::with_components()?;
    test.build_command().output()?;

    let output = test.command().arg("list").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(names, vec!["bar", "foo"]);
    assert!(stdout.contains("registry:component"));

    Ok(())
}

#[test]
fn test_list_filtered_by_type() -> Result<()> {
    let test = CliTest::with_components()?;
    test.build_command().output()?;

    let output = test.command().args(["list", "--type", "hook"]).output()?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No items found"));

    Ok(())
}

#[test]
fn test_list_without_store() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("list").output()?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No items found"));

    Ok(())
}
