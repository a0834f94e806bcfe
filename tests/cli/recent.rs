use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CATALOG, CliTest, stdout};

const HISTORY_FILE: &str = ".xcstring-tool-file-history";

#[test]
fn test_opening_a_catalog_records_it() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    test.run_on_catalog("languages", &[])?;

    let history: Vec<String> = serde_json::from_str(&test.read_file(HISTORY_FILE)?)?;
    let expected = test.root().join(CATALOG);
    assert_eq!(history, vec![expected.to_string_lossy().to_string()]);

    let output = test.command().arg("recent").output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("1. {}\n", expected.display()));
    Ok(())
}

#[test]
fn test_record_history_can_be_disabled() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    test.write_file(".xcstoolrc.json", r#"{ "recordHistory": false }"#)?;
    test.run_on_catalog("languages", &[])?;

    assert!(!test.root().join(HISTORY_FILE).exists());
    Ok(())
}

#[test]
fn test_custom_history_file() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    test.write_file(".xcstoolrc.json", r#"{ "historyFile": "state/history.json" }"#)?;
    test.run_on_catalog("languages", &[])?;

    assert!(test.root().join("state/history.json").exists());
    assert!(!test.root().join(HISTORY_FILE).exists());
    Ok(())
}

#[test]
fn test_prune_and_clear() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    test.write_file("Other.xcstrings", crate::SAMPLE_CATALOG)?;
    test.command()
        .args(["languages", "Other.xcstrings"])
        .output()?;
    test.run_on_catalog("languages", &[])?;
    std::fs::remove_file(test.root().join("Other.xcstrings"))?;

    let output = test.command().arg("recent").output()?;
    assert!(stdout(&output).contains("Other.xcstrings  (missing)"));

    let output = test.command().args(["recent", "--prune"]).output()?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("\u{2713} Pruned 1 missing file\n"));
    assert!(!out.contains("Other.xcstrings"));

    let output = test.command().args(["recent", "--clear"]).output()?;
    assert_eq!(
        stdout(&output),
        "\u{2713} Cleared recent files\nNo recent files\n"
    );
    Ok(())
}

#[test]
fn test_remove_from_recent() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    test.run_on_catalog("languages", &[])?;

    let output = test.command().args(["recent", "--remove", CATALOG]).output()?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Removed Localizable.xcstrings from recent files"));
    assert!(out.ends_with("No recent files\n"));
    Ok(())
}

#[test]
fn test_recent_actions_conflict() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().args(["recent", "--prune", "--clear"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
