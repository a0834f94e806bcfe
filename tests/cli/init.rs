use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["recordHistory"], true);
    assert_eq!(parsed["copyState"], "needs_review");
    assert_eq!(parsed["overwriteOnCopy"], false);
    assert!(
        parsed.get("historyFile").is_none(),
        "Default config should not pin a history file"
    );

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "\u{2713} Created .xcstoolrc.json\n");
    assert!(test.root().join(".xcstoolrc.json").exists());

    let content = test.read_file(".xcstoolrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".xcstoolrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".xcstoolrc.json already exists"));
    assert_eq!(test.read_file(".xcstoolrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
    Ok(())
}
