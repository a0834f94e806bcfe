use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CATALOG, CliTest, stderr, stdout};

#[test]
fn test_stats_all_languages() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    let output = test.run_on_catalog("stats", &[])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Language"));

    let en: Vec<&str> = lines[1].split_whitespace().collect();
    assert_eq!(en, vec!["en", "(source)", "4", "4", "0", "0", "0", "100%"]);

    let fr: Vec<&str> = lines[2].split_whitespace().collect();
    assert_eq!(fr, vec!["fr", "4", "2", "1", "0", "1", "50%"]);
    Ok(())
}

#[test]
fn test_stats_unknown_language_is_refused() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    let output = test.run_on_catalog("stats", &["--lang", "de"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Language not found in catalog: de"));
    Ok(())
}

#[test]
fn test_languages() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;

    assert_cmd_snapshot!(test.command().arg("languages").arg(CATALOG), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    en (source)
    fr

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_keys_with_state() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    let output = test.run_on_catalog("keys", &["--lang", "fr"])?;

    assert!(output.status.success());
    let rows: Vec<Vec<String>> = stdout(&output)
        .lines()
        .map(|l| l.split_whitespace().map(String::from).collect())
        .collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], vec!["%d", "items", "translated"]);
    assert_eq!(rows[1], vec!["Cancel", "needs_review"]);
    assert_eq!(rows[3][0], "Internal");
    assert!(rows[3].join(" ").ends_with("(do not translate)"));
    assert_eq!(rows[4], vec!["Save", "not_translated"]);
    Ok(())
}

#[test]
fn test_keys_missing() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    let output = test.run_on_catalog("keys", &["--lang", "fr", "--missing"])?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Save  not_translated\n");
    Ok(())
}

#[test]
fn test_keys_missing_requires_lang() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    let output = test.run_on_catalog("keys", &["--missing"])?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn test_show() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    let output = test.run_on_catalog("show", &["%d items"])?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("\"%d items\"\n"));
    assert!(out.contains("  fr  translated\n"));
    assert!(out.contains("    plural:one \"%d élément\"  translated\n"));
    assert!(out.contains("    plural:other \"%d éléments\"  translated\n"));
    Ok(())
}

#[test]
fn test_show_unknown_key() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    let output = test.run_on_catalog("show", &["Nope"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Key not found: \"Nope\""));
    Ok(())
}

#[test]
fn test_malformed_catalog_is_internal_error() -> Result<()> {
    let test = CliTest::with_file(crate::CATALOG, "{ not json")?;
    let output = test.run_on_catalog("stats", &[])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to decode catalog"));
    Ok(())
}

#[test]
fn test_missing_catalog_file_is_internal_error() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run_on_catalog("stats", &[])?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
