use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CATALOG, CliTest, stdout};

#[test]
fn test_check_reports_missing_and_specifier_errors() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;

    assert_cmd_snapshot!(test.command().arg("check").arg(CATALOG), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: missing translation for 'fr'  missing-translation
      --> Localizable.xcstrings "Save"

    error: format specifiers differ in 'fr': expected [%@], found []  specifier-mismatch
      --> Localizable.xcstrings "Hello %@"

    ✘ 2 problems (1 error, 1 warning)

    ----- stderr -----
    "#);
    Ok(())
}

#[test]
fn test_check_warnings_only_succeeds() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    test.run_on_catalog("set", &["Hello %@", "fr", "Bonjour %@"])?;

    let output = test.run_on_catalog("check", &[])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("1 problems (0 errors, 1 warning)"));
    Ok(())
}

#[test]
fn test_check_clean_catalog() -> Result<()> {
    let test = CliTest::with_sample_catalog()?;
    let output = test.run_on_catalog("check", &["--lang", "en"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Checked 0 languages - no issues found\n");
    Ok(())
}
