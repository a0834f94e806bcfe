use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary directory holding one `.xcstrings` catalog.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl McpTestFixture {
    pub const CATALOG: &'static str = "Localizable.xcstrings";

    /// Create an empty directory, with a `.git` marker to stop config lookup
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().canonicalize()?;
        fs::create_dir(root.join(".git"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Create a fixture holding `catalog` as its catalog file
    pub fn with_catalog(catalog: &Value) -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write_catalog(catalog)?;
        Ok(fixture)
    }

    pub fn write_catalog(&self, content: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(self.catalog_file(), format!("{}\n", json_str))
            .with_context(|| format!("Failed to write catalog: {}", self.catalog_file().display()))
    }

    pub fn read_catalog(&self) -> Result<Value> {
        let content = fs::read_to_string(self.catalog_file())
            .with_context(|| format!("Failed to read catalog: {}", self.catalog_file().display()))?;
        serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse JSON from: {}", self.catalog_file().display())
        })
    }

    /// Write a .xcstoolrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.root.join(".xcstoolrc.json");
        fs::write(&path, serde_json::to_string_pretty(content)?)?;
        Ok(())
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.root.join(Self::CATALOG)
    }

    /// The catalog path as a string (for MCP parameters)
    pub fn catalog_path(&self) -> String {
        self.catalog_file().to_string_lossy().to_string()
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// English source, complete German, partial French, one locked key
pub fn fixture_multi_language() -> Result<McpTestFixture> {
    McpTestFixture::with_catalog(&json!({
        "sourceLanguage": "en",
        "strings": {
            "Cancel": {
                "localizations": {
                    "de": { "stringUnit": { "state": "translated", "value": "Abbrechen" } },
                    "fr": { "stringUnit": { "state": "needs_review", "value": "Annuler" } }
                }
            },
            "Done": {
                "localizations": {
                    "de": { "stringUnit": { "state": "translated", "value": "Fertig" } }
                }
            },
            "Internal": { "shouldTranslate": false },
            "Save": {
                "comment": "Toolbar button",
                "localizations": {
                    "de": { "stringUnit": { "state": "stale", "value": "Sichern" } }
                }
            }
        },
        "version": "1.0"
    }))
}

/// A catalog with many keys, for pagination
pub fn fixture_many_keys(count: usize) -> Result<McpTestFixture> {
    let strings: serde_json::Map<String, Value> = (0..count)
        .map(|i| (format!("key_{:03}", i), json!({})))
        .collect();
    McpTestFixture::with_catalog(&json!({
        "sourceLanguage": "en",
        "strings": strings,
        "version": "1.0"
    }))
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert pagination fields in a list result
pub fn assert_pagination(
    result: &Value,
    expected_offset: usize,
    expected_limit: usize,
    expected_has_more: bool,
) {
    let pagination = &result["pagination"];
    assert_eq!(
        pagination["offset"].as_u64().unwrap(),
        expected_offset as u64,
        "Pagination offset mismatch"
    );
    assert_eq!(
        pagination["limit"].as_u64().unwrap(),
        expected_limit as u64,
        "Pagination limit mismatch"
    );
    assert_eq!(
        pagination["hasMore"].as_bool().unwrap(),
        expected_has_more,
        "Pagination hasMore mismatch"
    );
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
