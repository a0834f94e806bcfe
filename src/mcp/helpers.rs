//! Helper functions for MCP server operations.

use std::path::Path;

use clap::ValueEnum;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::config::{Config, load_config};
use crate::core::{
    Catalog, CatalogError, ErrorKind, TranslationState, UnitState, read_catalog, write_catalog,
};

const TRANSLATION_STATES: [TranslationState; 6] = [
    TranslationState::New,
    TranslationState::Translated,
    TranslationState::NeedsReview,
    TranslationState::Stale,
    TranslationState::NotTranslated,
    TranslationState::Source,
];

/// Serialize a tool result as pretty JSON text content.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

/// Requests the catalog refuses become parameter errors; everything else is internal.
pub fn catalog_error(err: CatalogError) -> McpError {
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::InvalidArgument => {
            McpError::invalid_params(err.to_string(), None)
        }
        ErrorKind::Decode | ErrorKind::Io => McpError::internal_error(err.to_string(), None),
    }
}

/// Load a catalog without recording it in the recent-files list.
pub fn open_catalog(path: &str) -> Result<Catalog, McpError> {
    read_catalog(Path::new(path)).map_err(catalog_error)
}

pub fn save_catalog(path: &str, catalog: &Catalog) -> Result<(), McpError> {
    write_catalog(Path::new(path), catalog).map_err(catalog_error)
}

/// The config that applies to the directory containing `catalog_path`.
pub fn catalog_config(catalog_path: &str) -> Result<Config, McpError> {
    let path = std::path::absolute(catalog_path)
        .map_err(|e| McpError::invalid_params(format!("Invalid catalog path: {}", e), None))?;
    let dir = path.parent().unwrap_or(&path);
    load_config(dir)
        .map(|result| result.config)
        .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))
}

pub fn parse_unit_state(value: &str) -> Result<UnitState, McpError> {
    <UnitState as ValueEnum>::from_str(value.trim(), true).map_err(|_| {
        McpError::invalid_params(
            format!(
                "Invalid state '{}': expected new, translated, needs_review or stale",
                value
            ),
            None,
        )
    })
}

pub fn parse_translation_state(value: &str) -> Result<TranslationState, McpError> {
    let normalized = value.trim().to_lowercase();
    TRANSLATION_STATES
        .into_iter()
        .find(|state| state.as_str() == normalized)
        .ok_or_else(|| McpError::invalid_params(format!("Invalid state '{}'", value), None))
}
