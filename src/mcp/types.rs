use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::Statistics;

// ============================================================
// Statistics Types (get_statistics)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetStatisticsParams {
    /// Path to the .xcstrings catalog
    pub catalog_path: String,
    /// Only report this language
    pub language: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResult {
    pub source_language: String,
    pub total_keys: usize,
    pub languages: Vec<LanguageStatistics>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStatistics {
    pub language: String,
    pub is_source: bool,
    pub total: usize,
    pub translated: usize,
    pub needs_review: usize,
    pub stale: usize,
    pub missing: usize,
    pub percent_translated: usize,
}

impl LanguageStatistics {
    pub fn new(language: String, is_source: bool, stats: Statistics) -> Self {
        Self {
            language,
            is_source,
            total: stats.total,
            translated: stats.translated,
            needs_review: stats.needs_review,
            stale: stats.stale,
            missing: stats.missing,
            percent_translated: stats.percent_translated(),
        }
    }
}

// ============================================================
// Languages Types (list_languages)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListLanguagesParams {
    /// Path to the .xcstrings catalog
    pub catalog_path: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguagesResult {
    pub source_language: String,
    pub languages: Vec<String>,
}

// ============================================================
// Keys Types (list_keys)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListKeysParams {
    /// Path to the .xcstrings catalog
    pub catalog_path: String,
    /// Report each key's state in this language
    pub language: Option<String>,
    /// Only keys in this state (requires `language`): new, translated,
    /// needs_review, stale, not_translated or source
    pub state: Option<String>,
    /// Number of items to skip (default 0)
    pub offset: Option<u32>,
    /// Maximum number of items (default 20, max 100)
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeysResult {
    pub total_count: usize,
    pub items: Vec<KeyItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyItem {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub should_translate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

// ============================================================
// Editing Types (set_translation, copy_translations, add_language)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTranslationParams {
    /// Path to the .xcstrings catalog
    pub catalog_path: String,
    pub key: String,
    pub language: String,
    /// New value; an empty value removes the targeted translation
    pub value: String,
    /// Plural category to set instead of the standard value (zero, one, two, few, many, other)
    pub plural_form: Option<String>,
    /// Device variant to set instead of the standard value
    /// (iphone, ipod, ipad, watch, tv, mac, other)
    pub device: Option<String>,
    /// State to store (new, translated, needs_review, stale); derived from the value if omitted
    pub state: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTranslationResult {
    pub key: String,
    pub language: String,
    /// `plural:one`, `device:mac`, or absent for the standard value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// State written; absent when the value was removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub duplicates_marked: usize,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CopyTranslationsParams {
    /// Path to the .xcstrings catalog
    pub catalog_path: String,
    pub from: String,
    pub to: String,
    /// Replace values that already exist in `to` (default from config, false)
    pub overwrite: Option<bool>,
    /// State given to copied values (default from config, needs_review)
    pub state: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CopyTranslationsResult {
    pub from: String,
    pub to: String,
    pub copied: usize,
    pub state: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddLanguageParams {
    /// Path to the .xcstrings catalog
    pub catalog_path: String,
    /// Language code, e.g. `de` or `pt-BR`
    pub language: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddLanguageResult {
    pub language: String,
    pub keys_updated: usize,
}
