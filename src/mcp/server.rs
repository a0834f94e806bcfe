use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tracing::info;

use crate::core::{
    CopyOptions, DeviceKind, PluralForm, TranslationTarget, VariantKind, derive_entry_state,
};

use super::helpers::{
    catalog_config, catalog_error, json_result, open_catalog, parse_translation_state,
    parse_unit_state, save_catalog,
};
use super::types::{
    AddLanguageParams, AddLanguageResult, CopyTranslationsParams, CopyTranslationsResult,
    GetStatisticsParams, KeyItem, KeysResult, LanguageStatistics, LanguagesResult,
    ListKeysParams, ListLanguagesParams, Pagination, SetTranslationParams, SetTranslationResult,
    StatisticsResult,
};

#[derive(Clone)]
pub struct XcsMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for XcsMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl XcsMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Translation progress per language
    #[tool(
        description = "Get translation progress of a .xcstrings catalog: total, translated, needs_review, stale and missing counts per language. Use this first to understand the overall state."
    )]
    pub async fn get_statistics(
        &self,
        params: Parameters<GetStatisticsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let catalog = open_catalog(&params.catalog_path)?;

        let languages: Vec<LanguageStatistics> = match &params.language {
            Some(lang) => {
                if !catalog.has_language(lang) {
                    return Err(McpError::invalid_params(
                        format!("Language not found in catalog: {}", lang),
                        None,
                    ));
                }
                vec![LanguageStatistics::new(
                    lang.clone(),
                    catalog.is_source_language(lang),
                    catalog.statistics(lang),
                )]
            }
            None => catalog
                .all_statistics()
                .into_iter()
                .map(|(lang, stats)| {
                    let is_source = catalog.is_source_language(&lang);
                    LanguageStatistics::new(lang, is_source, stats)
                })
                .collect(),
        };

        json_result(&StatisticsResult {
            source_language: catalog.source_language.clone(),
            total_keys: catalog.entries.len(),
            languages,
        })
    }

    /// Languages present in the catalog
    #[tool(
        description = "List the languages of a .xcstrings catalog, sorted by code, and name its source language."
    )]
    pub async fn list_languages(
        &self,
        params: Parameters<ListLanguagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let catalog = open_catalog(&params.0.catalog_path)?;

        json_result(&LanguagesResult {
            source_language: catalog.source_language.clone(),
            languages: catalog.all_languages(),
        })
    }

    /// Keys with optional per-language state
    #[tool(
        description = "List keys of a .xcstrings catalog (paginated). With `language`, each key carries its translation state there, and `state` filters by it (e.g. not_translated, needs_review)."
    )]
    pub async fn list_keys(
        &self,
        params: Parameters<ListKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let limit = params.limit.map(|v| v as usize).unwrap_or(20).min(100);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let state_filter = match (&params.state, &params.language) {
            (Some(state), Some(_)) => Some(parse_translation_state(state)?),
            (Some(_), None) => {
                return Err(McpError::invalid_params(
                    "`state` requires `language`",
                    None,
                ));
            }
            (None, _) => None,
        };

        let catalog = open_catalog(&params.catalog_path)?;
        let lang = params.language.as_deref();

        let all_items: Vec<KeyItem> = catalog
            .entries
            .iter()
            .filter_map(|(key, entry)| {
                let state = lang.map(|lang| derive_entry_state(&catalog, key, lang));
                if let Some(filter) = state_filter
                    && state != Some(filter)
                {
                    return None;
                }
                Some(KeyItem {
                    key: key.clone(),
                    comment: entry.comment.clone(),
                    should_translate: entry.is_translatable(),
                    state: state.map(|s| s.as_str().to_string()),
                })
            })
            .collect();

        let total_count = all_items.len();
        let items: Vec<KeyItem> = all_items.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + items.len() < total_count;

        json_result(&KeysResult {
            total_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Set a standard value, plural form or device variant
    #[tool(
        description = "Set a translation in a .xcstrings catalog and save it. Give `pluralForm` or `device` to set a variant instead of the standard value; the other mode is cleared. Without `state`, values identical to another language are stored as needs_review, others as translated. An empty value removes the translation."
    )]
    pub async fn set_translation(
        &self,
        params: Parameters<SetTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let target = match (&params.plural_form, &params.device) {
            (Some(_), Some(_)) => {
                return Err(McpError::invalid_params(
                    "Give either `pluralForm` or `device`, not both",
                    None,
                ));
            }
            (Some(form), None) => {
                let form: PluralForm = form
                    .parse()
                    .map_err(|e: String| McpError::invalid_params(e, None))?;
                TranslationTarget::Variant(VariantKind::Plural, form.to_string())
            }
            (None, Some(device)) => {
                let device: DeviceKind = device
                    .parse()
                    .map_err(|e: String| McpError::invalid_params(e, None))?;
                TranslationTarget::Variant(VariantKind::Device, device.to_string())
            }
            (None, None) => TranslationTarget::Standard,
        };
        let state = params.state.as_deref().map(parse_unit_state).transpose()?;

        let mut catalog = open_catalog(&params.catalog_path)?;
        let applied = catalog
            .apply_translation(&params.key, &params.language, &target, &params.value, state)
            .map_err(catalog_error)?;
        save_catalog(&params.catalog_path, &catalog)?;

        info!(key = %params.key, language = %params.language, "Set translation via MCP");

        json_result(&SetTranslationResult {
            key: params.key,
            language: params.language,
            variant: match target {
                TranslationTarget::Standard => None,
                TranslationTarget::Variant(kind, form) => Some(format!("{}:{}", kind, form)),
            },
            state: applied.state.map(|s| s.as_str().to_string()),
            duplicates_marked: applied.duplicates_marked,
        })
    }

    /// Copy translations between languages
    #[tool(
        description = "Copy every translation of one language into another in a .xcstrings catalog and save it. Existing values are kept unless `overwrite` is set; copied values get `state` (default needs_review)."
    )]
    pub async fn copy_translations(
        &self,
        params: Parameters<CopyTranslationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let config = catalog_config(&params.catalog_path)?;
        let options = CopyOptions {
            overwrite_existing: params.overwrite.unwrap_or(config.overwrite_on_copy),
            new_state: match params.state.as_deref() {
                Some(state) => parse_unit_state(state)?,
                None => config.copy_state,
            },
        };

        let mut catalog = open_catalog(&params.catalog_path)?;
        if !catalog.has_language(&params.from) {
            return Err(McpError::invalid_params(
                format!("Language not found in catalog: {}", params.from),
                None,
            ));
        }

        let copied = catalog.copy_translations(&params.from, &params.to, options);
        if copied > 0 {
            save_catalog(&params.catalog_path, &catalog)?;
        }

        json_result(&CopyTranslationsResult {
            from: params.from,
            to: params.to,
            copied,
            state: options.new_state.as_str().to_string(),
        })
    }

    /// Add a language to every translatable key
    #[tool(
        description = "Add a language to a .xcstrings catalog and save it. Every translatable key gets an empty localization for it."
    )]
    pub async fn add_language(
        &self,
        params: Parameters<AddLanguageParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let mut catalog = open_catalog(&params.catalog_path)?;
        let keys_updated = catalog
            .add_language(&params.language)
            .map_err(catalog_error)?;
        save_catalog(&params.catalog_path, &catalog)?;

        json_result(&AddLanguageResult {
            language: params.language,
            keys_updated,
        })
    }
}

#[tool_handler]
impl ServerHandler for XcsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "xcstool MCP helps AI agents translate Xcode string catalogs (.xcstrings).\n\n\
                 Available tools:\n\
                 1. get_statistics - Translation progress per language\n\
                 2. list_languages - Languages in the catalog\n\
                 3. list_keys - Keys with their state in a language (paginated)\n\
                 4. set_translation - Set a value, plural form or device variant\n\
                 5. copy_translations - Copy one language into another\n\
                 6. add_language - Add a language to every translatable key\n\n\
                 Recommended Workflow:\n\
                 1. Use get_statistics to see which languages are incomplete\n\
                 2. Use list_keys with language and state=not_translated to find work\n\
                 3. Use set_translation for each value; keep format specifiers like %@ and %d\n\
                 4. Check get_statistics again to confirm progress"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = XcsMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
