use anyhow::Result;

use super::helper::{display_path, open};
use super::{CheckSummary, CommandResult, CommandSummary};
use crate::cli::args::CheckCommand;
use crate::core::CatalogError;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = open(&cmd.catalog)?;
    let catalog = ctx.catalog()?;

    if let Some(lang) = &cmd.lang
        && !catalog.has_language(lang)
    {
        return Err(CatalogError::LanguageNotFound(lang.clone()).into());
    }

    let languages_checked = match &cmd.lang {
        Some(lang) => usize::from(!catalog.is_source_language(lang)),
        None => catalog
            .all_languages()
            .iter()
            .filter(|l| !catalog.is_source_language(l))
            .count(),
    };
    let diagnostics = catalog.diagnostics(cmd.lang.as_deref());

    Ok(CommandResult::new(CommandSummary::Check(CheckSummary {
        catalog: display_path(&ctx.path),
        languages_checked,
        diagnostics,
    })))
}
