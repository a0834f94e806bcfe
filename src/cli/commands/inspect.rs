use std::collections::BTreeSet;

use anyhow::Result;

use super::helper::open;
use super::{
    CommandResult, CommandSummary, KeyRow, KeysSummary, LanguagesSummary, ShowSummary,
    StatsSummary,
};
use crate::cli::args::{KeysCommand, LanguagesCommand, ShowCommand, StatsCommand};
use crate::core::{CatalogError, derive_entry_state};

pub fn stats(cmd: StatsCommand) -> Result<CommandResult> {
    let ctx = open(&cmd.catalog)?;
    let catalog = ctx.catalog()?;

    let languages = match &cmd.lang {
        Some(lang) => {
            if !catalog.has_language(lang) {
                return Err(CatalogError::LanguageNotFound(lang.clone()).into());
            }
            vec![(lang.clone(), catalog.statistics(lang))]
        }
        None => catalog.all_statistics(),
    };

    Ok(CommandResult::new(CommandSummary::Stats(StatsSummary {
        source_language: catalog.source_language.clone(),
        languages,
    })))
}

pub fn languages(cmd: LanguagesCommand) -> Result<CommandResult> {
    let ctx = open(&cmd.catalog)?;
    let catalog = ctx.catalog()?;

    Ok(CommandResult::new(CommandSummary::Languages(
        LanguagesSummary {
            source_language: catalog.source_language.clone(),
            languages: catalog.all_languages(),
        },
    )))
}

pub fn keys(cmd: KeysCommand) -> Result<CommandResult> {
    let ctx = open(&cmd.catalog)?;
    let catalog = ctx.catalog()?;

    let missing: Option<BTreeSet<&str>> = match (&cmd.lang, cmd.missing) {
        (Some(lang), true) => Some(catalog.missing_translations(lang).into_iter().collect()),
        _ => None,
    };

    let rows = catalog
        .entries
        .iter()
        .filter(|(key, _)| missing.as_ref().is_none_or(|m| m.contains(key.as_str())))
        .map(|(key, entry)| KeyRow {
            key: key.clone(),
            state: cmd
                .lang
                .as_deref()
                .map(|lang| derive_entry_state(catalog, key, lang)),
            locked: !entry.is_translatable(),
        })
        .collect();

    Ok(CommandResult::new(CommandSummary::Keys(KeysSummary { rows })))
}

pub fn show(cmd: ShowCommand) -> Result<CommandResult> {
    let ctx = open(&cmd.catalog)?;
    let catalog = ctx.catalog()?;

    let entry = catalog
        .get_entry(&cmd.key)
        .ok_or_else(|| CatalogError::KeyNotFound(cmd.key.clone()))?;

    Ok(CommandResult::new(CommandSummary::Show(ShowSummary {
        key: cmd.key.clone(),
        entry: entry.clone(),
        source_language: catalog.source_language.clone(),
    })))
}
