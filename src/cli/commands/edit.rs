//! Commands that modify the catalog.
//!
//! Each command opens the catalog, applies one editing operation and saves
//! the file unless nothing changed or `--dry-run` was given.

use anyhow::Result;

use super::CommandResult;
use super::helper::{finish_edit, open};
use crate::cli::args::{
    AddKeyCommand, ClearCommand, CopyCommand, KeyCommand, LanguageCommand, LocalizationCommand,
    MarkCommand, SetCommand,
};
use crate::core::{Catalog, CatalogError, CopyOptions, Entry, TranslationTarget, VariantKind};

fn snapshot(catalog: &Catalog, key: &str) -> Option<Entry> {
    catalog.get_entry(key).cloned()
}

fn plural_s(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

pub fn add_language(cmd: LanguageCommand) -> Result<CommandResult> {
    let mut ctx = open(&cmd.catalog)?;
    let touched = ctx.catalog_mut()?.add_language(&cmd.code)?;

    let message = format!(
        "Added language '{}' to {} key{}",
        cmd.code,
        touched,
        plural_s(touched)
    );
    finish_edit(ctx, message, true)
}

pub fn remove_language(cmd: LanguageCommand) -> Result<CommandResult> {
    let mut ctx = open(&cmd.catalog)?;
    let touched = ctx.catalog_mut()?.remove_language(&cmd.code)?;

    let message = format!(
        "Removed language '{}' from {} key{}",
        cmd.code,
        touched,
        plural_s(touched)
    );
    finish_edit(ctx, message, true)
}

pub fn add_key(cmd: AddKeyCommand) -> Result<CommandResult> {
    let mut ctx = open(&cmd.catalog)?;
    ctx.catalog_mut()?.add_key(&cmd.key, cmd.comment)?;

    finish_edit(ctx, format!("Added key \"{}\"", cmd.key), true)
}

pub fn remove_key(cmd: KeyCommand) -> Result<CommandResult> {
    let mut ctx = open(&cmd.catalog)?;
    ctx.catalog_mut()?.remove_key(&cmd.key)?;

    finish_edit(ctx, format!("Removed key \"{}\"", cmd.key), true)
}

/// Set a standard value, plural form or device variant.
pub fn set(cmd: SetCommand) -> Result<CommandResult> {
    let SetCommand {
        catalog: catalog_args,
        key,
        lang,
        value,
        plural,
        device,
        state,
    } = cmd;

    let target = match (plural, device) {
        (Some(form), _) => TranslationTarget::Variant(VariantKind::Plural, form.to_string()),
        (None, Some(device)) => TranslationTarget::Variant(VariantKind::Device, device.to_string()),
        (None, None) => TranslationTarget::Standard,
    };

    let mut ctx = open(&catalog_args)?;
    let catalog = ctx.catalog_mut()?;
    let before = snapshot(catalog, &key);

    let applied = catalog.apply_translation(&key, &lang, &target, &value, state)?;

    let what = match &target {
        TranslationTarget::Standard => "value".to_string(),
        TranslationTarget::Variant(kind, form) => format!("{} '{}'", kind, form),
    };
    let mut message = match applied.state {
        Some(state) => format!("Set '{}' {} of \"{}\" ({})", lang, what, key, state),
        None => format!("Cleared '{}' {} of \"{}\"", lang, what, key),
    };
    if applied.duplicates_marked > 0 {
        message.push_str(&format!(
            "; {} duplicate variant{} marked needs_review",
            applied.duplicates_marked,
            plural_s(applied.duplicates_marked)
        ));
    }

    let changed = snapshot(catalog, &key) != before;
    finish_edit(ctx, message, changed)
}

pub fn clear(cmd: ClearCommand) -> Result<CommandResult> {
    let mut ctx = open(&cmd.catalog)?;
    let catalog = ctx.catalog_mut()?;
    let before = snapshot(catalog, &cmd.key);

    if cmd.variations {
        catalog.clear_variations(&cmd.key, &cmd.lang)?;
    } else {
        catalog.clear_standard_translation(&cmd.key, &cmd.lang)?;
    }
    catalog.clean_empty_structures(&cmd.key, &cmd.lang)?;

    let changed = snapshot(catalog, &cmd.key) != before;
    let what = if cmd.variations { "variations" } else { "value" };
    let message = if changed {
        format!("Cleared '{}' {} of \"{}\"", cmd.lang, what, cmd.key)
    } else {
        format!("No '{}' {} to clear for \"{}\"", cmd.lang, what, cmd.key)
    };
    finish_edit(ctx, message, changed)
}

pub fn copy(cmd: CopyCommand) -> Result<CommandResult> {
    let mut ctx = open(&cmd.catalog)?;
    let options = CopyOptions {
        overwrite_existing: cmd.overwrite || ctx.config.overwrite_on_copy,
        new_state: cmd.state.unwrap_or(ctx.config.copy_state),
    };

    let catalog = ctx.catalog_mut()?;
    if !catalog.has_language(&cmd.from) {
        return Err(CatalogError::LanguageNotFound(cmd.from).into());
    }
    let copied = catalog.copy_translations(&cmd.from, &cmd.to, options);

    let message = format!(
        "Copied {} value{} from '{}' to '{}' ({})",
        copied,
        plural_s(copied),
        cmd.from,
        cmd.to,
        options.new_state
    );
    finish_edit(ctx, message, copied > 0)
}

pub fn plurals(cmd: LocalizationCommand) -> Result<CommandResult> {
    let mut ctx = open(&cmd.catalog)?;
    let catalog = ctx.catalog_mut()?;
    let before = snapshot(catalog, &cmd.key);

    let created = catalog.detect_and_create_plural_forms(&cmd.key, &cmd.lang)?;
    let message = if created {
        let forms: Vec<&str> = catalog
            .localization(&cmd.key, &cmd.lang)
            .and_then(|l| l.variant_map(VariantKind::Plural))
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        format!(
            "Plural forms for '{}' of \"{}\": {}",
            cmd.lang,
            cmd.key,
            forms.join(", ")
        )
    } else {
        format!(
            "\"{}\" does not look like a counted quantity; nothing to do",
            cmd.key
        )
    };

    let changed = snapshot(catalog, &cmd.key) != before;
    finish_edit(ctx, message, changed)
}

pub fn mark(cmd: MarkCommand) -> Result<CommandResult> {
    let mut ctx = open(&cmd.catalog)?;
    let catalog = ctx.catalog_mut()?;
    let before = snapshot(catalog, &cmd.key);

    let marked = catalog.mark_state(&cmd.key, &cmd.lang, cmd.state)?;
    let message = format!(
        "Marked {} value{} of \"{}\" in '{}' as {}",
        marked,
        plural_s(marked),
        cmd.key,
        cmd.lang,
        cmd.state
    );

    let changed = snapshot(catalog, &cmd.key) != before;
    finish_edit(ctx, message, changed)
}

pub fn lock(cmd: KeyCommand) -> Result<CommandResult> {
    let mut ctx = open(&cmd.catalog)?;
    let catalog = ctx.catalog_mut()?;
    let before = snapshot(catalog, &cmd.key);

    catalog.lock(&cmd.key)?;

    let changed = snapshot(catalog, &cmd.key) != before;
    finish_edit(ctx, format!("Locked \"{}\"", cmd.key), changed)
}

pub fn unlock(cmd: KeyCommand) -> Result<CommandResult> {
    let mut ctx = open(&cmd.catalog)?;
    let catalog = ctx.catalog_mut()?;
    let before = snapshot(catalog, &cmd.key);

    catalog.unlock(&cmd.key)?;

    let changed = snapshot(catalog, &cmd.key) != before;
    finish_edit(ctx, format!("Unlocked \"{}\"", cmd.key), changed)
}
