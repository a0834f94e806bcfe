//! Editing operations on a [`Catalog`].
//!
//! Every operation keeps the document structurally clean: variation maps that
//! become empty are set to absent, and an emptied `variations` object is
//! removed. Operations referencing a missing key fail with
//! [`CatalogError::KeyNotFound`] and leave the catalog untouched.
//!
//! Switching a localization between standard and variation mode is up to the
//! caller: `set_standard_translation` never clears variations and
//! `set_variant_translation` never clears the standard unit.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::error::{CatalogError, Result};
use super::model::{
    Catalog, Entry, Localization, StringUnit, UnitState, Variant, VariantKind,
};
use super::state::determine_new_state;

/// Options for [`Catalog::copy_translations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    /// Replace fields that already exist in the destination language.
    pub overwrite_existing: bool,
    /// State given to every copied value.
    pub new_state: UnitState,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            overwrite_existing: false,
            new_state: UnitState::NeedsReview,
        }
    }
}

/// The part of a localization an edit writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationTarget {
    Standard,
    Variant(VariantKind, String),
}

/// Outcome of [`Catalog::apply_translation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedTranslation {
    /// State written, or `None` when the empty value removed content.
    pub state: Option<UnitState>,
    /// Variants re-marked `needs_review` because they share a value.
    pub duplicates_marked: usize,
}

impl Localization {
    /// Get the variant map of `kind`, creating `variations` and the map if missing.
    pub(crate) fn variant_map_mut(&mut self, kind: VariantKind) -> &mut BTreeMap<String, Variant> {
        self.variations
            .get_or_insert_with(Default::default)
            .map_slot(kind)
            .get_or_insert_with(BTreeMap::new)
    }

    /// Set empty variation maps to absent, then drop `variations` if nothing is left.
    pub(crate) fn normalize_variations(&mut self) {
        let Some(variations) = self.variations.as_mut() else {
            return;
        };
        for kind in [VariantKind::Plural, VariantKind::Device] {
            let slot = variations.map_slot(kind);
            if slot.as_ref().is_some_and(|m| m.is_empty()) {
                *slot = None;
            }
        }
        if variations.plural.is_none() && variations.device.is_none() {
            self.variations = None;
        }
    }

    fn remove_variant(&mut self, kind: VariantKind, form: &str) -> bool {
        let removed = self
            .variations
            .as_mut()
            .and_then(|v| v.map_slot(kind).as_mut())
            .is_some_and(|m| m.remove(form).is_some());
        self.normalize_variations();
        removed
    }
}

impl Catalog {
    pub(crate) fn entry_mut(&mut self, key: &str) -> Result<&mut Entry> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| CatalogError::KeyNotFound(key.to_string()))
    }

    /// Get the localization for `(key, lang)`, creating the localizations map
    /// and an empty localization if missing. Fails only if `key` is unknown.
    pub(crate) fn localization_mut_or_insert(
        &mut self,
        key: &str,
        lang: &str,
    ) -> Result<&mut Localization> {
        let entry = self.entry_mut(key)?;
        Ok(entry
            .localizations
            .get_or_insert_with(BTreeMap::new)
            .entry(lang.to_string())
            .or_default())
    }

    fn existing_localization_mut(
        &mut self,
        key: &str,
        lang: &str,
    ) -> Result<Option<&mut Localization>> {
        let entry = self.entry_mut(key)?;
        Ok(entry.localizations.as_mut().and_then(|l| l.get_mut(lang)))
    }

    /// Overwrite the standard unit of `(key, lang)`.
    pub fn set_standard_translation(
        &mut self,
        key: &str,
        lang: &str,
        value: impl Into<String>,
        state: UnitState,
    ) -> Result<()> {
        let localization = self.localization_mut_or_insert(key, lang)?;
        localization.unit = Some(StringUnit::new(value, state));
        Ok(())
    }

    pub fn clear_standard_translation(&mut self, key: &str, lang: &str) -> Result<()> {
        if let Some(localization) = self.existing_localization_mut(key, lang)? {
            localization.unit = None;
        }
        Ok(())
    }

    /// Set one plural form or device variant.
    ///
    /// An empty `value` removes the variant instead; empty values are never
    /// persisted through this operation.
    pub fn set_variant_translation(
        &mut self,
        key: &str,
        lang: &str,
        kind: VariantKind,
        form: &str,
        value: impl Into<String>,
        state: UnitState,
    ) -> Result<()> {
        let value = value.into();
        if value.is_empty() {
            if let Some(localization) = self.existing_localization_mut(key, lang)? {
                localization.remove_variant(kind, form);
            }
            return Ok(());
        }

        let localization = self.localization_mut_or_insert(key, lang)?;
        localization
            .variant_map_mut(kind)
            .insert(form.to_string(), Variant::new(value, state));
        Ok(())
    }

    /// Remove one variant. Returns whether it existed.
    pub fn remove_variant(
        &mut self,
        key: &str,
        lang: &str,
        kind: VariantKind,
        form: &str,
    ) -> Result<bool> {
        Ok(self
            .existing_localization_mut(key, lang)?
            .is_some_and(|l| l.remove_variant(kind, form)))
    }

    pub fn clear_variations(&mut self, key: &str, lang: &str) -> Result<()> {
        if let Some(localization) = self.existing_localization_mut(key, lang)? {
            localization.variations = None;
        }
        Ok(())
    }

    /// Add an empty localization for `code` to every translatable entry.
    ///
    /// Returns the number of entries touched.
    pub fn add_language(&mut self, code: &str) -> Result<usize> {
        if self.has_language(code) {
            return Err(CatalogError::LanguageExists(code.to_string()));
        }

        let mut added = 0;
        for entry in self.entries.values_mut().filter(|e| e.is_translatable()) {
            let localizations = entry.localizations.get_or_insert_with(BTreeMap::new);
            if !localizations.contains_key(code) {
                localizations.insert(code.to_string(), Localization::default());
                added += 1;
            }
        }

        info!(language = code, entries = added, "Added language");
        Ok(added)
    }

    /// Delete `code` from every entry. The source language is never removable.
    ///
    /// Returns the number of entries touched.
    pub fn remove_language(&mut self, code: &str) -> Result<usize> {
        if self.is_source_language(code) {
            return Err(CatalogError::SourceLanguageRemoval(code.to_string()));
        }
        if !self.has_language(code) {
            return Err(CatalogError::LanguageNotFound(code.to_string()));
        }

        let mut removed = 0;
        for entry in self.entries.values_mut() {
            let Some(localizations) = entry.localizations.as_mut() else {
                continue;
            };
            if localizations.remove(code).is_some() {
                removed += 1;
            }
            if localizations.is_empty() {
                entry.localizations = None;
            }
        }

        info!(language = code, entries = removed, "Removed language");
        Ok(removed)
    }

    /// Create a new entry seeded with `key` as its source-language value and
    /// an empty localization for every other known language.
    pub fn add_key(&mut self, key: &str, comment: Option<String>) -> Result<()> {
        if self.entries.contains_key(key) {
            return Err(CatalogError::KeyExists(key.to_string()));
        }

        let mut localizations: BTreeMap<String, Localization> = self
            .all_languages()
            .into_iter()
            .filter(|lang| !self.is_source_language(lang))
            .map(|lang| (lang, Localization::default()))
            .collect();
        localizations.insert(
            self.source_language.clone(),
            Localization::standard(key, UnitState::New),
        );

        self.entries.insert(
            key.to_string(),
            Entry {
                comment,
                localizations: Some(localizations),
                ..Default::default()
            },
        );
        debug!(key, "Added key");
        Ok(())
    }

    pub fn remove_key(&mut self, key: &str) -> Result<Entry> {
        let entry = self
            .entries
            .remove(key)
            .ok_or_else(|| CatalogError::KeyNotFound(key.to_string()))?;
        debug!(key, "Removed key");
        Ok(entry)
    }

    /// Copy standard units and variants from `from` into `to` for every
    /// translatable entry.
    ///
    /// Each field is copied independently and only when overwriting is
    /// enabled or the destination field is absent. Copied values always get
    /// `options.new_state`. Returns the number of fields copied.
    pub fn copy_translations(&mut self, from: &str, to: &str, options: CopyOptions) -> usize {
        let CopyOptions {
            overwrite_existing,
            new_state,
        } = options;
        let mut total = 0;

        for entry in self.entries.values_mut().filter(|e| e.is_translatable()) {
            let Some(localizations) = entry.localizations.as_mut() else {
                continue;
            };
            let Some(source) = localizations.get(from).cloned() else {
                continue;
            };
            let mut target = localizations.get(to).cloned().unwrap_or_default();
            let mut copied = 0;

            if let Some(unit) = &source.unit
                && (overwrite_existing || target.unit.is_none())
            {
                target.unit = Some(StringUnit::new(unit.value.clone(), new_state));
                copied += 1;
            }

            for kind in [VariantKind::Plural, VariantKind::Device] {
                let Some(source_map) = source.variant_map(kind) else {
                    continue;
                };
                for (form, variant) in source_map {
                    if overwrite_existing || target.variant(kind, form).is_none() {
                        target.variant_map_mut(kind).insert(
                            form.clone(),
                            Variant::new(variant.unit.value.clone(), new_state),
                        );
                        copied += 1;
                    }
                }
            }

            if copied > 0 {
                localizations.insert(to.to_string(), target);
                total += copied;
            }
        }

        info!(from, to, copied = total, "Copied translations");
        total
    }

    /// Restore the structural invariants of one localization.
    ///
    /// Drops `variations` when both maps are absent or empty, then removes
    /// the localization itself if it carries no content. The source-language
    /// localization stays while any other language is present.
    pub fn clean_empty_structures(&mut self, key: &str, lang: &str) -> Result<()> {
        let is_source = self.is_source_language(lang);
        let entry = self.entry_mut(key)?;
        let Some(localizations) = entry.localizations.as_mut() else {
            return Ok(());
        };

        let keep_source = is_source && localizations.len() > 1;
        if let Some(localization) = localizations.get_mut(lang) {
            if localization.variations.as_ref().is_some_and(|v| v.is_empty()) {
                localization.variations = None;
            }
            if localization.is_empty() && !keep_source {
                localizations.remove(lang);
            }
        }

        if localizations.is_empty() {
            entry.localizations = None;
        }
        Ok(())
    }

    /// Mark an entry "do not translate", discarding its localizations.
    pub fn lock(&mut self, key: &str) -> Result<()> {
        let entry = self.entry_mut(key)?;
        entry.should_translate = Some(false);
        entry.localizations = None;
        Ok(())
    }

    /// Make a locked entry translatable again. Localizations are not restored.
    pub fn unlock(&mut self, key: &str) -> Result<()> {
        let entry = self.entry_mut(key)?;
        entry.should_translate = None;
        Ok(())
    }

    /// Set a value the way an editor does.
    ///
    /// Writing the standard value drops variations; writing a variant drops
    /// the standard value. Without an explicit `state` one is derived with
    /// [`determine_new_state`]. An empty value removes only the targeted
    /// content and leaves the other mode alone.
    /// Structures left empty are cleaned up and variants sharing a value are
    /// flagged for review.
    pub fn apply_translation(
        &mut self,
        key: &str,
        lang: &str,
        target: &TranslationTarget,
        value: &str,
        state: Option<UnitState>,
    ) -> Result<AppliedTranslation> {
        self.entry_mut(key)?;
        let state = state.unwrap_or_else(|| {
            determine_new_state(self, key, lang, value)
                .to_persisted()
                .unwrap_or(UnitState::Translated)
        });

        match target {
            TranslationTarget::Standard if value.is_empty() => {
                self.clear_standard_translation(key, lang)?;
            }
            TranslationTarget::Standard => {
                self.clear_variations(key, lang)?;
                self.set_standard_translation(key, lang, value, state)?;
            }
            TranslationTarget::Variant(kind, form) if value.is_empty() => {
                self.remove_variant(key, lang, *kind, form)?;
            }
            TranslationTarget::Variant(kind, form) => {
                self.clear_standard_translation(key, lang)?;
                self.set_variant_translation(key, lang, *kind, form, value, state)?;
            }
        }
        self.clean_empty_structures(key, lang)?;

        let duplicates_marked = match target {
            TranslationTarget::Standard => 0,
            TranslationTarget::Variant(..) => self.mark_duplicate_variants(key, lang)?,
        };
        debug!(key, language = lang, ?target, "Applied translation");

        Ok(AppliedTranslation {
            state: (!value.is_empty()).then_some(state),
            duplicates_marked,
        })
    }

    /// Stamp `state` on every unit of `(key, lang)`. Returns the number of units updated.
    pub fn mark_state(&mut self, key: &str, lang: &str, state: UnitState) -> Result<usize> {
        let localization = self
            .existing_localization_mut(key, lang)?
            .ok_or_else(|| CatalogError::LanguageNotFound(lang.to_string()))?;

        let mut units = localization.units_mut();
        for unit in units.iter_mut() {
            unit.state = state;
        }
        Ok(units.len())
    }
}
