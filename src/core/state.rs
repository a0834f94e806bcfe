//! Derived translation state.
//!
//! The stored state of a localization can be partial, absent, or spread over
//! several variant units, so the effective state is computed on demand.

use std::fmt;

use serde::Serialize;

use super::model::{Catalog, Localization, UnitState};

/// Effective translation progress of a localization.
///
/// Superset of [`UnitState`] with two pseudo-states that are never written to
/// a file: `NotTranslated` (no content) and `Source` (base-language content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationState {
    New,
    Translated,
    NeedsReview,
    Stale,
    NotTranslated,
    Source,
}

impl TranslationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationState::New => "new",
            TranslationState::Translated => "translated",
            TranslationState::NeedsReview => "needs_review",
            TranslationState::Stale => "stale",
            TranslationState::NotTranslated => "not_translated",
            TranslationState::Source => "source",
        }
    }

    /// The state to write when persisting content carrying this state.
    ///
    /// `Source` is written as `translated`, which derives back to `Source` for
    /// the base language. `NotTranslated` has no file representation; callers
    /// omit the unit instead.
    pub fn to_persisted(self) -> Option<UnitState> {
        match self {
            TranslationState::New => Some(UnitState::New),
            TranslationState::Translated | TranslationState::Source => {
                Some(UnitState::Translated)
            }
            TranslationState::NeedsReview => Some(UnitState::NeedsReview),
            TranslationState::Stale => Some(UnitState::Stale),
            TranslationState::NotTranslated => None,
        }
    }
}

impl From<UnitState> for TranslationState {
    fn from(state: UnitState) -> Self {
        match state {
            UnitState::New => TranslationState::New,
            UnitState::Translated => TranslationState::Translated,
            UnitState::NeedsReview => TranslationState::NeedsReview,
            UnitState::Stale => TranslationState::Stale,
        }
    }
}

impl fmt::Display for TranslationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the effective state of a localization.
///
/// Only the first reachable unit is consulted (standard, then plural, then
/// device, maps in key order). A localization with a translated `other` form
/// and a stale `few` form reports whichever sorts first. This sampling is kept
/// as-is for compatibility with files produced by earlier tooling.
pub fn derive_state(localization: &Localization, is_base_language: bool) -> TranslationState {
    let Some(first) = localization.units().into_iter().next() else {
        return if is_base_language {
            TranslationState::Source
        } else {
            TranslationState::NotTranslated
        };
    };

    if first.state == UnitState::Translated && is_base_language {
        TranslationState::Source
    } else {
        first.state.into()
    }
}

/// Derive the state of `key` in `lang`, treating an absent localization as empty.
pub fn derive_entry_state(catalog: &Catalog, key: &str, lang: &str) -> TranslationState {
    let is_base = catalog.is_source_language(lang);
    match catalog.localization(key, lang) {
        Some(localization) => derive_state(localization, is_base),
        None => derive_state(&Localization::default(), is_base),
    }
}

/// Pick the state a freshly edited value should receive.
///
/// Source-language edits are `Source`. A value identical to any value already
/// present for the same key in another language is likely an untranslated
/// passthrough and is flagged `NeedsReview`.
pub fn determine_new_state(
    catalog: &Catalog,
    key: &str,
    lang: &str,
    candidate_value: &str,
) -> TranslationState {
    if catalog.is_source_language(lang) {
        return TranslationState::Source;
    }

    let Some(localizations) = catalog
        .get_entry(key)
        .and_then(|e| e.localizations.as_ref())
    else {
        return TranslationState::Translated;
    };

    let duplicated = localizations
        .iter()
        .filter(|(other, _)| other.as_str() != lang)
        .any(|(_, loc)| loc.values().contains(&candidate_value));

    if duplicated {
        TranslationState::NeedsReview
    } else {
        TranslationState::Translated
    }
}
