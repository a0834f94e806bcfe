//! Translation progress statistics and catalog diagnostics.
//!
//! Everything here is read-only and recomputed from the document on each call.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::heuristics::extract_format_specifiers;
use super::model::{Catalog, Entry, Localization, PluralForm, VariantKind};
use super::state::{TranslationState, derive_state};

/// Per-language completion counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub translated: usize,
    pub needs_review: usize,
    pub stale: usize,
    pub missing: usize,
}

impl Statistics {
    /// Translated share in whole percent. An empty language is complete.
    pub fn percent_translated(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.translated * 100 / self.total
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

/// A problem found in one localization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A translatable entry has no content for the language.
    Missing { key: String, language: String },
    /// A translated value does not use the same format specifiers as its source.
    #[serde(rename_all = "camelCase")]
    SpecifierMismatch {
        key: String,
        language: String,
        /// `plural:one`, `device:mac`, or `None` for the standard unit.
        variant: Option<String>,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::Missing { .. } => Severity::Warning,
            Diagnostic::SpecifierMismatch { .. } => Severity::Error,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Diagnostic::Missing { key, .. } | Diagnostic::SpecifierMismatch { key, .. } => key,
        }
    }

    pub fn language(&self) -> &str {
        match self {
            Diagnostic::Missing { language, .. }
            | Diagnostic::SpecifierMismatch { language, .. } => language,
        }
    }

    pub fn rule(&self) -> &'static str {
        match self {
            Diagnostic::Missing { .. } => "missing-translation",
            Diagnostic::SpecifierMismatch { .. } => "specifier-mismatch",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Missing { language, .. } => {
                write!(f, "missing translation for '{}'", language)
            }
            Diagnostic::SpecifierMismatch {
                language,
                variant,
                expected,
                found,
                ..
            } => {
                write!(f, "format specifiers differ in '{}'", language)?;
                if let Some(variant) = variant {
                    write!(f, " ({})", variant)?;
                }
                write!(
                    f,
                    ": expected [{}], found [{}]",
                    expected.join(", "),
                    found.join(", ")
                )
            }
        }
    }
}

fn specifier_set(text: &str) -> BTreeSet<String> {
    extract_format_specifiers(text).into_iter().collect()
}

impl Catalog {
    /// Completion counts for `lang` over translatable entries.
    ///
    /// Every counted entry is translated for the source language. Elsewhere,
    /// absent or empty localizations are missing, `new` counts as translated,
    /// and any other derived state not tracked separately counts as missing.
    pub fn statistics(&self, lang: &str) -> Statistics {
        let mut stats = Statistics::default();
        let is_base = self.is_source_language(lang);

        for entry in self.entries.values().filter(|e| e.is_translatable()) {
            stats.total += 1;

            if is_base {
                stats.translated += 1;
                continue;
            }

            let Some(localization) = entry.localization(lang) else {
                stats.missing += 1;
                continue;
            };
            if localization.is_empty() || localization.units().is_empty() {
                stats.missing += 1;
                continue;
            }

            match derive_state(localization, false) {
                TranslationState::Translated | TranslationState::New => stats.translated += 1,
                TranslationState::NeedsReview => stats.needs_review += 1,
                TranslationState::Stale => stats.stale += 1,
                TranslationState::NotTranslated | TranslationState::Source => stats.missing += 1,
            }
        }

        stats
    }

    /// Statistics for every language, in [`Catalog::all_languages`] order.
    pub fn all_statistics(&self) -> Vec<(String, Statistics)> {
        self.all_languages()
            .into_iter()
            .map(|lang| {
                let stats = self.statistics(&lang);
                (lang, stats)
            })
            .collect()
    }

    /// Translatable keys whose localization for `lang` is absent or empty.
    pub fn missing_translations(&self, lang: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.is_translatable())
            .filter(|(_, e)| e.localization(lang).is_none_or(Localization::is_empty))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Diagnostics for one language, or for every non-source language.
    pub fn diagnostics(&self, lang: Option<&str>) -> Vec<Diagnostic> {
        let languages: Vec<String> = match lang {
            Some(lang) => vec![lang.to_string()],
            None => self
                .all_languages()
                .into_iter()
                .filter(|l| !self.is_source_language(l))
                .collect(),
        };

        let mut diagnostics = Vec::new();
        for language in &languages {
            if self.is_source_language(language) {
                continue;
            }
            for key in self.missing_translations(language) {
                diagnostics.push(Diagnostic::Missing {
                    key: key.to_string(),
                    language: language.clone(),
                });
            }
            for (key, entry) in self.entries.iter().filter(|(_, e)| e.is_translatable()) {
                self.check_specifiers(key, entry, language, &mut diagnostics);
            }
        }

        diagnostics.sort();
        diagnostics
    }

    fn check_specifiers(
        &self,
        key: &str,
        entry: &Entry,
        language: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(target) = entry.localization(language) else {
            return;
        };
        let source = entry.localization(&self.source_language);
        let source_standard = source
            .and_then(|s| s.unit.as_ref())
            .map(|u| u.value.as_str())
            .unwrap_or(key);

        let mut push_if_mismatch = |variant: Option<String>,
                                    reference: &str,
                                    value: &str,
                                    may_omit: bool| {
            if value.is_empty() {
                return;
            }
            let expected = specifier_set(reference);
            let found = specifier_set(value);
            let matches = if may_omit {
                found.is_subset(&expected)
            } else {
                found == expected
            };
            if !matches {
                diagnostics.push(Diagnostic::SpecifierMismatch {
                    key: key.to_string(),
                    language: language.to_string(),
                    variant,
                    expected: expected.into_iter().collect(),
                    found: found.into_iter().collect(),
                });
            }
        };

        if let Some(unit) = &target.unit {
            push_if_mismatch(None, source_standard, &unit.value, false);
        }

        for kind in [VariantKind::Plural, VariantKind::Device] {
            let Some(map) = target.variant_map(kind) else {
                continue;
            };
            for (form, variant) in map {
                let reference = source
                    .and_then(|s| s.variant(kind, form))
                    .map(|v| v.unit.value.as_str())
                    .unwrap_or(source_standard);
                // Singular-like plural forms often spell out the number instead
                let may_omit =
                    kind == VariantKind::Plural && form != PluralForm::Other.as_str();
                push_if_mismatch(
                    Some(format!("{}:{}", kind, form)),
                    reference,
                    &variant.unit.value,
                    may_omit,
                );
            }
        }
    }
}
