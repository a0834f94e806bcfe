//! Format-specifier detection and plural skeleton generation.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::error::Result;
use super::model::{Catalog, PluralForm, UnitState, Variant, VariantKind};

/// Words that suggest a counted noun when the key also has a `%` placeholder.
const PLURAL_TRIGGER_WORDS: &[&str] = &["items", "songs", "files"];

static FORMAT_SPECIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[\d.]*[diuoxXfFeEgGaAcCsSp@]").unwrap());

/// Integer, unsigned, long and object specifiers; the ones usually paired with plural rules.
static COUNT_SPECIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[\d.]*[@dlu]").unwrap());

pub fn contains_format_specifiers(text: &str) -> bool {
    FORMAT_SPECIFIER_REGEX.is_match(text)
}

pub fn extract_format_specifiers(text: &str) -> Vec<String> {
    FORMAT_SPECIFIER_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Guess whether a key describes a counted quantity.
pub fn looks_plural(key: &str) -> bool {
    if !key.contains('%') {
        return false;
    }
    let lower = key.to_lowercase();
    PLURAL_TRIGGER_WORDS.iter().any(|w| lower.contains(w)) || COUNT_SPECIFIER_REGEX.is_match(key)
}

/// Plural categories a language needs, in CLDR order.
///
/// Matches on the primary subtag, so `pt-BR` and `zh-Hans` resolve like `pt`
/// and `zh`. Unknown languages get `one` and `other`.
pub fn forms_for_language(code: &str) -> Vec<PluralForm> {
    use PluralForm::*;

    let lower = code.to_lowercase();
    let primary = lower.split(['-', '_']).next().unwrap_or_default();
    match primary {
        "en" | "de" | "nl" | "es" | "it" => vec![One, Other],
        "fr" | "ja" | "zh" => vec![Other],
        "ru" | "uk" | "pl" | "cs" => vec![One, Few, Many, Other],
        "ar" => vec![Zero, One, Two, Few, Many, Other],
        _ => vec![One, Other],
    }
}

/// Naive English singular: drop a trailing `s` unless the value ends in `ss`.
fn singularize(value: &str) -> String {
    match value.strip_suffix('s') {
        Some(stripped) if !value.ends_with("ss") => stripped.to_string(),
        _ => value.to_string(),
    }
}

/// Values that occur more than once among the non-empty plural and device values.
pub fn detect_duplicates_across_forms(
    plural_values: &BTreeMap<String, String>,
    device_values: &BTreeMap<String, String>,
) -> BTreeSet<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in plural_values.values().chain(device_values.values()) {
        if !value.is_empty() {
            *counts.entry(value.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(value, _)| value.to_string())
        .collect()
}

impl Catalog {
    /// Turn `(key, lang)` into a plural skeleton when the key looks plural.
    ///
    /// An existing standard unit becomes the `other` form (unless `other` is
    /// already set) and is cleared. Missing required forms are added: `one` as
    /// a `needs_review` singular guess, everything else empty with state `new`.
    ///
    /// Returns `Ok(false)` when the key does not look plural.
    pub fn detect_and_create_plural_forms(&mut self, key: &str, lang: &str) -> Result<bool> {
        self.entry_mut(key)?;
        if !looks_plural(key) {
            return Ok(false);
        }

        let forms = forms_for_language(lang);
        let localization = self.localization_mut_or_insert(key, lang)?;

        if localization
            .variant(VariantKind::Plural, PluralForm::Other.as_str())
            .is_none()
            && let Some(unit) = localization.unit.take()
        {
            localization
                .variant_map_mut(VariantKind::Plural)
                .insert(PluralForm::Other.to_string(), Variant { unit });
        }

        for form in forms {
            if localization.variant(VariantKind::Plural, form.as_str()).is_some() {
                continue;
            }

            let variant = if form == PluralForm::One {
                let other = localization.variant(VariantKind::Plural, PluralForm::Other.as_str());
                let guess = match other {
                    Some(other) => singularize(&other.unit.value),
                    None => key.replace("s ", " "),
                };
                Variant::new(guess, UnitState::NeedsReview)
            } else {
                Variant::new("", UnitState::New)
            };

            localization
                .variant_map_mut(VariantKind::Plural)
                .insert(form.to_string(), variant);
        }

        debug!(key, language = lang, "Created plural forms");
        Ok(true)
    }

    /// Re-mark every variant of `(key, lang)` whose value is shared with
    /// another variant of the same localization as `needs_review`.
    ///
    /// Returns the number of units re-marked.
    pub fn mark_duplicate_variants(&mut self, key: &str, lang: &str) -> Result<usize> {
        let values_of = |kind: VariantKind| -> BTreeMap<String, String> {
            self.localization(key, lang)
                .and_then(|l| l.variant_map(kind))
                .map(|m| {
                    m.iter()
                        .map(|(form, v)| (form.clone(), v.unit.value.clone()))
                        .collect()
                })
                .unwrap_or_default()
        };
        let duplicates = detect_duplicates_across_forms(
            &values_of(VariantKind::Plural),
            &values_of(VariantKind::Device),
        );

        let entry = self.entry_mut(key)?;
        let Some(variations) = entry
            .localizations
            .as_mut()
            .and_then(|l| l.get_mut(lang))
            .and_then(|l| l.variations.as_mut())
        else {
            return Ok(0);
        };

        let mut marked = 0;
        for map in [variations.plural.as_mut(), variations.device.as_mut()]
            .into_iter()
            .flatten()
        {
            for variant in map.values_mut() {
                if duplicates.contains(&variant.unit.value) {
                    variant.unit.state = UnitState::NeedsReview;
                    marked += 1;
                }
            }
        }
        Ok(marked)
    }
}
