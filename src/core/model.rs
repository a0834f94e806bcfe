//! In-memory representation of a String Catalog (`.xcstrings`) document.
//!
//! The catalog is the sole owner of every nested structure. All maps are
//! `BTreeMap`s so that enumeration order is lexicographic by key, which keeps
//! state derivation and file output reproducible.
//!
//! Decoding is lenient where the file format is open-ended: plural forms and
//! device kinds are stored as plain strings, and unrecognised fields on entries
//! and localizations are carried through untouched.

use std::{collections::BTreeMap, fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_CATALOG_VERSION: &str = "1.0";

/// A full localization document for one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub source_language: String,
    #[serde(rename = "strings", default)]
    pub entries: BTreeMap<String, Entry>,
    /// Passed through unmodified, never interpreted.
    pub version: String,
}

/// One translatable string, identified by its key in [`Catalog::entries`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localizations: Option<BTreeMap<String, Localization>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_translate: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-language content of an entry.
///
/// Holds a standard unit or variations. Holding both is tolerated; readers
/// always consult the standard unit first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Localization {
    #[serde(rename = "stringUnit", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<StringUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<Variations>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringUnit {
    pub state: UnitState,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<BTreeMap<String, Variant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<BTreeMap<String, Variant>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(rename = "stringUnit")]
    pub unit: StringUnit,
}

/// Translation progress as stored in the file.
///
/// Only these four values are valid file content. The derived pseudo-states
/// live in [`crate::core::TranslationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    New,
    Translated,
    #[value(name = "needs_review")]
    NeedsReview,
    Stale,
}

impl UnitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitState::New => "new",
            UnitState::Translated => "translated",
            UnitState::NeedsReview => "needs_review",
            UnitState::Stale => "stale",
        }
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which variation map a variant lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Plural,
    Device,
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKind::Plural => write!(f, "plural"),
            VariantKind::Device => write!(f, "device"),
        }
    }
}

/// CLDR plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum PluralForm {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralForm {
    pub const ALL: [PluralForm; 6] = [
        PluralForm::Zero,
        PluralForm::One,
        PluralForm::Two,
        PluralForm::Few,
        PluralForm::Many,
        PluralForm::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PluralForm::Zero => "zero",
            PluralForm::One => "one",
            PluralForm::Two => "two",
            PluralForm::Few => "few",
            PluralForm::Many => "many",
            PluralForm::Other => "other",
        }
    }
}

impl fmt::Display for PluralForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        PluralForm::ALL
            .into_iter()
            .find(|form| form.as_str() == normalized)
            .ok_or_else(|| format!("invalid plural form: {}", s))
    }
}

/// Device kinds a variant can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum DeviceKind {
    Iphone,
    Ipod,
    Ipad,
    Watch,
    Tv,
    Mac,
    Other,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 7] = [
        DeviceKind::Iphone,
        DeviceKind::Ipod,
        DeviceKind::Ipad,
        DeviceKind::Watch,
        DeviceKind::Tv,
        DeviceKind::Mac,
        DeviceKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Iphone => "iphone",
            DeviceKind::Ipod => "ipod",
            DeviceKind::Ipad => "ipad",
            DeviceKind::Watch => "watch",
            DeviceKind::Tv => "tv",
            DeviceKind::Mac => "mac",
            DeviceKind::Other => "other",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        DeviceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("invalid device kind: {}", s))
    }
}

impl StringUnit {
    pub fn new(value: impl Into<String>, state: UnitState) -> Self {
        Self {
            state,
            value: value.into(),
        }
    }
}

impl Variant {
    pub fn new(value: impl Into<String>, state: UnitState) -> Self {
        Self {
            unit: StringUnit::new(value, state),
        }
    }
}

impl Variations {
    pub fn map(&self, kind: VariantKind) -> Option<&BTreeMap<String, Variant>> {
        match kind {
            VariantKind::Plural => self.plural.as_ref(),
            VariantKind::Device => self.device.as_ref(),
        }
    }

    pub fn map_slot(&mut self, kind: VariantKind) -> &mut Option<BTreeMap<String, Variant>> {
        match kind {
            VariantKind::Plural => &mut self.plural,
            VariantKind::Device => &mut self.device,
        }
    }

    /// True when neither map holds a variant.
    pub fn is_empty(&self) -> bool {
        self.plural.as_ref().is_none_or(|m| m.is_empty())
            && self.device.as_ref().is_none_or(|m| m.is_empty())
    }
}

impl Localization {
    /// A localization holding only a standard unit.
    pub fn standard(value: impl Into<String>, state: UnitState) -> Self {
        Self {
            unit: Some(StringUnit::new(value, state)),
            ..Default::default()
        }
    }

    pub fn variant_map(&self, kind: VariantKind) -> Option<&BTreeMap<String, Variant>> {
        self.variations.as_ref().and_then(|v| v.map(kind))
    }

    pub fn variant(&self, kind: VariantKind, form: &str) -> Option<&Variant> {
        self.variant_map(kind).and_then(|m| m.get(form))
    }

    /// Every unit reachable from this localization: standard first, then
    /// plural variants, then device variants, each map in key order.
    pub fn units(&self) -> Vec<&StringUnit> {
        let mut units: Vec<&StringUnit> = self.unit.iter().collect();
        for kind in [VariantKind::Plural, VariantKind::Device] {
            if let Some(map) = self.variant_map(kind) {
                units.extend(map.values().map(|v| &v.unit));
            }
        }
        units
    }

    pub fn units_mut(&mut self) -> Vec<&mut StringUnit> {
        let mut units: Vec<&mut StringUnit> = self.unit.iter_mut().collect();
        if let Some(variations) = self.variations.as_mut() {
            for map in [variations.plural.as_mut(), variations.device.as_mut()]
                .into_iter()
                .flatten()
            {
                units.extend(map.values_mut().map(|v| &mut v.unit));
            }
        }
        units
    }

    /// All values in the same order as [`Localization::units`].
    pub fn values(&self) -> Vec<&str> {
        self.units().into_iter().map(|u| u.value.as_str()).collect()
    }

    /// True when the localization carries no translated content.
    ///
    /// A standard unit with an empty value counts as no content; any
    /// non-empty variation map counts as content.
    pub fn is_empty(&self) -> bool {
        if self.unit.as_ref().is_some_and(|u| !u.value.is_empty()) {
            return false;
        }
        self.variations.as_ref().is_none_or(|v| v.is_empty())
    }
}

impl Entry {
    /// `shouldTranslate == false` marks a "do not translate" entry.
    pub fn is_translatable(&self) -> bool {
        self.should_translate != Some(false)
    }

    pub fn localization(&self, lang: &str) -> Option<&Localization> {
        self.localizations.as_ref().and_then(|l| l.get(lang))
    }
}

impl Catalog {
    pub fn new(source_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            entries: BTreeMap::new(),
            version: DEFAULT_CATALOG_VERSION.to_string(),
        }
    }

    pub fn get_entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn localization(&self, key: &str, lang: &str) -> Option<&Localization> {
        self.get_entry(key).and_then(|e| e.localization(lang))
    }

    /// All keys in ascending order.
    pub fn all_keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Source language plus every language used by any entry, sorted ascending.
    pub fn all_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .entries
            .values()
            .filter_map(|e| e.localizations.as_ref())
            .flat_map(|l| l.keys().cloned())
            .collect();
        languages.push(self.source_language.clone());
        languages.sort();
        languages.dedup();
        languages
    }

    pub fn has_language(&self, lang: &str) -> bool {
        self.source_language == lang
            || self
                .entries
                .values()
                .filter_map(|e| e.localizations.as_ref())
                .any(|l| l.contains_key(lang))
    }

    pub fn is_source_language(&self, lang: &str) -> bool {
        self.source_language == lang
    }
}
