//! Catalog engine.
//!
//! ## Module Structure
//!
//! - `model`: Document model and read-only navigation
//! - `state`: Derived translation state
//! - `mutation`: Invariant-preserving editing operations
//! - `heuristics`: Format specifiers and plural skeletons
//! - `stats`: Per-language statistics and diagnostics
//! - `session`: Load/save and the editing session
//! - `error`: Error types

pub mod error;
pub mod heuristics;
pub mod model;
pub mod mutation;
pub mod session;
pub mod state;
pub mod stats;

pub use error::{CatalogError, ErrorKind};
pub use model::{
    Catalog, DeviceKind, Entry, Localization, PluralForm, StringUnit, UnitState, Variant,
    VariantKind, Variations,
};
pub use mutation::{AppliedTranslation, CopyOptions, TranslationTarget};
pub use session::{Session, encode_catalog, read_catalog, write_catalog};
pub use state::{TranslationState, derive_entry_state, derive_state, determine_new_state};
pub use stats::{Diagnostic, Severity, Statistics};
