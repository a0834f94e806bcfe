//! Error types for catalog operations.

use std::path::PathBuf;

use thiserror::Error;

/// Broad category of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file is malformed or does not match the catalog schema.
    Decode,
    /// An operation referenced a key, language or catalog that does not exist.
    NotFound,
    /// An operation would violate a catalog invariant.
    InvalidArgument,
    /// Reading or writing the catalog failed.
    Io,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to decode catalog {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode catalog: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Key not found: \"{0}\"")]
    KeyNotFound(String),

    #[error("Language not found in catalog: {0}")]
    LanguageNotFound(String),

    #[error("No catalog is loaded")]
    NoCatalogLoaded,

    #[error("The source language '{0}' cannot be removed")]
    SourceLanguageRemoval(String),

    #[error("Language '{0}' already exists in the catalog")]
    LanguageExists(String),

    #[error("Key already exists: \"{0}\"")]
    KeyExists(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Decode { .. } => ErrorKind::Decode,
            CatalogError::Encode(_) | CatalogError::Io { .. } => ErrorKind::Io,
            CatalogError::KeyNotFound(_)
            | CatalogError::LanguageNotFound(_)
            | CatalogError::NoCatalogLoaded => ErrorKind::NotFound,
            CatalogError::SourceLanguageRemoval(_)
            | CatalogError::LanguageExists(_)
            | CatalogError::KeyExists(_) => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
