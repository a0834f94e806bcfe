//! Loading, saving and the editing session.
//!
//! A [`Session`] owns the catalog being edited and the file it came from.
//! It is passed explicitly to whatever drives the edits; there is no global
//! state.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{
    Value,
    ser::{Formatter, PrettyFormatter, Serializer},
};
use tracing::{debug, info, warn};

use super::error::{CatalogError, Result};
use super::model::Catalog;
use crate::history::RecentFiles;

/// Read and decode a catalog file.
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CatalogError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode a catalog the way Xcode lays out `.xcstrings` files: keys sorted
/// at every level, two-space indentation, `" : "` between keys and values,
/// trailing newline.
pub fn encode_catalog(catalog: &Catalog) -> Result<String> {
    let value = serde_json::to_value(catalog).map_err(CatalogError::Encode)?;
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, XcodeFormatter::default());
    sort_keys(value)
        .serialize(&mut serializer)
        .map_err(CatalogError::Encode)?;
    buf.push(b'\n');
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Unknown fields are flattened after the known ones; reorder everything.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(String, Value)> = map.into_iter().collect();
            fields.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Encode and overwrite `path`, creating parent directories as needed.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let io_err = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, encode_catalog(catalog)?).map_err(io_err)
}

#[derive(Default)]
struct XcodeFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl Formatter for XcodeFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" : ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}

/// The catalog currently being edited.
#[derive(Debug, Default)]
pub struct Session {
    path: Option<PathBuf>,
    catalog: Option<Catalog>,
    history: Option<RecentFiles>,
    modified: bool,
}

impl Session {
    /// A session that records opened files in `history`, if given.
    pub fn new(history: Option<RecentFiles>) -> Self {
        Self {
            history,
            ..Default::default()
        }
    }

    /// Load `path` and make it the active catalog.
    ///
    /// On failure the previously loaded catalog, if any, stays active.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<&mut Catalog> {
        let path = path.as_ref();
        let catalog = read_catalog(path)?;
        info!(
            path = %path.display(),
            keys = catalog.entries.len(),
            "Opened catalog"
        );

        if let Some(history) = &self.history
            && let Err(e) = history.record(path)
        {
            warn!("Failed to update file history: {:#}", e);
        }

        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(self.catalog.insert(catalog))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn catalog(&self) -> Result<&Catalog> {
        self.catalog.as_ref().ok_or(CatalogError::NoCatalogLoaded)
    }

    /// Mutable access for editing. Marks the session modified.
    pub fn catalog_mut(&mut self) -> Result<&mut Catalog> {
        let catalog = self.catalog.as_mut().ok_or(CatalogError::NoCatalogLoaded)?;
        self.modified = true;
        Ok(catalog)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Write the active catalog back to the file it was opened from.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(CatalogError::NoCatalogLoaded)?;
        self.save_as(path)
    }

    /// Write the active catalog to `path`, which becomes the session's file.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        write_catalog(&path, self.catalog()?)?;
        debug!(path = %path.display(), "Saved catalog");
        self.path = Some(path);
        self.modified = false;
        Ok(())
    }

    /// Drop the active catalog, saving it first if `save` is set.
    ///
    /// If saving fails the catalog stays loaded.
    pub fn close(&mut self, save: bool) -> Result<()> {
        if save && self.catalog.is_some() {
            self.save()?;
        }
        self.catalog = None;
        self.path = None;
        self.modified = false;
        Ok(())
    }
}
