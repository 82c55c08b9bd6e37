//! Local JSON catalog snapshot.
//!
//! The file holds either a top-level array of product records or an object
//! with a `products` array. It is read once when the catalog is opened.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CatalogError;
use crate::record::CatalogRecord;
use crate::source::{CatalogQuery, CatalogSource};

/// Catalog loaded from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotCatalog {
    path: PathBuf,
    records: Vec<CatalogRecord>,
}

impl SnapshotCatalog {
    /// Reads and parses the snapshot at `path`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::SnapshotIo`] if the file cannot be read.
    /// - [`CatalogError::Deserialize`] if it is not valid JSON.
    /// - [`CatalogError::SnapshotShape`] if it is neither an array nor an
    ///   object with a `products` array.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path).map_err(|source| CatalogError::SnapshotIo {
            path: path.clone(),
            source,
        })?;
        let records = parse_snapshot(&path, &contents)?;
        tracing::info!(path = %path.display(), count = records.len(), "catalog snapshot loaded");
        Ok(Self { path, records })
    }

    /// Writes `records` to `path` as a pretty-printed JSON array, creating
    /// parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::SnapshotIo`] on any filesystem failure.
    pub fn write(path: impl AsRef<Path>, records: &[CatalogRecord]) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let io_err = |source| CatalogError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(records).map_err(|e| CatalogError::Deserialize {
            context: format!("snapshot {}", path.display()),
            source: e,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }
}

#[async_trait]
impl CatalogSource for SnapshotCatalog {
    async fn load(&self, _query: &CatalogQuery) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(self.records.clone())
    }

    fn kind(&self) -> &'static str {
        "snapshot"
    }
}

fn parse_snapshot(path: &Path, contents: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
    let value: Value = serde_json::from_str(contents).map_err(|e| CatalogError::Deserialize {
        context: format!("snapshot {}", path.display()),
        source: e,
    })?;

    let shape_err = |reason: &str| CatalogError::SnapshotShape {
        path: path.to_path_buf(),
        reason: reason.to_owned(),
    };
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("products") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(shape_err("`products` is not an array")),
            None => return Err(shape_err("object has no `products` key")),
        },
        _ => return Err(shape_err("expected an array or an object with `products`")),
    };
    Ok(items.into_iter().map(CatalogRecord::new).collect())
}
