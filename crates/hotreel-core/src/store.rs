//! Binding Store - JSON persistence of the binding set
//!
//! The whole set lives in one flat JSON object on disk. Every save
//! replaces the document; there is no merge or versioning.

use crate::{types::BindingSet, Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed store for the binding set
#[derive(Debug, Clone)]
pub struct BindingStore {
    path: PathBuf,
}

impl BindingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the JSON document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the binding set. A missing file yields an empty set.
    pub fn load(&self) -> Result<BindingSet> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No bindings file, starting empty");
                return Ok(BindingSet::new());
            }
            Err(source) => {
                return Err(Error::StoreRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let bindings: BindingSet =
            serde_json::from_str(&contents).map_err(|source| Error::StoreParse {
                path: self.path.clone(),
                source,
            })?;

        info!(path = %self.path.display(), count = bindings.len(), "Bindings loaded");
        Ok(bindings)
    }

    /// Overwrite the document with the full binding set.
    ///
    /// Writes to a sibling temp file and renames it over the target, so a
    /// reader never observes a partially written document.
    pub fn save(&self, bindings: &BindingSet) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }

        let json = serde_json::to_vec_pretty(bindings).map_err(Error::StoreSerialize)?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, &json).map_err(|source| self.write_error(source))?;

        if let Err(source) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.write_error(source));
        }

        debug!(path = %self.path.display(), count = bindings.len(), "Bindings saved");
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> Error {
        Error::StoreWrite {
            path: self.path.clone(),
            source,
        }
    }
}
