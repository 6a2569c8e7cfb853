//! Remembering the current page between sessions.
//!
//! The page is stored as `{ "current_page": n }`. Writes go to a sibling temp
//! file that is then renamed over the target, so a crash mid-write leaves the
//! previous value intact.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use charpage_core::{PageNumber, PageState, Subscription, FIRST_PAGE, MAX_PAGES};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid page state file: {path}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to replace {target_path} with {temp_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedPage {
    current_page: PageNumber,
}

pub struct PagePersistence;

impl PagePersistence {
    /// Last saved page, or `None` if nothing usable was saved.
    ///
    /// A missing file is not an error. Pages outside the navigable range
    /// are discarded with a warning.
    pub fn load(path: &Path) -> Result<Option<PageNumber>, PersistenceError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    operation: "read",
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let saved: SavedPage =
            serde_json::from_str(&text).map_err(|source| PersistenceError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            })?;

        if !(FIRST_PAGE..=MAX_PAGES).contains(&saved.current_page) {
            log::warn!(
                "ignoring saved page {} from {}: outside {FIRST_PAGE}..={MAX_PAGES}",
                saved.current_page,
                path.display()
            );
            return Ok(None);
        }
        Ok(Some(saved.current_page))
    }

    pub fn save(path: &Path, page: PageNumber) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(&SavedPage { current_page: page }).map_err(
            |source| PersistenceError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            },
        )?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|source| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source,
        })?;
        file.write_all(&bytes).map_err(|source| PersistenceError::Io {
            operation: "write",
            path: temp_path.clone(),
            source,
        })?;
        file.sync_all().map_err(|source| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source,
        })?;
        drop(file);

        fs::rename(&temp_path, path).map_err(|source| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source,
        })?;

        log::debug!("saved page {page} to {}", path.display());
        Ok(())
    }

    /// Save `state` to `path` on every change until the subscription drops.
    /// Write failures are logged and do not interrupt navigation.
    pub fn attach(state: &PageState, path: impl Into<PathBuf>) -> Subscription {
        let path = path.into();
        state.subscribe(move |page| {
            if let Err(err) = Self::save(&path, page) {
                log::warn!("could not save page {page}: {err}");
            }
        })
    }
}
