//! Persistence collaborators for the work tab store.
//!
//! The store calls [`TabPersistence::load`] once when a collaborator is
//! attached and [`TabPersistence::save`] after every change. Both sides speak
//! the same snapshot document: `{"workTabs": [ ... ]}`.

use super::entry::WorkTabEntry;
use crate::error::{PersistError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Serialized form of the store's state.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub work_tabs: Vec<WorkTabEntry>,
}

impl PersistedState {
    pub fn to_json(tabs: &[WorkTabEntry]) -> Result<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Borrowed<'a> {
            work_tabs: &'a [WorkTabEntry],
        }
        serde_json::to_string_pretty(&Borrowed { work_tabs: tabs }).map_err(PersistError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(PersistError::Malformed)
    }
}

/// Where the store's state goes between sessions.
pub trait TabPersistence {
    /// Previously saved tabs, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<Vec<WorkTabEntry>>>;

    fn save(&self, tabs: &[WorkTabEntry]) -> Result<()>;
}

/// Snapshot kept in a JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TabPersistence for JsonFilePersistence {
    fn load(&self) -> Result<Option<Vec<WorkTabEntry>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path).map_err(|source| PersistError::Read {
            path: self.path.clone(),
            source,
        })?;
        let state = PersistedState::from_json(&json)?;
        Ok(Some(state.work_tabs))
    }

    fn save(&self, tabs: &[WorkTabEntry]) -> Result<()> {
        let write_err = |source| PersistError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = PersistedState::to_json(tabs)?;

        // Write to a sibling tmp file, then rename over the real one so a
        // crash never leaves a half-written snapshot.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json).map_err(write_err)?;
        fs::rename(&tmp_path, &self.path).map_err(write_err)?;
        Ok(())
    }
}

/// In-process snapshot. Clones share the same slot, so a caller can keep one
/// handle and give the other to a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with raw snapshot text, valid or not.
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(json.into()))),
        }
    }

    pub fn with_tabs(tabs: &[WorkTabEntry]) -> Result<Self> {
        Ok(Self::with_raw(PersistedState::to_json(tabs)?))
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Decoded copy of the last saved tabs.
    pub fn snapshot(&self) -> Option<Vec<WorkTabEntry>> {
        self.load().ok().flatten()
    }
}

impl TabPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<Vec<WorkTabEntry>>> {
        match self.slot.borrow().as_deref() {
            Some(json) => Ok(Some(PersistedState::from_json(json)?.work_tabs)),
            None => Ok(None),
        }
    }

    fn save(&self, tabs: &[WorkTabEntry]) -> Result<()> {
        let json = PersistedState::to_json(tabs)?;
        *self.slot.borrow_mut() = Some(json);
        Ok(())
    }
}
