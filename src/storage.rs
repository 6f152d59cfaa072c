//! # Client Storage
//!
//! Named slots, each holding one JSON document. The browser equivalent is `localStorage`.
//!
//! - [`FileStorage`]: one `<slot>.json` file per slot in a data directory
//! - [`MemoryStorage`]: process-local, gone on exit
use std::{
    cell::RefCell,
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage io error: {0}")]
    Io(#[from] io::Error),

    #[error("Storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait Storage {
    /// `None` when the slot was never written.
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError>;

    fn save(&self, slot: &str, value: &str) -> Result<(), StorageError>;
}

pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<platform data dir>/recipes`, falling back to the working directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recipes")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(slot)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.path(slot);
        debug!("Writing slot {slot} to {}", path.display());

        fs::write(path, value)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(slot).cloned())
    }

    fn save(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        (**self).load(slot)
    }

    fn save(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(slot, value)
    }
}
