//! Key/value slots the session is persisted in
//!
//! Writes are applied as a batch so that callers holding the session lock
//! observe either all or none of the slots changed.

use anyhow::Context;
use std::{
    collections::BTreeMap,
    fmt::Debug,
    path::{Path, PathBuf},
};
use tracing::warn;

pub trait SlotStorage: Debug + Send {
    fn get(&self, key: &str) -> Option<String>;

    /// Sets every slot listed, replacing previous values
    fn set_all(&mut self, slots: &[(&str, String)]) -> anyhow::Result<()>;

    /// Removing a slot that is not present is not an error
    fn remove_all(&mut self, keys: &[&str]) -> anyhow::Result<()>;
}

/// Lost when the process exits
#[derive(Default, Clone)]
pub struct MemoryStorage {
    slots: BTreeMap<String, String>,
}

/// Slots kept in a JSON file so a session survives restarts
///
/// A missing or unreadable file is treated as empty storage. The in memory copy
/// is always updated even if writing the file fails.
pub struct FileStorage {
    path: PathBuf,
    slots: BTreeMap<String, String>,
}

// Values are secret, only keys are shown
impl Debug for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("keys", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage")
            .field("path", &self.path)
            .field("keys", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SlotStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set_all(&mut self, slots: &[(&str, String)]) -> anyhow::Result<()> {
        for (key, value) in slots {
            self.slots.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> anyhow::Result<()> {
        for key in keys {
            self.slots.remove(*key);
        }
        Ok(())
    }
}

impl FileStorage {
    #[tracing::instrument]
    pub fn open<P: AsRef<Path> + Debug>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let slots = match Self::load(&path) {
            Ok(slots) => slots,
            Err(e) => {
                warn!(?e, "starting with empty session storage");
                BTreeMap::new()
            }
        };
        Self { path, slots }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session file: {path:?}"))?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text)
            .with_context(|| format!("session file is not valid JSON: {path:?}"))
    }

    fn persist(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create folder: {parent:?}"))?;
            }
        }
        let text =
            serde_json::to_string_pretty(&self.slots).context("failed to serialize slots")?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("failed to write session file: {:?}", self.path))
    }
}

impl SlotStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set_all(&mut self, slots: &[(&str, String)]) -> anyhow::Result<()> {
        for (key, value) in slots {
            self.slots.insert(key.to_string(), value.clone());
        }
        self.persist()
    }

    fn remove_all(&mut self, keys: &[&str]) -> anyhow::Result<()> {
        let mut changed = false;
        for key in keys {
            changed |= self.slots.remove(*key).is_some();
        }
        if changed {
            self.persist()
        } else {
            Ok(())
        }
    }
}
