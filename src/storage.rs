// Key-value storage port and its implementations

use eyre::{Context, Result, eyre};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// String slots addressed by key
pub trait Storage {
    /// Read a slot. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the whole value of a slot
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage with one slot already filled
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self { slots }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed storage, one `<key>.json` file per slot
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Open or create storage in the given directory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)
            .with_context(|| format!("Failed to create storage directory: {}", base_path.display()))?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File holding the slot for `key`
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        Self::validate_key(key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }

    /// Check that `key` can name a slot file
    pub fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(eyre!("Storage key cannot be empty"));
        }
        if key.len() > 64 {
            return Err(eyre!("Storage key too long: {} (max 64 chars)", key));
        }
        if !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            return Err(eyre!("Invalid storage key: {} (must be alphanumeric with _/-)", key));
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        if !path.exists() {
            debug!(?path, "slot file does not exist");
            return Ok(None);
        }

        let data = fs::read_to_string(&path).with_context(|| format!("Failed to read slot file: {}", path.display()))?;
        Ok(Some(data))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Failed to open slot file: {}", path.display()))?;

        // Truncate only once we hold the lock
        file.lock_exclusive().context("Failed to acquire file lock")?;
        file.set_len(0)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;

        debug!(?path, bytes = value.len(), "slot written");

        // Lock is automatically released when file is dropped
        Ok(())
    }
}
