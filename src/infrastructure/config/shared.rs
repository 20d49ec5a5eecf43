use std::path::Path;
use std::sync::OnceLock;

use super::store::ConfigStore;
use crate::domain::errors::ConfigError;
use crate::domain::models::ConfigValue;

/// Load-once configuration slot handed to the rest of the program.
///
/// Reads before [`SharedConfig::load`] succeeds return
/// [`ConfigError::NotLoaded`], which the embedding program treats as fatal.
#[derive(Debug, Default)]
pub struct SharedConfig {
    store: OnceLock<ConfigStore>,
}

impl SharedConfig {
    /// An empty, not yet loaded slot.
    pub const fn new() -> Self {
        Self {
            store: OnceLock::new(),
        }
    }

    /// A slot already holding `store`.
    pub fn with_store(store: ConfigStore) -> Self {
        Self {
            store: OnceLock::from(store),
        }
    }

    /// Load `path` into the slot. A slot can only be loaded once.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<&ConfigStore, ConfigError> {
        if self.is_loaded() {
            return Err(ConfigError::AlreadyLoaded);
        }
        let store = ConfigStore::load(path)?;
        self.store
            .set(store)
            .map_err(|_| ConfigError::AlreadyLoaded)?;
        self.store()
    }

    pub fn is_loaded(&self) -> bool {
        self.store.get().is_some()
    }

    /// The loaded store.
    pub fn store(&self) -> Result<&ConfigStore, ConfigError> {
        self.store.get().ok_or(ConfigError::NotLoaded)
    }

    /// Shorthand for `store()?.get(key)`.
    pub fn get(&self, key: &str) -> Result<Option<&ConfigValue>, ConfigError> {
        Ok(self.store()?.get(key))
    }
}
