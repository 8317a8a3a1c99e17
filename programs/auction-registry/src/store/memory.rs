use std::sync::RwLock;

use crate::{state::Registry, store::AuctionStore, utils::errors::StorageError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    registry: RwLock<Registry>,
}

impl MemoryStore {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: RwLock::new(registry),
        }
    }
}

impl AuctionStore for MemoryStore {
    fn load(&self) -> Result<Registry, StorageError> {
        self.registry
            .read()
            .map(|registry| registry.clone())
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn save(&self, registry: &Registry) -> Result<(), StorageError> {
        let mut stored = self
            .registry
            .write()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))?;
        *stored = registry.clone();
        Ok(())
    }
}
