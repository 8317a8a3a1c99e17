pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use crate::{state::Registry, utils::errors::StorageError};

/// Persistence backend for the registry document. Every call moves the
/// whole registry; implementations keep no per-request state.
pub trait AuctionStore: Send + Sync {
    fn load(&self) -> Result<Registry, StorageError>;

    fn save(&self, registry: &Registry) -> Result<(), StorageError>;
}

impl<S: AuctionStore + ?Sized> AuctionStore for Arc<S> {
    fn load(&self) -> Result<Registry, StorageError> {
        (**self).load()
    }

    fn save(&self, registry: &Registry) -> Result<(), StorageError> {
        (**self).save(registry)
    }
}
