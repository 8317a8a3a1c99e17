use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::Value;
use tracing::warn;

use crate::{
    emit,
    state::{AuctionInfo, RegisterAuctionInfo, Registry},
    store::AuctionStore,
    utils::{
        errors::{RegistryError, StorageError, ValidationError},
        events::{AuctionInfoServed, AuctionListServed, AuctionRegistered},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub auction_id: String,
    pub created_time: i64,
    pub replaced: bool,
}

/// Register / fetch / list over an [`AuctionStore`]. Mutations are
/// serialized behind one writer lock; reads go straight to the store.
pub struct AuctionRegistry {
    store: Box<dyn AuctionStore>,
    writer: Mutex<()>,
}

impl AuctionRegistry {
    pub fn new(store: impl AuctionStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            writer: Mutex::new(()),
        }
    }

    pub fn register(&self, request: &RegisterAuctionInfo) -> Result<Registration, RegistryError> {
        let (auction_id, record) = request.validate(Utc::now().timestamp_millis())?;

        let _writer = self
            .writer
            .lock()
            .map_err(|_| StorageError::Unavailable("registry writer lock poisoned".to_string()))?;

        // A document that cannot be parsed is left on disk untouched.
        let mut registry = match self.store.load() {
            Ok(registry) => registry,
            Err(err @ StorageError::Malformed { .. }) => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "registry document unreadable, starting from an empty registry");
                Registry::default()
            }
        };

        let owner = record.owner.clone();
        let created_time = record.created_time;
        let replaced = registry.insert(auction_id.clone(), record).is_some();
        self.store.save(&registry)?;

        emit!(AuctionRegistered {
            auction_id: &auction_id,
            owner: &owner,
            created_time,
            replaced,
        });

        Ok(Registration {
            auction_id,
            created_time,
            replaced,
        })
    }

    pub fn get(&self, auction_id: &str) -> Result<AuctionInfo, RegistryError> {
        if auction_id.is_empty() {
            return Err(ValidationError::MissingAuctionId.into());
        }

        let info = self
            .store
            .load()?
            .info(auction_id)
            .ok_or_else(|| RegistryError::NotFound(auction_id.to_owned()))?;

        emit!(AuctionInfoServed { auction_id });
        Ok(info)
    }

    pub fn list(&self) -> Result<Vec<Value>, RegistryError> {
        let listings = self.store.load()?.listings();

        emit!(AuctionListServed {
            count: listings.len()
        });
        Ok(listings)
    }
}

/// Runs a registry operation on the blocking pool, since every operation
/// does synchronous file I/O.
pub async fn run_blocking<T, F>(registry: &Arc<AuctionRegistry>, op: F) -> Result<T, RegistryError>
where
    T: Send + 'static,
    F: FnOnce(&AuctionRegistry) -> Result<T, RegistryError> + Send + 'static,
{
    let registry = Arc::clone(registry);
    tokio::task::spawn_blocking(move || op(&registry))
        .await
        .map_err(|err| RegistryError::Task(err.to_string()))?
}
