use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("field(s) must be non-zero: {}", .0.join(", "))]
    ZeroParameters(Vec<&'static str>),
    #[error("auction_id is required")]
    MissingAuctionId,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read registry document {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write registry document {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("malformed registry document {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode registry: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("registry store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("auction {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("registry task failed: {0}")]
    Task(String),
}

impl RegistryError {
    /// Logs the cause at a level matching its severity; the HTTP layer only
    /// ever sees the sentinel.
    pub fn report(&self, route: &'static str) {
        match self {
            RegistryError::NotFound(auction_id) => {
                tracing::debug!(route, auction_id = %auction_id, "auction not found")
            }
            RegistryError::Validation(err) => {
                tracing::info!(route, error = %err, "rejected request")
            }
            RegistryError::Storage(_) | RegistryError::Task(_) => {
                tracing::error!(route, error = %self, "request failed")
            }
        }
    }
}
