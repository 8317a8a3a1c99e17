use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::warn;

use crate::{state::Registry, store::AuctionStore, utils::errors::StorageError};

/// Registry persisted as one JSON document on local disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = OsString::from(self.path.as_os_str());
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    fn write_atomically(&self, data: &[u8]) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let staging = self.staging_path();
        {
            let mut file = File::create(&staging)?;
            file.write_all(data)?;
            file.sync_all()?;
        }
        fs::rename(&staging, &self.path)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl AuctionStore for FileStore {
    fn load(&self) -> Result<Registry, StorageError> {
        let document = match fs::read_to_string(&self.path) {
            Ok(document) => document,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Registry::default()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if document.trim().is_empty() {
            return Ok(Registry::default());
        }

        let malformed = |source: serde_json::Error| StorageError::Malformed {
            path: self.path.clone(),
            source,
        };
        match serde_json::from_str::<Value>(&document).map_err(malformed)? {
            document @ Value::Object(_) => serde_json::from_value(document).map_err(malformed),
            other => {
                warn!(
                    path = %self.path.display(),
                    kind = json_kind(&other),
                    "registry document is not an object, treating it as empty"
                );
                Ok(Registry::default())
            }
        }
    }

    fn save(&self, registry: &Registry) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(registry).map_err(StorageError::Encode)?;
        self.write_atomically(&data).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
