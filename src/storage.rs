//! Versioned JSON document store
//!
//! One file per document under the data directory, each wrapped in a
//! `{schema_version, data}` envelope. Reads run the migration chain up to
//! the current version; a version newer than this build is a typed error
//! rather than a silent parse failure. Writes go through a temp file and
//! rename so a crash never leaves a half-written document.
//!
//! The orders document is always rewritten whole, mirroring the
//! single-key order list this store descends from. Last write wins.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;

pub const DOC_USERS: &str = "users";
pub const DOC_ORDERS: &str = "orders";
pub const DOC_CUSTOM_REQUESTS: &str = "custom_requests";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("document {document} is corrupt: {source}")]
    Corrupt {
        document: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("document {document} has schema version {found}, newer than supported {supported}")]
    VersionTooNew { document: String, found: u32, supported: u32 },
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    schema_version: u32,
    data: Value,
}

#[derive(Clone, Debug)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Opens the store, creating the data directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, document: &str) -> PathBuf {
        self.root.join(format!("{document}.json"))
    }

    /// Loads a document, migrating old envelopes forward. A missing file is
    /// `Ok(None)`, not an error: an empty store is the normal first-run state.
    pub fn load<T: DeserializeOwned>(&self, document: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(document);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let envelope: Envelope = serde_json::from_str(&raw).map_err(|source| {
            StorageError::Corrupt { document: document.to_string(), source }
        })?;
        if envelope.schema_version > SCHEMA_VERSION {
            return Err(StorageError::VersionTooNew {
                document: document.to_string(),
                found: envelope.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        let data = migrate(envelope.schema_version, envelope.data);
        let value = serde_json::from_value(data).map_err(|source| {
            StorageError::Corrupt { document: document.to_string(), source }
        })?;
        Ok(Some(value))
    }

    /// Rewrites the document atomically under the current schema version.
    pub fn save<T: Serialize>(&self, document: &str, value: &T) -> Result<(), StorageError> {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            data: serde_json::to_value(value).map_err(|source| StorageError::Corrupt {
                document: document.to_string(),
                source,
            })?,
        };
        let body = serde_json::to_vec_pretty(&envelope).map_err(|source| {
            StorageError::Corrupt { document: document.to_string(), source }
        })?;
        let path = self.path_for(document);
        let tmp = self.root.join(format!("{document}.json.tmp"));
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn remove(&self, document: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(document)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Migration chain. Version 1 is current; earlier versions would be stepped
/// forward here one version at a time.
fn migrate(from: u32, data: Value) -> Value {
    let _ = from;
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn temp_store() -> JsonStore {
        let dir = std::env::temp_dir().join(format!("fb-store-{}", Uuid::new_v4()));
        JsonStore::open(dir).unwrap()
    }

    #[test]
    fn test_missing_document_is_none() {
        let store = temp_store();
        let loaded: Option<Vec<String>> = store.load(DOC_ORDERS).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_round_trip() {
        let store = temp_store();
        let mut users = HashMap::new();
        users.insert("session-1".to_string(), "alice".to_string());
        store.save(DOC_USERS, &users).unwrap();
        let loaded: HashMap<String, String> = store.load(DOC_USERS).unwrap().unwrap();
        assert_eq!(loaded, users);
    }

    #[test]
    fn test_newer_schema_version_is_rejected() {
        let store = temp_store();
        let raw = serde_json::json!({ "schema_version": 99, "data": [] });
        std::fs::write(
            store.path_for(DOC_ORDERS),
            serde_json::to_vec(&raw).unwrap(),
        )
        .unwrap();
        let err = store.load::<Vec<String>>(DOC_ORDERS).unwrap_err();
        assert!(matches!(err, StorageError::VersionTooNew { found: 99, .. }));
    }

    #[test]
    fn test_corrupt_document_is_typed_error() {
        let store = temp_store();
        std::fs::write(store.path_for(DOC_USERS), b"not json").unwrap();
        let err = store.load::<Vec<String>>(DOC_USERS).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = temp_store();
        store.save(DOC_USERS, &vec!["u".to_string()]).unwrap();
        store.remove(DOC_USERS).unwrap();
        store.remove(DOC_USERS).unwrap();
        let loaded: Option<Vec<String>> = store.load(DOC_USERS).unwrap();
        assert!(loaded.is_none());
    }
}
