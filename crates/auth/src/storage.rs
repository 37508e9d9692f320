//! Persistent key-value storage for the session.
//!
//! The session is written as one versioned JSON record under [`SESSION_KEY`].
//! Sessions written by the earlier client used five separate keys
//! ([`legacy`]); those are still read, all-or-nothing.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roles::Role;
use crate::session::Session;

/// Key of the versioned session record.
pub const SESSION_KEY: &str = "meditrack.session";

/// Current version of the session record.
pub const RECORD_VERSION: u32 = 1;

/// Keys used by the earlier five-key layout.
pub mod legacy {
    pub const ACCESS: &str = "access";
    pub const REFRESH: &str = "refresh";
    pub const USERNAME: &str = "username";
    pub const USER_TYPE: &str = "user_type";
    pub const USER_ID: &str = "user_id";

    pub const ALL: [&str; 5] = [ACCESS, REFRESH, USERNAME, USER_TYPE, USER_ID];
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Plain get/set/remove/clear by string key. No expiry, no encryption.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key, not only the session ones.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> T,
    ) -> Result<T, StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with(|m| m.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with(|m| {
            m.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with(|m| {
            m.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.with(|m| m.clear())
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    version: u32,
    username: String,
    role: Role,
    user_id: String,
    access: String,
    refresh: String,
}

impl From<&Session> for SessionRecord {
    fn from(s: &Session) -> Self {
        Self {
            version: RECORD_VERSION,
            username: s.username().to_string(),
            role: s.role().clone(),
            user_id: s.user_id().to_string(),
            access: s.access_token().to_string(),
            refresh: s.refresh_token().to_string(),
        }
    }
}

/// Where a hydrated session was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredLayout {
    Record,
    Legacy,
}

/// Read the persisted session.
///
/// Anything short of a complete, well-formed session yields `Ok(None)`.
pub fn read_session<S: SessionStorage + ?Sized>(
    storage: &S,
) -> Result<Option<(Session, StoredLayout)>, StorageError> {
    if let Some(raw) = storage.get(SESSION_KEY)? {
        return Ok(decode_record(&raw).map(|s| (s, StoredLayout::Record)));
    }

    let mut values = Vec::with_capacity(legacy::ALL.len());
    for key in legacy::ALL {
        match storage.get(key)? {
            Some(v) if !v.is_empty() => values.push(v),
            _ => return Ok(None),
        }
    }

    let [access, refresh, username, user_type, user_id]: [String; 5] = match values.try_into() {
        Ok(v) => v,
        Err(_) => return Ok(None),
    };

    Ok(
        Session::new(username, Role::from(user_type), user_id, access, refresh)
            .ok()
            .map(|s| (s, StoredLayout::Legacy)),
    )
}

/// Persist `session` as a versioned record.
pub fn write_session<S: SessionStorage + ?Sized>(
    storage: &S,
    session: &Session,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(&SessionRecord::from(session))
        .map_err(|e| StorageError::Backend(e.to_string()))?;
    storage.set(SESSION_KEY, &raw)?;
    for key in legacy::ALL {
        storage.remove(key)?;
    }
    Ok(())
}

/// Access token of the persisted session, if a complete one exists.
pub fn read_access_token<S: SessionStorage + ?Sized>(storage: &S) -> Option<String> {
    match read_session(storage) {
        Ok(Some((session, _))) => Some(session.access_token().to_string()),
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read persisted access token");
            None
        }
    }
}

fn decode_record(raw: &str) -> Option<Session> {
    let record: SessionRecord = match serde_json::from_str(raw) {
        Ok(r) => r,
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed session record");
            return None;
        }
    };

    if record.version != RECORD_VERSION {
        tracing::warn!(version = record.version, "discarding session record of unknown version");
        return None;
    }

    Session::new(
        record.username,
        record.role,
        record.user_id,
        record.access,
        record.refresh,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nurse() -> Session {
        Session::new("nina", Role::Nurse, "12", "acc", "ref").unwrap()
    }

    fn write_legacy(storage: &MemoryStorage, values: [&str; 5]) {
        for (key, value) in legacy::ALL.iter().zip(values) {
            storage.set(key, value).unwrap();
        }
    }

    #[test]
    fn record_round_trip() {
        let storage = MemoryStorage::new();
        write_session(&storage, &nurse()).unwrap();

        let (session, layout) = read_session(&storage).unwrap().unwrap();
        assert_eq!(session, nurse());
        assert_eq!(layout, StoredLayout::Record);
        assert_eq!(read_access_token(&storage).as_deref(), Some("acc"));
    }

    #[test]
    fn malformed_record_is_absent() {
        let storage = MemoryStorage::new();
        storage.set(SESSION_KEY, "{not json").unwrap();
        assert_eq!(read_session(&storage).unwrap(), None);
    }

    #[test]
    fn future_version_is_absent() {
        let storage = MemoryStorage::new();
        storage
            .set(
                SESSION_KEY,
                r#"{"version": 2, "username": "a", "role": "admin", "user_id": "1",
                    "access": "x", "refresh": "y"}"#,
            )
            .unwrap();
        assert_eq!(read_session(&storage).unwrap(), None);
    }

    #[test]
    fn record_with_blank_field_is_absent() {
        let storage = MemoryStorage::new();
        storage
            .set(
                SESSION_KEY,
                r#"{"version": 1, "username": "a", "role": "admin", "user_id": "1",
                    "access": "", "refresh": "y"}"#,
            )
            .unwrap();
        assert_eq!(read_session(&storage).unwrap(), None);
    }

    #[test]
    fn legacy_keys_are_read_when_complete() {
        let storage = MemoryStorage::new();
        write_legacy(&storage, ["acc", "ref", "nina", "nurse", "12"]);

        let (session, layout) = read_session(&storage).unwrap().unwrap();
        assert_eq!(session, nurse());
        assert_eq!(layout, StoredLayout::Legacy);
    }

    #[test]
    fn legacy_keys_with_gap_are_absent() {
        let storage = MemoryStorage::new();
        write_legacy(&storage, ["acc", "ref", "nina", "nurse", "12"]);
        storage.remove(legacy::USER_ID).unwrap();
        assert_eq!(read_session(&storage).unwrap(), None);
    }

    #[test]
    fn writing_a_record_drops_legacy_keys() {
        let storage = MemoryStorage::new();
        write_legacy(&storage, ["old", "old", "old", "admin", "1"]);
        storage.set("theme", "dark").unwrap();

        write_session(&storage, &nurse()).unwrap();

        for key in legacy::ALL {
            assert_eq!(storage.get(key).unwrap(), None);
        }
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    }
}
