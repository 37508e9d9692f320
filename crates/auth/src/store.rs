//! The session store: single source of truth for "who is logged in".

use crate::session::{AuthSnapshot, LoginResponse, Session, SessionError, SessionEvent};
use crate::storage::{self, SessionStorage, StoredLayout};
use crate::subscription::{Subscribers, Subscription};

/// Owns the in-memory session and mirrors it to `S`.
///
/// Lifecycle: `hydrate` once at start, then any sequence of `login` and
/// `logout`. The store never performs network calls; `login` receives an
/// already-resolved token response.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    session: Option<Session>,
    auth_checked: bool,
    subscribers: Subscribers<SessionEvent>,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: None,
            auth_checked: false,
            subscribers: Subscribers::default(),
        }
    }

    /// Load the persisted session.
    ///
    /// Runs once; later calls return the current session untouched. The
    /// auth-checked flag is set whether or not a session was found, and any
    /// storage failure counts as "no session".
    pub fn hydrate(&mut self) -> Option<&Session> {
        if self.auth_checked {
            tracing::debug!("session store already hydrated");
            return self.session.as_ref();
        }

        self.session = match storage::read_session(&self.storage) {
            Ok(Some((session, layout))) => {
                if layout == StoredLayout::Legacy {
                    // Move the session to the versioned record.
                    if let Err(err) = storage::write_session(&self.storage, &session) {
                        tracing::warn!(error = %err, "failed to migrate legacy session keys");
                    }
                }
                Some(session)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "session storage unreadable; starting logged out");
                None
            }
        };
        self.auth_checked = true;

        let authenticated = self.session.is_some();
        tracing::debug!(authenticated, "session hydrated");
        self.subscribers
            .publish(SessionEvent::Hydrated { authenticated });

        self.session.as_ref()
    }

    /// Replace the current session with the one in `response`.
    ///
    /// An incomplete response is refused and leaves the store untouched.
    /// A failed storage write is logged; the in-memory session still holds.
    pub fn login(&mut self, response: LoginResponse) -> Result<&Session, SessionError> {
        let session = Session::try_from(response)?;

        if let Err(err) = storage::write_session(&self.storage, &session) {
            tracing::warn!(error = %err, "failed to persist session");
        }

        tracing::info!(username = session.username(), role = %session.role(), "logged in");
        self.subscribers.publish(SessionEvent::LoggedIn {
            username: session.username().to_string(),
            role: session.role().clone(),
        });

        self.auth_checked = true;
        Ok(self.session.insert(session))
    }

    /// Forget the session and wipe all of storage.
    pub fn logout(&mut self) {
        if let Err(err) = self.storage.clear() {
            tracing::warn!(error = %err, "failed to clear session storage");
        }

        if let Some(previous) = self.session.take() {
            tracing::info!(username = previous.username(), "logged out");
            self.subscribers.publish(SessionEvent::LoggedOut);
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_auth_checked(&self) -> bool {
        self.auth_checked
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(Session::access_token)
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            auth_checked: self.auth_checked,
            session: self.session.clone(),
        }
    }

    pub fn subscribe(&mut self) -> Subscription<SessionEvent> {
        self.subscribers.subscribe()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;
    use crate::storage::{MemoryStorage, SESSION_KEY, StorageError, legacy};
    use proptest::prelude::*;

    fn response(role: &str) -> LoginResponse {
        LoginResponse {
            username: "nina".into(),
            user_type: Role::from(role),
            user_id: "12".into(),
            access: "acc".into(),
            refresh: "ref".into(),
        }
    }

    /// Storage whose every call fails.
    struct BrokenStorage;

    impl SessionStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }

        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn starts_unchecked() {
        let store = SessionStore::new(MemoryStorage::new());
        assert!(!store.is_auth_checked());
        assert!(store.session().is_none());
    }

    #[test]
    fn hydrate_on_empty_storage_marks_checked() {
        let mut store = SessionStore::new(MemoryStorage::new());
        assert!(store.hydrate().is_none());
        assert!(store.is_auth_checked());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn login_then_reload_restores_session() {
        let storage = MemoryStorage::new();
        let mut first = SessionStore::new(storage.clone());
        first.hydrate();
        let logged_in = first.login(response("engineer")).unwrap().clone();

        let mut reloaded = SessionStore::new(storage);
        let restored = reloaded.hydrate().cloned();
        assert_eq!(restored, Some(logged_in));
        assert_eq!(reloaded.access_token(), Some("acc"));
    }

    #[test]
    fn login_overwrites_previous_session() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.login(response("engineer")).unwrap();
        let mut second = response("admin");
        second.username = "ada".into();
        store.login(second).unwrap();

        let session = store.session().unwrap();
        assert_eq!(session.username(), "ada");
        assert_eq!(session.role(), &Role::Admin);
    }

    #[test]
    fn incomplete_login_is_refused() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.hydrate();
        let mut resp = response("nurse");
        resp.refresh.clear();

        assert!(store.login(resp).is_err());
        assert!(store.session().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn logout_wipes_all_storage() {
        let storage = MemoryStorage::new();
        storage.set("unrelated", "value").unwrap();
        let mut store = SessionStore::new(storage.clone());
        store.login(response("nurse")).unwrap();

        store.logout();

        assert!(store.session().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn logout_without_session_is_a_no_op() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.hydrate();
        let events = store.subscribe();

        store.logout();
        store.logout();

        assert!(store.session().is_none());
        assert!(store.is_auth_checked());
        assert!(storage.is_empty());
        assert!(events.drain().is_empty());
    }

    #[test]
    fn hydrate_runs_once() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.hydrate();

        // A session written behind the store's back is not picked up.
        let mut other = SessionStore::new(storage);
        other.login(response("admin")).unwrap();

        assert!(store.hydrate().is_none());
    }

    #[test]
    fn legacy_session_is_migrated_on_hydrate() {
        let storage = MemoryStorage::new();
        for (key, value) in legacy::ALL.iter().zip(["acc", "ref", "nina", "nurse", "12"]) {
            storage.set(key, value).unwrap();
        }

        let mut store = SessionStore::new(storage.clone());
        let session = store.hydrate().cloned().unwrap();
        assert_eq!(session.username(), "nina");
        assert!(storage.get(SESSION_KEY).unwrap().is_some());
        assert_eq!(storage.get(legacy::ACCESS).unwrap(), None);
    }

    #[test]
    fn broken_storage_degrades_to_logged_out() {
        let mut store = SessionStore::new(BrokenStorage);
        assert!(store.hydrate().is_none());
        assert!(store.is_auth_checked());

        // Login still works in memory; logout still clears memory.
        store.login(response("nurse")).unwrap();
        assert!(store.is_authenticated());
        store.logout();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn subscribers_see_every_transition() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let events = store.subscribe();

        store.hydrate();
        store.login(response("nurse")).unwrap();
        store.logout();

        assert_eq!(
            events.drain(),
            vec![
                SessionEvent::Hydrated {
                    authenticated: false
                },
                SessionEvent::LoggedIn {
                    username: "nina".into(),
                    role: Role::Nurse
                },
                SessionEvent::LoggedOut,
            ]
        );
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let kept = store.subscribe();
        drop(store.subscribe());

        store.hydrate();

        assert_eq!(store.subscribers.len(), 1);
        assert_eq!(kept.drain().len(), 1);
    }

    const FIELDS: [&str; 5] = ["username", "role", "user_id", "access", "refresh"];

    fn record_json(present: &[bool; 5]) -> String {
        let values = ["nina", "nurse", "12", "acc", "ref"];
        let mut obj = serde_json::Map::new();
        obj.insert("version".into(), serde_json::json!(1));
        for ((field, value), keep) in FIELDS.iter().zip(values).zip(present) {
            if *keep {
                obj.insert((*field).into(), serde_json::json!(value));
            }
        }
        serde_json::Value::Object(obj).to_string()
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a stored session with all five fields is reconstructed
        /// exactly; anything less hydrates as logged out. Either way the
        /// auth-checked flag ends up set.
        #[test]
        fn hydrate_is_all_or_nothing(present in proptest::array::uniform5(any::<bool>())) {
            let storage = MemoryStorage::new();
            storage.set(SESSION_KEY, &record_json(&present)).unwrap();

            let mut store = SessionStore::new(storage);
            let hydrated = store.hydrate().cloned();

            prop_assert!(store.is_auth_checked());
            if present.iter().all(|p| *p) {
                let expected = Session::new("nina", Role::Nurse, "12", "acc", "ref").unwrap();
                prop_assert_eq!(hydrated, Some(expected));
            } else {
                prop_assert_eq!(hydrated, None);
            }
        }

        /// Property: the same holds for the five legacy keys.
        #[test]
        fn legacy_hydrate_is_all_or_nothing(present in proptest::array::uniform5(any::<bool>())) {
            let storage = MemoryStorage::new();
            let values = ["acc", "ref", "nina", "nurse", "12"];
            for ((key, value), keep) in legacy::ALL.iter().zip(values).zip(present) {
                if keep {
                    storage.set(key, value).unwrap();
                }
            }

            let mut store = SessionStore::new(storage);
            let authenticated = store.hydrate().is_some();

            prop_assert!(store.is_auth_checked());
            prop_assert_eq!(authenticated, present.iter().all(|p| *p));
        }

        /// Property: login followed by a reload yields an equivalent session.
        #[test]
        fn login_survives_reload(
            username in "[a-z][a-z0-9_]{0,15}",
            role in prop_oneof![Just("admin"), Just("engineer"), Just("nurse")],
            user_id in 1u32..100_000,
            access in "[A-Za-z0-9._-]{1,64}",
            refresh in "[A-Za-z0-9._-]{1,64}",
        ) {
            let storage = MemoryStorage::new();
            let mut store = SessionStore::new(storage.clone());
            store.hydrate();
            let expected = store
                .login(LoginResponse {
                    username,
                    user_type: Role::from(role),
                    user_id: user_id.to_string(),
                    access,
                    refresh,
                })
                .unwrap()
                .clone();

            let mut reloaded = SessionStore::new(storage);
            prop_assert_eq!(reloaded.hydrate().cloned(), Some(expected));
        }
    }
}
