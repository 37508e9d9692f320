//! Application-wide state shared through Leptos context.

use leptos::*;
use tracing::debug;

use meditrack_api::{ApiClient, ApiConfig};
use meditrack_auth::{
    AuthSnapshot, LoginResponse, Role, Session, SessionError, SessionEvent, SessionStore,
    Subscription,
};

use crate::local_storage::LocalStorage;
use crate::token::StoredToken;

/// The session store, plus a signal mirroring its snapshot.
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: StoredValue<SessionStore<LocalStorage>>,
    events: StoredValue<Subscription<SessionEvent>>,
    snapshot: RwSignal<AuthSnapshot>,
}

impl AuthContext {
    pub fn new() -> Self {
        let mut store = SessionStore::new(LocalStorage);
        let events = store.subscribe();
        let snapshot = create_rw_signal(store.snapshot());

        Self {
            store: store_value(store),
            events: store_value(events),
            snapshot,
        }
    }

    pub fn hydrate(&self) {
        self.store.update_value(|store| {
            store.hydrate();
        });
        self.publish();
    }

    pub fn login(&self, response: LoginResponse) -> Result<Session, SessionError> {
        let mut result = None;
        self.store
            .update_value(|store| result = Some(store.login(response).cloned()));
        self.publish();
        result.unwrap_or(Err(SessionError::Incomplete("session")))
    }

    pub fn logout(&self) {
        self.store.update_value(SessionStore::logout);
        self.publish();
    }

    /// Tracked snapshot of the store.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.snapshot.get()
    }

    pub fn session(&self) -> Option<Session> {
        self.snapshot.with(|s| s.session.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.snapshot.with(|s| s.role().cloned())
    }

    pub fn username(&self) -> Option<String> {
        self.snapshot
            .with(|s| s.session.as_ref().map(|s| s.username().to_string()))
    }

    fn publish(&self) {
        for event in self.events.with_value(Subscription::drain) {
            debug!(?event, "session event");
        }
        self.snapshot.set(self.store.with_value(SessionStore::snapshot));
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the session store and API client for the component tree.
pub fn provide_app_context() -> AuthContext {
    let auth = AuthContext::new();
    provide_context(auth);

    let config = ApiConfig::from_env().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid API configuration, using default");
        ApiConfig::default()
    });
    provide_context(ApiClient::new(config).with_token_source(StoredToken::new(LocalStorage)));

    auth
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

/// Turn a page-load failure into a message, dropping the session when the
/// server rejected its token.
pub fn report(auth: AuthContext, err: &anyhow::Error) -> String {
    if crate::loaders::session_expired(err) {
        tracing::info!("access token rejected, logging out");
        auth.logout();
    }
    crate::loaders::user_message(err)
}
