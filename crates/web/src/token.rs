//! Access-token lookup for the request helper.

use meditrack_api::TokenSource;
use meditrack_auth::SessionStorage;
use meditrack_auth::storage::read_access_token;

/// Reads the persisted access token on every request, so a login or logout
/// in the session store is picked up without rebuilding the client.
#[derive(Debug, Clone)]
pub struct StoredToken<S> {
    storage: S,
}

impl<S> StoredToken<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S> TokenSource for StoredToken<S>
where
    S: SessionStorage + Send + Sync,
{
    fn access_token(&self) -> Option<String> {
        read_access_token(&self.storage)
    }
}
