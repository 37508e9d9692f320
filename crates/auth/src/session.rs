//! Session model: the authenticated identity plus its tokens.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use meditrack_core::de::string_or_number;

use crate::roles::Role;

/// Authenticated identity and credentials for the current user.
///
/// A `Session` only exists fully populated; see [`Session::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    role: Role,
    user_id: String,
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("incomplete session: missing {0}")]
    Incomplete(&'static str),
}

impl Session {
    /// Build a session, refusing any blank field.
    pub fn new(
        username: impl Into<String>,
        role: Role,
        user_id: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let session = Self {
            username: username.into(),
            role,
            user_id: user_id.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        };

        let blank = [
            ("username", session.username.as_str()),
            ("role", session.role.as_str()),
            ("user_id", session.user_id.as_str()),
            ("access token", session.access_token.as_str()),
            ("refresh token", session.refresh_token.as_str()),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty());

        match blank {
            Some((field, _)) => Err(SessionError::Incomplete(field)),
            None => Ok(session),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Identity used to decide whether routing must be re-evaluated.
    pub fn same_identity(&self, other: &Session) -> bool {
        self.username == other.username && self.role == other.role
    }
}

impl TryFrom<LoginResponse> for Session {
    type Error = SessionError;

    fn try_from(value: LoginResponse) -> Result<Self, Self::Error> {
        Session::new(
            value.username,
            value.user_type,
            value.user_id,
            value.access,
            value.refresh,
        )
    }
}

/// Body returned by the token endpoint on successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub username: String,
    pub user_type: Role,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub access: String,
    pub refresh: String,
}

/// Published by the session store on every state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Hydrated { authenticated: bool },
    LoggedIn { username: String, role: Role },
    LoggedOut,
}

/// Read-only view of the store, as consumed by guards and routers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub auth_checked: bool,
    pub session: Option<Session>,
}

impl AuthSnapshot {
    pub fn role(&self) -> Option<&Role> {
        self.session.as_ref().map(Session::role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_accepts_numeric_user_id() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"username": "nina", "user_type": "nurse", "user_id": 12,
                "access": "a.b.c", "refresh": "r.s.t"}"#,
        )
        .unwrap();
        assert_eq!(resp.user_id, "12");

        let session = Session::try_from(resp).unwrap();
        assert_eq!(session.role(), &Role::Nurse);
        assert_eq!(session.user_id(), "12");
    }

    #[test]
    fn blank_token_is_rejected() {
        let err = Session::new("nina", Role::Nurse, "12", "", "r").unwrap_err();
        assert_eq!(err, SessionError::Incomplete("access token"));
    }

    #[test]
    fn identity_ignores_tokens() {
        let a = Session::new("eli", Role::Engineer, "3", "a1", "r1").unwrap();
        let b = Session::new("eli", Role::Engineer, "3", "a2", "r2").unwrap();
        let c = Session::new("eli", Role::Admin, "3", "a1", "r1").unwrap();
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
    }
}
