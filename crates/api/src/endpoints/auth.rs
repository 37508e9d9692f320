//! Authentication service bindings.

use reqwest::Method;
use serde::Serialize;
use tracing::info;

use meditrack_auth::{LoginResponse, Role};
use meditrack_core::DomainError;

use crate::error::ApiResult;
use crate::request::{ApiClient, Auth};

pub const TOKEN_PATH: &str = "token/";

#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Account registration. The role selects the endpoint, not a body field.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub role: Role,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.role.is_known() {
            return Err(DomainError::validation(format!(
                "cannot sign up with role '{}'",
                self.role
            )));
        }
        for (value, field) in [
            (&self.username, "username"),
            (&self.email, "email"),
            (&self.password, "password"),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} is required")));
            }
        }
        if !self.email.contains('@') {
            return Err(DomainError::validation("email is not valid"));
        }
        Ok(())
    }

    pub fn path(&self) -> String {
        format!("signup/{}/", self.role.as_str())
    }
}

impl ApiClient {
    /// `POST token/`. Never sends a stored token.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let resp: LoginResponse = self
            .call(Method::POST, TOKEN_PATH, Some(credentials), Auth::Anonymous)
            .await?;
        info!(username = %resp.username, role = %resp.user_type, "login accepted");
        Ok(resp)
    }

    /// `POST signup/{role}/`.
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<serde_json::Value> {
        request.validate()?;
        let created = self
            .call(Method::POST, &request.path(), Some(request), Auth::Anonymous)
            .await?;
        info!(username = %request.username, role = %request.role, "signup accepted");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(role: Role) -> SignupRequest {
        SignupRequest {
            username: "amy".into(),
            email: "amy@ward.example".into(),
            password: "s3cret".into(),
            role,
        }
    }

    #[test]
    fn signup_path_follows_role() {
        assert_eq!(signup(Role::Nurse).path(), "signup/nurse/");
        assert_eq!(signup(Role::Admin).path(), "signup/admin/");
    }

    #[test]
    fn signup_rejects_unknown_role_and_blank_fields() {
        assert!(signup(Role::Engineer).validate().is_ok());
        assert!(signup(Role::Other("janitor".into())).validate().is_err());

        let mut req = signup(Role::Nurse);
        req.email = "not-an-email".into();
        assert!(req.validate().is_err());

        req.email = " ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn signup_body_omits_role_and_debug_hides_password() {
        let req = signup(Role::Nurse);
        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("role").is_none());
        assert_eq!(body["username"], "amy");
        assert!(!format!("{req:?}").contains("s3cret"));
    }
}
