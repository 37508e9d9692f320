//! The request helper.
//!
//! Every call goes through [`ApiClient::request`]: it joins the path onto the
//! configured base URL, sends JSON, attaches a bearer token when one is known
//! and normalizes failures into [`ApiError`].

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Supplies the persisted access token when a caller does not pass one.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

impl<F> TokenSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn access_token(&self) -> Option<String> {
        self()
    }
}

/// How a single request is authenticated.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Auth<'a> {
    /// Never attach a token (login, signup).
    Anonymous,
    /// Use the given token, falling back to the token source.
    Bearer(Option<&'a str>),
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    tokens: Option<Arc<dyn TokenSource>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url())
            .field("has_token_source", &self.tokens.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            tokens: None,
        }
    }

    pub fn with_token_source(mut self, source: impl TokenSource + 'static) -> Self {
        self.tokens = Some(Arc::new(source));
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Base URL without trailing slashes, `/`, path without leading slashes.
    pub fn url(&self, path: &str) -> String {
        join_url(self.config.base_url(), path)
    }

    /// Sends `body` (if any) as JSON and parses the response as `T`.
    ///
    /// An empty success body parses as JSON `null`, so `T = ()` or
    /// `Option<_>` accept `204 No Content`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> ApiResult<T> {
        let text = self.execute(method, path, body, Auth::Bearer(token)).await?;
        decode(&text)
    }

    pub(crate) async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth<'_>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let text = self.execute(method, path, body, auth).await?;
        decode(&text)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ApiResult<T> {
        self.call::<T, ()>(Method::GET, path, None, Auth::Bearer(token))
            .await
    }

    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(method, path, Some(body), Auth::Bearer(token))
            .await
    }

    pub(crate) async fn delete(&self, path: &str, token: Option<&str>) -> ApiResult<()> {
        let _: serde_json::Value = self
            .call::<_, ()>(Method::DELETE, path, None, Auth::Bearer(token))
            .await?;
        Ok(())
    }

    fn resolve_token(&self, auth: Auth<'_>) -> Option<String> {
        match auth {
            Auth::Anonymous => None,
            Auth::Bearer(Some(token)) if !token.is_empty() => Some(token.to_string()),
            Auth::Bearer(_) => self
                .tokens
                .as_ref()
                .and_then(|source| source.access_token())
                .filter(|token| !token.is_empty()),
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        auth: Auth<'_>,
    ) -> ApiResult<String> {
        let url = self.url(path);
        let token = self.resolve_token(auth);

        debug!(%method, %url, authenticated = token.is_some(), "api request");

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "api request failed to send");
            ApiError::Network(e.to_string())
        })?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&text)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            warn!(%method, %url, status = status.as_u16(), %message, "api request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn decode<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `error`, then `detail`, from a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "detail"].iter().find_map(|field| {
        match value.get(field)? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(
            join_url("http://h/api/", "/hospitals/"),
            "http://h/api/hospitals/"
        );
        assert_eq!(join_url("http://h/api", "token/"), "http://h/api/token/");
        assert_eq!(join_url("http://h/api//", "//x"), "http://h/api/x");
    }

    #[test]
    fn error_message_prefers_error_over_detail() {
        assert_eq!(
            error_message(r#"{"error": "bad", "detail": "worse"}"#).as_deref(),
            Some("bad")
        );
        assert_eq!(
            error_message(r#"{"detail": "Invalid token"}"#).as_deref(),
            Some("Invalid token")
        );
        assert_eq!(error_message(r#"{"other": 1}"#), None);
        assert_eq!(error_message("<html>oops</html>"), None);
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let unit: () = decode("").unwrap();
        assert_eq!(unit, ());
        let none: Option<u32> = decode("  ").unwrap();
        assert_eq!(none, None);
        assert!(matches!(decode::<u32>("nope"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn explicit_token_wins_over_source() {
        let client = ApiClient::new(ApiConfig::default())
            .with_token_source(|| Some("stored".to_string()));

        assert_eq!(
            client.resolve_token(Auth::Bearer(Some("explicit"))).as_deref(),
            Some("explicit")
        );
        assert_eq!(
            client.resolve_token(Auth::Bearer(None)).as_deref(),
            Some("stored")
        );
        assert_eq!(
            client.resolve_token(Auth::Bearer(Some(""))).as_deref(),
            Some("stored")
        );
        assert_eq!(client.resolve_token(Auth::Anonymous), None);
    }

    #[test]
    fn no_source_means_no_token() {
        let client = ApiClient::new(ApiConfig::default());
        assert_eq!(client.resolve_token(Auth::Bearer(None)), None);
    }
}
