//! HTTP bindings for the MediTrack REST API.
//!
//! [`ApiClient`] is the single request helper every view goes through; the
//! `endpoints` modules add one typed method per API operation on top of it.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod request;

pub use config::ApiConfig;
pub use endpoints::auth::{Credentials, SignupRequest};
pub use error::{ApiError, ApiResult};
pub use request::{ApiClient, TokenSource};

pub use reqwest::Method;
