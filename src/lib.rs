//! Client for the call2all ("Yemot") SMS and session management HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every remote operation maps to exactly one HTTP request against a fixed
//! base URL. Responses are handed back as parsed JSON without interpretation;
//! application-level failures (bad credentials, expired token, MFA required)
//! live inside the body and are the caller's to read.
//!
//! The auth token is never read implicitly. Callers keep it in a
//! [`TokenStore`] and pass it into each call.

pub mod config;
pub mod net;
pub mod util;

pub use config::{ApiConfig, ConfigError};
pub use net::api::ApiClient;
pub use net::error::ApiError;
pub use net::query::QueryParams;
pub use net::types::{Endpoint, LoginResponse, MfaAction, MfaSend, MfaValidate, SendSms, UploadContents};
pub use util::token_store::{FileStorage, KeyValueStorage, MemoryStorage, StorageError, TokenStore};

#[cfg(feature = "browser")]
pub use util::token_store::LocalStorage;
