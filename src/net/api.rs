//! HTTP calls against the remote API.
//!
//! Each public method is one request. The body is parsed as JSON and handed
//! back untouched, whatever the HTTP status.
//!
//! ERROR HANDLING
//! ==============
//! Transport and decoding failures propagate as [`ApiError`]. Nothing is
//! retried and no timeout is applied unless [`ApiConfig::timeout_secs`] is
//! set.
//!
//! QUERY ORDER
//! ===========
//! `token` is always the first parameter, and on `MFASession` `action` is the
//! second. Operation parameters follow in construction order.

use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::query::{QueryParams, endpoint_path};
use super::types::{Endpoint, LoginResponse, MfaAction, MfaSend, MfaValidate, SendSms, UploadContents, UploadTextFileBody};
use crate::config::ApiConfig;

/// Client for the remote API. Cheap to clone; clones share one connection
/// pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.timeout_secs {
            Some(secs) => builder.timeout(std::time::Duration::from_secs(secs)),
            None => builder,
        };
        let http = builder.build().map_err(ApiError::ClientBuild)?;
        Ok(Self { http, base_url: config.base_url })
    }

    /// Build a client on top of an existing `reqwest::Client`. The config's
    /// timeout is ignored; the injected client's settings apply.
    #[must_use]
    pub fn with_http(config: ApiConfig, http: reqwest::Client) -> Self {
        Self { http, base_url: config.base_url }
    }

    /// Client for the production API with transport defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn default_client() -> Result<Self, ApiError> {
        Self::new(ApiConfig::default())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// `GET Login?username=..&password=..`. The body usually carries `token`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let value = self
            .get_json(Endpoint::Login, &login_params(username, password))
            .await?;
        Ok(LoginResponse(value))
    }

    /// `GET GetSession?token=..`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn get_session(&self, token: &str) -> Result<Value, ApiError> {
        self.get_json(Endpoint::GetSession, &token_params(token))
            .await
    }

    // =========================================================================
    // SMS
    // =========================================================================

    /// `GET GetIncomingSms?token=..&limit=..`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn get_incoming_sms(&self, token: &str, limit: u32) -> Result<Value, ApiError> {
        let params = token_params(token).with("limit", limit);
        self.get_json(Endpoint::GetIncomingSms, &params).await
    }

    /// `GET GetSmsOutLog?token=..&limit=..`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn get_sms_out_log(&self, token: &str, limit: u32) -> Result<Value, ApiError> {
        let params = token_params(token).with("limit", limit);
        self.get_json(Endpoint::GetSmsOutLog, &params).await
    }

    /// `GET SendSms?token=..&phones=..&message=..[&CallerId=..]`, followed by
    /// any extra parameters on `sms`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn send_sms(&self, token: &str, sms: &SendSms) -> Result<Value, ApiError> {
        let mut params = token_params(token);
        params.extend_from(&sms.to_params());
        self.get_json(Endpoint::SendSms, &params).await
    }

    // =========================================================================
    // TEXT FILES
    // =========================================================================

    /// `GET GetTextFile?token=..&what=..`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn get_text_file(&self, token: &str, what: &str) -> Result<Value, ApiError> {
        let params = token_params(token).with("what", what);
        self.get_json(Endpoint::GetTextFile, &params).await
    }

    /// `POST UploadTextFile` with JSON body `{token, what, contents}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn upload_text_file(
        &self,
        token: &str,
        what: &str,
        contents: impl Into<UploadContents>,
    ) -> Result<Value, ApiError> {
        let body = UploadTextFileBody { token, what, contents: contents.into().into_wire() };
        self.post_json(Endpoint::UploadTextFile, &body).await
    }

    // =========================================================================
    // MFA
    // =========================================================================

    /// `action=isPass`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn mfa_is_pass(&self, token: &str) -> Result<Value, ApiError> {
        self.mfa_action(token, MfaAction::IsPass, &QueryParams::new())
            .await
    }

    /// `action=try`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn mfa_try(&self, token: &str) -> Result<Value, ApiError> {
        self.mfa_action(token, MfaAction::Try, &QueryParams::new())
            .await
    }

    /// `action=getMFAMethods`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn mfa_get_methods(&self, token: &str) -> Result<Value, ApiError> {
        self.mfa_action(token, MfaAction::GetMethods, &QueryParams::new())
            .await
    }

    /// `action=sendMFA` with `mfaId`, `mfaSendType`, `lang` and, when set,
    /// `autoOtpHostname`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn mfa_send(&self, token: &str, send: &MfaSend) -> Result<Value, ApiError> {
        self.mfa_action(token, MfaAction::Send, &send.to_params())
            .await
    }

    /// `action=validMFA` with `mfaCode`, `mfaRememberMe` (`1`/`0`) and
    /// `mfaRememberNote`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn mfa_validate(&self, token: &str, validate: &MfaValidate) -> Result<Value, ApiError> {
        self.mfa_action(token, MfaAction::Validate, &validate.to_params())
            .await
    }

    /// Any `MFASession` action. Entries of `params` without a value are
    /// dropped before encoding.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn mfa_action(
        &self,
        token: &str,
        action: impl Into<MfaAction>,
        params: &QueryParams,
    ) -> Result<Value, ApiError> {
        let query = mfa_params(token, &action.into(), params);
        self.get_json(Endpoint::MfaSession, &query).await
    }

    // =========================================================================
    // TRANSPORT
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get_json(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value, ApiError> {
        let url = self.url(&endpoint_path(endpoint, params));
        let response = self.http.get(url).send().await?;
        read_json(endpoint, "GET", response).await
    }

    async fn post_json(&self, endpoint: Endpoint, body: &impl Serialize) -> Result<Value, ApiError> {
        let url = self.url(endpoint.as_str());
        let response = self.http.post(url).json(body).send().await?;
        read_json(endpoint, "POST", response).await
    }
}

async fn read_json(endpoint: Endpoint, method: &'static str, response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status().as_u16();
    let text = response.text().await?;
    tracing::debug!(%endpoint, method, status, bytes = text.len(), "api response");
    Ok(serde_json::from_str(&text)?)
}

fn login_params(username: &str, password: &str) -> QueryParams {
    QueryParams::new()
        .with("username", username)
        .with("password", password)
}

fn token_params(token: &str) -> QueryParams {
    QueryParams::new().with("token", token)
}

fn mfa_params(token: &str, action: &MfaAction, params: &QueryParams) -> QueryParams {
    let mut query = token_params(token).with("action", action);
    query.extend_from(params);
    query
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
