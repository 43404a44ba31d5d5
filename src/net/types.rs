//! Endpoint catalog and request parameter types.
//!
//! Response bodies stay as `serde_json::Value` because their shapes are
//! server-defined. Login is the one call with a known field and gets a thin
//! envelope that still keeps the full body.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::query::QueryParams;

/// Language sent with `sendMFA` when the caller does not choose one.
pub const DEFAULT_MFA_LANG: &str = "HE";

// =============================================================================
// ENDPOINTS
// =============================================================================

/// Remote path segment appended to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    GetSession,
    GetIncomingSms,
    GetSmsOutLog,
    GetTextFile,
    UploadTextFile,
    SendSms,
    /// Shared action-dispatched MFA endpoint.
    MfaSession,
}

impl Endpoint {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::GetSession => "GetSession",
            Self::GetIncomingSms => "GetIncomingSms",
            Self::GetSmsOutLog => "GetSmsOutLog",
            Self::GetTextFile => "GetTextFile",
            Self::UploadTextFile => "UploadTextFile",
            Self::SendSms => "SendSms",
            Self::MfaSession => "MFASession",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// MFA
// =============================================================================

/// Value of the `action` parameter on [`Endpoint::MfaSession`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MfaAction {
    IsPass,
    Try,
    GetMethods,
    Send,
    Validate,
    /// Any action the server supports that has no dedicated variant.
    Custom(String),
}

impl MfaAction {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::IsPass => "isPass",
            Self::Try => "try",
            Self::GetMethods => "getMFAMethods",
            Self::Send => "sendMFA",
            Self::Validate => "validMFA",
            Self::Custom(action) => action,
        }
    }
}

impl From<&str> for MfaAction {
    fn from(action: &str) -> Self {
        match action {
            "isPass" => Self::IsPass,
            "try" => Self::Try,
            "getMFAMethods" => Self::GetMethods,
            "sendMFA" => Self::Send,
            "validMFA" => Self::Validate,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl fmt::Display for MfaAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for the `sendMFA` action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaSend {
    pub mfa_id: String,
    pub mfa_send_type: String,
    pub lang: String,
    /// Sent only when set and non-empty.
    pub auto_otp_hostname: Option<String>,
}

impl MfaSend {
    pub fn new(mfa_id: impl Into<String>, mfa_send_type: impl Into<String>) -> Self {
        Self {
            mfa_id: mfa_id.into(),
            mfa_send_type: mfa_send_type.into(),
            lang: DEFAULT_MFA_LANG.to_owned(),
            auto_otp_hostname: None,
        }
    }

    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    #[must_use]
    pub fn with_auto_otp_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.auto_otp_hostname = Some(hostname.into());
        self
    }

    pub(crate) fn to_params(&self) -> QueryParams {
        let hostname = self
            .auto_otp_hostname
            .as_deref()
            .filter(|h| !h.is_empty());
        QueryParams::new()
            .with("mfaId", &self.mfa_id)
            .with("mfaSendType", &self.mfa_send_type)
            .with("lang", &self.lang)
            .with_opt("autoOtpHostname", hostname)
    }
}

/// Parameters for the `validMFA` action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MfaValidate {
    pub mfa_code: String,
    pub remember_me: bool,
    pub remember_note: String,
}

impl MfaValidate {
    pub fn new(mfa_code: impl Into<String>) -> Self {
        Self { mfa_code: mfa_code.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    #[must_use]
    pub fn with_remember_note(mut self, note: impl Into<String>) -> Self {
        self.remember_note = note.into();
        self
    }

    pub(crate) fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .with("mfaCode", &self.mfa_code)
            .with("mfaRememberMe", u8::from(self.remember_me))
            .with("mfaRememberNote", &self.remember_note)
    }
}

// =============================================================================
// SMS
// =============================================================================

/// Parameters for `SendSms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSms {
    /// Recipient list in the server's format (e.g. colon-separated numbers).
    pub phones: String,
    pub message: String,
    pub caller_id: Option<String>,
    /// Additional server-side options, appended after the named fields.
    pub extra: QueryParams,
}

impl SendSms {
    pub fn new(phones: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            phones: phones.into(),
            message: message.into(),
            caller_id: None,
            extra: QueryParams::new(),
        }
    }

    #[must_use]
    pub fn with_caller_id(mut self, caller_id: impl Into<String>) -> Self {
        self.caller_id = Some(caller_id.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.push(key, value);
        self
    }

    pub(crate) fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new()
            .with("phones", &self.phones)
            .with("message", &self.message)
            .with_opt("CallerId", self.caller_id.as_deref());
        params.extend_from(&self.extra);
        params
    }
}

// =============================================================================
// TEXT FILES
// =============================================================================

/// File contents for `UploadTextFile`.
///
/// The server field is always a string: text is sent as-is, anything else is
/// JSON-stringified first.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadContents {
    Text(String),
    Json(Value),
}

impl UploadContents {
    /// String placed in the `contents` field of the request body.
    #[must_use]
    pub fn into_wire(self) -> String {
        match self {
            Self::Text(text) | Self::Json(Value::String(text)) => text,
            Self::Json(value) => value.to_string(),
        }
    }
}

impl From<String> for UploadContents {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for UploadContents {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Value> for UploadContents {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UploadTextFileBody<'a> {
    pub token: &'a str,
    pub what: &'a str,
    pub contents: String,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Body returned by `Login`, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginResponse(pub Value);

impl LoginResponse {
    /// The issued token, when the server included one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.0.get("token").and_then(Value::as_str)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<LoginResponse> for Value {
    fn from(response: LoginResponse) -> Self {
        response.0
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
