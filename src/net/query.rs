//! Query string construction.
//!
//! Parameters are kept in insertion order as `(key, Option<value>)` pairs.
//! Absent values stay in the bag until [`QueryParams::present`] filters them
//! out, so "omit when unset" is one explicit step instead of a convention
//! spread across call sites.

use std::borrow::Cow;

use super::types::Endpoint;

/// Ordered parameter bag for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Option<String>)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a present parameter, coercing the value to its string form.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.entries.push((key.into(), Some(value.to_string())));
        self
    }

    /// Append a parameter that is dropped at encoding time when `None`.
    pub fn push_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        self.entries.push((key.into(), value.map(|v| v.to_string())));
        self
    }

    /// Builder form of [`QueryParams::push`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Builder form of [`QueryParams::push_opt`].
    #[must_use]
    pub fn with_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.push_opt(key, value);
        self
    }

    /// Append every entry of `other` after the current ones.
    pub fn extend_from(&mut self, other: &QueryParams) -> &mut Self {
        self.entries.extend(other.entries.iter().cloned());
        self
    }

    /// Entries with a value, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    /// First present value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.present().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// True when no entry would survive encoding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Render present entries as `k=v&k=v`, percent-encoding keys and values.
    #[must_use]
    pub fn encode(&self) -> String {
        self.present()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for QueryParams
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push_opt(key, value);
        }
        params
    }
}

/// Percent-encode one query component. Only RFC 3986 unreserved characters
/// pass through; space becomes `%20`.
#[must_use]
pub fn encode_component(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Relative request path: `Endpoint` or `Endpoint?query`.
#[must_use]
pub fn endpoint_path(endpoint: Endpoint, params: &QueryParams) -> String {
    let query = params.encode();
    if query.is_empty() {
        endpoint.as_str().to_owned()
    } else {
        format!("{}?{query}", endpoint.as_str())
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;
