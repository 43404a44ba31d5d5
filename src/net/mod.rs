//! Networking modules for the remote HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the requests, `query` builds percent-encoded paths, `types`
//! defines the endpoint catalog and request parameters, and `error` holds the
//! failure taxonomy shared by all of them.

pub mod api;
pub mod error;
pub mod query;
pub mod types;
