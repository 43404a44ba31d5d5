//! Client-side helpers that are not part of the wire protocol.

pub mod token_store;
