//! Sessions
//!
//! Server-side sessions keyed by an opaque id that clients carry in the
//! `x-session-id` header.

pub(crate) mod middleware;
mod registry;

pub(crate) use registry::*;

/// Header carrying the session id in both directions.
pub(crate) const SESSION_ID_HEADER: &str = "x-session-id";
