//! Shared frontend plumbing: the browser transport behind the gateway
//! client, configuration resolution, local-storage persistence, cross-tab
//! auth signaling, and build metadata.
//!
//! ## Session model
//!
//! The session lives in an `HttpOnly` cookie set by the API; page script
//! never sees the token. Every request goes out with credentials included,
//! and auth transitions re-confirm the session with a bounded retry before
//! navigating, because cookie propagation is not synchronous.
//!
//! Centralizing these helpers keeps network behavior consistent across
//! routes. None of them handle secrets directly, but callers must still
//! avoid logging credential payloads.

pub(crate) mod api;
pub(crate) mod build_info;
pub(crate) mod config;
pub(crate) mod storage;
pub(crate) mod sync;
