//! Feature modules. Endpoint wrappers live in the `gateway_client` crate;
//! what remains here is browser-side orchestration.

pub(crate) mod auth;
