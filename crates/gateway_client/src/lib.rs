//! Gateway client for the Aqari REST API.
//!
//! Every data-bearing screen in the frontend goes through [`ApiClient`]: it
//! resolves the base URL, attaches the cookie-bearing transport, serves
//! cacheable GETs from a 5-minute TTL cache, and collapses concurrent
//! identical requests into a single network call. Auth transitions bypass
//! the cache/dedup pipeline entirely.
//!
//! The crate is deliberately free of browser types. The web app supplies a
//! `fetch`-backed [`Transport`] and a `Date::now` [`Clock`]; tests supply
//! scripted fakes.

mod client;
mod endpoints;
mod error;
mod retry;
mod transport;
mod types;

pub use client::{ApiClient, RequestOptions, CACHE_TTL_MS};
pub use endpoints::{apply_price_filter, deals_path};
pub use error::{error_from_response, Error, ErrorCode};
pub use retry::RetryPolicy;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::SystemClock;
pub use transport::{Body, Clock, HttpRequest, HttpResponse, Method, Part, PartValue, Transport};
pub use types::{
    AnalysisRequestReceipt, CheckoutSession, CheckoutSessionRequest, Deal, DealFilters,
    HealthResponse, LandingSection, LoginRequest, LoginResponse, Page, PasswordResetConfirmRequest,
    PasswordResetRequest, ResendVerificationRequest, SignupRequest, Subscription,
    UpdateProfileRequest, User, VerifyDeviceRequest, VerifyEmailRequest,
};
