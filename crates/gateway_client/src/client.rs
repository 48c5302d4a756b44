//! The gateway client core: one choke point for backend HTTP calls. Wraps a
//! `Transport` with URL resolution, a TTL response cache for cacheable GETs,
//! and an in-flight map that deduplicates concurrent identical requests.
//!
//! Execution is single-threaded (browser event loop), so the two maps are
//! plain `RefCell`s; mutation is atomic with respect to await points.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{LocalBoxFuture, Shared};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{self, Error};
use crate::transport::{Body, Clock, HttpRequest, HttpResponse, Method, Part, Transport};

/// Expiry window for cacheable GET responses.
pub const CACHE_TTL_MS: u64 = 5 * 60 * 1000;

#[derive(Clone, Debug)]
struct CacheEntry {
    data: Value,
    expires_at: u64,
}

type PendingFuture = Shared<LocalBoxFuture<'static, Result<Value, Error>>>;

/// Per-request knobs. Defaults to a GET with no extra headers and no body.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Body>,
}

impl RequestOptions {
    pub fn json(method: Method, body: Value) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: Some(Body::Json(body)),
        }
    }

    pub fn multipart(parts: Vec<Part>) -> Self {
        Self {
            method: Method::Post,
            headers: Vec::new(),
            body: Some(Body::Multipart(parts)),
        }
    }
}

/// Gateway client handle. Cheap to clone; all clones share one cache and one
/// in-flight map. Constructed once at the application root and injected into
/// routes, so tests can substitute a fake transport.
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<Inner>,
}

struct Inner {
    base_url: String,
    transport: Rc<dyn Transport>,
    clock: Rc<dyn Clock>,
    cache: RefCell<HashMap<String, CacheEntry>>,
    pending: RefCell<HashMap<String, PendingFuture>>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn Transport>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                base_url: base_url.into(),
                transport,
                clock,
                cache: RefCell::new(HashMap::new()),
                pending: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Empties the response cache and the in-flight map. Called around auth
    /// transitions so no cross-session data survives.
    pub fn clear_cache(&self) {
        self.inner.cache.borrow_mut().clear();
        self.inner.pending.borrow_mut().clear();
    }

    /// Evicts one cached entry, e.g. `/users/me` after a profile update.
    pub fn invalidate(&self, method: Method, endpoint: &str) {
        let url = join_url(&self.inner.base_url, endpoint);
        let key = cache_key(method, &url);
        self.inner.cache.borrow_mut().remove(&key);
    }

    /// Issues a request through the cache/dedup pipeline.
    ///
    /// Cacheable GETs (`use_cache` and no non-GET method) are served from the
    /// cache while unexpired. Concurrent callers for the same method+URL share
    /// a single network call and observe the same resolution, success or
    /// failure. With `use_cache` false the cache is neither read nor written.
    pub async fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
        use_cache: bool,
    ) -> Result<Value, Error> {
        let url = join_url(&self.inner.base_url, endpoint);
        let method = options.method;
        let key = cache_key(method, &url);
        let cacheable = use_cache && method == Method::Get;

        if cacheable {
            if let Some(fresh) = self.cache_lookup(&key) {
                return Ok(fresh);
            }
        }

        let existing = self.inner.pending.borrow().get(&key).cloned();
        if let Some(pending) = existing {
            return pending.await;
        }

        let inner = Rc::clone(&self.inner);
        let request = build_request(method, url, options.headers, options.body);
        let key_for_store = key.clone();
        let call: PendingFuture = async move {
            let response = inner.transport.send(request).await?;
            let value = decode_response(response)?;
            if cacheable {
                let now = inner.clock.now_ms();
                inner.cache.borrow_mut().insert(
                    key_for_store,
                    CacheEntry {
                        data: value.clone(),
                        expires_at: now + CACHE_TTL_MS,
                    },
                );
            }
            Ok(value)
        }
        .boxed_local()
        .shared();

        self.inner
            .pending
            .borrow_mut()
            .insert(key.clone(), call.clone());
        let result = call.await;
        self.inner.pending.borrow_mut().remove(&key);
        result
    }

    /// Sends a request straight through the transport, skipping the cache and
    /// the in-flight map. Auth transitions (login/logout) use this so they are
    /// never served stale or coalesced with an unrelated call.
    pub async fn send_direct(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Value, Error> {
        let url = join_url(&self.inner.base_url, endpoint);
        let request = build_request(options.method, url, options.headers, options.body);
        let response = self.inner.transport.send(request).await?;
        decode_response(response)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        use_cache: bool,
    ) -> Result<T, Error> {
        let value = self
            .request(endpoint, RequestOptions::default(), use_cache)
            .await?;
        from_value(value)
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Error> {
        let payload = to_value(body)?;
        let value = self
            .request(endpoint, RequestOptions::json(Method::Post, payload), false)
            .await?;
        from_value(value)
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Error> {
        let payload = to_value(body)?;
        let value = self
            .request(endpoint, RequestOptions::json(Method::Put, payload), false)
            .await?;
        from_value(value)
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        parts: Vec<Part>,
    ) -> Result<T, Error> {
        let value = self
            .request(endpoint, RequestOptions::multipart(parts), false)
            .await?;
        from_value(value)
    }

    fn cache_lookup(&self, key: &str) -> Option<Value> {
        let cache = self.inner.cache.borrow();
        let entry = cache.get(key)?;
        if self.inner.clock.now_ms() < entry.expires_at {
            Some(entry.data.clone())
        } else {
            None
        }
    }
}

pub(crate) fn to_value<B: Serialize>(body: &B) -> Result<Value, Error> {
    serde_json::to_value(body)
        .map_err(|err| Error::Serialization(format!("Failed to encode request: {err}")))
}

pub(crate) fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value)
        .map_err(|err| Error::Parse(format!("Failed to decode response: {err}")))
}

fn build_request(
    method: Method,
    url: String,
    mut headers: Vec<(String, String)>,
    body: Option<Body>,
) -> HttpRequest {
    // JSON bodies get an explicit content type; multipart bodies must not,
    // the browser supplies the boundary.
    let has_content_type = headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
    if matches!(body, Some(Body::Json(_))) && !has_content_type {
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
    }
    HttpRequest {
        method,
        url,
        headers,
        body,
    }
}

fn decode_response(response: HttpResponse) -> Result<Value, Error> {
    if response.is_success() {
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body)
            .map_err(|err| Error::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(error::error_from_response(response.status, &response.body))
    }
}

pub(crate) fn cache_key(method: Method, url: &str) -> String {
    format!("{method}:{url}")
}

/// Joins the configured base URL and a path, tolerating stray slashes. An
/// empty base degrades to the bare path so same-origin deployments work.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_slashes_and_empty_base() {
        assert_eq!(
            join_url("https://api.aqari.app/", "/api/deals"),
            "https://api.aqari.app/api/deals"
        );
        assert_eq!(
            join_url("https://api.aqari.app", "api/deals"),
            "https://api.aqari.app/api/deals"
        );
        assert_eq!(join_url("", "/api/deals"), "/api/deals");
        assert_eq!(join_url("  ", "/api/deals"), "/api/deals");
    }

    #[test]
    fn cache_key_includes_method_and_url() {
        assert_eq!(
            cache_key(Method::Get, "https://api.aqari.app/users/me"),
            "GET:https://api.aqari.app/users/me"
        );
        assert_eq!(
            cache_key(Method::Post, "https://api.aqari.app/api/auth/login"),
            "POST:https://api.aqari.app/api/auth/login"
        );
    }

    #[test]
    fn json_bodies_get_content_type_multipart_does_not() {
        let json = build_request(
            Method::Post,
            "https://api.aqari.app/x".to_string(),
            Vec::new(),
            Some(Body::Json(serde_json::json!({"a": 1}))),
        );
        assert_eq!(json.header("content-type"), Some("application/json"));

        let multipart = build_request(
            Method::Post,
            "https://api.aqari.app/x".to_string(),
            Vec::new(),
            Some(Body::Multipart(vec![Part::text("field", "value")])),
        );
        assert_eq!(multipart.header("content-type"), None);
    }

    #[test]
    fn caller_supplied_content_type_is_not_duplicated() {
        let request = build_request(
            Method::Post,
            "https://api.aqari.app/x".to_string(),
            vec![("Content-Type".to_string(), "application/json".to_string())],
            Some(Body::Json(serde_json::json!({}))),
        );
        let count = request
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .count();
        assert_eq!(count, 1);
    }
}
