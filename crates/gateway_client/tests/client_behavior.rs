//! Behavior tests for the request pipeline: deduplication, cache TTL, cache
//! bypass, multipart headers, and the auth/deals scenarios, all driven
//! against a scripted transport and a hand-advanced clock.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::FutureExt;
use gateway_client::{
    deals_path, ApiClient, Clock, DealFilters, Error, HttpRequest, HttpResponse, LoginRequest,
    Method, Page, Part, RequestOptions, Transport, VerifyDeviceRequest, VerifyEmailRequest,
};
use serde_json::{json, Value};

const BASE: &str = "https://api.aqari.test";

struct FakeClock {
    now: Cell<u64>,
}

impl FakeClock {
    fn new() -> Rc<Self> {
        Rc::new(Self { now: Cell::new(1_000) })
    }

    fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

struct FakeTransport {
    calls: RefCell<Vec<HttpRequest>>,
    responses: RefCell<VecDeque<Result<HttpResponse, Error>>>,
    yield_before_reply: bool,
}

impl FakeTransport {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            calls: RefCell::new(Vec::new()),
            responses: RefCell::new(VecDeque::new()),
            yield_before_reply: false,
        })
    }

    /// Transport that stays pending for one scheduler turn before replying,
    /// so concurrent callers can pile onto the in-flight entry.
    fn slow() -> Rc<Self> {
        Rc::new(Self {
            calls: RefCell::new(Vec::new()),
            responses: RefCell::new(VecDeque::new()),
            yield_before_reply: true,
        })
    }

    fn push_ok(&self, body: Value) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        }));
    }

    fn push_status(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn call(&self, index: usize) -> HttpRequest {
        self.calls.borrow()[index].clone()
    }
}

impl Transport for FakeTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> futures::future::LocalBoxFuture<'static, Result<HttpResponse, Error>> {
        self.calls.borrow_mut().push(request);
        let response = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse { status: 200, body: "{}".to_string() }));
        let pause = self.yield_before_reply;
        async move {
            if pause {
                tokio::task::yield_now().await;
            }
            response
        }
        .boxed_local()
    }
}

fn client_with(transport: Rc<FakeTransport>, clock: Rc<FakeClock>) -> ApiClient {
    ApiClient::new(BASE, transport, clock)
}

#[tokio::test]
async fn concurrent_identical_requests_share_one_network_call() {
    let transport = FakeTransport::slow();
    let clock = FakeClock::new();
    transport.push_ok(json!({"value": 42}));
    let client = client_with(Rc::clone(&transport), clock);

    let first = client.get_json::<Value>("/api/deals/7", false);
    let second = client.get_json::<Value>("/api/deals/7", false);
    let (first, second) = futures::join!(first, second);

    assert_eq!(first.expect("first"), json!({"value": 42}));
    assert_eq!(second.expect("second"), json!({"value": 42}));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn concurrent_callers_observe_the_same_failure() {
    let transport = FakeTransport::slow();
    let clock = FakeClock::new();
    transport.push_status(500, r#"{"error":"boom"}"#);
    let client = client_with(Rc::clone(&transport), clock);

    let first = client.get_json::<Value>("/api/deals/7", false);
    let second = client.get_json::<Value>("/api/deals/7", false);
    let (first, second) = futures::join!(first, second);

    let first = first.expect_err("first should fail");
    let second = second.expect_err("second should fail");
    assert_eq!(first, second);
    assert_eq!(first.status(), Some(500));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn different_urls_are_not_coalesced() {
    let transport = FakeTransport::slow();
    let clock = FakeClock::new();
    transport.push_ok(json!({"id": 1}));
    transport.push_ok(json!({"id": 2}));
    let client = client_with(Rc::clone(&transport), clock);

    let first = client.get_json::<Value>("/api/deals/1", false);
    let second = client.get_json::<Value>("/api/deals/2", false);
    let _ = futures::join!(first, second);

    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn cached_get_is_served_until_the_ttl_expires() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();
    transport.push_ok(json!({"generation": 1}));
    transport.push_ok(json!({"generation": 2}));
    let client = client_with(Rc::clone(&transport), Rc::clone(&clock));

    let first: Value = client.get_json("/api/deals?page=0&size=20", true).await.expect("first");
    assert_eq!(first, json!({"generation": 1}));

    clock.advance(gateway_client::CACHE_TTL_MS - 1);
    let cached: Value = client.get_json("/api/deals?page=0&size=20", true).await.expect("cached");
    assert_eq!(cached, json!({"generation": 1}));
    assert_eq!(transport.call_count(), 1);

    clock.advance(1);
    let refreshed: Value = client.get_json("/api/deals?page=0&size=20", true).await.expect("refreshed");
    assert_eq!(refreshed, json!({"generation": 2}));
    assert_eq!(transport.call_count(), 2);

    // the replacement entry is fresh again
    let replayed: Value = client.get_json("/api/deals?page=0&size=20", true).await.expect("replayed");
    assert_eq!(replayed, json!({"generation": 2}));
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn uncached_requests_never_read_or_write_the_cache() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();
    transport.push_ok(json!({"generation": 1}));
    transport.push_ok(json!({"generation": 2}));
    transport.push_ok(json!({"generation": 3}));
    let client = client_with(Rc::clone(&transport), clock);

    // seed the cache for this key
    let _: Value = client.get_json("/users/me", true).await.expect("seed");

    // bypass reads: a fresh network call despite the cached entry
    let bypassed: Value = client.get_json("/users/me", false).await.expect("bypass");
    assert_eq!(bypassed, json!({"generation": 2}));

    // bypass writes: the cached entry still holds generation 1
    let cached: Value = client.get_json("/users/me", true).await.expect("cached");
    assert_eq!(cached, json!({"generation": 1}));
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn post_requests_are_not_cached() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();
    transport.push_ok(json!({"n": 1}));
    transport.push_ok(json!({"n": 2}));
    let client = client_with(Rc::clone(&transport), clock);

    let options = || RequestOptions::json(Method::Post, json!({"q": "x"}));
    let _ = client.request("/api/search", options(), true).await.expect("first");
    let second = client.request("/api/search", options(), true).await.expect("second");
    assert_eq!(second, json!({"n": 2}));
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn multipart_bodies_carry_no_content_type_header() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();
    transport.push_ok(json!({"id": 9, "status": "received"}));
    let client = client_with(Rc::clone(&transport), clock);

    let parts = vec![
        Part::text("city", "dubai"),
        Part::file("attachment", "floorplan.pdf", "application/pdf", vec![1, 2, 3]),
    ];
    let _ = client
        .submit_analysis_request(parts)
        .await
        .expect("submit");

    let request = transport.call(0);
    assert_eq!(request.method, Method::Post);
    assert!(request.url.ends_with("/api/analysis-requests"));
    assert_eq!(request.header("content-type"), None);
}

#[tokio::test]
async fn json_bodies_carry_the_json_content_type() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();
    transport.push_ok(json!({}));
    let client = client_with(Rc::clone(&transport), clock);

    let _ = client
        .request("/api/x", RequestOptions::json(Method::Post, json!({"a": 1})), false)
        .await
        .expect("post");

    assert_eq!(transport.call(0).header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn login_bypasses_the_cache_and_flushes_it() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();
    transport.push_ok(json!({"cached": "stale"}));
    transport.push_ok(json!({"requiresVerification": false}));
    transport.push_ok(json!({"cached": "fresh"}));
    let client = client_with(Rc::clone(&transport), clock);

    // warm the cache, then log in
    let _: Value = client.get_json("/api/deals", true).await.expect("warm");
    let response = client
        .login(&LoginRequest {
            email: "buyer@aqari.test".to_string(),
            password: "hunter2".to_string(),
            device_fingerprint: "abcd1234".to_string(),
        })
        .await
        .expect("login");
    assert!(!response.requires_verification);

    let login_call = transport.call(1);
    assert_eq!(login_call.method, Method::Post);
    assert!(login_call.url.ends_with("/api/auth/login"));

    // the pre-login cache entry must be gone
    let refreshed: Value = client.get_json("/api/deals", true).await.expect("refetch");
    assert_eq!(refreshed, json!({"cached": "fresh"}));
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn verification_falls_back_from_email_to_device() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();
    transport.push_status(404, r#"{"error":"verification record was not found"}"#);
    transport.push_ok(json!({"verified": true}));
    let client = client_with(Rc::clone(&transport), clock);

    let email_attempt = client
        .verify_email(&VerifyEmailRequest {
            email: "buyer@aqari.test".to_string(),
            code: "123456".to_string(),
        })
        .await;
    let err = email_attempt.expect_err("email verification should fail");
    assert!(err.is_verification_not_found());

    client
        .verify_device(&VerifyDeviceRequest {
            email: "buyer@aqari.test".to_string(),
            code: "123456".to_string(),
            device_fingerprint: "abcd1234".to_string(),
        })
        .await
        .expect("device verification");

    assert!(transport.call(0).url.ends_with("/api/auth/verify-email"));
    assert!(transport.call(1).url.ends_with("/api/auth/verify-device"));
    let device_body = transport.call(1).body.expect("body");
    match device_body {
        gateway_client::Body::Json(value) => {
            assert_eq!(value["code"], "123456");
            assert_eq!(value["deviceFingerprint"], "abcd1234");
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[tokio::test]
async fn paginated_deals_fetch_builds_the_documented_query() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();
    transport.push_ok(json!({
        "content": [{
            "id": 11,
            "name": "Creek Harbour 3BR",
            "city": "dubai",
            "area": "creek",
            "bedroomCount": 3,
            "buildingStatus": "ready",
            "price": 2_400_000u64
        }],
        "totalElements": 1,
        "totalPages": 1
    }));
    let client = client_with(Rc::clone(&transport), clock);

    let filters = DealFilters {
        city: Some("dubai".to_string()),
        ..DealFilters::default()
    };
    let page: Page<gateway_client::Deal> = client.deals(0, 20, &filters).await.expect("deals");

    assert_eq!(
        transport.call(0).url,
        format!("{BASE}{}", deals_path(0, 20, &filters))
    );
    assert!(transport.call(0).url.ends_with("/api/deals?page=0&size=20&city=dubai"));
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].bedroom_count, 3);
}

#[tokio::test]
async fn clear_cache_drops_cached_entries() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();
    transport.push_ok(json!({"n": 1}));
    transport.push_ok(json!({"n": 2}));
    let client = client_with(Rc::clone(&transport), clock);

    let _: Value = client.get_json("/api/deals", true).await.expect("first");
    client.clear_cache();
    let second: Value = client.get_json("/api/deals", true).await.expect("second");
    assert_eq!(second, json!({"n": 2}));
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn empty_success_bodies_decode_to_null() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();
    transport.push_status(204, "");
    let client = client_with(Rc::clone(&transport), clock);

    let value = client
        .request("/api/auth/logout", RequestOptions { method: Method::Post, ..RequestOptions::default() }, false)
        .await
        .expect("logout");
    assert_eq!(value, Value::Null);
}
