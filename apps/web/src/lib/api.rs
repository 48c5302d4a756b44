//! Browser transport for the gateway client: `fetch` via `gloo-net`, cookies
//! always included, and an abort-based timeout so the UI never hangs on a
//! stalled request. The gateway core owns caching, deduplication, and error
//! normalization; this layer only moves bytes.

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gateway_client::{Body, Clock, Error, HttpRequest, HttpResponse, Method, Part, PartValue, Transport};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::callback::Timeout;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData, RequestCredentials};

/// Transport-level timeout (milliseconds) applied to every request.
const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// `fetch`-backed transport. Stateless; the gateway client wraps it in `Rc`.
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, Error>> {
        send_browser(request).boxed_local()
    }
}

/// Wall-clock source for cache expiry.
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

async fn send_browser(request: HttpRequest) -> Result<HttpResponse, Error> {
    let controller = AbortController::new()
        .map_err(|_| Error::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let mut builder = builder_for(request.method, &request.url)
        .credentials(RequestCredentials::Include)
        .abort_signal(Some(&signal));
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let built = match request.body {
        None => builder.build(),
        Some(Body::Json(value)) => builder.body(value.to_string()),
        Some(Body::Multipart(parts)) => {
            let form = build_form_data(&parts)?;
            builder.body(form)
        }
    }
    .map_err(|err| Error::Serialization(format!("Failed to build request: {err}")))?;

    let response = built.send().await.map_err(map_request_error)?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Ok(HttpResponse { status, body })
}

fn builder_for(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
}

/// Assembles a `FormData` body. File parts become blobs with their own
/// content type; the multipart boundary is left to the browser.
fn build_form_data(parts: &[Part]) -> Result<FormData, Error> {
    let form = FormData::new()
        .map_err(|_| Error::Serialization("Failed to build form data.".to_string()))?;

    for part in parts {
        let appended = match &part.value {
            PartValue::Text(value) => form.append_with_str(&part.name, value),
            PartValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let array = js_sys::Array::new();
                array.push(&js_sys::Uint8Array::from(bytes.as_slice()));
                let options = BlobPropertyBag::new();
                options.set_type(content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&array, &options)
                    .map_err(|_| {
                        Error::Serialization(format!("Failed to encode attachment {file_name}."))
                    })?;
                form.append_with_blob_and_filename(&part.name, &blob, file_name)
            }
        };
        appended.map_err(|_| {
            Error::Serialization(format!("Failed to append form field {}.", part.name))
        })?;
    }

    Ok(form)
}

/// Maps network failures into user-facing errors with timeout detection.
fn map_request_error(err: gloo_net::Error) -> Error {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        Error::Timeout("Request timed out. Please try again.".to_string())
    } else {
        Error::Network(format!("Unable to reach the server: {message}"))
    }
}
