//! Auth session state and context. The provider hydrates the session once on
//! mount with cookie-based calls and re-hydrates when another tab announces
//! an auth transition. Only non-sensitive profile metadata is held in
//! memory; the credential itself stays in the `HttpOnly` cookie.
//!
//! A 401/403 right after an auth transition is usually the cookie still
//! propagating, so session reads run under the bounded retry policy before
//! the user is treated as signed out.

use gateway_client::{ApiClient, Error, RetryPolicy, Subscription, User};
use gloo_timers::future::TimeoutFuture;
use leptos::{prelude::*, task::spawn_local};

use crate::app::{use_api, ApiHandle};
use crate::app_lib::{storage, sync};
use crate::routes::paths;

#[derive(Clone, Copy)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    pub user: RwSignal<Option<User>>,
    pub subscription: RwSignal<Option<Subscription>>,
    pub is_loading: RwSignal<bool>,
    pub is_authenticated: Signal<bool>,
}

impl AuthContext {
    fn new() -> Self {
        let user = RwSignal::new(None::<User>);
        let subscription = RwSignal::new(None::<Subscription>);
        let is_loading = RwSignal::new(true);
        let is_authenticated = Signal::derive(move || user.get().is_some());
        Self {
            user,
            subscription,
            is_loading,
            is_authenticated,
        }
    }

    pub fn set_user(&self, user: User) {
        self.user.set(Some(user));
    }

    /// Clears the in-memory session, typically on logout or failed hydration.
    pub fn clear_session(&self) {
        self.user.set(None);
        self.subscription.set(None);
    }
}

/// Provides auth context, hydrates the session on mount, and re-hydrates on
/// cross-tab auth signals.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth);

    let api = use_api();
    let api_for_boot = api.clone();
    spawn_local(async move {
        hydrate_session(&api_for_boot, auth).await;
    });

    sync::listen_for_auth_changes(move || {
        let api = api.clone();
        spawn_local(async move {
            api.clear_cache();
            hydrate_session(&api, auth).await;
        });
    });

    view! { {children()} }
}

/// Returns the current auth context or a fallback empty context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(AuthContext::new)
}

/// Loads the current user and subscription into the context. User and
/// subscription are always fetched fresh; stale data here directly breaks
/// access-control UI.
pub async fn hydrate_session(api: &ApiClient, auth: AuthContext) {
    auth.is_loading.set(true);
    match load_user_with_retry(api).await {
        Ok(user) => {
            auth.user.set(Some(user));
            let subscription = api.subscription().await.ok().flatten();
            auth.subscription.set(subscription);
        }
        Err(_) => auth.clear_session(),
    }
    auth.is_loading.set(false);
}

/// Fetches `/users/me` under the session-load retry policy: 401/403 retried
/// with linear backoff on the theory that the cookie is still propagating,
/// anything else surfaced immediately.
pub async fn load_user_with_retry(api: &ApiClient) -> Result<User, Error> {
    let policy = RetryPolicy::session_load();
    let mut attempt = 0;
    loop {
        match api.current_user().await {
            Ok(user) => return Ok(user),
            Err(err) => {
                let Some(status) = err.status() else {
                    return Err(err);
                };
                if !policy.should_retry(status, attempt) {
                    return Err(err);
                }
                attempt += 1;
                TimeoutFuture::new(policy.delay_ms(attempt) as u32).await;
            }
        }
    }
}

/// Finalizes a successful credential exchange: remembers the device, clears
/// the cache, tells the other tabs, confirms the session with a round-trip,
/// then hard-navigates so every in-memory context re-initializes with the
/// cookie attached.
pub async fn complete_login(api: &ApiClient, remember_device: bool) -> Result<(), Error> {
    if remember_device {
        storage::mark_device_remembered();
    }
    api.clear_cache();
    sync::broadcast_auth_changed();
    load_user_with_retry(api).await?;
    hard_navigate(paths::DASHBOARD);
    Ok(())
}

/// Ends the session and returns to the landing page with a full reload.
/// Takes the `Copy` handle so event handlers can capture it freely.
pub fn sign_out(api: ApiHandle, auth: AuthContext) {
    spawn_local(async move {
        let api = api.get_value();
        let _ = api.logout().await;
        auth.clear_session();
        storage::clear_device_remembered();
        sync::broadcast_auth_changed();
        hard_navigate(paths::HOME);
    });
}

/// Full reload, not a client-side route change.
pub fn hard_navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}
