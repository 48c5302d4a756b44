use std::rc::Rc;

use gateway_client::ApiClient;
use leptos::prelude::*;
use leptos_router::components::Router;

use crate::app_lib::api::{BrowserClock, BrowserTransport};
use crate::app_lib::config::AppConfig;
use crate::features::auth::state::AuthProvider;
use crate::routes::AppRoutes;

/// Handle under which the gateway client is provided. The client holds `Rc`
/// internals, so the value lives in arena-local storage; the handle itself
/// is plain `Copy` data and safe to capture in any closure.
pub type ApiHandle = StoredValue<ApiClient, LocalStorage>;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    let client = ApiClient::new(
        config.api_base_url.clone(),
        Rc::new(BrowserTransport),
        Rc::new(BrowserClock),
    );
    provide_context(config);
    provide_context::<ApiHandle>(StoredValue::new_local(client));

    view! {
        <AuthProvider>
            <Router>
                <AppRoutes />
            </Router>
        </AuthProvider>
    }
}

/// Returns the gateway client handle. Falls back to a freshly constructed
/// client for detached contexts, mirroring the auth context fallback.
pub fn use_api_handle() -> ApiHandle {
    use_context::<ApiHandle>().unwrap_or_else(|| {
        let config = AppConfig::load();
        StoredValue::new_local(ApiClient::new(
            config.api_base_url,
            Rc::new(BrowserTransport),
            Rc::new(BrowserClock),
        ))
    })
}

/// Resolves the injected gateway client.
pub fn use_api() -> ApiClient {
    use_api_handle().get_value()
}

/// Returns the application config from context, loading it on demand when
/// called outside the app tree.
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_else(AppConfig::load)
}
