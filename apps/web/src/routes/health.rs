use crate::app::use_api_handle;
use crate::app_lib::build_info;
use crate::components::{Alert, AlertKind, AppShell, Spinner};
use leptos::prelude::*;

/// Shows API reachability and the frontend build. Useful for deploy checks.
#[component]
pub fn HealthPage() -> impl IntoView {
    let api = use_api_handle();
    let status = LocalResource::new(move || {
        let api = api.get_value();
        async move { api.health().await }
    });

    view! {
        <AppShell>
            <div class="max-w-lg mx-auto space-y-4">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Health"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "Frontend build " <code>{build_info::git_commit_hash()}</code>
                </p>
                <Suspense fallback=|| view! { <Spinner /> }>
                    {move || {
                        status.get().map(|result| match result {
                            Ok(health) => view! {
                                <Alert
                                    kind=AlertKind::Success
                                    message=format!("{} {} is {}", health.name, health.version, health.status)
                                />
                            }
                            .into_any(),
                            Err(err) => view! {
                                <Alert kind=AlertKind::Error message=err.to_string() />
                            }
                            .into_any(),
                        })
                    }}
                </Suspense>
            </div>
        </AppShell>
    }
}
