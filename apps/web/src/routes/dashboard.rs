use crate::app::use_api_handle;
use crate::components::{AppShell, Spinner};
use crate::features::auth::guards::RequireAuth;
use crate::features::auth::state::use_auth;
use crate::routes::paths;
use gateway_client::DealFilters;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api_handle();

    // Headline numbers only; the deals browser owns filtering.
    let summary = LocalResource::new(move || {
        let api = api.get_value();
        async move { api.deals(0, 5, &DealFilters::default()).await }
    });

    view! {
        <RequireAuth>
            <AppShell>
                <div class="space-y-8">
                    <div>
                        <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                            {move || {
                                auth.user
                                    .get()
                                    .map(|user| format!("Welcome back, {}", user.name))
                                    .unwrap_or_else(|| "Welcome back".to_string())
                            }}
                        </h1>
                        <p class="text-gray-500 dark:text-gray-400">
                            {move || {
                                auth.user
                                    .get()
                                    .map(|user| format!("Plan: {}", user.tier))
                                    .unwrap_or_default()
                            }}
                        </p>
                    </div>

                    <Suspense fallback=|| view! { <Spinner /> }>
                        {move || {
                            summary.get().map(|result| match result {
                                Ok(page) => view! {
                                    <div class="grid gap-4 sm:grid-cols-2">
                                        <div class="rounded-xl border border-gray-200 p-6 dark:border-gray-700">
                                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                                "Deals on the market"
                                            </p>
                                            <p class="text-3xl font-bold text-gray-900 dark:text-white">
                                                {page.total_elements}
                                            </p>
                                        </div>
                                        <div class="rounded-xl border border-gray-200 p-6 dark:border-gray-700">
                                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                                "Latest listings"
                                            </p>
                                            <ul class="mt-2 space-y-1 text-sm text-gray-900 dark:text-gray-200">
                                                {page
                                                    .content
                                                    .iter()
                                                    .map(|deal| view! { <li>{deal.name.clone()}</li> })
                                                    .collect_view()}
                                            </ul>
                                        </div>
                                    </div>
                                }
                                .into_any(),
                                Err(err) => view! {
                                    <p class="text-sm text-gray-500 dark:text-gray-400">
                                        {format!("Market summary unavailable: {err}")}
                                    </p>
                                }
                                .into_any(),
                            })
                        }}
                    </Suspense>

                    <div class="flex gap-3">
                        <A
                            href=paths::DEALS
                            {..}
                            class="px-5 py-2.5 text-sm font-medium text-white bg-teal-700 rounded-lg hover:bg-teal-800"
                        >
                            "Browse all deals"
                        </A>
                        <A
                            href=paths::ANALYSIS
                            {..}
                            class="px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600"
                        >
                            "Request an analysis"
                        </A>
                    </div>
                </div>
            </AppShell>
        </RequireAuth>
    }
}
