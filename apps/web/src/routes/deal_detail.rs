//! Deal detail: the primary lookup drives the page; the comparables lookup
//! is best-effort and never fails the page. A missing or malformed id gets
//! the full-page not-found treatment.

use gateway_client::Deal;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::app::use_api_handle;
use crate::components::{AppShell, Spinner};
use crate::routes::paths;

#[component]
pub fn DealDetailPage() -> impl IntoView {
    let api = use_api_handle();
    let params = use_params_map();
    let deal_id = Signal::derive(move || {
        params
            .read()
            .get("id")
            .and_then(|raw| raw.parse::<u64>().ok())
    });

    let detail = LocalResource::new(move || {
        let api = api.get_value();
        let id = deal_id.get();
        async move {
            match id {
                Some(id) => {
                    let deal = api.deal(id).await?;
                    // Comparables are secondary; a failed lookup renders as none.
                    let comparables = api.comparable_deals(id).await.unwrap_or_default();
                    Ok::<(Deal, Vec<Deal>), gateway_client::Error>((deal, comparables))
                }
                None => Err(gateway_client::Error::Config(
                    "Missing deal id.".to_string(),
                )),
            }
        }
    });

    view! {
        <AppShell>
            <Suspense fallback=|| view! { <div class="py-12 text-center"><Spinner /></div> }>
                {move || {
                    detail.get().map(|result| match result {
                        Ok((deal, comparables)) => view! {
                            <div class="space-y-8">
                                <div>
                                    <A
                                        href=paths::DEALS
                                        {..}
                                        class="text-sm text-gray-500 hover:text-gray-900 dark:hover:text-white"
                                    >
                                        "← Back to deals"
                                    </A>
                                    <h1 class="mt-2 text-2xl font-semibold text-gray-900 dark:text-white">
                                        {deal.name.clone()}
                                    </h1>
                                    <p class="text-gray-500 dark:text-gray-400">
                                        {format!("{}, {}", deal.area, deal.city)}
                                    </p>
                                </div>

                                <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
                                    <DetailStat label="Asking price (AED)" value=deal.price.to_string() />
                                    <DetailStat
                                        label="Estimated value (AED)"
                                        value=deal
                                            .estimated_value
                                            .map(|value| value.to_string())
                                            .unwrap_or_else(|| "—".to_string())
                                    />
                                    <DetailStat
                                        label="Discount"
                                        value=deal
                                            .discount_percent()
                                            .map(|value| format!("{value:.1}%"))
                                            .unwrap_or_else(|| "—".to_string())
                                    />
                                    <DetailStat
                                        label="Layout"
                                        value=format!("{} BR, {}", deal.bedroom_count, deal.building_status)
                                    />
                                </div>

                                <div>
                                    <h2 class="text-lg font-semibold text-gray-900 dark:text-white">
                                        "Comparable listings"
                                    </h2>
                                    {if comparables.is_empty() {
                                        view! {
                                            <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                                                "No comparable listings available."
                                            </p>
                                        }
                                        .into_any()
                                    } else {
                                        view! {
                                            <ul class="mt-2 space-y-2">
                                                {comparables
                                                    .into_iter()
                                                    .map(|comparable| {
                                                        let href = format!("{}/{}", paths::DEALS, comparable.id);
                                                        view! {
                                                            <li class="flex items-center justify-between rounded-lg border border-gray-200 p-3 text-sm dark:border-gray-700">
                                                                <A href=href>{comparable.name}</A>
                                                                <span class="text-gray-500 dark:text-gray-400">
                                                                    {format!("AED {}", comparable.price)}
                                                                </span>
                                                            </li>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </ul>
                                        }
                                        .into_any()
                                    }}
                                </div>
                            </div>
                        }
                        .into_any(),
                        Err(_) => view! {
                            <div class="max-w-lg mx-auto text-center py-16 space-y-4">
                                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                    "Deal not found"
                                </h1>
                                <p class="text-gray-500 dark:text-gray-400">
                                    "This listing may have been sold or withdrawn."
                                </p>
                                <A
                                    href=paths::DEALS
                                    {..}
                                    class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-white bg-teal-700 rounded-lg hover:bg-teal-800"
                                >
                                    "Browse current deals"
                                </A>
                            </div>
                        }
                        .into_any(),
                    })
                }}
            </Suspense>
        </AppShell>
    }
}

#[component]
fn DetailStat(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="rounded-xl border border-gray-200 p-4 dark:border-gray-700">
            <p class="text-xs uppercase tracking-wide text-gray-500 dark:text-gray-400">{label}</p>
            <p class="mt-1 text-lg font-semibold text-gray-900 dark:text-white">{value}</p>
        </div>
    }
}
