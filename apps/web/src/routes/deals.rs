//! Deals browser: server-side filters (city, area, bedrooms, building
//! status) with pagination, plus the client-side price-range post-filter.
//! The backend does not accept price bounds, so the range is applied to the
//! fetched page only.

use gateway_client::{apply_price_filter, Deal, DealFilters};
use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_api_handle;
use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::routes::paths;

const PAGE_SIZE: u32 = 20;

#[component]
pub fn DealsPage() -> impl IntoView {
    let api = use_api_handle();

    let (page, set_page) = signal(0u32);
    let (city, set_city) = signal(String::new());
    let (area, set_area) = signal(String::new());
    let (bedrooms, set_bedrooms) = signal(String::new());
    let (status, set_status) = signal(String::new());
    let (min_price, set_min_price) = signal(String::new());
    let (max_price, set_max_price) = signal(String::new());

    let filters = Signal::derive(move || DealFilters {
        city: non_empty(city.get()),
        area: non_empty(area.get()),
        bedroom_count: bedrooms.get().trim().parse().ok(),
        building_status: non_empty(status.get()),
    });

    let listing = LocalResource::new(move || {
        let api = api.get_value();
        let page = page.get();
        let filters = filters.get();
        async move { api.deals(page, PAGE_SIZE, &filters).await }
    });

    // Server-side filter changes restart pagination.
    Effect::new(move |previous: Option<DealFilters>| {
        let current = filters.get();
        if previous.is_some_and(|previous| previous != current) {
            set_page.set(0);
        }
        current
    });

    let visible_deals = move |deals: Vec<Deal>| {
        apply_price_filter(
            deals,
            min_price.get().trim().parse().ok(),
            max_price.get().trim().parse().ok(),
        )
    };

    let field_class = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-teal-500 focus:border-teal-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white";

    view! {
        <AppShell>
            <div class="space-y-6">
                <div>
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Deals"</h1>
                    <p class="text-gray-500 dark:text-gray-400">
                        "Listings priced against their estimated value, refreshed daily."
                    </p>
                </div>

                <div class="grid gap-3 sm:grid-cols-3 lg:grid-cols-6">
                    <input
                        type="text"
                        class=field_class
                        placeholder="City"
                        on:input=move |event| set_city.set(event_target_value(&event))
                    />
                    <input
                        type="text"
                        class=field_class
                        placeholder="Area"
                        on:input=move |event| set_area.set(event_target_value(&event))
                    />
                    <input
                        type="text"
                        inputmode="numeric"
                        class=field_class
                        placeholder="Bedrooms"
                        on:input=move |event| set_bedrooms.set(event_target_value(&event))
                    />
                    <select
                        class=field_class
                        on:change=move |event| set_status.set(event_target_value(&event))
                    >
                        <option value="">"Any status"</option>
                        <option value="ready">"Ready"</option>
                        <option value="offplan">"Off-plan"</option>
                    </select>
                    <input
                        type="text"
                        inputmode="numeric"
                        class=field_class
                        placeholder="Min price (AED)"
                        on:input=move |event| set_min_price.set(event_target_value(&event))
                    />
                    <input
                        type="text"
                        inputmode="numeric"
                        class=field_class
                        placeholder="Max price (AED)"
                        on:input=move |event| set_max_price.set(event_target_value(&event))
                    />
                </div>

                <Suspense fallback=|| view! { <div class="py-12 text-center"><Spinner /></div> }>
                    {move || {
                        listing.get().map(|result| match result {
                            Ok(listing_page) => {
                                let deals = visible_deals(listing_page.content.clone());
                                let total_pages = listing_page.total_pages;
                                view! {
                                    <div class="space-y-4">
                                        <p class="text-sm text-gray-500 dark:text-gray-400">
                                            {format!(
                                                "{} deals on the market, page {} of {}",
                                                listing_page.total_elements,
                                                page.get() + 1,
                                                total_pages.max(1),
                                            )}
                                        </p>
                                        <div class="overflow-x-auto rounded-xl border border-gray-200 dark:border-gray-700">
                                            <table class="w-full text-sm text-left text-gray-600 dark:text-gray-300">
                                                <thead class="text-xs uppercase bg-gray-50 text-gray-500 dark:bg-gray-800 dark:text-gray-400">
                                                    <tr>
                                                        <th class="px-4 py-3">"Listing"</th>
                                                        <th class="px-4 py-3">"Area"</th>
                                                        <th class="px-4 py-3">"Beds"</th>
                                                        <th class="px-4 py-3">"Status"</th>
                                                        <th class="px-4 py-3">"Price (AED)"</th>
                                                        <th class="px-4 py-3">"Discount"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    {deals
                                                        .into_iter()
                                                        .map(|deal| {
                                                            let href = format!("{}/{}", paths::DEALS, deal.id);
                                                            let discount = deal
                                                                .discount_percent()
                                                                .map(|value| format!("{value:.1}%"))
                                                                .unwrap_or_else(|| "—".to_string());
                                                            view! {
                                                                <tr class="border-t border-gray-100 hover:bg-gray-50 dark:border-gray-700 dark:hover:bg-gray-800">
                                                                    <td class="px-4 py-3 font-medium text-gray-900 dark:text-white">
                                                                        <A href=href>{deal.name}</A>
                                                                    </td>
                                                                    <td class="px-4 py-3">{deal.area}</td>
                                                                    <td class="px-4 py-3">{deal.bedroom_count}</td>
                                                                    <td class="px-4 py-3">{deal.building_status}</td>
                                                                    <td class="px-4 py-3">{format_price(deal.price)}</td>
                                                                    <td class="px-4 py-3">{discount}</td>
                                                                </tr>
                                                            }
                                                        })
                                                        .collect_view()}
                                                </tbody>
                                            </table>
                                        </div>
                                        <div class="flex items-center justify-between">
                                            <button
                                                class="px-4 py-2 text-sm font-medium text-gray-700 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 disabled:opacity-50 disabled:cursor-not-allowed dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 cursor-pointer"
                                                disabled=move || page.get() == 0
                                                on:click=move |_| set_page.update(|page| *page = page.saturating_sub(1))
                                            >
                                                "Previous"
                                            </button>
                                            <button
                                                class="px-4 py-2 text-sm font-medium text-gray-700 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 disabled:opacity-50 disabled:cursor-not-allowed dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 cursor-pointer"
                                                disabled=move || page.get() + 1 >= total_pages.max(1)
                                                on:click=move |_| set_page.update(|page| *page += 1)
                                            >
                                                "Next"
                                            </button>
                                        </div>
                                    </div>
                                }
                                .into_any()
                            }
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

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn format_price(price: u64) -> String {
    let raw = price.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (offset, digit) in raw.chars().enumerate() {
        if offset > 0 && (raw.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
