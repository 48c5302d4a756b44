use crate::app::{use_api_handle, use_config};
use crate::app_lib::storage;
use crate::components::{AppShell, Spinner};
use crate::routes::paths;
use gateway_client::LandingSection;
use leptos::prelude::*;
use leptos_router::components::A;

/// Marketing landing page. Section copy comes from the API per language and
/// is best-effort: a failed lookup falls back to built-in copy instead of
/// failing the page.
#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_api_handle();
    let config = use_config();
    let language = RwSignal::new(
        storage::selected_language().unwrap_or_else(|| config.default_language.clone()),
    );

    let hero = LocalResource::new(move || {
        let api = api.get_value();
        let language = language.get();
        async move { api.landing_section("hero", &language).await.ok() }
    });
    let highlights = LocalResource::new(move || {
        let api = api.get_value();
        let language = language.get();
        async move { api.landing_section("highlights", &language).await.ok() }
    });

    let switch_language = move |code: &'static str| {
        storage::set_selected_language(code);
        language.set(code.to_string());
    };

    view! {
        <AppShell>
            <div class="space-y-12">
                <div class="flex justify-end gap-2 text-sm">
                    <button
                        class="text-gray-500 hover:text-gray-900 dark:hover:text-white cursor-pointer"
                        class:font-semibold=move || language.get() == "en"
                        on:click=move |_| switch_language("en")
                    >
                        "English"
                    </button>
                    <span class="text-gray-300">"|"</span>
                    <button
                        class="text-gray-500 hover:text-gray-900 dark:hover:text-white cursor-pointer"
                        class:font-semibold=move || language.get() == "ar"
                        on:click=move |_| switch_language("ar")
                    >
                        "العربية"
                    </button>
                </div>

                <Suspense fallback=|| view! { <div class="py-16 text-center"><Spinner /></div> }>
                    {move || {
                        hero.get().map(|section| {
                            let section = section.unwrap_or_else(default_hero);
                            view! {
                                <section class="text-center space-y-4 py-8">
                                    <h1 class="text-4xl font-bold text-gray-900 dark:text-white">
                                        {section.title}
                                    </h1>
                                    <p class="max-w-2xl mx-auto text-lg text-gray-500 dark:text-gray-400">
                                        {section.body}
                                    </p>
                                    <div class="flex justify-center gap-3 pt-2">
                                        <A
                                            href=paths::DEALS
                                            {..}
                                            class="px-5 py-2.5 text-sm font-medium text-white bg-teal-700 rounded-lg hover:bg-teal-800"
                                        >
                                            "Browse deals"
                                        </A>
                                        <A
                                            href=paths::SIGNUP
                                            {..}
                                            class="px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600"
                                        >
                                            "Create an account"
                                        </A>
                                    </div>
                                </section>
                            }
                        })
                    }}
                </Suspense>

                <Suspense fallback=|| ()>
                    {move || {
                        highlights.get().map(|section| {
                            let section = section.unwrap_or_else(default_highlights);
                            view! {
                                <section class="rounded-2xl border border-gray-200 bg-gray-50 p-8 dark:border-gray-700 dark:bg-gray-800">
                                    <h2 class="text-xl font-semibold text-gray-900 dark:text-white">
                                        {section.title}
                                    </h2>
                                    <p class="mt-2 text-gray-500 dark:text-gray-400">{section.body}</p>
                                </section>
                            }
                        })
                    }}
                </Suspense>
            </div>
        </AppShell>
    }
}

fn default_hero() -> LandingSection {
    LandingSection {
        name: "hero".to_string(),
        language: "en".to_string(),
        title: "Find underpriced Dubai property before anyone else".to_string(),
        body: "Aqari scans the market daily and surfaces listings priced below their \
               estimated value, with the numbers to back it up."
            .to_string(),
    }
}

fn default_highlights() -> LandingSection {
    LandingSection {
        name: "highlights".to_string(),
        language: "en".to_string(),
        title: "Deals, reports, and analyst support in one place".to_string(),
        body: "Filter by community and building status, track discounts against \
               estimated values, and request a full analysis from our team."
            .to_string(),
    }
}
