//! Shared layout wrapper with navigation and content container. It
//! centralizes header markup and the mobile menu toggle so routes can focus
//! on content. Navigation remains client-side; the API enforces real access
//! control.

use crate::app::use_api_handle;
use crate::features::auth::state::{sign_out, use_auth};
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_location};

/// Wraps routes with a header and main content container.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let toggle_menu = move |_| {
        set_menu_open.update(|open| *open = !*open);
    };
    let auth = use_auth();
    let api = use_api_handle();
    let is_authenticated = auth.is_authenticated;
    let location = use_location();
    let on_login = move || location.pathname.get() == paths::LOGIN;

    let nav_link = "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100 md:hover:bg-transparent md:hover:text-teal-700 md:p-0 dark:text-white dark:hover:bg-gray-700 dark:hover:text-white md:dark:hover:bg-transparent";

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-gray-200 dark:bg-gray-900">
                <nav class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4">
                    <A href=paths::HOME {..} class="flex items-center space-x-2">
                        <span class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white">
                            "Aqari"
                        </span>
                        <span class="text-xs uppercase tracking-[0.2em] text-gray-400">
                            "Deal discovery"
                        </span>
                    </A>
                    <button
                        type="button"
                        class="inline-flex items-center p-2 w-10 h-10 justify-center text-sm text-gray-500 rounded-lg md:hidden hover:bg-gray-100 focus:outline-none focus:ring-2 focus:ring-gray-200 dark:text-gray-400 dark:hover:bg-gray-700 dark:focus:ring-gray-600"
                        aria-expanded=move || menu_open.get().to_string()
                        on:click=toggle_menu
                    >
                        <span class="sr-only">"Open main menu"</span>
                        <span class="material-symbols-outlined">"menu"</span>
                    </button>
                    <div
                        class="w-full md:block md:w-auto"
                        class:hidden=move || !menu_open.get()
                    >
                        <ul class="font-medium flex flex-col p-4 md:p-0 mt-4 border border-gray-100 rounded-lg bg-gray-50 md:flex-row md:items-center md:space-x-8 md:mt-0 md:border-0 md:bg-transparent dark:bg-gray-800 md:dark:bg-transparent dark:border-gray-700">
                            <li>
                                <A href=paths::DEALS {..} class=nav_link>"Deals"</A>
                            </li>
                            <li>
                                <A href=paths::ANALYSIS {..} class=nav_link>"Request analysis"</A>
                            </li>
                            <Show when=move || is_authenticated.get()>
                                <li>
                                    <A href=paths::DASHBOARD {..} class=nav_link>"Dashboard"</A>
                                </li>
                                <li>
                                    <A href=paths::ACCOUNT {..} class=nav_link>"Account"</A>
                                </li>
                                <li>
                                    <button
                                        class="block py-2 px-3 text-gray-500 hover:text-gray-900 md:p-0 dark:text-gray-400 dark:hover:text-white cursor-pointer"
                                        on:click=move |_| sign_out(api, auth)
                                    >
                                        "Sign out"
                                    </button>
                                </li>
                            </Show>
                            <Show when=move || !is_authenticated.get() && !on_login()>
                                <li>
                                    <A
                                        href=paths::LOGIN
                                        {..}
                                        class="inline-flex items-center px-4 py-2 text-sm font-medium text-white bg-teal-700 rounded-lg hover:bg-teal-800 dark:bg-teal-600 dark:hover:bg-teal-700"
                                    >
                                        "Sign in"
                                    </A>
                                </li>
                            </Show>
                        </ul>
                    </div>
                </nav>
            </header>
            <main class="flex-1 max-w-screen-xl w-full mx-auto px-4 py-8">{children()}</main>
            <footer class="border-t border-gray-200 dark:border-gray-700">
                <div class="max-w-screen-xl mx-auto px-4 py-6 text-sm text-gray-500 dark:text-gray-400">
                    "Aqari — Dubai property deal discovery"
                </div>
            </footer>
        </div>
    }
}
