use crate::components::AppShell;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="max-w-lg mx-auto text-center py-16 space-y-4">
                <p class="text-6xl font-bold text-gray-200 dark:text-gray-700">"404"</p>
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                    "Page not found"
                </h1>
                <p class="text-gray-500 dark:text-gray-400">
                    "The page you are looking for does not exist or has moved."
                </p>
                <A
                    href=paths::HOME
                    {..}
                    class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-white bg-teal-700 rounded-lg hover:bg-teal-800"
                >
                    "Back to home"
                </A>
            </div>
        </AppShell>
    }
}
