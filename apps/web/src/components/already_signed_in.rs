use crate::app::use_api_handle;
use crate::features::auth::state::{sign_out, use_auth};
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

/// Renders the signed-in state for auth routes (login/signup).
#[component]
pub fn AlreadySignedInPanel() -> impl IntoView {
    let auth = use_auth();
    let api = use_api_handle();
    let user_email = Signal::derive(move || {
        auth.user
            .get()
            .map(|user| user.email)
            .unwrap_or_default()
    });

    view! {
        <div class="max-w-sm mx-auto text-center space-y-6 py-8">
            <div class="space-y-2">
                <h2 class="text-xl font-bold text-gray-900 dark:text-white">
                    "Already signed in"
                </h2>
                <p class="text-gray-500 dark:text-gray-400">
                    "You are currently signed in as "
                    <span class="font-medium text-gray-900 dark:text-gray-200">
                        {move || user_email.get()}
                    </span> "."
                </p>
            </div>
            <div class="flex flex-col gap-3">
                <A
                    href=paths::DASHBOARD
                    {..}
                    class="w-full inline-flex justify-center items-center px-5 py-2.5 text-sm font-medium text-white bg-teal-700 rounded-lg hover:bg-teal-800 transition-all shadow-sm"
                >
                    "Go to dashboard"
                </A>
                <button
                    on:click=move |_| sign_out(api, auth)
                    class="w-full inline-flex justify-center items-center px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 dark:bg-gray-800 dark:text-gray-400 dark:border-gray-600 dark:hover:text-white dark:hover:bg-gray-700 transition-all"
                >
                    "Sign out"
                </button>
            </div>
        </div>
    }
}
