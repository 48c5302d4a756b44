//! Account page: profile update, subscription state, and checkout. The
//! profile PUT invalidates the cached user on the client; the subscription
//! is re-pulled when returning from an external checkout.

use gateway_client::{CheckoutSessionRequest, Error, UpdateProfileRequest};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::use_api_handle;
use crate::app_lib::storage;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::guards::RequireAuth;
use crate::features::auth::state::{hard_navigate, use_auth};

#[component]
pub fn AccountPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api_handle();

    let (name, set_name) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saved, set_saved) = signal(false);

    // Prefill the form once the session is hydrated.
    Effect::new(move |_| {
        if let Some(user) = auth.user.get() {
            if name.get_untracked().is_empty() {
                set_name.set(user.name);
            }
        }
    });

    // Returning from checkout: force a subscription re-pull.
    Effect::new(move |_| {
        if storage::take_subscription_resync() {
            let api = api.get_value();
            spawn_local(async move {
                if let Ok(subscription) = api.subscription().await {
                    auth.subscription.set(subscription);
                }
            });
        }
    });

    let save_action = Action::new_local(move |name: &String| {
        let name = name.clone();
        let api = api.get_value();
        async move { api.update_profile(&UpdateProfileRequest { name }).await }
    });

    Effect::new(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(user) => {
                    auth.set_user(user);
                    set_error.set(None);
                    set_saved.set(true);
                }
                Err(err) => {
                    set_saved.set(false);
                    set_error.set(Some(profile_error_message(&err)));
                }
            }
        }
    });

    let checkout_action = Action::new_local(move |plan: &String| {
        let plan = plan.clone();
        let api = api.get_value();
        async move {
            api.create_checkout_session(&CheckoutSessionRequest { plan_type: plan })
                .await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = checkout_action.value().get() {
            match result {
                Ok(session) => {
                    storage::request_subscription_resync();
                    hard_navigate(&session.url);
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let on_save = move |event: SubmitEvent| {
        event.prevent_default();
        set_saved.set(false);
        let name_value = name.get_untracked().trim().to_string();
        if name_value.is_empty() {
            set_error.set(Some("Name cannot be empty.".to_string()));
            return;
        }
        save_action.dispatch(name_value);
    };

    let field_class = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-teal-500 focus:border-teal-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white";

    view! {
        <RequireAuth>
            <AppShell>
                <div class="max-w-lg mx-auto space-y-8">
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Account"</h1>

                    <form class="space-y-5" on:submit=on_save>
                        <div>
                            <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white" for="name">
                                "Full name"
                            </label>
                            <input
                                id="name"
                                type="text"
                                class=field_class
                                prop:value=move || name.get()
                                on:input=move |event| set_name.set(event_target_value(&event))
                            />
                        </div>
                        <div>
                            <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white">
                                "Email"
                            </label>
                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                {move || {
                                    auth.user.get().map(|user| user.email).unwrap_or_default()
                                }}
                            </p>
                        </div>
                        <Button button_type="submit" disabled=save_action.pending()>
                            "Save changes"
                        </Button>
                        {move || {
                            save_action.pending().get().then_some(view! { <Spinner /> })
                        }}
                        {move || {
                            saved.get().then_some(view! {
                                <Alert
                                    kind=AlertKind::Success
                                    message="Profile updated.".to_string()
                                />
                            })
                        }}
                    </form>

                    <div class="rounded-xl border border-gray-200 p-6 dark:border-gray-700">
                        <h2 class="text-lg font-semibold text-gray-900 dark:text-white">
                            "Subscription"
                        </h2>
                        {move || match auth.subscription.get() {
                            Some(subscription) => view! {
                                <div class="mt-2 text-sm text-gray-600 dark:text-gray-300 space-y-1">
                                    <p>{format!("Plan: {}", subscription.plan_type)}</p>
                                    <p>{format!("Status: {}", subscription.status)}</p>
                                    {subscription.current_period_end.clone().map(|until| view! {
                                        <p>{format!("Renews: {until}")}</p>
                                    })}
                                </div>
                            }
                            .into_any(),
                            None => view! {
                                <div class="mt-2 space-y-3">
                                    <p class="text-sm text-gray-500 dark:text-gray-400">
                                        "No active subscription. Upgrade to unlock full deal data."
                                    </p>
                                    <Button
                                        disabled=checkout_action.pending()
                                        on:click=move |_| { checkout_action.dispatch("investor".to_string()); }
                                    >
                                        "Upgrade"
                                    </Button>
                                </div>
                            }
                            .into_any(),
                        }}
                    </div>

                    {move || {
                        error.get().map(|message| view! {
                            <Alert kind=AlertKind::Error message=message />
                        })
                    }}
                </div>
            </AppShell>
        </RequireAuth>
    }
}

/// Field-level validation errors come back aggregated; show them as-is.
fn profile_error_message(err: &Error) -> String {
    if err.field_errors().is_some() {
        err.message()
    } else {
        err.to_string()
    }
}
