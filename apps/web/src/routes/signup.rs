//! Signup route: account form, email verification with a 6-digit code, then
//! plan selection. Checkout happens on an external payment page; the account
//! page re-syncs the subscription when the user returns.

use auth_flow::{SignupFlow, SignupStage};
use gateway_client::{
    CheckoutSessionRequest, Error, ResendVerificationRequest, SignupRequest, VerifyEmailRequest,
};
use gloo_timers::callback::Interval;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::app::use_api_handle;
use crate::app_lib::storage;
use crate::components::{
    focus_first_code_box, Alert, AlertKind, AlreadySignedInPanel, AppShell, Button, CodeInput,
    Spinner,
};
use crate::features::auth::state::{complete_login, hard_navigate, use_auth};

#[derive(Clone)]
struct SignupInput {
    name: String,
    email: String,
    password: String,
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api_handle();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (error, set_error) = signal::<Option<Error>>(None);
    let flow = RwSignal::new(SignupFlow::new());
    let ticker = StoredValue::new_local(None::<Interval>);

    let start_ticker = move || {
        ticker.set_value(Some(Interval::new(1_000, move || {
            flow.update(|flow| {
                flow.tick();
            });
        })));
    };
    let stop_ticker = move || ticker.set_value(None);

    let signup_action = Action::new_local(move |input: &SignupInput| {
        let input = input.clone();
        let api = api.get_value();
        async move {
            api.signup(&SignupRequest {
                name: input.name,
                email: input.email,
                password: input.password,
            })
            .await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = signup_action.value().get() {
            match result {
                Ok(()) => {
                    flow.update(SignupFlow::form_accepted);
                    start_ticker();
                    focus_first_code_box();
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let verify_action = Action::new_local(move |_: &()| {
        let api = api.get_value();
        let email = email.get_untracked().trim().to_string();
        let code = flow.with_untracked(|flow| flow.code().code());
        async move { api.verify_email(&VerifyEmailRequest { email, code }).await }
    });

    Effect::new(move |_| {
        if let Some(result) = verify_action.value().get() {
            match result {
                Ok(()) => {
                    stop_ticker();
                    set_error.set(None);
                    flow.update(SignupFlow::verification_succeeded);
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let resend_action = Action::new_local(move |_: &()| {
        let api = api.get_value();
        let email = email.get_untracked().trim().to_string();
        async move {
            api.resend_verification(&ResendVerificationRequest { email })
                .await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = resend_action.value().get() {
            if let Err(err) = result {
                set_error.set(Some(err));
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
                    // Re-pull the subscription when the user lands back.
                    storage::request_subscription_resync();
                    hard_navigate(&session.url);
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let name_value = name.get_untracked().trim().to_string();
        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if name_value.is_empty() || email_value.is_empty() || password_value.trim().is_empty() {
            set_error.set(Some(Error::Config(
                "Name, email, and password are required.".to_string(),
            )));
            return;
        }
        if password_value != confirm.get_untracked() {
            set_error.set(Some(Error::Config("Passwords do not match.".to_string())));
            return;
        }

        signup_action.dispatch(SignupInput {
            name: name_value,
            email: email_value,
            password: password_value,
        });
    };

    let on_verify = move |_| {
        if flow.with_untracked(SignupFlow::can_verify) {
            set_error.set(None);
            verify_action.dispatch(());
        }
    };

    let on_resend = move |_| {
        if flow.with_untracked(SignupFlow::can_resend) {
            set_error.set(None);
            flow.update(SignupFlow::resend_issued);
            resend_action.dispatch(());
        }
    };

    let on_skip_payment = move |_| {
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            let _ = complete_login(&api, true).await;
        });
    };

    let stage = move || flow.with(SignupFlow::stage);
    let cooldown = move || flow.with(|flow| flow.cooldown().remaining());
    let busy = Signal::derive(move || {
        signup_action.pending().get() || verify_action.pending().get()
    });

    let field_class = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-teal-500 focus:border-teal-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white";

    view! {
        <AppShell>
            <Show
                when=move || !auth.is_authenticated.get()
                fallback=|| view! { <AlreadySignedInPanel /> }
            >
                {move || match stage() {
                    SignupStage::Form => view! {
                        <form class="max-w-sm mx-auto" on:submit=on_submit>
                            <h1 class="mb-6 text-2xl font-semibold text-gray-900 dark:text-white">
                                "Create your account"
                            </h1>
                            <div class="mb-5">
                                <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white" for="name">
                                    "Full name"
                                </label>
                                <input
                                    id="name"
                                    type="text"
                                    class=field_class
                                    autocomplete="name"
                                    required
                                    on:input=move |event| set_name.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white" for="email">
                                    "Your email"
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    class=field_class
                                    autocomplete="email"
                                    placeholder="name@example.com"
                                    required
                                    on:input=move |event| set_email.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white" for="password">
                                    "Password"
                                </label>
                                <input
                                    id="password"
                                    type="password"
                                    class=field_class
                                    autocomplete="new-password"
                                    required
                                    on:input=move |event| set_password.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white" for="confirm">
                                    "Confirm password"
                                </label>
                                <input
                                    id="confirm"
                                    type="password"
                                    class=field_class
                                    autocomplete="new-password"
                                    required
                                    on:input=move |event| set_confirm.set(event_target_value(&event))
                                />
                            </div>
                            <Button button_type="submit" disabled=busy>
                                "Create account"
                            </Button>
                            {move || {
                                busy.get().then_some(view! { <div class="mt-4"><Spinner /></div> })
                            }}
                            {move || {
                                error.get().map(|err| view! {
                                    <div class="mt-4">
                                        <Alert kind=AlertKind::Error message=err.to_string() />
                                    </div>
                                })
                            }}
                        </form>
                    }
                    .into_any(),
                    SignupStage::Verification => view! {
                        <div class="max-w-sm mx-auto space-y-6">
                            <div class="space-y-2 text-center">
                                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                    "Verify your email"
                                </h1>
                                <p class="text-sm text-gray-500 dark:text-gray-400">
                                    "Enter the 6-digit code we sent to "
                                    <span class="font-medium">{move || email.get()}</span> "."
                                </p>
                            </div>

                            <CodeInput flow=flow disabled=busy />

                            <Button
                                disabled=Signal::derive(move || {
                                    busy.get() || !flow.with(SignupFlow::can_verify)
                                })
                                on:click=on_verify
                            >
                                "Verify"
                            </Button>

                            <div class="text-center text-sm">
                                <button
                                    class="text-gray-500 hover:text-gray-900 dark:hover:text-white disabled:cursor-not-allowed disabled:opacity-60 cursor-pointer"
                                    disabled=move || !flow.with(|flow| flow.cooldown().remaining() == 0)
                                    on:click=on_resend
                                >
                                    {move || {
                                        let remaining = cooldown();
                                        if remaining > 0 {
                                            format!("Resend code in {remaining}s")
                                        } else {
                                            "Resend code".to_string()
                                        }
                                    }}
                                </button>
                            </div>

                            {move || {
                                verify_action.pending().get().then_some(view! { <Spinner /> })
                            }}
                            {move || {
                                error.get().map(|err| view! {
                                    <Alert kind=AlertKind::Error message=err.to_string() />
                                })
                            }}
                        </div>
                    }
                    .into_any(),
                    SignupStage::Payment => view! {
                        <div class="max-w-lg mx-auto space-y-6">
                            <div class="space-y-2 text-center">
                                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                    "Pick your plan"
                                </h1>
                                <p class="text-sm text-gray-500 dark:text-gray-400">
                                    "Your email is verified. Choose a plan to unlock full deal data."
                                </p>
                            </div>

                            <div class="grid gap-4 sm:grid-cols-2">
                                <div class="rounded-xl border border-gray-200 p-6 dark:border-gray-700">
                                    <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"Investor"</h2>
                                    <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">
                                        "Full deal feed, discounts, and monthly reports."
                                    </p>
                                    <div class="mt-4">
                                        <Button
                                            disabled=checkout_action.pending()
                                            on:click=move |_| { checkout_action.dispatch("investor".to_string()); }
                                        >
                                            "Continue to checkout"
                                        </Button>
                                    </div>
                                </div>
                                <div class="rounded-xl border border-gray-200 p-6 dark:border-gray-700">
                                    <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"Starter"</h2>
                                    <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">
                                        "Browse the market with limited deal detail."
                                    </p>
                                    <div class="mt-4">
                                        <button
                                            class="text-sm text-gray-500 underline decoration-gray-300 underline-offset-4 hover:text-gray-900 dark:hover:text-white cursor-pointer"
                                            on:click=on_skip_payment
                                        >
                                            "Skip for now"
                                        </button>
                                    </div>
                                </div>
                            </div>

                            {move || {
                                error.get().map(|err| view! {
                                    <Alert kind=AlertKind::Error message=err.to_string() />
                                })
                            }}
                        </div>
                    }
                    .into_any(),
                }}
            </Show>
        </AppShell>
    }
}
