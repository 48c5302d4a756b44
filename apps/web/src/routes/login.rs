//! Login route.
//!
//! Drives the login flow machine:
//! 1. Credentials (email + password + device fingerprint).
//! 2. For unrecognized devices, a 6-digit code sent by email. Verification
//!    tries the email endpoint first and falls back to the device endpoint
//!    when the account is already verified.
//! 3. Success, then a confirmed round-trip and a hard navigation so every
//!    context re-initializes with the session cookie attached.

use auth_flow::{should_try_device_verification, LoginAdvance, LoginFlow, LoginStage};
use gateway_client::{
    Error, LoginRequest, ResendVerificationRequest, VerifyDeviceRequest, VerifyEmailRequest,
};
use gloo_timers::callback::Interval;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_api_handle;
use crate::components::{
    focus_first_code_box, Alert, AlertKind, AlreadySignedInPanel, AppShell, Button, CodeInput,
    Spinner,
};
use crate::features::auth::fingerprint::ensure_device_fingerprint;
use crate::features::auth::state::{complete_login, use_auth};
use crate::routes::paths;

#[derive(Clone)]
struct LoginInput {
    email: String,
    password: String,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api_handle();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<Error>>(None);
    let flow = RwSignal::new(LoginFlow::new());
    let ticker = StoredValue::new_local(None::<Interval>);

    let start_ticker = move || {
        ticker.set_value(Some(Interval::new(1_000, move || {
            flow.update(|flow| {
                flow.tick();
            });
        })));
    };
    let stop_ticker = move || ticker.set_value(None);

    let login_action = Action::new_local(move |input: &LoginInput| {
        let input = input.clone();
        let api = api.get_value();
        async move {
            let fingerprint = ensure_device_fingerprint();
            let response = api
                .login(&LoginRequest {
                    email: input.email,
                    password: input.password,
                    device_fingerprint: fingerprint.clone(),
                })
                .await?;
            Ok::<(bool, String), Error>((response.requires_verification, fingerprint))
        }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok((requires_verification, fingerprint)) => {
                    let advance = flow.try_update(|flow| {
                        flow.credentials_accepted(requires_verification, fingerprint)
                    });
                    match advance {
                        Some(LoginAdvance::Complete) => {
                            let api = api.get_value();
                            leptos::task::spawn_local(async move {
                                let _ = complete_login(&api, true).await;
                            });
                        }
                        Some(LoginAdvance::VerificationRequired) => {
                            start_ticker();
                            focus_first_code_box();
                        }
                        None => {}
                    }
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let verify_action = Action::new_local(move |_: &()| {
        let api = api.get_value();
        let email = email.get_untracked().trim().to_string();
        let code = flow.with_untracked(|flow| flow.code().code());
        let fingerprint = flow
            .with_untracked(|flow| flow.pending_fingerprint().map(str::to_string))
            .unwrap_or_else(ensure_device_fingerprint);
        async move {
            let email_attempt = api
                .verify_email(&VerifyEmailRequest {
                    email: email.clone(),
                    code: code.clone(),
                })
                .await;
            match email_attempt {
                Ok(()) => Ok(()),
                // Already verified: this is really a new-device check, so the
                // same code goes to the device endpoint.
                Err(err) if should_try_device_verification(&err) => {
                    api.verify_device(&VerifyDeviceRequest {
                        email,
                        code,
                        device_fingerprint: fingerprint,
                    })
                    .await
                }
                Err(err) => Err(err),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = verify_action.value().get() {
            match result {
                Ok(()) => {
                    stop_ticker();
                    flow.update(LoginFlow::verification_succeeded);
                    let api = api.get_value();
                    leptos::task::spawn_local(async move {
                        let _ = complete_login(&api, true).await;
                    });
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

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            set_error.set(Some(Error::Config(
                "Email and password are required.".to_string(),
            )));
            return;
        }

        login_action.dispatch(LoginInput {
            email: email_value,
            password: password_value,
        });
    };

    let on_verify = move |_| {
        if flow.with_untracked(LoginFlow::can_verify) {
            set_error.set(None);
            verify_action.dispatch(());
        }
    };

    let on_resend = move |_| {
        if flow.with_untracked(LoginFlow::can_resend) {
            set_error.set(None);
            flow.update(LoginFlow::resend_issued);
            resend_action.dispatch(());
        }
    };

    let on_back = move |_| {
        stop_ticker();
        set_error.set(None);
        flow.update(LoginFlow::back_to_credentials);
    };

    let stage = move || flow.with(LoginFlow::stage);
    let cooldown = move || flow.with(|flow| flow.cooldown().remaining());
    let busy = Signal::derive(move || {
        login_action.pending().get() || verify_action.pending().get()
    });

    view! {
        <AppShell>
            <Show
                when=move || !auth.is_authenticated.get()
                fallback=|| view! { <AlreadySignedInPanel /> }
            >
                {move || match stage() {
                    LoginStage::Credentials => view! {
                        <form class="max-w-sm mx-auto" on:submit=on_submit>
                            <h1 class="mb-6 text-2xl font-semibold text-gray-900 dark:text-white">
                                "Sign in"
                            </h1>
                            <div class="mb-5">
                                <label
                                    class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                                    for="email"
                                >
                                    "Your email"
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-teal-500 focus:border-teal-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white"
                                    autocomplete="email"
                                    placeholder="name@example.com"
                                    required
                                    on:input=move |event| set_email.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label
                                    class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                                    for="password"
                                >
                                    "Your password"
                                </label>
                                <input
                                    id="password"
                                    type="password"
                                    class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-teal-500 focus:border-teal-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white"
                                    autocomplete="current-password"
                                    required
                                    on:input=move |event| set_password.set(event_target_value(&event))
                                />
                            </div>
                            <div class="flex items-center justify-between">
                                <Button button_type="submit" disabled=busy>
                                    "Sign in"
                                </Button>
                                <A
                                    href=paths::RESET_PASSWORD
                                    {..}
                                    class="text-sm text-gray-500 underline decoration-gray-300 underline-offset-4 hover:text-gray-900 dark:hover:text-white"
                                >
                                    "Forgot password?"
                                </A>
                            </div>
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
                    LoginStage::Verification => view! {
                        <div class="max-w-sm mx-auto space-y-6">
                            <div class="space-y-2 text-center">
                                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                    "Check your email"
                                </h1>
                                <p class="text-sm text-gray-500 dark:text-gray-400">
                                    "We did not recognize this device. Enter the 6-digit code we sent to "
                                    <span class="font-medium">{move || email.get()}</span> "."
                                </p>
                            </div>

                            <CodeInput flow=flow disabled=busy />

                            <Button
                                disabled=Signal::derive(move || {
                                    busy.get() || !flow.with(LoginFlow::can_verify)
                                })
                                on:click=on_verify
                            >
                                "Verify"
                            </Button>

                            <div class="flex items-center justify-between text-sm">
                                <button
                                    class="text-gray-500 hover:text-gray-900 dark:hover:text-white disabled:cursor-not-allowed disabled:opacity-60 cursor-pointer"
                                    disabled=move || !flow.with(|flow| {
                                        flow.cooldown().remaining() == 0
                                    })
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
                                <button
                                    class="text-gray-500 underline decoration-gray-300 underline-offset-4 hover:text-gray-900 dark:hover:text-white cursor-pointer"
                                    on:click=on_back
                                >
                                    "Back to login"
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
                    LoginStage::Success => view! {
                        <div class="max-w-sm mx-auto text-center space-y-4 py-8">
                            <Alert
                                kind=AlertKind::Success
                                message="Signed in. Taking you to your dashboard...".to_string()
                            />
                            <Spinner />
                        </div>
                    }
                    .into_any(),
                }}
            </Show>
        </AppShell>
    }
}
