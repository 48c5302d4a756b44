//! Password reset: request a code by email, then set the new password with
//! the code. Rate limiting (429) gets a distinct, longer-lived message since
//! reset endpoints are throttled aggressively.

use gateway_client::{Error, PasswordResetConfirmRequest, PasswordResetRequest};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::app::use_api_handle;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::state::hard_navigate;
use crate::routes::paths;

#[derive(Clone, Copy, PartialEq)]
enum ResetStep {
    Request,
    Confirm,
    Done,
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let api = use_api_handle();

    let (step, set_step) = signal(ResetStep::Request);
    let (email, set_email) = signal(String::new());
    let (code, set_code) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let request_action = Action::new_local(move |email: &String| {
        let email = email.clone();
        let api = api.get_value();
        async move {
            api.request_password_reset(&PasswordResetRequest { email })
                .await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = request_action.value().get() {
            match result {
                Ok(()) => {
                    set_error.set(None);
                    set_step.set(ResetStep::Confirm);
                }
                Err(err) => set_error.set(Some(reset_error_message(&err))),
            }
        }
    });

    let confirm_action = Action::new_local(move |_: &()| {
        let api = api.get_value();
        let request = PasswordResetConfirmRequest {
            email: email.get_untracked().trim().to_string(),
            code: code.get_untracked().trim().to_string(),
            new_password: new_password.get_untracked(),
        };
        async move { api.confirm_password_reset(&request).await }
    });

    Effect::new(move |_| {
        if let Some(result) = confirm_action.value().get() {
            match result {
                Ok(()) => {
                    set_error.set(None);
                    set_step.set(ResetStep::Done);
                }
                Err(err) => set_error.set(Some(reset_error_message(&err))),
            }
        }
    });

    let on_request = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        let email_value = email.get_untracked().trim().to_string();
        if email_value.is_empty() || !email_value.contains('@') {
            set_error.set(Some("A valid email address is required.".to_string()));
            return;
        }
        request_action.dispatch(email_value);
    };

    let on_confirm = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        if code.get_untracked().trim().is_empty() || new_password.get_untracked().trim().is_empty()
        {
            set_error.set(Some("Code and new password are required.".to_string()));
            return;
        }
        confirm_action.dispatch(());
    };

    let busy = Signal::derive(move || {
        request_action.pending().get() || confirm_action.pending().get()
    });

    let field_class = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-teal-500 focus:border-teal-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white";

    view! {
        <AppShell>
            <div class="max-w-sm mx-auto space-y-6">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                    "Reset password"
                </h1>
                {move || match step.get() {
                    ResetStep::Request => view! {
                        <form on:submit=on_request class="space-y-5">
                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                "Enter your account email and we will send a reset code."
                            </p>
                            <div>
                                <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white" for="email">
                                    "Your email"
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    class=field_class
                                    autocomplete="email"
                                    required
                                    on:input=move |event| set_email.set(event_target_value(&event))
                                />
                            </div>
                            <Button button_type="submit" disabled=busy>
                                "Send reset code"
                            </Button>
                        </form>
                    }
                    .into_any(),
                    ResetStep::Confirm => view! {
                        <form on:submit=on_confirm class="space-y-5">
                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                "Enter the code we sent to "
                                <span class="font-medium">{move || email.get()}</span>
                                " and pick a new password."
                            </p>
                            <div>
                                <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white" for="code">
                                    "Reset code"
                                </label>
                                <input
                                    id="code"
                                    type="text"
                                    inputmode="numeric"
                                    class=field_class
                                    required
                                    on:input=move |event| set_code.set(event_target_value(&event))
                                />
                            </div>
                            <div>
                                <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white" for="new-password">
                                    "New password"
                                </label>
                                <input
                                    id="new-password"
                                    type="password"
                                    class=field_class
                                    autocomplete="new-password"
                                    required
                                    on:input=move |event| set_new_password.set(event_target_value(&event))
                                />
                            </div>
                            <Button button_type="submit" disabled=busy>
                                "Set new password"
                            </Button>
                        </form>
                    }
                    .into_any(),
                    ResetStep::Done => view! {
                        <div class="space-y-4">
                            <Alert
                                kind=AlertKind::Success
                                message="Password updated. Sign in with your new password.".to_string()
                            />
                            <Button on:click=move |_| hard_navigate(paths::LOGIN)>
                                "Go to sign in"
                            </Button>
                        </div>
                    }
                    .into_any(),
                }}
                {move || busy.get().then_some(view! { <Spinner /> })}
                {move || {
                    error.get().map(|message| view! {
                        <Alert kind=AlertKind::Error message=message />
                    })
                }}
            </div>
        </AppShell>
    }
}

/// Rate-limited resets get explicit wording; everything else renders as-is.
fn reset_error_message(err: &Error) -> String {
    if err.is_rate_limited() {
        "Too many reset attempts. Please wait a few minutes before trying again.".to_string()
    } else {
        err.to_string()
    }
}
