//! Analysis request: a three-step form (property details, location, review
//! and documents) submitted as multipart form data so the document upload
//! keeps its browser-set boundary. Location picking is a coordinate pair;
//! analysts resolve it to a plot.

use gateway_client::{AnalysisRequestReceipt, Error, Part};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

use crate::app::use_api_handle;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::guards::RequireAuth;
use crate::features::auth::state::use_auth;

#[derive(Clone, Copy, PartialEq)]
enum FormStep {
    Details,
    Location,
    Review,
}

#[derive(Clone)]
struct Attachment {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

#[component]
pub fn AnalysisRequestPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api_handle();

    let (step, set_step) = signal(FormStep::Details);
    let (property_type, set_property_type) = signal("apartment".to_string());
    let (budget, set_budget) = signal(String::new());
    let (bedrooms, set_bedrooms) = signal(String::new());
    let (latitude, set_latitude) = signal(String::new());
    let (longitude, set_longitude) = signal(String::new());
    let (notes, set_notes) = signal(String::new());
    let attachment = RwSignal::new(None::<Attachment>);
    let (error, set_error) = signal::<Option<String>>(None);
    let (receipt, set_receipt) = signal::<Option<AnalysisRequestReceipt>>(None);

    let on_file_change = move |event: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&event);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            attachment.set(None);
            return;
        };
        let file_name = file.name();
        let content_type = file.type_();
        spawn_local(async move {
            let Ok(buffer) = JsFuture::from(file.array_buffer()).await else {
                return;
            };
            let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
            attachment.set(Some(Attachment {
                file_name,
                content_type: if content_type.is_empty() {
                    "application/octet-stream".to_string()
                } else {
                    content_type
                },
                bytes,
            }));
        });
    };

    let submit_action = Action::new_local(move |_: &()| {
        let api = api.get_value();
        let user = auth.user.get_untracked();
        let mut parts = vec![
            Part::text("propertyType", property_type.get_untracked()),
            Part::text("budget", budget.get_untracked().trim()),
            Part::text("bedroomCount", bedrooms.get_untracked().trim()),
            Part::text("latitude", latitude.get_untracked().trim()),
            Part::text("longitude", longitude.get_untracked().trim()),
            Part::text("notes", notes.get_untracked()),
        ];
        if let Some(user) = user {
            parts.push(Part::text("email", user.email));
        }
        if let Some(attachment) = attachment.get_untracked() {
            parts.push(Part::file(
                "attachment",
                attachment.file_name,
                attachment.content_type,
                attachment.bytes,
            ));
        }
        async move { api.submit_analysis_request(parts).await }
    });

    Effect::new(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(submitted) => {
                    set_error.set(None);
                    set_receipt.set(Some(submitted));
                }
                Err(err) => set_error.set(Some(render_submit_error(&err))),
            }
        }
    });

    let on_next_details = move |_| {
        if budget.get_untracked().trim().parse::<u64>().is_err() {
            set_error.set(Some("Budget must be a number in AED.".to_string()));
            return;
        }
        set_error.set(None);
        set_step.set(FormStep::Location);
    };

    let on_next_location = move |_| {
        let latitude_ok = latitude.get_untracked().trim().parse::<f64>().is_ok();
        let longitude_ok = longitude.get_untracked().trim().parse::<f64>().is_ok();
        if !latitude_ok || !longitude_ok {
            set_error.set(Some(
                "Latitude and longitude are required, e.g. 25.2048 and 55.2708.".to_string(),
            ));
            return;
        }
        set_error.set(None);
        set_step.set(FormStep::Review);
    };

    let field_class = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-teal-500 focus:border-teal-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white";

    view! {
        <RequireAuth>
            <AppShell>
                <div class="max-w-lg mx-auto space-y-6">
                    <div>
                        <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                            "Request an analysis"
                        </h1>
                        <p class="text-gray-500 dark:text-gray-400">
                            "Our analysts price a specific plot or building within two working days."
                        </p>
                    </div>

                    {move || {
                        if let Some(submitted) = receipt.get() {
                            return view! {
                                <Alert
                                    kind=AlertKind::Success
                                    message=format!(
                                        "Request #{} received, status: {}.",
                                        submitted.id, submitted.status
                                    )
                                />
                            }
                            .into_any();
                        }

                        match step.get() {
                            FormStep::Details => view! {
                                <div class="space-y-5">
                                    <div>
                                        <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white">
                                            "Property type"
                                        </label>
                                        <select
                                            class=field_class
                                            on:change=move |event| set_property_type.set(event_target_value(&event))
                                        >
                                            <option value="apartment">"Apartment"</option>
                                            <option value="villa">"Villa"</option>
                                            <option value="townhouse">"Townhouse"</option>
                                            <option value="plot">"Plot"</option>
                                        </select>
                                    </div>
                                    <div>
                                        <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white">
                                            "Budget (AED)"
                                        </label>
                                        <input
                                            type="text"
                                            inputmode="numeric"
                                            class=field_class
                                            placeholder="1500000"
                                            on:input=move |event| set_budget.set(event_target_value(&event))
                                        />
                                    </div>
                                    <div>
                                        <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white">
                                            "Bedrooms"
                                        </label>
                                        <input
                                            type="text"
                                            inputmode="numeric"
                                            class=field_class
                                            placeholder="2"
                                            on:input=move |event| set_bedrooms.set(event_target_value(&event))
                                        />
                                    </div>
                                    <Button on:click=on_next_details>"Next: location"</Button>
                                </div>
                            }
                            .into_any(),
                            FormStep::Location => view! {
                                <div class="space-y-5">
                                    <p class="text-sm text-gray-500 dark:text-gray-400">
                                        "Drop the coordinates of the plot or building you want priced."
                                    </p>
                                    <div class="grid gap-3 sm:grid-cols-2">
                                        <div>
                                            <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white">
                                                "Latitude"
                                            </label>
                                            <input
                                                type="text"
                                                class=field_class
                                                placeholder="25.2048"
                                                on:input=move |event| set_latitude.set(event_target_value(&event))
                                            />
                                        </div>
                                        <div>
                                            <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white">
                                                "Longitude"
                                            </label>
                                            <input
                                                type="text"
                                                class=field_class
                                                placeholder="55.2708"
                                                on:input=move |event| set_longitude.set(event_target_value(&event))
                                            />
                                        </div>
                                    </div>
                                    <div>
                                        <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white">
                                            "Notes for the analyst"
                                        </label>
                                        <textarea
                                            class=field_class
                                            rows="3"
                                            on:input=move |event| set_notes.set(event_target_value(&event))
                                        ></textarea>
                                    </div>
                                    <div class="flex gap-3">
                                        <button
                                            class="px-4 py-2 text-sm text-gray-500 hover:text-gray-900 dark:hover:text-white cursor-pointer"
                                            on:click=move |_| set_step.set(FormStep::Details)
                                        >
                                            "Back"
                                        </button>
                                        <Button on:click=on_next_location>"Next: review"</Button>
                                    </div>
                                </div>
                            }
                            .into_any(),
                            FormStep::Review => view! {
                                <div class="space-y-5">
                                    <div class="rounded-xl border border-gray-200 p-4 text-sm text-gray-600 dark:border-gray-700 dark:text-gray-300">
                                        <p>{move || format!("Property: {}", property_type.get())}</p>
                                        <p>{move || format!("Budget: AED {}", budget.get())}</p>
                                        <p>{move || format!("Location: {}, {}", latitude.get(), longitude.get())}</p>
                                    </div>
                                    <div>
                                        <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white">
                                            "Supporting document (optional)"
                                        </label>
                                        <input
                                            type="file"
                                            accept=".pdf,.png,.jpg,.jpeg"
                                            class="block w-full text-sm text-gray-500 file:mr-3 file:rounded-lg file:border-0 file:bg-teal-700 file:px-4 file:py-2 file:text-sm file:font-medium file:text-white hover:file:bg-teal-800"
                                            on:change=on_file_change
                                        />
                                        {move || {
                                            attachment.get().map(|attached| view! {
                                                <p class="mt-2 text-xs text-gray-500 dark:text-gray-400">
                                                    {format!("Attached: {}", attached.file_name)}
                                                </p>
                                            })
                                        }}
                                    </div>
                                    <div class="flex gap-3">
                                        <button
                                            class="px-4 py-2 text-sm text-gray-500 hover:text-gray-900 dark:hover:text-white cursor-pointer"
                                            on:click=move |_| set_step.set(FormStep::Location)
                                        >
                                            "Back"
                                        </button>
                                        <Button
                                            disabled=submit_action.pending()
                                            on:click=move |_| { submit_action.dispatch(()); }
                                        >
                                            "Submit request"
                                        </Button>
                                    </div>
                                    {move || {
                                        submit_action.pending().get().then_some(view! { <Spinner /> })
                                    }}
                                </div>
                            }
                            .into_any(),
                        }
                    }}

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

/// Report-limit and validation failures read better with their field detail.
fn render_submit_error(err: &Error) -> String {
    match err.field_errors() {
        Some(fields) if !fields.is_empty() => err.message(),
        _ => err.to_string(),
    }
}
