//! Six-box one-time-code entry. Typing advances focus, backspace walks
//! backwards, and a paste fills consecutive boxes starting at the box the
//! paste landed in. Buffer semantics live in `auth_flow`; this component
//! only wires DOM events and focus.

use auth_flow::{CodeEntry, CODE_LENGTH};
use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

#[component]
pub fn CodeInput<F>(
    flow: RwSignal<F>,
    #[prop(optional, into, default = Signal::from(false))] disabled: Signal<bool>,
) -> impl IntoView
where
    F: CodeEntry + Send + Sync + 'static,
{
    let boxes: [NodeRef<Input>; CODE_LENGTH] = std::array::from_fn(|_| NodeRef::new());

    let focus_box = move |index: usize| {
        if let Some(input) = boxes[index.min(CODE_LENGTH - 1)].get_untracked() {
            let _ = input.focus();
        }
    };

    view! {
        <div class="flex justify-center gap-2" dir="ltr">
            {(0..CODE_LENGTH)
                .map(|index| {
                    let node_ref = boxes[index];
                    view! {
                        <input
                            node_ref=node_ref
                            type="text"
                            inputmode="numeric"
                            autocomplete="one-time-code"
                            maxlength="2"
                            class="h-12 w-10 rounded-lg border border-gray-300 bg-gray-50 text-center text-lg font-semibold text-gray-900 focus:border-teal-500 focus:ring-2 focus:ring-teal-200 dark:border-gray-600 dark:bg-gray-700 dark:text-white"
                            prop:value=move || flow.with(|flow| flow.entry().digit(index).to_string())
                            disabled=move || disabled.get()
                            on:input=move |event| {
                                let value = event_target_value(&event);
                                let next = flow
                                    .try_update(|flow| flow.entry_mut().set_digit(index, &value))
                                    .flatten();
                                if let Some(next) = next {
                                    if next != index {
                                        focus_box(next);
                                    }
                                }
                            }
                            on:keydown=move |event| {
                                if event.key() == "Backspace" {
                                    event.prevent_default();
                                    let previous = flow
                                        .try_update(|flow| flow.entry_mut().erase(index))
                                        .flatten();
                                    if let Some(previous) = previous {
                                        if previous != index {
                                            focus_box(previous);
                                        }
                                    }
                                }
                            }
                            on:paste=move |event| {
                                event.prevent_default();
                                let text = event
                                    .clipboard_data()
                                    .and_then(|data| data.get_data("text").ok())
                                    .unwrap_or_default();
                                let next = flow
                                    .try_update(|flow| flow.entry_mut().paste(index, &text))
                                    .unwrap_or(index);
                                focus_box(next);
                            }
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Focuses the first code box, called when a flow enters its verification
/// stage.
pub fn focus_first_code_box() {
    if let Some(document) = web_sys::window().and_then(|window| window.document()) {
        if let Some(element) = document
            .query_selector("input[autocomplete='one-time-code']")
            .ok()
            .flatten()
        {
            if let Ok(input) = element.dyn_into::<web_sys::HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }
}
