//! Cross-tab auth signaling over a `BroadcastChannel`. After login or logout
//! every other tab re-hydrates its session so no tab keeps rendering a stale
//! auth state.

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{BroadcastChannel, MessageEvent};

const AUTH_CHANNEL: &str = "aqari-auth";
const AUTH_CHANGED: &str = r#"{"type":"auth-changed"}"#;

/// Announces an auth transition to the other tabs.
pub fn broadcast_auth_changed() {
    if let Ok(channel) = BroadcastChannel::new(AUTH_CHANNEL) {
        let _ = channel.post_message(&AUTH_CHANGED.into());
        channel.close();
    }
}

/// Subscribes to auth transitions from other tabs. The channel and its
/// handler live for the rest of the page; there is one subscriber, installed
/// by the auth provider at mount.
pub fn listen_for_auth_changes(callback: impl Fn() + 'static) {
    let Ok(channel) = BroadcastChannel::new(AUTH_CHANNEL) else {
        return;
    };
    let handler = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        if event.data().as_string().as_deref() == Some(AUTH_CHANGED) {
            callback();
        }
    });
    channel.set_onmessage(Some(handler.as_ref().unchecked_ref()));
    handler.forget();
    std::mem::forget(channel);
}
