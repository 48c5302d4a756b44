//! Local-storage persistence: the device fingerprint, the remembered-device
//! flag, the selected language, and one-shot transfer flags. Plain string
//! key/value pairs with no schema versioning; every helper degrades to a
//! no-op when storage is unavailable (private browsing, storage disabled).

use web_sys::Storage;

const DEVICE_FINGERPRINT_KEY: &str = "aqari_device_fingerprint";
const DEVICE_REMEMBERED_KEY: &str = "aqari_device_remembered";
const LANGUAGE_KEY: &str = "aqari_language";
const SUBSCRIPTION_RESYNC_KEY: &str = "aqari_subscription_resync";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

fn set(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn device_fingerprint() -> Option<String> {
    get(DEVICE_FINGERPRINT_KEY).filter(|value| !value.is_empty())
}

pub fn store_device_fingerprint(value: &str) {
    set(DEVICE_FINGERPRINT_KEY, value);
}

pub fn mark_device_remembered() {
    set(DEVICE_REMEMBERED_KEY, "true");
}

pub fn is_device_remembered() -> bool {
    get(DEVICE_REMEMBERED_KEY).as_deref() == Some("true")
}

pub fn clear_device_remembered() {
    remove(DEVICE_REMEMBERED_KEY);
}

pub fn selected_language() -> Option<String> {
    get(LANGUAGE_KEY).filter(|value| !value.is_empty())
}

pub fn set_selected_language(language: &str) {
    set(LANGUAGE_KEY, language);
}

/// Asks the account page to re-pull the subscription after an external
/// checkout round-trip.
pub fn request_subscription_resync() {
    set(SUBSCRIPTION_RESYNC_KEY, "true");
}

/// One-shot read: returns whether a re-sync was requested and clears the
/// flag either way.
pub fn take_subscription_resync() -> bool {
    let requested = get(SUBSCRIPTION_RESYNC_KEY).as_deref() == Some("true");
    remove(SUBSCRIPTION_RESYNC_KEY);
    requested
}
