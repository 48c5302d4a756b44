//! Device fingerprint collection. The hash itself lives in `auth_flow`; this
//! module gathers the browser attributes, memoizes the value in memory, and
//! persists it so the fingerprint stays stable across reloads. It is only
//! regenerated when storage is empty.

use std::cell::RefCell;

use auth_flow::DeviceProfile;

use crate::app_lib::storage;

thread_local! {
    static MEMOIZED: RefCell<Option<String>> = const { RefCell::new(None) };
}

pub fn ensure_device_fingerprint() -> String {
    if let Some(cached) = MEMOIZED.with(|cell| cell.borrow().clone()) {
        return cached;
    }

    let value = storage::device_fingerprint().unwrap_or_else(|| {
        let fresh = collect_profile().fingerprint();
        storage::store_device_fingerprint(&fresh);
        fresh
    });

    MEMOIZED.with(|cell| *cell.borrow_mut() = Some(value.clone()));
    value
}

fn collect_profile() -> DeviceProfile {
    let window = web_sys::window();
    let navigator = window.as_ref().map(|window| window.navigator());

    let user_agent = navigator
        .as_ref()
        .and_then(|navigator| navigator.user_agent().ok())
        .unwrap_or_default();
    let language = navigator
        .as_ref()
        .and_then(|navigator| navigator.language())
        .unwrap_or_default();
    let platform = navigator
        .as_ref()
        .and_then(|navigator| navigator.platform().ok())
        .unwrap_or_default();

    let (screen_width, screen_height) = window
        .as_ref()
        .and_then(|window| window.screen().ok())
        .map(|screen| {
            (
                screen.width().unwrap_or(0).max(0) as u32,
                screen.height().unwrap_or(0).max(0) as u32,
            )
        })
        .unwrap_or((0, 0));

    DeviceProfile {
        user_agent,
        language,
        platform,
        screen_width,
        screen_height,
        timezone_offset_minutes: js_sys::Date::new_0().get_timezone_offset() as i32,
    }
}
