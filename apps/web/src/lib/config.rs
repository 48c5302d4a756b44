//! Build-time configuration with an optional runtime override. The runtime
//! config is read from `window.AQARI_CONFIG` (if present) so a static deploy
//! can repoint the API without rebuilding the bundle. Configuration values
//! are public; do not store secrets here.

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub default_language: String,
    pub checkout_publishable_key: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime
    /// overrides. An unset API base URL degrades to same-origin paths.
    pub fn load() -> Self {
        let api_base_url = option_env!("AQARI_API_BASE_URL")
            .or(option_env!("AQARI_API_HOST"))
            .unwrap_or("");
        let default_language = option_env!("AQARI_DEFAULT_LANGUAGE").unwrap_or("en");
        let checkout_publishable_key = option_env!("AQARI_CHECKOUT_PUBLISHABLE_KEY").unwrap_or("");

        let mut config = Self {
            api_base_url: api_base_url.to_string(),
            default_language: default_language.to_string(),
            checkout_publishable_key: checkout_publishable_key.to_string(),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        #[cfg(debug_assertions)]
        if config.api_base_url.is_empty() {
            leptos::logging::warn!("AQARI_API_BASE_URL is unset; using same-origin API paths");
        }

        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    default_language: Option<String>,
    checkout_publishable_key: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.default_language {
        config.default_language = value;
    }
    if let Some(value) = runtime.checkout_publishable_key {
        config.checkout_publishable_key = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("AQARI_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        default_language: read_runtime_value(&object, "default_language"),
        checkout_publishable_key: read_runtime_value(&object, "checkout_publishable_key"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_runtime_overrides, normalize_runtime_value, AppConfig, RuntimeConfig};

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://api.aqari.app "),
            Some("https://api.aqari.app".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_empty_values() {
        let mut config = AppConfig {
            api_base_url: "https://api.default".to_string(),
            default_language: "en".to_string(),
            checkout_publishable_key: "pk_default".to_string(),
        };
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value(""),
            default_language: normalize_runtime_value("  "),
            checkout_publishable_key: normalize_runtime_value(""),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.default");
        assert_eq!(config.default_language, "en");
        assert_eq!(config.checkout_publishable_key, "pk_default");
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = AppConfig {
            api_base_url: "https://api.default".to_string(),
            default_language: "en".to_string(),
            checkout_publishable_key: "pk_default".to_string(),
        };
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://api.override"),
            default_language: normalize_runtime_value("ar"),
            checkout_publishable_key: normalize_runtime_value("pk_override"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.override");
        assert_eq!(config.default_language, "ar");
        assert_eq!(config.checkout_publishable_key, "pk_override");
    }
}
