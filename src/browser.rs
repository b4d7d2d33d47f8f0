/// Host traits implemented on top of the chrome.* bridge in `extension.js`
use async_trait::async_trait;
use wasm_bindgen::prelude::*;

use crate::bookmark::ActiveTab;
use crate::config::{CONFIG_KEYS, TrackerConfig};
use crate::host::{ConfigStore, HostError, Navigator, Notifier, TabInspector};

// Import JS bridge functions
#[wasm_bindgen(module = "/extension.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getSyncStorage(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setSyncStorage(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryActiveTab() -> Result<JsValue, JsValue>;

    fn hasTabsApi() -> bool;

    #[wasm_bindgen(catch)]
    fn createTab(url: &str) -> Result<(), JsValue>;

    fn hasOptionsPageApi() -> bool;

    #[wasm_bindgen(catch)]
    fn openOptionsPage() -> Result<(), JsValue>;

    fn extensionId() -> Option<String>;
}

/// Prefer `Error.message` over the debug form of a thrown value
fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

/// The running extension: sync storage, tabs, runtime and window
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHost;

#[async_trait(?Send)]
impl ConfigStore for BrowserHost {
    async fn load(&self) -> Result<TrackerConfig, HostError> {
        let keys = serde_wasm_bindgen::to_value(&CONFIG_KEYS)
            .map_err(|e| HostError::StoreUnavailable(format!("Failed to serialize keys: {:?}", e)))?;

        let stored = getSyncStorage(keys)
            .await
            .map_err(|e| HostError::StoreUnavailable(js_error_message(&e)))?;

        if stored.is_null() || stored.is_undefined() {
            return Ok(TrackerConfig::default());
        }
        serde_wasm_bindgen::from_value(stored)
            .map_err(|e| HostError::StoreUnavailable(format!("Failed to parse settings: {:?}", e)))
    }

    async fn store(&self, config: &TrackerConfig) -> Result<(), HostError> {
        // Cleared fields are written as "" so the old value is overwritten.
        let config = config.normalized();
        let items = TrackerConfig {
            token: Some(config.token.unwrap_or_default()),
            owner: Some(config.owner.unwrap_or_default()),
            repo: Some(config.repo.unwrap_or_default()),
        };
        let items = serde_wasm_bindgen::to_value(&items)
            .map_err(|e| HostError::StoreUnavailable(format!("Failed to serialize settings: {:?}", e)))?;

        setSyncStorage(items)
            .await
            .map(|_| ())
            .map_err(|e| HostError::StoreUnavailable(js_error_message(&e)))
    }
}

#[async_trait(?Send)]
impl TabInspector for BrowserHost {
    async fn active_tab(&self) -> Result<Option<ActiveTab>, HostError> {
        let tab = queryActiveTab()
            .await
            .map_err(|e| HostError::TabsUnavailable(js_error_message(&e)))?;

        if tab.is_null() || tab.is_undefined() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(tab)
            .map(Some)
            .map_err(|e| HostError::TabsUnavailable(format!("Failed to parse tab: {:?}", e)))
    }
}

impl Navigator for BrowserHost {
    fn open_tab(&self, url: &str) -> Result<(), HostError> {
        if !hasTabsApi() {
            return Err(HostError::Unsupported("chrome.tabs"));
        }
        log::info!("Opening {}", url);
        createTab(url).map_err(|e| HostError::Navigation(js_error_message(&e)))
    }

    fn open_window(&self, url: &str) -> Result<(), HostError> {
        let window = web_sys::window().ok_or(HostError::Unsupported("window"))?;
        window
            .open_with_url_and_target(url, "_blank")
            .map(|_| ())
            .map_err(|e| HostError::Navigation(js_error_message(&e)))
    }

    fn open_options_page(&self) -> Result<(), HostError> {
        if !hasOptionsPageApi() {
            return Err(HostError::Unsupported("chrome.runtime.openOptionsPage"));
        }
        openOptionsPage().map_err(|e| HostError::Navigation(js_error_message(&e)))
    }

    fn extension_id(&self) -> Option<String> {
        extensionId()
    }
}

impl Notifier for BrowserHost {
    fn alert(&self, message: &str) {
        match web_sys::window() {
            Some(window) => {
                if let Err(e) = window.alert_with_message(message) {
                    log::error!("alert failed: {}", js_error_message(&e));
                }
            }
            None => log::error!("{}", message),
        }
    }
}
