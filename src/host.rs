/// Browser-side collaborators the controller talks to
///
/// Each capability is a trait so the popup can run against the real
/// `chrome.*` bridge in the extension and against fakes in tests.
use async_trait::async_trait;

use crate::bookmark::ActiveTab;
use crate::config::TrackerConfig;

/// Path of the options page inside the extension bundle
pub const OPTIONS_PAGE: &str = "options.html";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("storage unavailable: {0}")]
    StoreUnavailable(String),
    #[error("tab query failed: {0}")]
    TabsUnavailable(String),
    /// The host lacks the API; callers switch to their fallback.
    #[error("{0} is not available in this environment")]
    Unsupported(&'static str),
    #[error("navigation failed: {0}")]
    Navigation(String),
}

#[async_trait(?Send)]
pub trait ConfigStore {
    async fn load(&self) -> Result<TrackerConfig, HostError>;
    async fn store(&self, config: &TrackerConfig) -> Result<(), HostError>;
}

#[async_trait(?Send)]
pub trait TabInspector {
    /// The active tab of the current window, if any
    async fn active_tab(&self) -> Result<Option<ActiveTab>, HostError>;
}

pub trait Navigator {
    /// Open `url` through the tabs API; `Unsupported` when there is none.
    fn open_tab(&self, url: &str) -> Result<(), HostError>;
    /// Generic `window.open(url, "_blank")`
    fn open_window(&self, url: &str) -> Result<(), HostError>;
    /// `runtime.openOptionsPage`; `Unsupported` when there is none.
    fn open_options_page(&self) -> Result<(), HostError>;
    fn extension_id(&self) -> Option<String>;
}

/// User-facing alerts
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Direct URL of the bundled options page, used when the runtime cannot open it itself
pub fn options_page_url(extension_id: Option<&str>) -> String {
    format!(
        "chrome-extension://{}/{}",
        extension_id.unwrap_or_default(),
        OPTIONS_PAGE
    )
}

/// Open in a new tab, or a new window when the tabs API is missing
pub fn open_in_new_tab(navigator: &dyn Navigator, url: &str) -> Result<(), HostError> {
    match navigator.open_tab(url) {
        Err(HostError::Unsupported(capability)) => {
            log::debug!("{} missing, opening window for {}", capability, url);
            navigator.open_window(url)
        }
        other => other,
    }
}
