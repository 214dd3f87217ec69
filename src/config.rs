use std::time::Duration;

pub const DEFAULT_STORAGE_KEY: &str = "theme";
pub const DEFAULT_NAV_SELECTOR: &str = ".navbar-right";
pub const DEFAULT_TOGGLE_ID: &str = "theme-toggle";
pub const DEFAULT_TOGGLE_CLASS: &str = "theme-toggle-btn";
pub const DEFAULT_GLOBAL_NAME: &str = "toggleTheme";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Names the controller uses to find and create things on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Key under which the active theme is persisted.
    pub storage_key: String,
    /// Selector of the navigation container the toggle is prepended to.
    pub nav_selector: String,
    pub toggle_id: String,
    pub toggle_class: String,
    /// Global function the toggle invokes on click.
    pub global_name: String,
    pub poll_interval: Duration,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            nav_selector: DEFAULT_NAV_SELECTOR.to_string(),
            toggle_id: DEFAULT_TOGGLE_ID.to_string(),
            toggle_class: DEFAULT_TOGGLE_CLASS.to_string(),
            global_name: DEFAULT_GLOBAL_NAME.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ThemeConfig {
    /// `#<toggle_id>`, for backends that look the control up by selector.
    pub fn toggle_selector(&self) -> String {
        format!("#{}", self.toggle_id)
    }
}
