use crate::config::ThemeConfig;
use crate::page::{Page, ThemeStore, ToggleButton};
use crate::palette::{Theme, ToggleLabel};

pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Outcome of [`ThemeController::init_theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    /// The toggle control is on the page.
    Attached,
    /// The navigation container is not there yet; poll or wait for
    /// [`ThemeController::nav_ready`].
    Pending,
}

/// When to run initialization relative to document parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    /// Wait for `DOMContentLoaded`.
    Deferred,
    Immediate,
}

impl Startup {
    pub fn for_ready_state(ready_state: &str) -> Self {
        if ready_state == "loading" {
            Startup::Deferred
        } else {
            Startup::Immediate
        }
    }
}

/// Applies, toggles and persists the page theme.
pub struct ThemeController<P, S> {
    page: P,
    store: S,
    config: ThemeConfig,
}

impl<P: Page, S: ThemeStore> ThemeController<P, S> {
    pub fn new(page: P, store: S, config: ThemeConfig) -> Self {
        Self {
            page,
            store,
            config,
        }
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        for (property, value) in theme.palette().properties() {
            self.page.set_root_property(property, value);
        }
        self.page.set_root_attribute(THEME_ATTRIBUTE, theme.as_str());
        self.store.set(&self.config.storage_key, theme.as_str());
        tracing::debug!(theme = %theme, "applied theme");
    }

    /// Theme named by the root `data-theme` attribute, `dark` when absent or unknown.
    pub fn current_theme(&self) -> Theme {
        self.page
            .root_attribute(THEME_ATTRIBUTE)
            .and_then(|raw| Theme::parse(&raw))
            .unwrap_or_default()
    }

    /// Persisted theme, `dark` when absent. A corrupted value also yields `dark`.
    pub fn saved_theme(&self) -> Theme {
        match self.store.get(&self.config.storage_key) {
            None => Theme::default(),
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    key = %self.config.storage_key,
                    value = %raw,
                    "ignoring unknown persisted theme"
                );
                Theme::default()
            }),
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.current_theme().opposite();
        self.apply_theme(next);
        self.update_toggle_button(next);
        tracing::info!(theme = %next, "toggled theme");
        next
    }

    /// Returns whether a control was there to update.
    pub fn update_toggle_button(&mut self, theme: Theme) -> bool {
        let label = ToggleLabel::for_theme(theme);
        self.page.set_button_label(&self.config.toggle_id, &label)
    }

    pub fn init_theme(&mut self) -> Attach {
        let saved = self.saved_theme();
        self.apply_theme(saved);
        if self.add_toggle_button() {
            Attach::Attached
        } else {
            tracing::debug!(selector = %self.config.nav_selector, "navigation not present yet");
            Attach::Pending
        }
    }

    /// Returns whether the control is on the page afterwards.
    pub fn add_toggle_button(&mut self) -> bool {
        if !self.page.contains(&self.config.nav_selector) {
            return false;
        }
        if self.page.has_element_id(&self.config.toggle_id) {
            return true;
        }

        let button = ToggleButton {
            id: self.config.toggle_id.clone(),
            class: self.config.toggle_class.clone(),
            aria_label: "Toggle theme".to_string(),
            on_activate: self.config.global_name.clone(),
        };
        if !self.page.prepend_button(&self.config.nav_selector, &button) {
            return false;
        }

        let current = self.current_theme();
        self.update_toggle_button(current);
        tracing::debug!(id = %self.config.toggle_id, "attached theme toggle");
        true
    }

    /// Lifecycle hook for whoever owns the navigation container.
    pub fn nav_ready(&mut self) -> bool {
        self.add_toggle_button()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn into_parts(self) -> (P, S) {
        (self.page, self.store)
    }
}
