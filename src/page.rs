//! Seams between the controller and the environment it runs in.
//!
//! [`Page`] is the slice of the DOM the theme toggle touches: the document
//! root, the navigation container and the toggle control itself.
//! [`ThemeStore`] is the single-key persistent store. The browser binding
//! implements both over `web_sys`; the offline backend over a parsed HTML
//! document and a JSON file.

use std::collections::BTreeMap;

use crate::palette::ToggleLabel;

/// Everything needed to create the toggle control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    pub id: String,
    pub class: String,
    /// Accessible text before the first label update.
    pub aria_label: String,
    /// Global function invoked on activation.
    pub on_activate: String,
}

pub trait Page {
    fn set_root_property(&mut self, name: &str, value: &str);

    fn root_property(&self, name: &str) -> Option<String>;

    fn root_attribute(&self, name: &str) -> Option<String>;

    fn set_root_attribute(&mut self, name: &str, value: &str);

    fn contains(&self, selector: &str) -> bool;

    fn has_element_id(&self, id: &str) -> bool;

    /// Inserts the control as the first child of the element matching
    /// `container`. Returns `false` when there is no such element.
    fn prepend_button(&mut self, container: &str, button: &ToggleButton) -> bool;

    /// Returns `false` when no element with `id` exists.
    fn set_button_label(&mut self, id: &str, label: &ToggleLabel) -> bool;
}

pub trait ThemeStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);
}

impl<T: ThemeStore + ?Sized> ThemeStore for &mut T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

impl<T: Page + ?Sized> Page for &mut T {
    fn set_root_property(&mut self, name: &str, value: &str) {
        (**self).set_root_property(name, value)
    }

    fn root_property(&self, name: &str) -> Option<String> {
        (**self).root_property(name)
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        (**self).root_attribute(name)
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        (**self).set_root_attribute(name, value)
    }

    fn contains(&self, selector: &str) -> bool {
        (**self).contains(selector)
    }

    fn has_element_id(&self, id: &str) -> bool {
        (**self).has_element_id(id)
    }

    fn prepend_button(&mut self, container: &str, button: &ToggleButton) -> bool {
        (**self).prepend_button(container, button)
    }

    fn set_button_label(&mut self, id: &str, label: &ToggleLabel) -> bool {
        (**self).set_button_label(id, label)
    }
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store
    }
}

impl ThemeStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}
