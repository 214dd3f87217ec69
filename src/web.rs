//! Browser binding: the controller over the live DOM and `localStorage`.
//!
//! ```javascript
//! import init from './catppuccin_theme_toggle.js';
//! await init(); // applies the saved theme and attaches the toggle
//! window.toggleTheme();
//! ```

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Storage, Window, console};

use crate::config::ThemeConfig;
use crate::controller::{Attach, Startup, ThemeController};
use crate::page::{Page, ThemeStore, ToggleButton};
use crate::palette::ToggleLabel;

type WebController = ThemeController<WebPage, LocalStorage>;

thread_local! {
    static CONTROLLER: RefCell<Option<WebController>> = const { RefCell::new(None) };
    static POLL_HANDLE: Cell<Option<i32>> = const { Cell::new(None) };
}

/// DOM failures are not fatal to theming; they go to the console.
fn warn(what: &str, err: &JsValue) {
    console::warn_2(&JsValue::from_str(what), err);
}

fn set_attribute(el: &web_sys::Element, name: &str, value: &str) {
    if let Err(err) = el.set_attribute(name, value) {
        warn(&format!("setAttribute({name}) failed"), &err);
    }
}

pub struct WebPage {
    document: Document,
}

impl WebPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn root(&self) -> Option<HtmlElement> {
        self.document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

impl Page for WebPage {
    fn set_root_property(&mut self, name: &str, value: &str) {
        if let Some(root) = self.root() {
            if let Err(err) = root.style().set_property(name, value) {
                warn(&format!("setProperty({name}) failed"), &err);
            }
        }
    }

    fn root_property(&self, name: &str) -> Option<String> {
        let value = self.root()?.style().get_property_value(name).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root()?.get_attribute(name)
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        if let Some(root) = self.root() {
            set_attribute(&root, name, value);
        }
    }

    fn contains(&self, selector: &str) -> bool {
        match self.document.query_selector(selector) {
            Ok(found) => found.is_some(),
            Err(err) => {
                warn(&format!("invalid selector {selector}"), &err);
                false
            }
        }
    }

    fn has_element_id(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn prepend_button(&mut self, container: &str, button: &ToggleButton) -> bool {
        let Ok(Some(container)) = self.document.query_selector(container) else {
            return false;
        };
        let el = match self.document.create_element("button") {
            Ok(el) => el,
            Err(err) => {
                warn("createElement(button) failed", &err);
                return false;
            }
        };
        el.set_id(&button.id);
        el.set_class_name(&button.class);
        set_attribute(&el, "type", "button");
        set_attribute(&el, "aria-label", &button.aria_label);

        if let Some(html_el) = el.dyn_ref::<HtmlElement>() {
            let global = button.on_activate.clone();
            let onclick = Closure::<dyn FnMut()>::new(move || call_global(&global));
            html_el.set_onclick(Some(onclick.as_ref().unchecked_ref()));
            onclick.forget();
        }

        match container.insert_before(&el, container.first_child().as_ref()) {
            Ok(_) => true,
            Err(err) => {
                warn("inserting theme toggle failed", &err);
                false
            }
        }
    }

    fn set_button_label(&mut self, id: &str, label: &ToggleLabel) -> bool {
        let Some(button) = self.document.get_element_by_id(id) else {
            return false;
        };
        button.set_text_content(Some(label.glyph));
        set_attribute(&button, "aria-label", &label.aria_label);
        true
    }
}

/// `window.localStorage`; unavailable storage (private mode, sandboxed
/// frames) reads as empty and drops writes.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                warn("localStorage unavailable", &err);
                None
            }
        };
        Self { storage }
    }
}

impl ThemeStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.storage else { return };
        if let Err(err) = storage.set_item(key, value) {
            warn(&format!("localStorage.setItem({key}) failed"), &err);
        }
    }
}

fn call_global(name: &str) {
    let Some(window) = web_sys::window() else { return };
    let f = match js_sys::Reflect::get(&window, &JsValue::from_str(name)) {
        Ok(f) => f,
        Err(err) => {
            warn(&format!("window.{name} lookup failed"), &err);
            return;
        }
    };
    match f.dyn_ref::<js_sys::Function>() {
        Some(f) => {
            if let Err(err) = f.call0(&JsValue::NULL) {
                warn(&format!("window.{name}() threw"), &err);
            }
        }
        None => console::warn_1(&format!("window.{name} is not a function").into()),
    }
}

fn with_controller<R>(f: impl FnOnce(&mut WebController) -> R) -> Option<R> {
    CONTROLLER.with(|cell| {
        let mut slot = cell.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    })
}

fn stop_polling() {
    if let Some(handle) = POLL_HANDLE.with(Cell::take) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(handle);
        }
    }
}

/// Whether an attach interval is still running.
pub fn is_polling() -> bool {
    POLL_HANDLE.with(Cell::get).is_some()
}

/// Entry point run when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();

    install(ThemeConfig::default())
}

/// Publishes the global toggle and initializes the page now, or on
/// `DOMContentLoaded` while the document is still loading.
pub fn install(config: ThemeConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let global = Closure::<dyn FnMut() -> String>::new(toggle_theme);
    js_sys::Reflect::set(
        &window,
        &JsValue::from_str(&config.global_name),
        global.as_ref(),
    )?;
    global.forget();

    match Startup::for_ready_state(&document.ready_state()) {
        Startup::Deferred => {
            let target = document.clone();
            let on_ready = Closure::<dyn FnMut()>::new(move || {
                if let Err(err) = init_page(&window, &document, config.clone()) {
                    warn("theme init failed", &err);
                }
            });
            target.add_event_listener_with_callback(
                "DOMContentLoaded",
                on_ready.as_ref().unchecked_ref(),
            )?;
            on_ready.forget();
            Ok(())
        }
        Startup::Immediate => init_page(&window, &document, config),
    }
}

fn init_page(window: &Window, document: &Document, config: ThemeConfig) -> Result<(), JsValue> {
    let period_ms = i32::try_from(config.poll_interval.as_millis()).unwrap_or(i32::MAX);
    let mut controller = ThemeController::new(
        WebPage::new(document.clone()),
        LocalStorage::new(window),
        config,
    );
    let attach = controller.init_theme();
    CONTROLLER.with(|cell| *cell.borrow_mut() = Some(controller));

    if attach == Attach::Pending && !is_polling() {
        let tick = Closure::<dyn FnMut()>::new(|| {
            if with_controller(|c| c.add_toggle_button()).unwrap_or(false) {
                stop_polling();
            }
        });
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            period_ms,
        )?;
        POLL_HANDLE.with(|h| h.set(Some(handle)));
        tick.forget();
    }
    Ok(())
}

/// Flips the theme and returns the new theme name.
#[wasm_bindgen(js_name = "toggleTheme")]
pub fn toggle_theme() -> String {
    with_controller(|c| c.toggle_theme().as_str().to_string()).unwrap_or_default()
}

/// Called by whoever renders the navigation once it is in the DOM.
#[wasm_bindgen(js_name = "navReady")]
pub fn nav_ready() -> bool {
    let attached = with_controller(|c| c.nav_ready()).unwrap_or(false);
    if attached {
        stop_polling();
    }
    attached
}
