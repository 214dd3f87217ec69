//! Browser-based tests for the DOM binding.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use catppuccin_theme_toggle::{
    LocalStorage, Page, ThemeConfig, ThemeController, WebPage, install, is_polling, nav_ready,
};
use wasm_bindgen::{JsCast as _, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().unwrap()
}

fn document() -> Document {
    window().document().unwrap()
}

fn remove_all(selector: &str) {
    while let Some(el) = document().query_selector(selector).unwrap() {
        el.remove();
    }
}

fn append_nav(class: &str) -> Element {
    let nav = document().create_element("div").unwrap();
    nav.set_class_name(class);
    let link = document().create_element("a").unwrap();
    link.set_text_content(Some("Home"));
    nav.append_child(&link).unwrap();
    document().body().unwrap().append_child(&nav).unwrap();
    nav
}

fn config(name: &str) -> ThemeConfig {
    ThemeConfig {
        storage_key: format!("{name}-theme"),
        nav_selector: format!(".{name}-nav"),
        toggle_id: format!("{name}-toggle"),
        ..ThemeConfig::default()
    }
}

fn root_style(property: &str) -> String {
    document()
        .document_element()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value(property)
        .unwrap()
}

#[wasm_bindgen_test]
fn toggle_updates_root_style_and_local_storage() {
    let config = config("apply");
    let storage = window().local_storage().unwrap().unwrap();
    storage.remove_item(&config.storage_key).unwrap();

    let mut c = ThemeController::new(
        WebPage::new(document()),
        LocalStorage::new(&window()),
        config.clone(),
    );
    c.init_theme();
    assert_eq!(root_style("--ctp-base"), "#1e1e2e");
    assert_eq!(
        storage.get_item(&config.storage_key).unwrap().as_deref(),
        Some("dark")
    );

    c.toggle_theme();
    assert_eq!(root_style("--ctp-base"), "#eff1f5");
    assert_eq!(root_style("--ctp-crust"), "#dce0e8");
    assert_eq!(
        storage.get_item(&config.storage_key).unwrap().as_deref(),
        Some("light")
    );
    assert_eq!(c.page().root_attribute("data-theme").as_deref(), Some("light"));

    storage.remove_item(&config.storage_key).unwrap();
}

#[wasm_bindgen_test]
fn toggle_button_is_inserted_once_as_first_child() {
    let config = config("attach");
    let nav = append_nav("attach-nav");

    let mut c = ThemeController::new(
        WebPage::new(document()),
        LocalStorage::new(&window()),
        config.clone(),
    );
    assert!(c.add_toggle_button());
    assert!(c.add_toggle_button());

    assert_eq!(nav.child_element_count(), 2);
    let first = nav.first_element_child().unwrap();
    assert_eq!(first.id(), config.toggle_id);
    assert_eq!(first.tag_name(), "BUTTON");
    assert!(first.get_attribute("aria-label").is_some());

    nav.remove();
    window()
        .local_storage()
        .unwrap()
        .unwrap()
        .remove_item(&config.storage_key)
        .unwrap();
}

#[wasm_bindgen_test]
fn nav_ready_attaches_and_stops_polling() {
    let config = ThemeConfig::default();
    remove_all(&config.nav_selector);
    remove_all(&config.toggle_selector());

    install(config.clone()).unwrap();
    assert!(is_polling());
    let global =
        js_sys::Reflect::get(&window(), &JsValue::from_str(&config.global_name)).unwrap();
    assert!(global.is_function());

    let nav = append_nav("navbar-right");
    assert!(nav_ready());
    assert!(!is_polling());
    assert_eq!(nav.first_element_child().unwrap().id(), config.toggle_id);

    nav.remove();
}
