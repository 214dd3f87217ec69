use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context as _;
use kuchiki::traits::TendrilSink as _;
use kuchiki::{ElementData, NodeDataRef, NodeRef};
use maud::html;
use regex::Regex;

use crate::page::{Page, ToggleButton};
use crate::palette::ToggleLabel;

/// A parsed HTML document standing in for the live DOM.
///
/// Custom properties are kept in the `<html>` element's `style` attribute,
/// which is what `style.setProperty` on the document element amounts to
/// once the page is serialized.
pub struct HtmlPage {
    document: NodeRef,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: kuchiki::parse_html().one(html),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        let mut out = Vec::new();
        self.document
            .serialize(&mut out)
            .context("serialize html document")?;
        String::from_utf8(out).context("serialized html not utf-8")
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let html = self.to_html()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        std::fs::write(path, html).with_context(|| format!("write {}", path.display()))
    }

    pub fn count(&self, selector: &str) -> usize {
        self.document
            .select(selector)
            .map(|nodes| nodes.count())
            .unwrap_or(0)
    }

    pub fn button_text(&self, id: &str) -> Option<String> {
        self.by_id(id).map(|node| node.text_contents())
    }

    pub fn button_attribute(&self, id: &str, name: &str) -> Option<String> {
        let node = self.by_id(id)?;
        let attrs = node.attributes.borrow();
        attrs.get(name).map(|v| v.to_string())
    }

    /// Declarations from the root `style` attribute, in document order.
    pub fn root_properties(&self) -> Vec<(String, String)> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        let attrs = root.attributes.borrow();
        attrs.get("style").map(parse_declarations).unwrap_or_default()
    }

    fn root(&self) -> Option<NodeDataRef<ElementData>> {
        self.document.select_first("html").ok()
    }

    fn by_id(&self, id: &str) -> Option<NodeDataRef<ElementData>> {
        self.document.select_first(&format!("#{id}")).ok()
    }
}

impl Page for HtmlPage {
    fn set_root_property(&mut self, name: &str, value: &str) {
        let Some(root) = self.root() else { return };
        let mut attrs = root.attributes.borrow_mut();
        let mut decls = attrs.get("style").map(parse_declarations).unwrap_or_default();
        match decls.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = value.to_string(),
            None => decls.push((name.to_string(), value.to_string())),
        }
        attrs.insert("style", join_declarations(&decls));
    }

    fn root_property(&self, name: &str) -> Option<String> {
        self.root_properties()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        let root = self.root()?;
        let attrs = root.attributes.borrow();
        attrs.get(name).map(|v| v.to_string())
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        if let Some(root) = self.root() {
            root.attributes
                .borrow_mut()
                .insert(name, value.to_string());
        }
    }

    fn contains(&self, selector: &str) -> bool {
        self.document.select_first(selector).is_ok()
    }

    fn has_element_id(&self, id: &str) -> bool {
        self.by_id(id).is_some()
    }

    fn prepend_button(&mut self, container: &str, button: &ToggleButton) -> bool {
        let Ok(container) = self.document.select_first(container) else {
            return false;
        };
        let Some(node) = make_button_node(button) else {
            return false;
        };
        container.as_node().prepend(node);
        true
    }

    fn set_button_label(&mut self, id: &str, label: &ToggleLabel) -> bool {
        let Some(button) = self.by_id(id) else {
            return false;
        };
        let node = button.as_node();
        for child in node.children().collect::<Vec<_>>() {
            child.detach();
        }
        node.append(NodeRef::new_text(label.glyph));
        button
            .attributes
            .borrow_mut()
            .insert("aria-label", label.aria_label.clone());
        true
    }
}

fn make_button_node(button: &ToggleButton) -> Option<NodeRef> {
    let markup = html! {
        button id=(button.id) class=(button.class) type="button"
            aria-label=(button.aria_label) onclick=(format!("{}()", button.on_activate)) {}
    };
    let doc = kuchiki::parse_html().one(markup.into_string());
    doc.select_first("button").ok().map(|n| n.as_node().clone())
}

/// Splits on `;` outside quotes and parentheses, so `url("data:…;base64,…")`
/// and quoted `content` values survive.
fn parse_declarations(style: &str) -> Vec<(String, String)> {
    static DECL: OnceLock<Regex> = OnceLock::new();
    let re = DECL.get_or_init(|| {
        Regex::new(r#"(?:"[^"]*"|'[^']*'|\([^)]*\)|[^;"'(])+"#).expect("style declaration regex")
    });
    re.find_iter(style)
        .filter_map(|m| {
            let (name, value) = m.as_str().split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

fn join_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(n, v)| format!("{n}: {v}"))
        .collect::<Vec<_>>()
        .join("; ")
}
