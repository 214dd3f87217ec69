use std::sync::OnceLock;

use regex::Regex;

use crate::config::ThemeConfig;
use crate::controller::THEME_ATTRIBUTE;
use crate::html::HtmlPage;
use crate::page::Page;
use crate::palette::{Theme, ToggleLabel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub theme: Theme,
    pub has_toggle: bool,
    pub properties_checked: usize,
}

/// Verifies that a rendered page is in a state the toggle could have produced.
pub fn check_page(html: &str, config: &ThemeConfig) -> anyhow::Result<CheckReport> {
    let page = HtmlPage::parse(html);

    let raw = page
        .root_attribute(THEME_ATTRIBUTE)
        .ok_or_else(|| anyhow::anyhow!("check failed: <html> has no {THEME_ATTRIBUTE}"))?;
    let Some(theme) = Theme::parse(&raw) else {
        anyhow::bail!("check failed: {THEME_ATTRIBUTE}=\"{raw}\" is not dark or light");
    };

    let mut properties_checked = 0;
    for (property, expected) in theme.palette().properties() {
        let Some(actual) = page.root_property(property) else {
            anyhow::bail!("check failed: root is missing {property}");
        };
        if !is_hex_color(&actual) {
            anyhow::bail!("check failed: {property} = {actual:?} is not a #rrggbb color");
        }
        if !actual.eq_ignore_ascii_case(expected) {
            anyhow::bail!(
                "check failed: {property} is {actual} but the {theme} palette has {expected}"
            );
        }
        properties_checked += 1;
    }

    let toggles = page.count(&config.toggle_selector());
    if toggles > 1 {
        anyhow::bail!("check failed: {toggles} elements with id {}", config.toggle_id);
    }

    let has_toggle = toggles == 1;
    if has_toggle {
        let label = ToggleLabel::for_theme(theme);
        let text = page.button_text(&config.toggle_id).unwrap_or_default();
        if text != label.glyph {
            anyhow::bail!("check failed: toggle shows {text:?} while {theme} is active");
        }
        let aria = page.button_attribute(&config.toggle_id, "aria-label");
        if aria.as_deref() != Some(label.aria_label.as_str()) {
            anyhow::bail!(
                "check failed: toggle aria-label is {aria:?}, expected {:?}",
                label.aria_label
            );
        }
    }

    Ok(CheckReport {
        theme,
        has_toggle,
        properties_checked,
    })
}

fn is_hex_color(v: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color regex"))
        .is_match(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ThemeController;
    use crate::page::MemoryStore;

    fn rendered(theme: Theme) -> String {
        let page = HtmlPage::parse(
            r#"<html><body><nav><div class="navbar-right"></div></nav></body></html>"#,
        );
        let mut c = ThemeController::new(
            page,
            MemoryStore::with_entry("theme", theme.as_str()),
            ThemeConfig::default(),
        );
        c.init_theme();
        c.page().to_html().unwrap()
    }

    #[test]
    fn accepts_initialized_pages() {
        for theme in Theme::ALL {
            let report = check_page(&rendered(theme), &ThemeConfig::default()).unwrap();
            assert_eq!(report.theme, theme);
            assert!(report.has_toggle);
            assert_eq!(report.properties_checked, crate::palette::ROLE_COUNT);
        }
    }

    #[test]
    fn rejects_mixed_palettes() {
        let html = rendered(Theme::Dark).replace("#1e1e2e", "#eff1f5");
        let err = check_page(&html, &ThemeConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--ctp-base"));
    }

    #[test]
    fn rejects_duplicate_toggles() {
        let html = rendered(Theme::Light);
        let doubled = html.replacen(
            "<div class=\"navbar-right\">",
            "<div class=\"navbar-right\"><button id=\"theme-toggle\"></button>",
            1,
        );
        let err = check_page(&doubled, &ThemeConfig::default()).unwrap_err();
        assert!(err.to_string().contains("2 elements"));
    }

    #[test]
    fn rejects_missing_theme_attribute() {
        let err = check_page("<html><body></body></html>", &ThemeConfig::default()).unwrap_err();
        assert!(err.to_string().contains("data-theme"));
    }

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#A6e3a1"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("rgb(0,0,0)"));
    }
}
