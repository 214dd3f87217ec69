use std::fmt::Write as _;

use crate::config::ThemeConfig;
use crate::palette::Theme;

pub const TOGGLE_BUTTON_CSS: &str = r#"  background: transparent;
  border: 1px solid var(--ctp-surface1);
  border-radius: 6px;
  color: var(--ctp-text);
  cursor: pointer;
  font-size: 1.1rem;
  line-height: 1;
  margin-right: 0.75rem;
  padding: 0.35rem 0.55rem;
}
"#;

/// Palette blocks keyed on `data-theme`, followed by the toggle button rule.
pub fn render_stylesheet(config: &ThemeConfig) -> String {
    let mut css = String::new();
    for theme in Theme::ALL {
        let _ = writeln!(css, ":root[data-theme=\"{theme}\"] {{");
        for (property, value) in theme.palette().properties() {
            let _ = writeln!(css, "  {property}: {value};");
        }
        css.push_str("}\n\n");
    }
    let _ = writeln!(css, ".{} {{", config.toggle_class);
    css.push_str(TOGGLE_BUTTON_CSS);
    let _ = writeln!(
        css,
        ".{}:hover {{\n  background: var(--ctp-surface0);\n}}",
        config.toggle_class
    );
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_has_both_palettes_and_button_rule() {
        let css = render_stylesheet(&ThemeConfig::default());
        assert!(css.contains(":root[data-theme=\"dark\"] {\n  --ctp-rosewater: #f5e0dc;"));
        assert!(css.contains(":root[data-theme=\"light\"] {\n  --ctp-rosewater: #dc8a78;"));
        assert!(css.contains(".theme-toggle-btn {"));
        assert_eq!(css.matches("--ctp-crust:").count(), 2);
    }
}
