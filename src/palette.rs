use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two fixed color schemes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Catppuccin Mocha.
    #[default]
    Dark,
    /// Catppuccin Latte.
    Light,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    /// Parses the persisted / attribute form. Anything but the two literals is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &MOCHA,
            Theme::Light => &LATTE,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::parse(s).ok_or_else(|| anyhow::anyhow!("unknown theme {s:?} (expected dark or light)"))
    }
}

/// A color role shared by both palettes, e.g. `base` or `lavender`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    pub name: &'static str,
    /// CSS custom property set on the document root.
    pub property: &'static str,
}

pub const ROLE_COUNT: usize = 26;

macro_rules! roles {
    ($($name:literal),* $(,)?) => {
        [$(Role { name: $name, property: concat!("--ctp-", $name) }),*]
    };
}

pub const ROLES: [Role; ROLE_COUNT] = roles![
    "rosewater", "flamingo", "pink", "mauve", "red", "maroon", "peach", "yellow", "green",
    "teal", "sky", "sapphire", "blue", "lavender", "text", "subtext1", "subtext0", "overlay2",
    "overlay1", "overlay0", "surface2", "surface1", "surface0", "base", "mantle", "crust",
];

/// Hex colors indexed the same way as [`ROLES`].
#[derive(Debug)]
pub struct Palette {
    colors: [&'static str; ROLE_COUNT],
}

impl Palette {
    /// `(property, value)` pairs in role order.
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        ROLES
            .iter()
            .zip(self.colors.iter())
            .map(|(role, color)| (role.property, *color))
    }
}

static MOCHA: Palette = Palette {
    colors: [
        "#f5e0dc", "#f2cdcd", "#f5c2e7", "#cba6f7", "#f38ba8", "#eba0ac", "#fab387", "#f9e2af",
        "#a6e3a1", "#94e2d5", "#89dceb", "#74c7ec", "#89b4fa", "#b4befe", "#cdd6f4", "#bac2de",
        "#a6adc8", "#9399b2", "#7f849c", "#6c7086", "#585b70", "#45475a", "#313244", "#1e1e2e",
        "#181825", "#11111b",
    ],
};

static LATTE: Palette = Palette {
    colors: [
        "#dc8a78", "#dd7878", "#ea76cb", "#8839ef", "#d20f39", "#e64553", "#fe640b", "#df8e1d",
        "#40a02b", "#179299", "#04a5e5", "#209fb5", "#1e66f5", "#7287fd", "#4c4f69", "#5c5f77",
        "#6c6f85", "#7c7f93", "#8c8fa1", "#9ca0b0", "#acb0be", "#bcc0cc", "#ccd0da", "#eff1f5",
        "#e6e9ef", "#dce0e8",
    ],
};

pub const SUN: &str = "\u{2600}\u{fe0f}";
pub const MOON: &str = "\u{1f319}";

/// What the toggle control shows while `theme` is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleLabel {
    pub glyph: &'static str,
    pub aria_label: String,
}

impl ToggleLabel {
    pub fn for_theme(theme: Theme) -> Self {
        let glyph = match theme {
            Theme::Dark => SUN,
            Theme::Light => MOON,
        };
        Self {
            glyph,
            aria_label: format!("Switch to {} mode", theme.opposite()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_known_names() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse(" light\n"), Some(Theme::Light));
        assert_eq!(Theme::parse("Dark"), None);
        assert_eq!(Theme::parse("solarized"), None);
        assert_eq!(Theme::parse(""), None);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn palettes_cover_every_role() {
        for theme in Theme::ALL {
            let props: Vec<_> = theme.palette().properties().collect();
            assert_eq!(props.len(), ROLE_COUNT);
            assert!(props.iter().all(|(p, _)| p.starts_with("--ctp-")));
        }
        let color = |theme: Theme, property: &str| {
            theme
                .palette()
                .properties()
                .find(|(p, _)| *p == property)
                .map(|(_, c)| c)
        };
        assert_eq!(color(Theme::Dark, "--ctp-base"), Some("#1e1e2e"));
        assert_eq!(color(Theme::Light, "--ctp-base"), Some("#eff1f5"));
        assert_eq!(color(Theme::Light, "--ctp-crust"), Some("#dce0e8"));
        assert_eq!(color(Theme::Dark, "--ctp-nope"), None);
    }

    #[test]
    fn labels_name_the_other_mode() {
        let dark = ToggleLabel::for_theme(Theme::Dark);
        let light = ToggleLabel::for_theme(Theme::Light);
        assert_ne!(dark, light);
        assert_eq!(dark.glyph, SUN);
        assert_eq!(dark.aria_label, "Switch to light mode");
        assert_eq!(light.glyph, MOON);
        assert_eq!(light.aria_label, "Switch to dark mode");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        let t: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(t, Theme::Dark);
    }
}
