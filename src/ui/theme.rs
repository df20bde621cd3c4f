use std::fs;
use std::path::PathBuf;

use ratatui::style::{Color, Modifier, Style};
use rust_embed::Embed;
use serde::Deserialize;
use tracing::warn;

use crate::config::Config;
use crate::engine::render::Role;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

pub const DEFAULT_THEME: &str = "terminal-default";

/// A color written as `#rrggbb` or `reset` (the terminal's own color).
/// Unreadable values fall back to white instead of rejecting the theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct ThemeColor(Color);

impl ThemeColor {
    pub fn color(self) -> Color {
        self.0
    }

    fn parse(value: &str) -> Color {
        if value.eq_ignore_ascii_case("reset") {
            return Color::Reset;
        }
        let Some(hex) = value.strip_prefix('#').filter(|hex| hex.len() == 6) else {
            return Color::White;
        };
        match u32::from_str_radix(hex, 16) {
            Ok(rgb) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
            Err(_) => Color::White,
        }
    }
}

impl From<String> for ThemeColor {
    fn from(value: String) -> Self {
        Self(Self::parse(&value))
    }
}

impl From<&str> for ThemeColor {
    fn from(value: &str) -> Self {
        Self(Self::parse(value))
    }
}

/// Colors of the target text, one per render role.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TextColors {
    pub typed: ThemeColor,
    pub incorrect: ThemeColor,
    pub incorrect_bg: ThemeColor,
    pub remaining: ThemeColor,
    pub cursor_fg: ThemeColor,
    pub cursor_bg: ThemeColor,
}

impl Default for TextColors {
    fn default() -> Self {
        Self {
            typed: "#5fd75f".into(),
            incorrect: "#ff5f5f".into(),
            incorrect_bg: "reset".into(),
            remaining: "#808080".into(),
            cursor_fg: "#1c1c1c".into(),
            cursor_bg: "#d0d0d0".into(),
        }
    }
}

/// Colors of everything around the text: background, frame, header and stats.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ChromeColors {
    pub background: ThemeColor,
    pub foreground: ThemeColor,
    pub border: ThemeColor,
    pub title: ThemeColor,
    pub title_bar: ThemeColor,
    pub label: ThemeColor,
    pub value: ThemeColor,
    pub success: ThemeColor,
}

impl Default for ChromeColors {
    fn default() -> Self {
        Self {
            background: "reset".into(),
            foreground: "reset".into(),
            border: "#585858".into(),
            title: "#5fafff".into(),
            title_bar: "reset".into(),
            label: "#808080".into(),
            value: "#5fafff".into(),
            success: "#5fd75f".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub text: TextColors,
    #[serde(default)]
    pub chrome: ChromeColors,
}

impl Theme {
    /// Looks the theme up in the user's theme directory first, then among the bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        let user_path = user_theme_dir().join(format!("{name}.toml"));
        if let Ok(content) = fs::read_to_string(&user_path) {
            match toml::from_str::<Theme>(&content) {
                Ok(theme) => return Some(theme),
                Err(err) => warn!(path = %user_path.display(), %err, "ignoring user theme"),
            }
        }

        let file = ThemeAssets::get(&format!("{name}.toml"))?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        match toml::from_str::<Theme>(content) {
            Ok(theme) => Some(theme),
            Err(err) => {
                warn!(theme = name, %err, "bundled theme failed to parse");
                None
            }
        }
    }

    /// Names of the bundled themes, sorted.
    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(str::to_string))
            .collect();
        names.sort();
        names
    }

    /// How a render role is drawn.
    pub fn role_style(&self, role: Role) -> Style {
        let text = &self.text;
        match role {
            Role::Typed => Style::default().fg(text.typed.color()),
            Role::Incorrect => Style::default()
                .fg(text.incorrect.color())
                .bg(text.incorrect_bg.color())
                .add_modifier(Modifier::UNDERLINED),
            Role::Cursor => Style::default()
                .fg(text.cursor_fg.color())
                .bg(text.cursor_bg.color()),
            Role::Remaining => Style::default().fg(text.remaining.color()),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default()
            .fg(self.chrome.foreground.color())
            .bg(self.chrome.background.color())
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.chrome.label.color())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            text: TextColors::default(),
            chrome: ChromeColors::default(),
        })
    }
}

fn user_theme_dir() -> PathBuf {
    Config::config_dir().join("themes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(ThemeColor::from("#ff8000").color(), Color::Rgb(255, 128, 0));
        assert_eq!(ThemeColor::from("RESET").color(), Color::Reset);
        assert_eq!(ThemeColor::from("nonsense").color(), Color::White);
        assert_eq!(ThemeColor::from("#12345").color(), Color::White);
        assert_eq!(ThemeColor::from("#gg0000").color(), Color::White);
    }

    #[test]
    fn test_bundled_themes_load() {
        let names = Theme::available_themes();
        assert!(names.contains(&DEFAULT_THEME.to_string()));
        for name in names {
            let theme = Theme::load(&name).unwrap_or_else(|| panic!("theme {name} failed to load"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_partial_theme_keeps_defaults() {
        let theme: Theme = toml::from_str(
            r##"
            name = "mine"
            [text]
            typed = "#00ff00"
            "##,
        )
        .unwrap();
        assert_eq!(theme.text.typed.color(), Color::Rgb(0, 255, 0));
        assert_eq!(theme.text.incorrect, TextColors::default().incorrect);
        assert_eq!(theme.chrome.border, ChromeColors::default().border);
    }

    #[test]
    fn test_unknown_theme() {
        assert!(Theme::load("no-such-theme").is_none());
    }

    #[test]
    fn test_roles_have_distinct_styles() {
        let theme = Theme::default();
        assert_ne!(theme.role_style(Role::Typed), theme.role_style(Role::Incorrect));
        assert_ne!(theme.role_style(Role::Cursor), theme.role_style(Role::Remaining));
        assert!(
            theme
                .role_style(Role::Incorrect)
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );
    }
}
