//! Persistence of user preferences (theme, last speech language) in ~/.config/explore/.
//!
//! Each preference is a one-line text file. Session history is never written to disk.

use std::fs;
use std::io;
use std::path::Path;

use crate::core::paths;

const THEME_FILE: &str = "theme";
const LANGUAGE_FILE: &str = "last_language";

/// Color theme of the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

fn read_pref(dir: &Path, file: &str) -> Option<String> {
    fs::read_to_string(dir.join(file))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn write_pref(dir: &Path, file: &str, value: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join(file), value)
}

fn config_dir() -> io::Result<std::path::PathBuf> {
    paths::config_dir().ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No config directory"))
}

/// Load the saved theme, if any.
pub fn load_theme() -> Option<Theme> {
    load_theme_from(&paths::config_dir()?)
}

/// Save the theme. Creates the config directory if needed.
pub fn save_theme(theme: Theme) -> io::Result<()> {
    write_pref(&config_dir()?, THEME_FILE, theme.as_str())
}

/// Load the last used speech language code, if any.
pub fn load_last_language() -> Option<String> {
    read_pref(&paths::config_dir()?, LANGUAGE_FILE)
}

/// Save the last used speech language code.
pub fn save_last_language(code: &str) -> io::Result<()> {
    write_pref(&config_dir()?, LANGUAGE_FILE, code)
}

pub(crate) fn load_theme_from(dir: &Path) -> Option<Theme> {
    read_pref(dir, THEME_FILE).and_then(|s| Theme::parse(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggles() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn theme_parse_accepts_any_case() {
        assert_eq!(Theme::parse(" Light\n"), Some(Theme::Light));
        assert_eq!(Theme::parse("DARK"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
    }

    #[test]
    fn theme_roundtrip_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_theme_from(dir.path()), None);
        write_pref(dir.path(), THEME_FILE, Theme::Light.as_str()).unwrap();
        assert_eq!(load_theme_from(dir.path()), Some(Theme::Light));
    }

    #[test]
    fn blank_pref_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_pref(dir.path(), LANGUAGE_FILE, "  \n").unwrap();
        assert_eq!(read_pref(dir.path(), LANGUAGE_FILE), None);
    }
}
