//! Colors for the light and dark themes.

use ratatui::style::Color;

use crate::core::persistence::Theme;

use super::constants::{ACCENT, ACCENT_LIGHT_BG, ACCENT_SECONDARY, ACCENT_SECONDARY_LIGHT_BG};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub accent_secondary: Color,
    pub error: Color,
    pub selection_bg: Color,
}

pub(crate) fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            bg: Color::Rgb(24, 24, 27),
            fg: Color::Rgb(228, 228, 231),
            muted: Color::DarkGray,
            accent: ACCENT,
            accent_secondary: ACCENT_SECONDARY,
            error: Color::Rgb(248, 113, 113),
            selection_bg: Color::Rgb(63, 63, 70),
        },
        Theme::Light => Palette {
            bg: Color::Rgb(250, 250, 250),
            fg: Color::Rgb(24, 24, 27),
            muted: Color::Gray,
            accent: ACCENT_LIGHT_BG,
            accent_secondary: ACCENT_SECONDARY_LIGHT_BG,
            error: Color::Rgb(185, 28, 28),
            selection_bg: Color::Rgb(228, 228, 231),
        },
    }
}

/// Header indicator for the active theme.
pub(crate) fn indicator(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "☾ dark",
        Theme::Light => "☀ light",
    }
}
