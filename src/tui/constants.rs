//! TUI constants: colors, timing, layout sizes.

use ratatui::style::Color;

/// Accent green color (#98FB98).
pub(super) const ACCENT: Color = Color::Rgb(152, 251, 152);

/// Secondary accent, soft cyan (#7EC8E3).
pub(super) const ACCENT_SECONDARY: Color = Color::Rgb(126, 200, 227);

/// Darker accents that stay readable on a light background.
pub(super) const ACCENT_LIGHT_BG: Color = Color::Rgb(34, 139, 34);
pub(super) const ACCENT_SECONDARY_LIGHT_BG: Color = Color::Rgb(30, 110, 160);

/// Event poll timeout in milliseconds (main loop).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Scroll amount for PageUp/PageDown.
pub(crate) const SCROLL_LINES_PAGE: u16 = 10;

/// Sidebar width in columns, borders included.
pub(crate) const SIDEBAR_WIDTH: u16 = 18;

/// Header height (title row + separator).
pub(crate) const HEADER_HEIGHT: u16 = 2;

/// Input bar height (one line plus borders).
pub(crate) const INPUT_HEIGHT: u16 = 3;

/// Shown in the panel when a request fails.
pub(crate) const ERROR_PREFIX: &str = "Sorry, I encountered an error: ";
pub(crate) const ERROR_SUFFIX: &str = ". Please try again.";

/// Spinner frames while a request is in flight (braille pattern, 4 frames).
pub(super) const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸"];

/// Milliseconds per spinner frame.
pub(super) const SPINNER_FRAME_MS: u128 = 120;
