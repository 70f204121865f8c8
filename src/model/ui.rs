//! UI state and theming
//!
//! The Theme is derived once from detected terminal capabilities and passed
//! down to components; no component inspects the environment itself.

use crate::config::{ColorDepth, TermCaps};
use ratatui::style::Color;

/// Main application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Splash,
    Running,
}

/// Spinner frames shown inside loading buttons
const SPINNER_UNICODE: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_ASCII: &[&str] = &["|", "/", "-", "\\"];

/// Color palette derived from terminal capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub depth: ColorDepth,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub hyperlink: Color,
    pub disabled: Color,
    spinner: &'static [&'static str],
}

impl Theme {
    pub fn new(caps: TermCaps) -> Self {
        let spinner = if caps.unicode {
            SPINNER_UNICODE
        } else {
            SPINNER_ASCII
        };

        match caps.color_depth {
            ColorDepth::TrueColor => Self {
                depth: ColorDepth::TrueColor,
                text: Color::Rgb(230, 230, 230),
                dim: Color::Rgb(128, 128, 128),
                accent: Color::Rgb(80, 200, 255),
                border: Color::Rgb(80, 200, 255),
                success: Color::Rgb(80, 220, 120),
                warning: Color::Rgb(240, 200, 80),
                error: Color::Rgb(240, 90, 90),
                hyperlink: Color::Rgb(110, 170, 255),
                disabled: Color::Rgb(100, 100, 100),
                spinner,
            },
            ColorDepth::Indexed256 => Self {
                depth: ColorDepth::Indexed256,
                text: Color::Indexed(253),
                dim: Color::Indexed(244),
                accent: Color::Indexed(81),
                border: Color::Indexed(81),
                success: Color::Indexed(78),
                warning: Color::Indexed(221),
                error: Color::Indexed(203),
                hyperlink: Color::Indexed(75),
                disabled: Color::Indexed(242),
                spinner,
            },
            ColorDepth::Basic16 => Self {
                depth: ColorDepth::Basic16,
                text: Color::White,
                dim: Color::DarkGray,
                accent: Color::Cyan,
                border: Color::Cyan,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
                hyperlink: Color::Blue,
                disabled: Color::DarkGray,
                spinner,
            },
            ColorDepth::Monochrome => Self {
                depth: ColorDepth::Monochrome,
                text: Color::Reset,
                dim: Color::Reset,
                accent: Color::Reset,
                border: Color::Reset,
                success: Color::Reset,
                warning: Color::Reset,
                error: Color::Reset,
                hyperlink: Color::Reset,
                disabled: Color::Reset,
                spinner,
            },
        }
    }

    /// Current spinner frame for a given animation step
    pub fn spinner_frame(&self, step: usize) -> &'static str {
        self.spinner[step % self.spinner.len()]
    }

    /// All palette colors, for capability-degradation checks
    pub fn palette(&self) -> [Color; 9] {
        [
            self.text,
            self.dim,
            self.accent,
            self.border,
            self.success,
            self.warning,
            self.error,
            self.hyperlink,
            self.disabled,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(depth: ColorDepth, unicode: bool) -> TermCaps {
        TermCaps {
            color_depth: depth,
            unicode,
            mouse: true,
        }
    }

    #[test]
    fn test_monochrome_uses_no_colors() {
        let theme = Theme::new(caps(ColorDepth::Monochrome, true));
        for color in theme.palette() {
            assert_eq!(color, Color::Reset);
        }
    }

    #[test]
    fn test_basic16_avoids_rgb_and_indexed() {
        let theme = Theme::new(caps(ColorDepth::Basic16, true));
        for color in theme.palette() {
            assert!(!matches!(color, Color::Rgb(..) | Color::Indexed(..)));
        }
    }

    #[test]
    fn test_ascii_spinner_without_unicode() {
        let theme = Theme::new(caps(ColorDepth::Basic16, false));
        assert!(theme.spinner_frame(0).is_ascii());
        // Frames wrap around
        assert_eq!(theme.spinner_frame(0), theme.spinner_frame(4));
    }
}
