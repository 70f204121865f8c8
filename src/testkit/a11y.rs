//! Accessibility assertions
//!
//! Semantics checks for interactive elements and WCAG-style contrast math
//! for the true-color palette.

use crate::components::{Role, Semantics};
use ratatui::style::Color;

/// Assert that an element presents as an enabled button with `label`
pub fn assert_button(semantics: &Semantics, label: &str) {
    assert_eq!(semantics.role, Role::Button, "expected button role");
    assert_eq!(semantics.label, label);
    assert!(semantics.enabled, "button {label:?} should be enabled");
}

/// Assert that an element presents as a link targeting `href`
pub fn assert_link(semantics: &Semantics, href: &str) {
    assert_eq!(semantics.role, Role::Link, "expected link role");
    assert_eq!(semantics.href.as_deref(), Some(href));
}

/// Assert that an element reports a disabled state
pub fn assert_disabled(semantics: &Semantics) {
    assert!(
        !semantics.enabled,
        "element {:?} should report disabled",
        semantics.label
    );
}

/// Assert an element is reachable and activatable from the keyboard:
/// focusing it and pressing Enter must fire an action.
pub fn assert_keyboard_activatable(button: &mut crate::components::Button) {
    use crate::component::Component;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    button.focused = true;
    let action = button
        .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
        .expect("key handling failed");
    assert!(
        action.is_some(),
        "element {:?} not activatable via keyboard",
        button.semantics().label
    );
    button.focused = false;
}

/// RGB channels of a color, when it carries them
pub fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

fn channel(value: u8) -> f64 {
    let c = value as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.x
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// WCAG contrast ratio between two colors, in the range 1..=21
pub fn contrast_ratio(a: (u8, u8, u8), b: (u8, u8, u8)) -> f64 {
    let la = relative_luminance(a.0, a.1, a.2);
    let lb = relative_luminance(b.0, b.1, b.2);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Assert a foreground color meets `min_ratio` against a background
pub fn assert_min_contrast(fg: Color, bg: (u8, u8, u8), min_ratio: f64) {
    let Some(fg) = rgb(fg) else {
        panic!("contrast check needs an rgb color, got {fg:?}");
    };
    let ratio = contrast_ratio(fg, bg);
    assert!(
        ratio >= min_ratio,
        "contrast {ratio:.2} for {fg:?} on {bg:?} is below {min_ratio}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorDepth, TermCaps};
    use crate::model::Theme;

    const DARK_BG: (u8, u8, u8) = (16, 16, 16);

    #[test]
    fn test_contrast_ratio_extremes() {
        let ratio = contrast_ratio((255, 255, 255), (0, 0, 0));
        assert!((ratio - 21.0).abs() < 0.01);
        assert!((contrast_ratio((128, 128, 128), (128, 128, 128)) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_toolbar_button_is_keyboard_activatable() {
        use crate::action::Action;
        use crate::components::Button;

        let theme = Theme::new(TermCaps {
            color_depth: ColorDepth::Basic16,
            unicode: true,
            mouse: true,
        });
        let mut button = Button::new("Rescan Data", Action::RescanData, theme);
        assert_keyboard_activatable(&mut button);
    }

    #[test]
    fn test_truecolor_theme_text_is_readable() {
        let theme = Theme::new(TermCaps {
            color_depth: ColorDepth::TrueColor,
            unicode: true,
            mouse: true,
        });
        // AA for normal text
        assert_min_contrast(theme.text, DARK_BG, 4.5);
        assert_min_contrast(theme.accent, DARK_BG, 4.5);
        assert_min_contrast(theme.error, DARK_BG, 4.5);
        assert_min_contrast(theme.hyperlink, DARK_BG, 4.5);
    }
}
