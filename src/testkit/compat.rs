//! Capability-degradation checks
//!
//! Themes are derived from detected capabilities; these helpers assert the
//! derived palette never exceeds what the terminal can show, and that
//! components survive tiny viewports.

use crate::component::Component;
use crate::config::{ColorDepth, TermCaps};
use crate::model::Theme;
use crate::testkit::harness::render_into;
use ratatui::{backend::TestBackend, style::Color, Terminal};

/// One theme per color depth, unicode on
pub fn themes_for_all_depths() -> Vec<Theme> {
    [
        ColorDepth::TrueColor,
        ColorDepth::Indexed256,
        ColorDepth::Basic16,
        ColorDepth::Monochrome,
    ]
    .into_iter()
    .map(|color_depth| {
        Theme::new(TermCaps {
            color_depth,
            unicode: true,
            mouse: true,
        })
    })
    .collect()
}

/// Assert the palette only uses colors the depth can represent
pub fn assert_palette_within_depth(theme: &Theme) {
    for color in theme.palette() {
        match theme.depth {
            ColorDepth::TrueColor => {}
            ColorDepth::Indexed256 => {
                assert!(
                    !matches!(color, Color::Rgb(..)),
                    "256-color palette holds rgb color {color:?}"
                );
            }
            ColorDepth::Basic16 => {
                assert!(
                    !matches!(color, Color::Rgb(..) | Color::Indexed(..)),
                    "16-color palette holds {color:?}"
                );
            }
            ColorDepth::Monochrome => {
                assert_eq!(color, Color::Reset, "monochrome palette holds {color:?}");
            }
        }
    }
}

/// Assert every cell in a rendered buffer stays within a color depth
///
/// Catches hard-coded colors that bypass the capability-derived theme.
pub fn assert_buffer_within_depth(terminal: &Terminal<TestBackend>, depth: ColorDepth) {
    let buffer = terminal.backend().buffer();
    for cell in buffer.content() {
        for color in [cell.fg, cell.bg] {
            match depth {
                ColorDepth::TrueColor => {}
                ColorDepth::Indexed256 => {
                    assert!(
                        !matches!(color, Color::Rgb(..)),
                        "256-color buffer holds rgb color {color:?}"
                    );
                }
                ColorDepth::Basic16 => {
                    assert!(
                        !matches!(color, Color::Rgb(..) | Color::Indexed(..)),
                        "16-color buffer holds {color:?}"
                    );
                }
                ColorDepth::Monochrome => {
                    assert_eq!(color, Color::Reset, "monochrome buffer holds {color:?}");
                }
            }
        }
    }
}

/// Assert a component renders without error down to a minimum viewport
pub fn assert_renders_at_min_size(component: &mut dyn Component, min_width: u16, min_height: u16) {
    for (width, height) in [(80, 24), (min_width, min_height)] {
        render_into(component, width, height);
    }
}
