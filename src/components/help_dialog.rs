//! Help dialog component
//!
//! Displays all keyboard shortcuts available in the application.

use crate::action::Action;
use crate::component::Component;
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all keyboard shortcuts
pub struct HelpDialog {
    pub scroll_offset: usize,
    theme: Theme,
}

impl HelpDialog {
    pub fn new(theme: Theme) -> Self {
        Self {
            scroll_offset: 0,
            theme,
        }
    }
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            margin,
            margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let content = build_help_content(&self.theme);
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(self.theme.border)),
            )
            .scroll((self.scroll_offset.min(u16::MAX as usize) as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        // Render scrollbar if content exceeds visible area
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

/// Build the help content with all keyboard shortcuts
fn build_help_content(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let section_style = Style::default()
        .fg(theme.warning)
        .add_modifier(Modifier::BOLD);
    let divider_style = Style::default().fg(theme.dim);
    let key_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let description_style = Style::default().fg(theme.text);

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            section_style,
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            divider_style,
        )));
    };

    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:12}", key), key_style),
            Span::styled(description.to_string(), description_style),
        ]));
    };

    add_section(&mut lines, "Navigation");
    add_shortcut(&mut lines, "j / ↓", "Next dataset");
    add_shortcut(&mut lines, "k / ↑", "Previous dataset");
    add_shortcut(&mut lines, "g", "Jump to first dataset");
    add_shortcut(&mut lines, "G", "Jump to last dataset");
    add_shortcut(&mut lines, "Tab", "Cycle toolbar focus");

    add_section(&mut lines, "Training");
    add_shortcut(&mut lines, "t", "Start a training run");
    add_shortcut(&mut lines, "O", "Show last run output");

    add_section(&mut lines, "Data");
    add_shortcut(&mut lines, "s", "Rescan the data directory");
    add_shortcut(&mut lines, "/", "Filter datasets");
    add_shortcut(&mut lines, "Esc", "Exit filter / Cancel");

    add_section(&mut lines, "Links");
    add_shortcut(&mut lines, "o", "Open documentation");

    add_section(&mut lines, "Fault Screen");
    add_shortcut(&mut lines, "r", "Try again after a fault");
    add_shortcut(&mut lines, "R / F5", "Reload the whole UI");
    add_shortcut(&mut lines, "d", "Toggle technical details");

    add_section(&mut lines, "General");
    add_shortcut(&mut lines, "?", "Show this help");
    add_shortcut(&mut lines, "q", "Quit / Close dialog");

    // Footer
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        divider_style,
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorDepth, TermCaps};
    use crate::testkit::compat::assert_buffer_within_depth;
    use crate::testkit::harness::{buffer_text, key, render_into};

    fn theme(depth: ColorDepth) -> Theme {
        Theme::new(TermCaps {
            color_depth: depth,
            unicode: true,
            mouse: true,
        })
    }

    #[test]
    fn test_renders_shortcut_sections() {
        let mut dialog = HelpDialog::new(theme(ColorDepth::Basic16));
        let terminal = render_into(&mut dialog, 80, 40);
        let text = buffer_text(&terminal);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Start a training run"));
        assert!(text.contains("Reload the whole UI"));
    }

    #[test]
    fn test_close_keys() {
        let mut dialog = HelpDialog::new(theme(ColorDepth::Basic16));
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('?'))).unwrap(),
            Some(Action::CloseModal)
        );
    }

    #[test]
    fn test_scroll_clamps_at_zero() {
        let mut dialog = HelpDialog::new(theme(ColorDepth::Basic16));
        dialog.handle_key_event(key(KeyCode::Char('k'))).unwrap();
        assert_eq!(dialog.scroll_offset, 0);
        dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(dialog.scroll_offset, 1);
    }

    #[test]
    fn test_help_honors_color_depth() {
        let mut dialog = HelpDialog::new(theme(ColorDepth::Monochrome));
        let terminal = render_into(&mut dialog, 80, 40);
        assert_buffer_within_depth(&terminal, ColorDepth::Monochrome);

        let mut dialog = HelpDialog::new(theme(ColorDepth::Basic16));
        let terminal = render_into(&mut dialog, 80, 40);
        assert_buffer_within_depth(&terminal, ColorDepth::Basic16);
    }
}
