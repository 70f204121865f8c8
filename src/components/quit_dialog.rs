//! Quit confirmation dialog component

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::centered_popup;
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Quit confirmation dialog
pub struct QuitDialog {
    theme: Theme,
}

impl QuitDialog {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ForceQuit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 42, 7);

        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Quit trader-tui?",
                Style::default()
                    .fg(self.theme.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default()
                        .fg(self.theme.success)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Yes, quit  "),
                Span::styled(
                    " n/Esc ",
                    Style::default()
                        .fg(self.theme.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("No, cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.warning))
                    .title(" Quit? ")
                    .title_style(
                        Style::default()
                            .fg(self.theme.warning)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorDepth, TermCaps};
    use crate::testkit::compat::assert_buffer_within_depth;
    use crate::testkit::harness::{key, render_into};

    fn theme(depth: ColorDepth) -> Theme {
        Theme::new(TermCaps {
            color_depth: depth,
            unicode: true,
            mouse: true,
        })
    }

    #[test]
    fn test_confirm_and_cancel_keys() {
        let mut dialog = QuitDialog::new(theme(ColorDepth::Basic16));
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('y'))).unwrap(),
            Some(Action::ForceQuit)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
        assert_eq!(dialog.handle_key_event(key(KeyCode::Char('x'))).unwrap(), None);
    }

    #[test]
    fn test_quit_dialog_honors_monochrome() {
        let mut dialog = QuitDialog::new(theme(ColorDepth::Monochrome));
        let terminal = render_into(&mut dialog, 80, 24);
        assert_buffer_within_depth(&terminal, ColorDepth::Monochrome);
    }
}
