//! Training run output overlay
//!
//! Full-screen overlay showing the streamed trainer output with parsed
//! epoch progress.

use crate::action::Action;
use crate::component::Component;
use crate::model::{JobOutput, RunStatus, Theme};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

/// Dialog showing live training run output
pub struct JobOutputDialog {
    pub scroll_offset: usize,
    /// Stick to the bottom of the output while the run is active
    follow: bool,
    theme: Theme,
}

impl JobOutputDialog {
    pub fn new(theme: Theme) -> Self {
        Self {
            scroll_offset: 0,
            follow: true,
            theme,
        }
    }

    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.follow = true;
    }

    fn status_style(&self, status: RunStatus) -> (&'static str, Style) {
        match status {
            RunStatus::Running => ("running", Style::default().fg(self.theme.warning)),
            RunStatus::Success => ("success", Style::default().fg(self.theme.success)),
            RunStatus::Failed => ("failed", Style::default().fg(self.theme.error)),
        }
    }

    /// Draw with the current job output
    pub fn draw_with_output(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        output: &JobOutput,
    ) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 2;
        let overlay_area = Rect::new(
            margin,
            margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(overlay_area);

        let (status_label, status_style) = self.status_style(output.status);

        let lines: Vec<Line> = output.output.lines().map(|l| Line::from(l.to_string())).collect();
        let total = lines.len();
        let visible_height = chunks[0].height.saturating_sub(2) as usize;
        let max_scroll = total.saturating_sub(visible_height);
        if self.follow {
            self.scroll_offset = max_scroll;
        } else if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(status_style)
                    .title(format!(" {} [{}] ", output.command, status_label))
                    .title_style(status_style.add_modifier(Modifier::BOLD)),
            )
            // Paragraph scrolling is u16; a long run must clamp, not wrap
            .scroll((self.scroll_offset.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, chunks[0]);

        // Epoch progress when the trainer has reported it
        let gauge_block = Block::default().borders(Borders::ALL).title(" Progress ");
        if let Some(ratio) = output.progress() {
            let label = format!(
                "Epoch {}/{}",
                output.current_epoch.unwrap_or(0),
                output.total_epochs.unwrap_or(0)
            );
            frame.render_widget(
                Gauge::default()
                    .block(gauge_block)
                    .gauge_style(status_style)
                    .ratio(ratio.clamp(0.0, 1.0))
                    .label(label),
                chunks[1],
            );
        } else {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    " waiting for trainer progress...",
                    Style::default().fg(self.theme.dim),
                )))
                .block(gauge_block),
                chunks[1],
            );
        }

        // Help bar
        let key_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Esc/q ", key_style),
            Span::raw("Close  "),
            Span::styled(" j/k ", key_style),
            Span::raw("Scroll  "),
            Span::styled(" G ", key_style),
            Span::raw("Follow"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

impl Component for JobOutputDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.follow = false;
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.follow = false;
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::Char('G') => {
                self.follow = true;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Rendering happens through draw_with_output; the dialog holds no
        // output of its own.
        Ok(())
    }
}
