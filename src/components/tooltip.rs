//! Tooltip component
//!
//! Visibility is fully derived from pointer movement: inside the target
//! region shows the tooltip, outside hides it. No debouncing, no animation.

use crate::action::Action;
use crate::component::Component;
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Minimum screen size below which tooltips are suppressed
const MIN_WIDTH: u16 = 24;
const MIN_HEIGHT: u16 = 8;

/// Hover tooltip anchored to a target region
pub struct Tooltip {
    text: String,
    target: Option<Rect>,
    visible: bool,
    pointer: (u16, u16),
    theme: Theme,
}

impl Tooltip {
    pub fn new(theme: Theme) -> Self {
        Self {
            text: String::new(),
            target: None,
            visible: false,
            pointer: (0, 0),
            theme,
        }
    }

    /// Set the hover target, typically after the owner's layout pass
    pub fn set_target(&mut self, target: Rect) {
        self.target = Some(target);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Position the tooltip panel next to the pointer, clamped to the screen
    fn panel_area(&self, screen: Rect) -> Rect {
        let width = (self.text.width() as u16 + 4).min(screen.width);
        let height = 3;
        let (px, py) = self.pointer;

        let x = if px + 2 + width <= screen.right() {
            px + 2
        } else {
            screen.right().saturating_sub(width)
        };
        let y = if py + 1 + height <= screen.bottom() {
            py + 1
        } else {
            py.saturating_sub(height)
        };

        Rect::new(x, y, width, height)
    }
}

impl Component for Tooltip {
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let MouseEventKind::Moved = mouse.kind {
            self.pointer = (mouse.column, mouse.row);
            self.visible = self
                .target
                .is_some_and(|t| t.contains(Position::new(mouse.column, mouse.row)));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if !self.visible || self.text.is_empty() {
            return Ok(());
        }
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return Ok(());
        }

        let panel = self.panel_area(area);
        frame.render_widget(Clear, panel);
        frame.render_widget(
            Paragraph::new(self.text.clone())
                .style(Style::default().fg(self.theme.text))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(self.theme.dim)),
                )
                .alignment(ratatui::layout::Alignment::Center),
            panel,
        );
        Ok(())
    }
}
