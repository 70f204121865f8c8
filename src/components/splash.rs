//! Splash screen component
//!
//! Displays the trader-tui logo briefly before transitioning to the main app.

use crate::action::Action;
use crate::component::Component;
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// Splash screen component
pub struct SplashComponent {
    /// When the splash screen was shown
    start_time: Option<Instant>,
    /// Duration to show splash before auto-advancing
    duration: Duration,
    theme: Theme,
}

impl SplashComponent {
    pub fn new(theme: Theme) -> Self {
        Self {
            start_time: None,
            duration: Duration::from_millis(1500),
            theme,
        }
    }

    /// Check if splash duration has elapsed
    pub fn is_complete(&self) -> bool {
        self.start_time
            .map(|t| t.elapsed() >= self.duration)
            .unwrap_or(false)
    }

    /// Get the logo as ASCII art
    fn get_logo() -> Vec<&'static str> {
        vec![
            r"  _                 _                 _         _ ",
            r" | |_ _ __ __ _  __| | ___ _ __      | |_ _   _(_)",
            r" | __| '__/ _` |/ _` |/ _ \ '__|_____| __| | | | |",
            r" | |_| | | (_| | (_| |  __/ | |_____|| |_| |_| | |",
            r"  \__|_|  \__,_|\__,_|\___|_|         \__|\__,_|_|",
        ]
    }
}

impl Component for SplashComponent {
    fn init(&mut self) -> Result<()> {
        self.start_time = Some(Instant::now());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Any key press skips the splash screen
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::ForceQuit)),
            _ => Ok(Some(Action::SplashComplete)),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.is_complete() {
            return Ok(Some(Action::SplashComplete));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let logo_lines = Self::get_logo();
        let logo_height = logo_lines.len() as u16;
        let logo_width = logo_lines.first().map(|l| l.len()).unwrap_or(0) as u16;

        // Center the logo
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((area.height.saturating_sub(logo_height + 4)) / 2),
                Constraint::Length(logo_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let logo_area = chunks[1];

        let logo_paragraph: Vec<Line> = logo_lines
            .iter()
            .map(|line| {
                Line::from(Span::styled(
                    *line,
                    Style::default().fg(self.theme.accent),
                ))
            })
            .collect();

        let centered_x = (area.width.saturating_sub(logo_width)) / 2;
        let logo_rect = Rect::new(centered_x, logo_area.y, logo_width.min(area.width), logo_height);

        frame.render_widget(Paragraph::new(logo_paragraph), logo_rect);

        // Render subtitle
        let subtitle = Line::from(Span::styled(
            "RL futures trading console",
            Style::default().fg(self.theme.dim),
        ));

        let subtitle_width = 26;
        let subtitle_x = (area.width.saturating_sub(subtitle_width)) / 2;
        let subtitle_rect = Rect::new(subtitle_x, chunks[3].y, subtitle_width.min(area.width), 1);

        frame.render_widget(Paragraph::new(subtitle), subtitle_rect);

        Ok(())
    }
}
