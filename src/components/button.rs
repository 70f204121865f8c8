//! Button component
//!
//! A button renders either as a push button that emits its configured Action
//! on activation, or as a hyperlink that emits an OpenUrl action. Activation
//! paths are a left click inside the last rendered area, or Enter/Space
//! while focused. While `disabled` or `loading` is set, no activation path
//! fires and the semantics report a disabled state.

use crate::action::Action;
use crate::component::Component;
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Visual emphasis of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

/// Horizontal padding applied around the label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonSize {
    fn padding(self) -> u16 {
        match self {
            ButtonSize::Small => 1,
            ButtonSize::Medium => 2,
            ButtonSize::Large => 4,
        }
    }
}

/// Accessibility role of the rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Button,
    Link,
}

/// Semantic description of the rendered element, for assistive checks
#[derive(Debug, Clone, PartialEq)]
pub struct Semantics {
    pub role: Role,
    pub label: String,
    pub enabled: bool,
    pub href: Option<String>,
}

/// Stateless presentational button
pub struct Button {
    label: String,
    action: Action,
    variant: ButtonVariant,
    size: ButtonSize,
    pub disabled: bool,
    pub loading: bool,
    full_width: bool,
    href: Option<String>,
    pub focused: bool,
    theme: Theme,
    /// Last rendered area, used for mouse hit testing
    last_area: Option<Rect>,
    spinner_step: usize,
}

impl Button {
    /// Create a push button emitting `action` on activation
    pub fn new(label: impl Into<String>, action: Action, theme: Theme) -> Self {
        Self {
            label: label.into(),
            action,
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            disabled: false,
            loading: false,
            full_width: false,
            href: None,
            focused: false,
            theme,
            last_area: None,
            spinner_step: 0,
        }
    }

    /// Create a link button opening `href` on activation
    pub fn link(label: impl Into<String>, href: impl Into<String>, theme: Theme) -> Self {
        let href = href.into();
        let mut button = Self::new(label, Action::OpenUrl(href.clone()), theme);
        button.href = Some(href);
        button
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    /// Whether any activation path may fire
    pub fn is_enabled(&self) -> bool {
        !self.disabled && !self.loading
    }

    /// Semantic description of the rendered element
    pub fn semantics(&self) -> Semantics {
        Semantics {
            role: if self.href.is_some() {
                Role::Link
            } else {
                Role::Button
            },
            label: self.label.clone(),
            enabled: self.is_enabled(),
            href: self.href.clone(),
        }
    }

    /// The area this button occupied on the last draw
    pub fn last_area(&self) -> Option<Rect> {
        self.last_area
    }

    /// Whether a screen position falls inside the last rendered area
    pub fn hit(&self, column: u16, row: u16) -> bool {
        self.last_area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    fn activate(&self) -> Option<Action> {
        if self.is_enabled() {
            Some(self.action.clone())
        } else {
            None
        }
    }

    fn style(&self) -> Style {
        if !self.is_enabled() {
            return Style::default().fg(self.theme.disabled);
        }
        if self.href.is_some() {
            let style = Style::default()
                .fg(self.theme.hyperlink)
                .add_modifier(Modifier::UNDERLINED);
            return if self.focused {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            };
        }
        let base = match self.variant {
            ButtonVariant::Primary => Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
            ButtonVariant::Secondary => Style::default().fg(self.theme.text),
            ButtonVariant::Danger => Style::default()
                .fg(self.theme.error)
                .add_modifier(Modifier::BOLD),
        };
        if self.focused {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        }
    }

    fn display_label(&self) -> String {
        if self.loading {
            format!("{} {}", self.theme.spinner_frame(self.spinner_step), self.label)
        } else {
            self.label.clone()
        }
    }
}

impl Component for Button {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.focused {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if self.hit(mouse.column, mouse.row) {
                return Ok(self.activate());
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.loading {
            self.spinner_step = self.spinner_step.wrapping_add(1);
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let label = self.display_label();
        let padding = self.size.padding();
        let text_width = label.width() as u16 + padding * 2;

        let rect = if self.full_width {
            Rect { height: 1.min(area.height), ..area }
        } else {
            Rect {
                width: text_width.min(area.width),
                height: 1.min(area.height),
                ..area
            }
        };
        self.last_area = Some(rect);

        let pad = " ".repeat(padding as usize);
        let line = Line::from(Span::styled(
            format!("{pad}{label}{pad}"),
            self.style(),
        ));
        frame.render_widget(
            Paragraph::new(line).alignment(ratatui::layout::Alignment::Center),
            rect,
        );

        Ok(())
    }
}
