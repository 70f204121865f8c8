//! Error boundary component
//!
//! Supervises a child component's draw call. A render-phase exception (an
//! `Err` return or a panic) is captured as a `RenderFault` and the boundary
//! switches to a fallback screen instead of letting the fault escape. The
//! user can retry rendering or request a full UI reload; if the fallback
//! itself faults the boundary parks in an unrecoverable state that only the
//! reload escape leaves.

use crate::action::Action;
use crate::component::Component;
use crate::components::button::{Button, ButtonVariant};
use crate::components::layout::centered_popup;
use crate::model::{RenderFault, Theme};
use crate::util::format_timestamp;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::panic::{self, AssertUnwindSafe};
use tracing::error;

/// Custom fallback renderer supplied by the caller
///
/// When present it is rendered as-is in the faulted state, suppressing the
/// default panel entirely.
pub type FallbackFn = Box<dyn Fn(&mut Frame, Rect, &RenderFault)>;

/// Lifecycle of the supervised subtree
#[derive(Debug, Clone)]
pub enum BoundaryState {
    /// Child renders normally and receives events
    Healthy,
    /// Child faulted; fallback is shown, retry is available
    Faulted(RenderFault),
    /// The fallback itself faulted; only the reload escape remains
    Unrecoverable(RenderFault),
}

/// Supervising boundary around a child component
pub struct ErrorBoundary<C: Component> {
    child: C,
    /// Component name recorded in fault records and log entries
    child_name: String,
    state: BoundaryState,
    fault_count: u32,
    /// Whether the expandable technical-detail section is offered
    detail_enabled: bool,
    detail_expanded: bool,
    fallback: Option<FallbackFn>,
    retry_button: Button,
    reload_button: Button,
    theme: Theme,
}

impl<C: Component> ErrorBoundary<C> {
    pub fn new(child: C, child_name: impl Into<String>, theme: Theme) -> Self {
        let mut retry_button =
            Button::new("Try Again", Action::BoundaryRetry, theme).variant(ButtonVariant::Primary);
        retry_button.focused = true;
        let reload_button =
            Button::new("Reload UI", Action::ReloadUi, theme).variant(ButtonVariant::Danger);

        Self {
            child,
            child_name: child_name.into(),
            state: BoundaryState::Healthy,
            fault_count: 0,
            detail_enabled: cfg!(debug_assertions),
            detail_expanded: false,
            fallback: None,
            retry_button,
            reload_button,
            theme,
        }
    }

    /// Override the technical-detail availability resolved at startup
    pub fn with_detail(mut self, enabled: bool) -> Self {
        self.detail_enabled = enabled;
        self
    }

    /// Supply a custom fallback, replacing the default panel
    pub fn with_fallback(mut self, fallback: FallbackFn) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn child(&self) -> &C {
        &self.child
    }

    pub fn child_mut(&mut self) -> &mut C {
        &mut self.child
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn is_faulted(&self) -> bool {
        !matches!(self.state, BoundaryState::Healthy)
    }

    /// Number of transitions into the faulted state since construction
    pub fn fault_count(&self) -> u32 {
        self.fault_count
    }

    /// Record a fault and emit exactly one diagnostic log entry
    fn enter_faulted(&mut self, fault: RenderFault) {
        self.fault_count += 1;
        error!(
            component = %fault.component,
            error = %fault.message,
            faults = self.fault_count,
            "render fault captured"
        );
        self.state = BoundaryState::Faulted(fault);
    }

    fn enter_unrecoverable(&mut self, fault: RenderFault) {
        self.fault_count += 1;
        error!(
            component = %fault.component,
            error = %fault.message,
            faults = self.fault_count,
            "fallback render fault, boundary is unrecoverable"
        );
        self.state = BoundaryState::Unrecoverable(fault);
    }

    /// Run a render step with panics contained
    ///
    /// The default panic hook prints to stderr, which would corrupt the
    /// terminal while the TUI owns the screen; it is silenced for the
    /// duration of the protected call.
    fn protected<F>(step: F) -> std::result::Result<Result<()>, RenderFault>
    where
        F: FnOnce() -> Result<()>,
    {
        let prev_hook = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        let outcome = panic::catch_unwind(AssertUnwindSafe(step));
        panic::set_hook(prev_hook);

        outcome.map_err(|payload| RenderFault::from_panic("", payload.as_ref()))
    }

    fn draw_default_fallback(&mut self, frame: &mut Frame, area: Rect) {
        let fault = match &self.state {
            BoundaryState::Faulted(fault) => fault.clone(),
            _ => return,
        };

        let height = if self.detail_expanded { 15 } else { 10 };
        let popup = centered_popup(area, 56, height);
        frame.render_widget(Clear, popup);

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Something went wrong",
                Style::default()
                    .fg(self.theme.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("The {} panel failed to render.", fault.component),
                Style::default().fg(self.theme.text),
            )),
            Line::from(""),
        ];

        if self.detail_enabled {
            let marker = if self.detail_expanded { "▾" } else { "▸" };
            content.push(Line::from(Span::styled(
                format!(" {} (d) technical details", marker),
                Style::default().fg(self.theme.dim),
            )));
            if self.detail_expanded {
                content.push(Line::from(Span::styled(
                    format!("   error:     {}", fault.message),
                    Style::default().fg(self.theme.dim),
                )));
                content.push(Line::from(Span::styled(
                    format!("   component: {}", fault.component),
                    Style::default().fg(self.theme.dim),
                )));
                content.push(Line::from(Span::styled(
                    format!("   captured:  {}", format_timestamp(fault.captured_at)),
                    Style::default().fg(self.theme.dim),
                )));
                content.push(Line::from(Span::styled(
                    format!("   faults:    {}", self.fault_count),
                    Style::default().fg(self.theme.dim),
                )));
            }
            content.push(Line::from(""));
        }

        content.push(Line::from(Span::styled(
            " r Try Again   R Reload UI   Tab switch   Enter activate",
            Style::default().fg(self.theme.dim),
        )));

        let panel = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.error))
                    .title(" Fault ")
                    .title_style(
                        Style::default()
                            .fg(self.theme.error)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(panel, popup);

        // Buttons on the row above the bottom border, clamped to the popup
        // so a narrow terminal never pushes a draw outside the buffer
        let button_row = popup.bottom().saturating_sub(2);
        let retry_area = Rect::new(popup.x + 6, button_row, 15, 1).intersection(popup);
        let reload_area = Rect::new(popup.x + 30, button_row, 15, 1).intersection(popup);
        // Button::draw only errors through the frame, which cannot fail here
        if !retry_area.is_empty() {
            let _ = self.retry_button.draw(frame, retry_area);
        }
        if !reload_area.is_empty() {
            let _ = self.reload_button.draw(frame, reload_area);
        }
    }

    /// Minimal static panel for the unrecoverable state; plain text only,
    /// so it cannot itself fault.
    fn draw_unrecoverable(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let text = Paragraph::new(vec![
            Line::from(""),
            Line::from("The fallback screen failed to render."),
            Line::from(""),
            Line::from("Press R to reload the interface."),
        ])
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(text, area);
    }
}

impl<C: Component> Component for ErrorBoundary<C> {
    fn init(&mut self) -> Result<()> {
        self.child.init()
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.state {
            BoundaryState::Healthy => self.child.handle_key_event(key),
            BoundaryState::Faulted(_) => {
                let action = match key.code {
                    KeyCode::Char('r') => Some(Action::BoundaryRetry),
                    KeyCode::Char('R') | KeyCode::F(5) => Some(Action::ReloadUi),
                    KeyCode::Char('d') if self.detail_enabled => {
                        self.detail_expanded = !self.detail_expanded;
                        None
                    }
                    KeyCode::Tab => {
                        self.retry_button.focused = !self.retry_button.focused;
                        self.reload_button.focused = !self.reload_button.focused;
                        None
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if let Some(action) = self.retry_button.handle_key_event(key)? {
                            Some(action)
                        } else {
                            self.reload_button.handle_key_event(key)?
                        }
                    }
                    _ => None,
                };
                Ok(action)
            }
            BoundaryState::Unrecoverable(_) => {
                let action = match key.code {
                    KeyCode::Char('R') | KeyCode::F(5) => Some(Action::ReloadUi),
                    _ => None,
                };
                Ok(action)
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match self.state {
            BoundaryState::Healthy => self.child.handle_mouse_event(mouse),
            BoundaryState::Faulted(_) => {
                if let Some(action) = self.retry_button.handle_mouse_event(mouse)? {
                    return Ok(Some(action));
                }
                self.reload_button.handle_mouse_event(mouse)
            }
            BoundaryState::Unrecoverable(_) => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::BoundaryRetry => {
                match self.state {
                    BoundaryState::Faulted(_) => {
                        // Clear the fault; the child is re-attempted on the
                        // next draw and may immediately fault again.
                        self.state = BoundaryState::Healthy;
                    }
                    // Retry is refused once the fallback itself has faulted
                    BoundaryState::Unrecoverable(_) => {}
                    BoundaryState::Healthy => {}
                }
                Ok(None)
            }
            _ => match self.state {
                BoundaryState::Healthy => self.child.update(action),
                _ => Ok(None),
            },
        }
    }

    /// Draw the supervised subtree; returns Ok in all states so faults
    /// below this boundary never escape it.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if matches!(self.state, BoundaryState::Healthy) {
            let child = &mut self.child;
            let outcome = Self::protected(AssertUnwindSafe(|| child.draw(frame, area)));
            match outcome {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(err)) => {
                    // A partially drawn frame may be left behind; the
                    // fallback clears its own panel area.
                    self.enter_faulted(RenderFault::new(self.child_name.as_str(), err.to_string()));
                }
                Err(panic_fault) => {
                    self.enter_faulted(RenderFault::new(self.child_name.as_str(), panic_fault.message));
                }
            }
        }

        if let BoundaryState::Faulted(fault) = &self.state {
            if let Some(fallback) = self.fallback.take() {
                let fault = fault.clone();
                let outcome =
                    Self::protected(AssertUnwindSafe(|| {
                        fallback(frame, area, &fault);
                        Ok(())
                    }));
                match outcome {
                    Ok(_) => self.fallback = Some(fallback),
                    Err(panic_fault) => {
                        let fault =
                            RenderFault::new(format!("{} fallback", self.child_name), panic_fault.message);
                        self.enter_unrecoverable(fault);
                    }
                }
            } else {
                self.draw_default_fallback(frame, area);
            }
        }

        if matches!(self.state, BoundaryState::Unrecoverable(_)) {
            self.draw_unrecoverable(frame, area);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorDepth, TermCaps};
    use crate::testkit::harness::{buffer_text, key, render_into};
    use crate::testkit::logs;

    fn theme() -> Theme {
        Theme::new(TermCaps {
            color_depth: ColorDepth::Basic16,
            unicode: true,
            mouse: true,
        })
    }

    /// Child whose draw faults while `broken` is set
    struct Flaky {
        broken: bool,
        panics: bool,
    }

    impl Component for Flaky {
        fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
            if self.broken {
                if self.panics {
                    panic!("chart exploded");
                }
                anyhow::bail!("chart exploded");
            }
            frame.render_widget(Paragraph::new("all good"), area);
            Ok(())
        }
    }

    fn boundary(broken: bool, panics: bool) -> ErrorBoundary<Flaky> {
        ErrorBoundary::new(Flaky { broken, panics }, "chart", theme()).with_detail(true)
    }

    #[test]
    fn test_healthy_child_renders_normally() {
        let mut b = boundary(false, false);
        let terminal = render_into(&mut b, 80, 24);
        assert!(buffer_text(&terminal).contains("all good"));
        assert!(!b.is_faulted());
    }

    #[test]
    fn test_error_return_enters_faulted_with_one_log() {
        let mut b = boundary(true, false);
        let lines = logs::capture(|| {
            let terminal = render_into(&mut b, 80, 24);
            assert!(buffer_text(&terminal).contains("Something went wrong"));
        });

        assert!(b.is_faulted());
        assert_eq!(logs::count_matching(&lines, "render fault captured"), 1);
    }

    #[test]
    fn test_panic_is_contained_and_draw_returns_ok() {
        let mut b = boundary(true, true);
        let terminal = render_into(&mut b, 80, 24);
        assert!(buffer_text(&terminal).contains("Something went wrong"));
        match b.state() {
            BoundaryState::Faulted(fault) => {
                assert_eq!(fault.message, "chart exploded");
                assert_eq!(fault.component, "chart");
            }
            other => panic!("expected faulted state, got {:?}", other),
        }
    }

    #[test]
    fn test_redraw_while_faulted_does_not_log_again() {
        let mut b = boundary(true, false);
        let lines = logs::capture(|| {
            render_into(&mut b, 80, 24);
            render_into(&mut b, 80, 24);
            render_into(&mut b, 80, 24);
        });
        assert_eq!(logs::count_matching(&lines, "render fault captured"), 1);
    }

    #[test]
    fn test_retry_with_persistent_fault_refaults_and_logs_per_transition() {
        let mut b = boundary(true, false);
        let lines = logs::capture(|| {
            render_into(&mut b, 80, 24);
            assert!(b.is_faulted());

            b.update(Action::BoundaryRetry).unwrap();
            assert!(!b.is_faulted());

            // Fault condition persists: next draw re-enters faulted
            render_into(&mut b, 80, 24);
            assert!(b.is_faulted());
        });

        assert_eq!(b.fault_count(), 2);
        assert_eq!(logs::count_matching(&lines, "render fault captured"), 2);
    }

    #[test]
    fn test_retry_heals_once_fault_is_gone() {
        let mut b = boundary(true, false);
        render_into(&mut b, 80, 24);
        assert!(b.is_faulted());

        b.child_mut().broken = false;
        b.update(Action::BoundaryRetry).unwrap();
        let terminal = render_into(&mut b, 80, 24);
        assert!(buffer_text(&terminal).contains("all good"));
        assert!(!b.is_faulted());
    }

    #[test]
    fn test_custom_fallback_suppresses_default_panel() {
        let mut b = boundary(true, false).with_fallback(Box::new(|frame, area, fault| {
            frame.render_widget(
                Paragraph::new(format!("custom view: {}", fault.message)),
                area,
            );
        }));

        let terminal = render_into(&mut b, 80, 24);
        let text = buffer_text(&terminal);
        assert!(text.contains("custom view: chart exploded"));
        assert!(!text.contains("Something went wrong"));
    }

    #[test]
    fn test_faulting_fallback_enters_unrecoverable() {
        let mut b = boundary(true, false)
            .with_fallback(Box::new(|_, _, _| panic!("fallback is broken too")));

        let lines = logs::capture(|| {
            let terminal = render_into(&mut b, 80, 24);
            assert!(buffer_text(&terminal).contains("Press R to reload"));
        });

        assert!(matches!(b.state(), BoundaryState::Unrecoverable(_)));
        assert_eq!(logs::count_matching(&lines, "unrecoverable"), 1);

        // Retry is refused; reload is the only escape
        b.update(Action::BoundaryRetry).unwrap();
        assert!(matches!(b.state(), BoundaryState::Unrecoverable(_)));
        assert_eq!(
            b.handle_key_event(key(KeyCode::Char('r'))).unwrap(),
            None
        );
        assert_eq!(
            b.handle_key_event(key(KeyCode::Char('R'))).unwrap(),
            Some(Action::ReloadUi)
        );
    }

    #[test]
    fn test_faulted_keys_offer_retry_and_reload() {
        let mut b = boundary(true, false);
        render_into(&mut b, 80, 24);

        assert_eq!(
            b.handle_key_event(key(KeyCode::Char('r'))).unwrap(),
            Some(Action::BoundaryRetry)
        );
        assert_eq!(
            b.handle_key_event(key(KeyCode::Char('R'))).unwrap(),
            Some(Action::ReloadUi)
        );
        // Enter activates the focused button (Try Again by default)
        assert_eq!(
            b.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::BoundaryRetry)
        );
    }

    #[test]
    fn test_fallback_survives_tiny_terminals() {
        // The button rects must clamp to the popup; off-buffer writes panic
        // inside ratatui and would escape the boundary's own draw
        for (width, height) in [(20, 8), (10, 3), (44, 24), (80, 24)] {
            let mut b = boundary(true, false);
            render_into(&mut b, width, height);
            assert!(b.is_faulted());
        }
    }

    #[test]
    fn test_detail_section_hidden_without_dev_detail() {
        let mut b =
            ErrorBoundary::new(Flaky { broken: true, panics: false }, "chart", theme())
                .with_detail(false);
        let terminal = render_into(&mut b, 80, 24);
        assert!(!buffer_text(&terminal).contains("technical details"));
    }

    #[test]
    fn test_detail_section_expands() {
        let mut b = boundary(true, false);
        render_into(&mut b, 80, 24);
        b.handle_key_event(key(KeyCode::Char('d'))).unwrap();
        let terminal = render_into(&mut b, 80, 24);
        let text = buffer_text(&terminal);
        assert!(text.contains("error:"));
        assert!(text.contains("chart exploded"));
    }
}
