//! Rendering and event-driving harness
//!
//! Renders any Component into an in-memory terminal and feeds it synthetic
//! key and mouse events through the same pipeline the main loop uses.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::TestBackend, Frame, Terminal};

/// Render with a closure against a fresh in-memory terminal
pub fn render_terminal<F>(width: u16, height: u16, f: F) -> Terminal<TestBackend>
where
    F: FnOnce(&mut Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal.draw(f).expect("test draw");
    terminal
}

/// Render a component full-screen into a fresh in-memory terminal
pub fn render_into(component: &mut dyn Component, width: u16, height: u16) -> Terminal<TestBackend> {
    render_terminal(width, height, |frame| {
        component
            .draw(frame, frame.area())
            .expect("component draw failed");
    })
}

/// All visible text in the terminal buffer, row by row
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

/// A key press without modifiers
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn key_char(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// A left mouse click at a screen position
pub fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// A pointer move to a screen position
pub fn hover(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Moved,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Run one event through the handle/update pipeline, exactly as the main
/// loop does: the event becomes an Action, and Actions may chain.
pub fn dispatch(component: &mut dyn Component, event: Event) -> Result<()> {
    let action = match event {
        Event::Key(key) => component.handle_key_event(key)?,
        Event::Mouse(mouse) => component.handle_mouse_event(mouse)?,
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        _ => None,
    };

    let mut current_action = action;
    while let Some(a) = current_action {
        current_action = component.update(a)?;
    }
    Ok(())
}

/// Deliver a tick, chaining any follow-up actions
pub fn tick(component: &mut dyn Component) -> Result<()> {
    let mut current_action = Some(Action::Tick);
    while let Some(a) = current_action {
        current_action = component.update(a)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    struct Hello;

    impl Component for Hello {
        fn draw(&mut self, frame: &mut Frame, area: ratatui::layout::Rect) -> Result<()> {
            frame.render_widget(Paragraph::new("hello world"), area);
            Ok(())
        }
    }

    #[test]
    fn test_render_and_extract_text() {
        let mut hello = Hello;
        let terminal = render_into(&mut hello, 20, 3);
        assert!(buffer_text(&terminal).contains("hello world"));
    }
}
