//! Frame-time measurement
//!
//! Draws a component repeatedly into an in-memory terminal and reports the
//! average frame time, for budget assertions.

use crate::component::Component;
use ratatui::{backend::TestBackend, Terminal};
use std::time::{Duration, Instant};

/// Average time for one full draw over `frames` iterations
pub fn average_frame_time(
    component: &mut dyn Component,
    width: u16,
    height: u16,
    frames: u32,
) -> Duration {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal");

    let start = Instant::now();
    for _ in 0..frames {
        terminal
            .draw(|frame| {
                component
                    .draw(frame, frame.area())
                    .expect("component draw failed");
            })
            .expect("test draw");
    }
    start.elapsed() / frames
}

/// Assert drawing stays within a per-frame budget
pub fn assert_frame_budget(
    component: &mut dyn Component,
    width: u16,
    height: u16,
    frames: u32,
    budget: Duration,
) {
    let average = average_frame_time(component, width, height, frames);
    assert!(
        average <= budget,
        "average frame time {average:?} exceeds budget {budget:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use ratatui::{layout::Rect, widgets::Paragraph, Frame};

    struct Static;

    impl Component for Static {
        fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
            frame.render_widget(Paragraph::new("static content"), area);
            Ok(())
        }
    }

    #[test]
    fn test_trivial_component_fits_generous_budget() {
        let mut component = Static;
        assert_frame_budget(&mut component, 80, 24, 20, Duration::from_millis(50));
    }
}
