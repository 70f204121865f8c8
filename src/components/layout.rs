//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Dashboard screen layout areas
pub struct DashboardLayout {
    pub toolbar: Rect,
    pub trading_params: Rect,
    pub ppo_settings: Rect,
    pub table: Rect,
    pub filter: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the dashboard layout
///
/// Toolbar on top, parameter panels in a left column, the dataset table on
/// the right, filter line and help bar at the bottom.
pub fn calculate_dashboard_layout(area: Rect) -> DashboardLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_chunks[1]);

    let param_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(7)])
        .split(content_chunks[0]);

    DashboardLayout {
        toolbar: main_chunks[0],
        trading_params: param_chunks[0],
        ppo_settings: param_chunks[1],
        table: content_chunks[1],
        filter: main_chunks[2],
        help: main_chunks[3],
    }
}
