//! Trading console dashboard
//!
//! The supervised child of the error boundary: parameter panels, the
//! market-data table with a debounced filter line, and the toolbar of
//! buttons with hover tooltips.

use crate::action::Action;
use crate::component::Component;
use crate::components::button::{Button, ButtonVariant};
use crate::components::layout::calculate_dashboard_layout;
use crate::components::tooltip::Tooltip;
use crate::config::{Config, PpoSettings, TradingParams};
use crate::model::{Dataset, Theme};
use crate::util::{capitalize, format_date, Debouncer};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

/// Quiet period before typed filter text is applied
const FILTER_DEBOUNCE: Duration = Duration::from_millis(300);

/// Longest accepted filter query
const MAX_FILTER_LEN: usize = 64;

const TOOLBAR_BUTTONS: usize = 3;

/// Main dashboard screen
pub struct Dashboard {
    theme: Theme,
    trading: TradingParams,
    ppo: PpoSettings,
    docs_url: String,

    datasets: Vec<Dataset>,
    selected: usize,
    scan_error: Option<String>,

    /// Filter text as typed; applied only after the quiet period
    filter: String,
    applied_filter: String,
    pub filter_mode: bool,
    debouncer: Debouncer<String>,

    start_button: Button,
    rescan_button: Button,
    docs_button: Button,
    /// Toolbar keyboard focus (Tab cycles, None = table has focus)
    focus: Option<usize>,
    tooltip: Tooltip,
}

impl Dashboard {
    pub fn new(config: &Config, theme: Theme) -> Self {
        Self {
            theme,
            trading: config.trading_params.clone(),
            ppo: config.ppo_settings.clone(),
            docs_url: config.docs_url.clone(),
            datasets: Vec::new(),
            selected: 0,
            scan_error: None,
            filter: String::new(),
            applied_filter: String::new(),
            filter_mode: false,
            debouncer: Debouncer::new(FILTER_DEBOUNCE),
            start_button: Button::new("Start Training", Action::StartTraining, theme)
                .variant(ButtonVariant::Primary),
            rescan_button: Button::new("Rescan Data", Action::RescanData, theme)
                .variant(ButtonVariant::Secondary),
            docs_button: Button::link("Docs", config.docs_url.clone(), theme),
            focus: None,
            tooltip: Tooltip::new(theme),
        }
    }

    /// Shorter debounce for tests that drive the quiet period in real time
    pub fn with_filter_delay(mut self, wait: Duration) -> Self {
        self.debouncer = Debouncer::new(wait);
        self
    }

    pub fn set_datasets(&mut self, datasets: Vec<Dataset>) {
        self.datasets = datasets;
        self.scan_error = None;
        self.clamp_selection();
    }

    pub fn set_scan_error(&mut self, error: String) {
        self.scan_error = Some(error);
    }

    /// Reflect whether a training run is active in the start button
    pub fn set_training_active(&mut self, active: bool) {
        self.start_button.loading = active;
    }

    pub fn start_button(&self) -> &Button {
        &self.start_button
    }

    pub fn docs_button(&self) -> &Button {
        &self.docs_button
    }

    pub fn applied_filter(&self) -> &str {
        &self.applied_filter
    }

    /// Datasets passing the currently applied filter
    pub fn filtered(&self) -> Vec<&Dataset> {
        self.datasets
            .iter()
            .filter(|d| d.matches_filter(&self.applied_filter))
            .collect()
    }

    pub fn selected_dataset(&self) -> Option<&Dataset> {
        self.filtered().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn buttons_mut(&mut self) -> [&mut Button; TOOLBAR_BUTTONS] {
        [
            &mut self.start_button,
            &mut self.rescan_button,
            &mut self.docs_button,
        ]
    }

    fn set_focus(&mut self, focus: Option<usize>) {
        self.focus = focus;
        for (i, button) in self.buttons_mut().into_iter().enumerate() {
            button.focused = focus == Some(i);
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let next = match (self.focus, forward) {
            (None, true) => Some(0),
            (Some(i), true) if i + 1 < TOOLBAR_BUTTONS => Some(i + 1),
            (Some(_), true) => None,
            (None, false) => Some(TOOLBAR_BUTTONS - 1),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
        self.set_focus(next);
    }

    fn tooltip_text_for(&self, column: u16, row: u16) -> Option<(&'static str, Rect)> {
        if self.start_button.hit(column, row) {
            return self.start_button.last_area().map(|a| ("Launch a PPO training run", a));
        }
        if self.rescan_button.hit(column, row) {
            return self
                .rescan_button
                .last_area()
                .map(|a| ("Rescan the market-data directory", a));
        }
        if self.docs_button.hit(column, row) {
            return self.docs_button.last_area().map(|a| ("Open the documentation", a));
        }
        None
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitFilterMode),
            KeyCode::Backspace => Some(Action::FilterBackspace),
            KeyCode::Char(c) => Some(Action::FilterInput(c)),
            _ => None,
        }
    }

    fn draw_toolbar(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(" trader-tui ")
            .title_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut x = inner.x + 1;
        for button in [
            &mut self.start_button,
            &mut self.rescan_button,
            &mut self.docs_button,
        ] {
            let width = inner.right().saturating_sub(x);
            if width == 0 {
                break;
            }
            button.draw(frame, Rect::new(x, inner.y, width, 1))?;
            x = button
                .last_area()
                .map(|a| a.right() + 2)
                .unwrap_or(inner.right());
        }
        Ok(())
    }

    fn draw_trading_params(&self, frame: &mut Frame, area: Rect) {
        let rows = vec![
            ("Risk tolerance", capitalize(&self.trading.risk_tolerance)),
            (
                "Max position",
                self.trading.max_position_size.to_string(),
            ),
            (
                "Stop loss",
                format!("{:.1}%", self.trading.stop_loss_percentage),
            ),
        ];
        self.draw_param_panel(frame, area, " Trading Parameters ", &rows);
    }

    fn draw_ppo_settings(&self, frame: &mut Frame, area: Rect) {
        let rows = vec![
            ("Learning rate", format!("{}", self.ppo.learning_rate)),
            ("Batch size", self.ppo.batch_size.to_string()),
            ("Epochs", self.ppo.epochs.to_string()),
        ];
        self.draw_param_panel(frame, area, " PPO Settings ", &rows);
    }

    fn draw_param_panel(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        rows: &[(&str, String)],
    ) {
        let lines: Vec<Line> = rows
            .iter()
            .map(|(name, value)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:14}", name),
                        Style::default().fg(self.theme.dim),
                    ),
                    Span::styled(value.clone(), Style::default().fg(self.theme.text)),
                ])
            })
            .collect();

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.border))
                .title(title.to_string())
                .title_style(Style::default().fg(self.theme.accent)),
        );
        frame.render_widget(panel, area);
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let filtered = self.filtered();
        let title = if self.applied_filter.is_empty() {
            format!(" Market Data ({}) ", filtered.len())
        } else {
            format!(
                " Market Data ({}, filter: {}) ",
                filtered.len(),
                self.applied_filter
            )
        };

        let mut lines = Vec::new();
        if let Some(error) = &self.scan_error {
            lines.push(Line::from(Span::styled(
                format!(" {}", error),
                Style::default().fg(self.theme.error),
            )));
        } else if filtered.is_empty() {
            lines.push(Line::from(Span::styled(
                " No datasets found",
                Style::default().fg(self.theme.dim),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!(" {:28} {:>8} {:>6}  {}", "Name", "Rows", "Cols", "Modified"),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            for (i, dataset) in filtered.iter().enumerate() {
                let style = if i == self.selected {
                    Style::default()
                        .fg(self.theme.text)
                        .add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(self.theme.text)
                };
                lines.push(Line::from(Span::styled(
                    format!(
                        " {:28} {:>8} {:>6}  {}",
                        dataset.name,
                        dataset.rows,
                        dataset.columns.len(),
                        format_date(dataset.modified.date_naive()),
                    ),
                    style,
                )));
            }
        }

        let table = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.border))
                .title(title)
                .title_style(Style::default().fg(self.theme.accent)),
        );
        frame.render_widget(table, area);
    }

    fn draw_filter(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = if self.filter_mode {
            (
                format!(" /{}_", self.filter),
                Style::default().fg(self.theme.accent),
            )
        } else if self.filter.is_empty() {
            (
                " Press / to filter datasets".to_string(),
                Style::default().fg(self.theme.dim),
            )
        } else {
            (
                format!(" /{}", self.filter),
                Style::default().fg(self.theme.text),
            )
        };

        let line = Paragraph::new(Line::from(Span::styled(text, style))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.border))
                .title(" Filter "),
        );
        frame.render_widget(line, area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let help = Line::from(vec![
            Span::styled(" t ", Style::default().fg(self.theme.warning)),
            Span::styled("train  ", Style::default().fg(self.theme.dim)),
            Span::styled(" s ", Style::default().fg(self.theme.warning)),
            Span::styled("rescan  ", Style::default().fg(self.theme.dim)),
            Span::styled(" / ", Style::default().fg(self.theme.warning)),
            Span::styled("filter  ", Style::default().fg(self.theme.dim)),
            Span::styled(" ? ", Style::default().fg(self.theme.warning)),
            Span::styled("help  ", Style::default().fg(self.theme.dim)),
            Span::styled(" q ", Style::default().fg(self.theme.warning)),
            Span::styled("quit", Style::default().fg(self.theme.dim)),
        ]);
        frame.render_widget(Paragraph::new(help), area);
    }
}

impl Component for Dashboard {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.filter_mode {
            return Ok(self.handle_filter_key(key));
        }

        let action = match key.code {
            KeyCode::Char('/') => Some(Action::EnterFilterMode),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char('t') => Some(Action::StartTraining),
            KeyCode::Char('s') => Some(Action::RescanData),
            KeyCode::Char('o') => Some(Action::OpenUrl(self.docs_url.clone())),
            KeyCode::Char('O') => Some(Action::OpenJobOutput),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Tab => {
                self.cycle_focus(true);
                None
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let mut result = None;
                for button in self.buttons_mut() {
                    if let Some(action) = button.handle_key_event(key)? {
                        result = Some(action);
                        break;
                    }
                }
                result
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(_) => {
                for button in self.buttons_mut() {
                    if let Some(action) = button.handle_mouse_event(mouse)? {
                        return Ok(Some(action));
                    }
                }
                Ok(None)
            }
            MouseEventKind::Moved => {
                if let Some((text, target)) = self.tooltip_text_for(mouse.column, mouse.row) {
                    self.tooltip.set_text(text);
                    self.tooltip.set_target(target);
                }
                self.tooltip.handle_mouse_event(mouse)
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                for button in self.buttons_mut() {
                    button.update(Action::Tick)?;
                }
                if let Some(filter) = self.debouncer.poll() {
                    self.applied_filter = filter;
                    self.clamp_selection();
                }
            }
            Action::NextItem => {
                let len = self.filtered().len();
                if len > 0 && self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            Action::PrevItem => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::FirstItem => {
                self.selected = 0;
            }
            Action::LastItem => {
                self.selected = self.filtered().len().saturating_sub(1);
            }
            Action::EnterFilterMode => {
                self.filter_mode = true;
            }
            Action::ExitFilterMode => {
                self.filter_mode = false;
            }
            Action::FilterInput(c) => {
                // Typed input is untrusted like any other text source
                if !c.is_control() && self.filter.chars().count() < MAX_FILTER_LEN {
                    self.filter.push(c);
                    self.debouncer.call(self.filter.clone());
                }
            }
            Action::FilterBackspace => {
                self.filter.pop();
                self.debouncer.call(self.filter.clone());
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_dashboard_layout(area);

        self.draw_toolbar(frame, layout.toolbar)?;
        self.draw_trading_params(frame, layout.trading_params);
        self.draw_ppo_settings(frame, layout.ppo_settings);
        self.draw_table(frame, layout.table);
        self.draw_filter(frame, layout.filter);
        self.draw_help(frame, layout.help);

        // Tooltip floats above everything else
        self.tooltip.draw(frame, area)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorDepth, TermCaps};
    use crate::testkit::harness::{buffer_text, hover, key, render_into};
    use chrono::Local;
    use std::path::PathBuf;

    fn theme() -> Theme {
        Theme::new(TermCaps {
            color_depth: ColorDepth::Basic16,
            unicode: true,
            mouse: true,
        })
    }

    fn dataset(name: &str) -> Dataset {
        Dataset {
            name: name.to_string(),
            path: PathBuf::from(format!("{name}.csv")),
            columns: vec!["ts".to_string(), "close".to_string()],
            rows: 42,
            modified: Local::now(),
        }
    }

    fn dashboard() -> Dashboard {
        let mut d = Dashboard::new(&Config::default(), theme())
            .with_filter_delay(Duration::from_millis(0));
        d.set_datasets(vec![dataset("es_2024"), dataset("gold_2024"), dataset("nq_2023")]);
        d
    }

    #[test]
    fn test_renders_parameters_and_datasets() {
        let mut d = dashboard();
        let terminal = render_into(&mut d, 100, 40);
        let text = buffer_text(&terminal);
        assert!(text.contains("Risk tolerance"));
        assert!(text.contains("Medium"));
        assert!(text.contains("Batch size"));
        assert!(text.contains("es_2024"));
        assert!(text.contains("gold_2024"));
    }

    #[test]
    fn test_filter_applies_after_quiet_period() {
        let mut d = dashboard();
        d.update(Action::EnterFilterMode).unwrap();
        for c in "gold".chars() {
            d.update(Action::FilterInput(c)).unwrap();
        }
        // Not applied until the debouncer delivers on tick
        assert_eq!(d.filtered().len(), 3);

        d.update(Action::Tick).unwrap();
        assert_eq!(d.applied_filter(), "gold");
        let names: Vec<_> = d.filtered().iter().map(|ds| ds.name.clone()).collect();
        assert_eq!(names, vec!["gold_2024"]);
    }

    #[test]
    fn test_control_chars_never_reach_the_filter() {
        let mut d = dashboard();
        d.update(Action::FilterInput('\x1b')).unwrap();
        d.update(Action::FilterInput('g')).unwrap();
        d.update(Action::Tick).unwrap();
        assert_eq!(d.applied_filter(), "g");
    }

    #[test]
    fn test_selection_navigation_clamps() {
        let mut d = dashboard();
        d.update(Action::LastItem).unwrap();
        assert_eq!(d.selected_dataset().unwrap().name, "nq_2023");
        d.update(Action::NextItem).unwrap();
        assert_eq!(d.selected_dataset().unwrap().name, "nq_2023");
        d.update(Action::FirstItem).unwrap();
        d.update(Action::PrevItem).unwrap();
        assert_eq!(d.selected_dataset().unwrap().name, "es_2024");
    }

    #[test]
    fn test_training_shortcut_and_loading_state() {
        let mut d = dashboard();
        let action = d.handle_key_event(key(KeyCode::Char('t'))).unwrap();
        assert_eq!(action, Some(Action::StartTraining));

        d.set_training_active(true);
        assert!(!d.start_button().semantics().enabled);
    }

    #[test]
    fn test_tab_cycles_toolbar_focus() {
        let mut d = dashboard();
        d.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(
            d.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::StartTraining)
        );

        d.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(
            d.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::RescanData)
        );
    }

    #[test]
    fn test_hovering_start_button_shows_tooltip() {
        let mut d = dashboard();
        render_into(&mut d, 100, 40);
        let area = d.start_button().last_area().unwrap();

        d.handle_mouse_event(hover(area.x, area.y)).unwrap();
        let terminal = render_into(&mut d, 100, 40);
        assert!(buffer_text(&terminal).contains("Launch a PPO training run"));

        d.handle_mouse_event(hover(0, 39)).unwrap();
        let terminal = render_into(&mut d, 100, 40);
        assert!(!buffer_text(&terminal).contains("Launch a PPO training run"));
    }

    #[test]
    fn test_filter_mode_routes_typing() {
        let mut d = dashboard();
        d.update(Action::EnterFilterMode).unwrap();
        assert_eq!(
            d.handle_key_event(key(KeyCode::Char('x'))).unwrap(),
            Some(Action::FilterInput('x'))
        );
        assert_eq!(
            d.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::ExitFilterMode)
        );
    }
}
