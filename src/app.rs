//! Main application component
//!
//! The App is the root of the component tree. It owns the mode (splash or
//! running), the modal stack, the background job runner, and the error
//! boundary wrapped around the dashboard. All Actions flow through here:
//! events become Actions in the focused component, and `update` routes them.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    Dashboard, ErrorBoundary, HelpDialog, JobOutputDialog, QuitDialog, SplashComponent,
};
use crate::config::{Config, TermCaps};
use crate::model::{AppMode, JobOutput, Modal, ModalStack, RunStatus, Theme};
use crate::services::{build_train_command, open_url, scan_datasets, JobRunner};
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::path::Path;
use tracing::{info, warn};

/// Main application state
pub struct App {
    pub mode: AppMode,
    pub config: Config,
    theme: Theme,

    /// Stack of modal overlays; only the top one receives input
    pub modals: ModalStack,

    job_runner: JobRunner,
    /// Output of the current or most recent training run
    pub job_output: Option<JobOutput>,

    pub should_quit: bool,
    /// Set when the user requests a full UI rebuild; handled by the caller
    pub should_reload: bool,
    pub status_message: Option<String>,

    splash: SplashComponent,
    boundary: ErrorBoundary<Dashboard>,
    quit_dialog: QuitDialog,
    help_dialog: HelpDialog,
    job_output_dialog: JobOutputDialog,
}

impl App {
    pub fn new(config: Config, caps: TermCaps) -> Self {
        let theme = Theme::new(caps);
        let dashboard = Dashboard::new(&config, theme);

        Self {
            mode: AppMode::Splash,
            config,
            theme,
            modals: ModalStack::new(),
            job_runner: JobRunner::new(),
            job_output: None,
            should_quit: false,
            should_reload: false,
            status_message: None,
            splash: SplashComponent::new(theme),
            boundary: ErrorBoundary::new(dashboard, "dashboard", theme),
            quit_dialog: QuitDialog::new(theme),
            help_dialog: HelpDialog::new(theme),
            job_output_dialog: JobOutputDialog::new(theme),
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        self.boundary.child()
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        self.boundary.child_mut()
    }

    pub fn boundary(&self) -> &ErrorBoundary<Dashboard> {
        &self.boundary
    }

    pub fn is_training(&self) -> bool {
        self.job_runner.is_active()
    }

    fn rescan(&mut self) {
        let data_dir = self.config.data_dir.clone();
        match scan_datasets(Path::new(&data_dir)) {
            Ok(datasets) => {
                self.status_message = Some(format!("{} datasets", datasets.len()));
                self.dashboard_mut().set_datasets(datasets);
            }
            Err(err) => {
                warn!(error = %err, dir = %data_dir, "data directory scan failed");
                self.dashboard_mut().set_scan_error(err.to_string());
            }
        }
    }

    fn start_training(&mut self) {
        if self.job_runner.is_active() {
            self.status_message = Some("a training run is already active".to_string());
            return;
        }

        let (full_command, display_command) = build_train_command(&self.config);
        info!(command = %display_command, "starting training run");

        let mut output = self.job_runner.spawn(full_command);
        output.command = display_command;
        self.job_output = Some(output);

        self.dashboard_mut().set_training_active(true);
        self.job_output_dialog.reset();
        self.modals.push(Modal::JobOutput);
    }

    /// Drain job updates; clears the runner once the run has finished
    fn poll_job(&mut self) {
        if !self.job_runner.is_active() {
            return;
        }
        let Some(output) = self.job_output.as_mut() else {
            return;
        };

        self.job_runner.poll(output);

        if output.status != RunStatus::Running {
            let status = output.status;
            self.job_runner.clear();
            self.dashboard_mut().set_training_active(false);
            match status {
                RunStatus::Success => {
                    info!("training run finished");
                    self.status_message = Some("training run finished".to_string());
                }
                RunStatus::Failed => {
                    warn!("training run failed");
                    self.status_message = Some("training run failed".to_string());
                }
                RunStatus::Running => {}
            }
        }
    }

    fn draw_status_line(&self, frame: &mut Frame, area: Rect) {
        let Some(message) = &self.status_message else {
            return;
        };
        let line = Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(self.theme.dim),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.modals.top() {
            Some(Modal::QuitConfirm) => self.quit_dialog.draw(frame, area)?,
            Some(Modal::Help { .. }) => self.help_dialog.draw(frame, area)?,
            Some(Modal::JobOutput) => {
                if let Some(output) = &self.job_output {
                    self.job_output_dialog.draw_with_output(frame, area, output)?;
                }
            }
            None => {}
        }
        Ok(())
    }
}

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        self.boundary.init()?;
        self.rescan();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.mode == AppMode::Splash {
            return self.splash.handle_key_event(key);
        }

        // Only the top modal receives input
        match self.modals.top() {
            Some(Modal::QuitConfirm) => self.quit_dialog.handle_key_event(key),
            Some(Modal::Help { .. }) => self.help_dialog.handle_key_event(key),
            Some(Modal::JobOutput) => self.job_output_dialog.handle_key_event(key),
            None => self.boundary.handle_key_event(key),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.mode == AppMode::Splash || !self.modals.is_empty() {
            return Ok(None);
        }
        self.boundary.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.mode == AppMode::Splash {
                    return self.splash.update(Action::Tick);
                }
                self.poll_job();
                self.boundary.update(Action::Tick)?;
                Ok(None)
            }
            Action::SplashComplete => {
                self.mode = AppMode::Running;
                Ok(None)
            }
            Action::ForceQuit => {
                self.should_quit = true;
                Ok(None)
            }
            Action::ReloadUi => {
                info!("ui reload requested");
                self.should_reload = true;
                Ok(None)
            }
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
                Ok(None)
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
                Ok(None)
            }
            Action::OpenJobOutput => {
                if self.job_output.is_some() {
                    self.modals.push(Modal::JobOutput);
                } else {
                    self.status_message = Some("no training run yet".to_string());
                }
                Ok(None)
            }
            Action::CloseModal => {
                self.modals.pop();
                Ok(None)
            }
            Action::StartTraining => {
                self.start_training();
                Ok(None)
            }
            Action::RescanData => {
                self.rescan();
                Ok(None)
            }
            Action::OpenUrl(url) => {
                if let Err(err) = open_url(&url) {
                    warn!(error = %err, url = %url, "failed to open link");
                    self.status_message = Some(err.to_string());
                }
                Ok(None)
            }
            Action::BoundaryRetry => self.boundary.update(Action::BoundaryRetry),
            Action::Resize(_, _) => Ok(None),
            // Everything else belongs to the supervised dashboard
            other => {
                if self.mode == AppMode::Running && self.modals.is_empty() {
                    self.boundary.update(other)
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if self.mode == AppMode::Splash {
            return self.splash.draw(frame, area);
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        // The boundary contains dashboard faults; its draw never errors
        self.boundary.draw(frame, chunks[0])?;
        self.draw_status_line(frame, chunks[1]);

        self.draw_modal(frame, area)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorDepth;
    use crate::testkit::harness::{buffer_text, key, key_char, render_into};
    use crossterm::event::KeyCode;

    fn caps() -> TermCaps {
        TermCaps {
            color_depth: ColorDepth::Basic16,
            unicode: true,
            mouse: true,
        }
    }

    fn running_app() -> App {
        let mut app = App::new(Config::default(), caps());
        app.mode = AppMode::Running;
        app
    }

    #[test]
    fn test_splash_key_advances_to_running() {
        let mut app = App::new(Config::default(), caps());
        assert_eq!(app.mode, AppMode::Splash);

        let action = app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::SplashComplete));
        app.update(Action::SplashComplete).unwrap();
        assert_eq!(app.mode, AppMode::Running);
    }

    #[test]
    fn test_quit_flow_through_dialog() {
        let mut app = running_app();

        let action = app.handle_key_event(key_char('q')).unwrap();
        assert_eq!(action, Some(Action::OpenQuitDialog));
        app.update(Action::OpenQuitDialog).unwrap();
        assert!(!app.modals.is_empty());

        // The dialog now owns the keyboard
        let action = app.handle_key_event(key_char('y')).unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
        app.update(Action::ForceQuit).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_cancel_quit_returns_to_dashboard() {
        let mut app = running_app();
        app.update(Action::OpenQuitDialog).unwrap();

        let action = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_help_modal_opens_and_closes() {
        let mut app = running_app();

        let action = app.handle_key_event(key_char('?')).unwrap();
        assert_eq!(action, Some(Action::OpenHelp));
        app.update(Action::OpenHelp).unwrap();

        let terminal = render_into(&mut app, 100, 40);
        assert!(buffer_text(&terminal).contains("Keyboard Shortcuts"));

        app.update(Action::CloseModal).unwrap();
        let terminal = render_into(&mut app, 100, 40);
        assert!(!buffer_text(&terminal).contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_job_output_without_run_shows_status() {
        let mut app = running_app();
        app.update(Action::OpenJobOutput).unwrap();
        assert!(app.modals.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("no training run yet"));
    }

    #[test]
    fn test_start_training_opens_output_and_disables_button() {
        let mut app = running_app();
        app.config.trainer_binary = "true".to_string();

        app.update(Action::StartTraining).unwrap();
        assert!(app.job_output.is_some());
        assert_eq!(app.modals.top(), Some(&Modal::JobOutput));
        assert!(!app.dashboard().start_button().semantics().enabled);

        // A second start while the run is considered active is refused
        app.update(Action::StartTraining).unwrap();
        assert_eq!(
            app.status_message.as_deref(),
            Some("a training run is already active")
        );
    }

    #[test]
    fn test_reload_request_is_surfaced_not_handled() {
        let mut app = running_app();
        app.update(Action::ReloadUi).unwrap();
        assert!(app.should_reload);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_dashboard_renders_after_splash() {
        let mut app = running_app();
        let terminal = render_into(&mut app, 100, 40);
        let text = buffer_text(&terminal);
        assert!(text.contains("trader-tui"));
        assert!(text.contains("Trading Parameters"));
        assert!(text.contains("PPO Settings"));
    }
}
