//! trader-tui - terminal frontend for an RL futures trading console

use anyhow::Result;
use crossterm::event::Event;
use std::time::Duration;
use trader_tui::action::Action;
use trader_tui::app::App;
use trader_tui::component::Component;
use trader_tui::config::{Config, TermCaps};
use trader_tui::tui::Tui;
use tracing_subscriber::EnvFilter;

/// Log to a file; stdout belongs to the TUI while it owns the screen
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = Config::config_dir()?;
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::never(log_dir, "trader-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}

fn main() -> Result<()> {
    let _log_guard = init_logging();

    let caps = TermCaps::detect();
    let config = Config::load().unwrap_or_default();

    let mut tui = Tui::new()?
        .with_tick_rate(Duration::from_millis(100))
        .with_mouse_capture(caps.mouse);
    tui.enter()?;

    let result = run(&mut tui, config, caps);

    tui.exit()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Outer loop: a ReloadUi request tears the App down and rebuilds it
fn run(tui: &mut Tui, config: Config, caps: TermCaps) -> Result<()> {
    loop {
        let mut app = App::new(config.clone(), caps);
        app.init()?;

        run_app(tui, &mut app)?;

        if app.should_reload {
            tui.clear()?;
            continue;
        }
        return Ok(());
    }
}

/// Main event loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit && !app.should_reload {
        tui.draw(|frame| {
            // App::draw only errors above the boundary; nothing to do but log
            if let Err(err) = app.draw(frame, frame.area()) {
                tracing::error!(error = %err, "root draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // An action may produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
