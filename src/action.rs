//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations/updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,
    /// Transition from splash to main app
    SplashComplete,
    /// Rebuild the whole frontend from scratch (the page-reload escape)
    ReloadUi,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next dataset row
    NextItem,
    /// Move to previous dataset row
    PrevItem,
    /// Jump to first dataset row
    FirstItem,
    /// Jump to last dataset row
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open training output overlay
    OpenJobOutput,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Dataset Filter
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter filter input mode
    EnterFilterMode,
    /// Exit filter input mode
    ExitFilterMode,
    /// Add character to the filter query
    FilterInput(char),
    /// Remove last character from the filter query
    FilterBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Toolbar
    // ─────────────────────────────────────────────────────────────────────────
    /// Launch a training run with the current configuration
    StartTraining,
    /// Rescan the market-data directory
    RescanData,
    /// Open a hyperlink in the system browser
    OpenUrl(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Error Boundary
    // ─────────────────────────────────────────────────────────────────────────
    /// Clear the captured fault and re-attempt rendering the dashboard
    BoundaryRetry,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::ReloadUi => write!(f, "ReloadUi"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenJobOutput => write!(f, "OpenJobOutput"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::EnterFilterMode => write!(f, "EnterFilterMode"),
            Action::ExitFilterMode => write!(f, "ExitFilterMode"),
            Action::FilterInput(c) => write!(f, "FilterInput('{}')", c),
            Action::FilterBackspace => write!(f, "FilterBackspace"),
            Action::StartTraining => write!(f, "StartTraining"),
            Action::RescanData => write!(f, "RescanData"),
            Action::OpenUrl(url) => write!(f, "OpenUrl({})", url),
            Action::BoundaryRetry => write!(f, "BoundaryRetry"),
        }
    }
}
