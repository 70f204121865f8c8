//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering
//! logic. Components communicate through Actions rather than direct state
//! mutation.

pub mod boundary;
pub mod button;
pub mod dashboard;
pub mod help_dialog;
pub mod job_output_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod splash;
pub mod tooltip;

pub use boundary::{BoundaryState, ErrorBoundary, FallbackFn};
pub use button::{Button, ButtonSize, ButtonVariant, Role, Semantics};
pub use dashboard::Dashboard;
pub use help_dialog::HelpDialog;
pub use job_output_dialog::JobOutputDialog;
pub use layout::{calculate_dashboard_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use splash::SplashComponent;
pub use tooltip::Tooltip;
