//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `Dataset` - Market-data file metadata
//! - `RenderFault` - Captured render-phase exception record
//! - `JobOutput` - Streamed training-run output
//! - `ModalStack` - Modal overlay management
//! - `Theme` - Palette derived from detected terminal capabilities

pub mod dataset;
pub mod fault;
pub mod modal;
pub mod run;
pub mod ui;

// Re-export commonly used types
pub use dataset::Dataset;
pub use fault::RenderFault;
pub use modal::{Modal, ModalStack};
pub use run::{BackgroundJob, JobMessage, JobOutput, RunStatus};
pub use ui::{AppMode, Theme};
