//! External service interactions
//!
//! This module contains services for interacting with external systems:
//! - Trainer CLI command construction
//! - Background job execution
//! - Market-data directory scanning
//! - Hyperlink launching

pub mod datasets;
pub mod job_runner;
pub mod launcher;
pub mod trainer;

pub use datasets::scan_datasets;
pub use job_runner::JobRunner;
pub use launcher::open_url;
pub use trainer::build_train_command;
