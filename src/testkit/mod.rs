//! Test utilities
//!
//! Assertion helpers layered over ratatui's TestBackend. These support the
//! automated checks only and are not part of the application runtime path:
//! rendering harness, accessibility and contrast checks, frame-time budgets,
//! escape-byte hygiene, capability-degradation checks, and log capture.

pub mod a11y;
pub mod compat;
pub mod harness;
pub mod logs;
pub mod perf;
pub mod security;
