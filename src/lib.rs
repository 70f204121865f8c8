//! trader-tui - terminal frontend for an RL futures trading console
//!
//! The crate is organized around the ratatui Component Architecture pattern:
//! components convert events into Actions, the root App routes Actions, and
//! drawing is delegated down the component tree. The dashboard is supervised
//! by an ErrorBoundary so a faulting panel degrades to a fallback screen
//! instead of tearing down the terminal.

pub mod action;
pub mod app;
pub mod component;
pub mod components;
pub mod config;
pub mod model;
pub mod services;
pub mod testkit;
pub mod tui;
pub mod util;
