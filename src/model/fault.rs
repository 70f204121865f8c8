//! Captured render-phase exception record

use chrono::{DateTime, Local};
use std::any::Any;
use thiserror::Error;

/// A fault captured while drawing a supervised component
///
/// Carries the failure message, the name of the component that produced it,
/// and the capture timestamp. This is the record the error boundary logs and
/// shows in its technical-detail panel.
#[derive(Debug, Clone, Error)]
#[error("{component}: {message}")]
pub struct RenderFault {
    pub message: String,
    pub component: String,
    pub captured_at: DateTime<Local>,
}

impl RenderFault {
    pub fn new(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            component: component.into(),
            captured_at: Local::now(),
        }
    }

    /// Build a fault from a caught panic payload
    ///
    /// Panic payloads are `&str` for literal messages and `String` for
    /// formatted ones; anything else gets a generic message.
    pub fn from_panic(component: impl Into<String>, payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panic during rendering".to_string()
        };
        Self::new(component, message)
    }
}
