//! Data models for training-run execution and output

use regex::Regex;
use std::sync::mpsc::Receiver;
use std::sync::LazyLock;
use std::time::Instant;

/// Matches trainer progress lines like "Epoch 3/10"
static EPOCH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Epoch\s+(\d+)\s*/\s*(\d+)").unwrap());

/// Status of a training run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Running,
    Success,
    Failed,
}

/// Message sent from the job thread back to the UI
#[derive(Debug)]
pub enum JobMessage {
    Output(String),
    Completed(Option<i32>),
    Error(String),
}

/// Handle to a spawned background job
pub struct BackgroundJob {
    pub receiver: Receiver<JobMessage>,
    pub start_instant: Instant,
}

/// Accumulated output of a training run
#[derive(Debug, Clone, Default)]
pub struct JobOutput {
    /// Display form of the command being run
    pub command: String,
    pub output: String,
    pub status: RunStatus,
    /// Progress parsed from trainer output, if any
    pub current_epoch: Option<u32>,
    pub total_epochs: Option<u32>,
}

impl JobOutput {
    pub fn new(command: String) -> Self {
        Self {
            command,
            ..Self::default()
        }
    }

    /// Parse a single output line for epoch progress
    pub fn parse_output_line(&mut self, line: &str) {
        if let Some(caps) = EPOCH_REGEX.captures(line) {
            self.current_epoch = caps.get(1).and_then(|m| m.as_str().parse().ok());
            self.total_epochs = caps.get(2).and_then(|m| m.as_str().parse().ok());
        }
    }

    /// Progress ratio in 0..=1, if the trainer has reported epochs
    pub fn progress(&self) -> Option<f64> {
        match (self.current_epoch, self.total_epochs) {
            (Some(current), Some(total)) if total > 0 => {
                Some(f64::from(current) / f64::from(total))
            }
            _ => None,
        }
    }
}
