//! Small shared helpers: debouncing, formatting, ids, input sanitization

use chrono::{DateTime, Local, NaiveDate};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Defers delivery of the most recent value until a quiet period has elapsed.
///
/// Every `call` replaces the pending value and restarts the clock; `poll`
/// (driven by the event-loop tick) yields the value at most once per quiet
/// period. N calls within `wait` deliver exactly one value - the last.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
            deadline: None,
        }
    }

    /// Schedule `value` for delivery after the quiet period
    pub fn call(&mut self, value: T) {
        self.call_at(value, Instant::now());
    }

    /// Deliver the pending value if the quiet period has elapsed
    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    /// Whether a value is waiting for its quiet period
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    // Clock-injected variants so tests can drive time deterministically.

    pub fn call_at(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.wait);
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }
}

/// Format a date as "Jan 5, 2025"
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        date.format("%b"),
        date.format("%-d"),
        date.format("%Y")
    )
}

/// Format a local timestamp as "HH:MM:SS"
pub fn format_timestamp(time: DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Uppercase the first character, leaving the rest unchanged
///
/// Unicode-aware: a single lowercase character may uppercase to more than
/// one (e.g. German eszett).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generate a short, unique, prefix-tagged id
pub fn generate_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &uuid[..8])
}

/// Strip control bytes and cap the length of untrusted text
///
/// ESC is a control character, so terminal escape injection from file names
/// or typed input dies here before the text reaches a render buffer.
pub fn sanitize_text(input: &str, max_len: usize) -> String {
    let cleaned: String = input.chars().filter(|c| !c.is_control()).collect();
    let capped: String = cleaned.chars().take(max_len).collect();
    capped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debouncer_delivers_last_value_once() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        let start = Instant::now();

        d.call_at(1, start);
        d.call_at(2, start + Duration::from_millis(30));
        d.call_at(3, start + Duration::from_millis(60));

        // Still inside the quiet period of the last call
        assert_eq!(d.poll_at(start + Duration::from_millis(100)), None);

        // Quiet period elapsed: exactly one delivery, the last value
        assert_eq!(d.poll_at(start + Duration::from_millis(161)), Some(3));
        assert_eq!(d.poll_at(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn test_debouncer_retrigger_restarts_clock() {
        let mut d = Debouncer::new(Duration::from_millis(50));
        let start = Instant::now();

        d.call_at("a", start);
        // Re-trigger just before the deadline cancels the prior schedule
        d.call_at("b", start + Duration::from_millis(49));
        assert_eq!(d.poll_at(start + Duration::from_millis(55)), None);
        assert_eq!(d.poll_at(start + Duration::from_millis(99)), Some("b"));
    }

    #[test]
    fn test_debouncer_empty_poll() {
        let mut d: Debouncer<u32> = Debouncer::new(Duration::from_millis(10));
        assert!(!d.is_pending());
        assert_eq!(d.poll(), None);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2025");

        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_date(date), "Dec 31, 2024");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize("Hello"), "Hello");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("über"), "Über");
        assert_eq!(capitalize("x"), "X");
    }

    #[test]
    fn test_generate_id_unique_and_prefixed() {
        let a = generate_id("run");
        let b = generate_id("run");
        assert!(a.starts_with("run-"));
        assert_eq!(a.len(), "run-".len() + 8);
        assert_ne!(a, b);
    }

    #[test]
    fn test_sanitize_text_strips_escape_bytes() {
        let hostile = "normal\x1b[31mred\x1b[0m\x07text";
        let clean = sanitize_text(hostile, 100);
        assert!(!clean.contains('\x1b'));
        assert!(!clean.contains('\x07'));
        assert_eq!(clean, "normal[31mred[0mtext");
    }

    #[test]
    fn test_sanitize_text_caps_at_char_boundary() {
        let input = "héllo wörld";
        let clean = sanitize_text(input, 6);
        assert_eq!(clean, "héllo");
    }
}
