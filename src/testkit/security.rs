//! Output hygiene checks
//!
//! Rendered buffers and user-derived strings must never carry control or
//! escape bytes that a terminal would interpret.

/// Whether `text` contains a control character other than newline
pub fn has_control_bytes(text: &str) -> bool {
    text.chars().any(|c| c.is_control() && c != '\n')
}

/// Assert that no control or escape bytes made it into `text`
pub fn assert_no_control_sequences(text: &str) {
    if let Some(c) = text.chars().find(|c| c.is_control() && *c != '\n') {
        panic!("control byte {:?} (U+{:04X}) found in output", c, c as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::sanitize_text;

    #[test]
    fn test_detects_escape_byte() {
        assert!(has_control_bytes("before\u{1b}[31mafter"));
        assert!(!has_control_bytes("plain text\nsecond line"));
    }

    #[test]
    fn test_sanitized_input_passes() {
        let cleaned = sanitize_text("name\u{1b}[2Jwith\u{7}escapes", 64);
        assert_no_control_sequences(&cleaned);
    }

    #[test]
    #[should_panic(expected = "control byte")]
    fn test_assert_panics_on_escape() {
        assert_no_control_sequences("bad\u{1b}]0;title\u{7}");
    }
}
