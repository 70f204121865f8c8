//! In-memory capture of tracing output
//!
//! Diagnostic-channel assertions need exact record counts, so the capture
//! installs a scoped subscriber writing into a shared buffer.

use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = SharedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a scoped subscriber and return the captured log lines
pub fn capture<F: FnOnce()>(f: F) -> Vec<String> {
    let writer = SharedWriter::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = writer.0.lock().expect("log buffer poisoned").clone();
    String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Count captured lines containing `needle`
pub fn count_matching(lines: &[String], needle: &str) -> usize {
    lines.iter().filter(|l| l.contains(needle)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{error, info};

    #[test]
    fn test_capture_counts_records() {
        let lines = capture(|| {
            info!("first");
            error!(code = 7, "second thing happened");
        });
        assert_eq!(count_matching(&lines, "first"), 1);
        assert_eq!(count_matching(&lines, "second thing"), 1);
        assert_eq!(count_matching(&lines, "absent"), 0);
    }
}
