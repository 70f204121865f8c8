//! Hyperlink launching
//!
//! Link buttons emit an OpenUrl action; this service hands the URL to the
//! platform opener without blocking the event loop.

use anyhow::{bail, Result};
use std::process::Command;

/// Open a URL in the system browser
pub fn open_url(url: &str) -> Result<()> {
    // Only plain web links; anything else could be a command injection vector
    if !url.starts_with("http://") && !url.starts_with("https://") {
        bail!("refusing to open non-http url: {}", url);
    }

    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg(url).spawn();

    #[cfg(target_os = "windows")]
    let result = Command::new("cmd").args(["/C", "start", "", url]).spawn();

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let result = Command::new("xdg-open").arg(url).spawn();

    result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(open_url("file:///etc/passwd").is_err());
        assert!(open_url("javascript:alert(1)").is_err());
        assert!(open_url("not a url").is_err());
    }
}
