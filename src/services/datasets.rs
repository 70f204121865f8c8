//! Market-data directory scanning
//!
//! Reads CSV headers and row counts so the dashboard can show what data is
//! available without loading whole files into memory.

use crate::model::Dataset;
use crate::util::sanitize_text;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

/// Maximum displayed length of a dataset name
const MAX_NAME_LEN: usize = 64;

/// Scan a directory for CSV market-data files
///
/// Returns datasets sorted by name. Files that fail to parse are skipped
/// rather than failing the whole scan; a data directory often contains
/// half-written downloads.
pub fn scan_datasets(dir: &Path) -> Result<Vec<Dataset>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("reading data directory {}", dir.display()))?;

    let mut datasets = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv || !path.is_file() {
            continue;
        }

        if let Some(dataset) = peek_csv(&path) {
            datasets.push(dataset);
        }
    }

    datasets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(datasets)
}

/// Read headers, row count and modification time for a single CSV file
fn peek_csv(path: &Path) -> Option<Dataset> {
    let mut reader = csv::Reader::from_path(path).ok()?;

    let columns: Vec<String> = reader
        .headers()
        .ok()?
        .iter()
        .map(|h| sanitize_text(h, MAX_NAME_LEN))
        .collect();

    let rows = reader.records().filter_map(|r| r.ok()).count();

    let modified: DateTime<Local> = fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::from)
        .unwrap_or_else(|_| Local::now());

    // File names come from outside the app; treat them as untrusted
    let stem = path.file_stem()?.to_string_lossy();
    let name = sanitize_text(&stem, MAX_NAME_LEN);

    Some(Dataset {
        name,
        path: path.to_path_buf(),
        columns,
        rows,
        modified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, contents: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_scan_finds_csv_files_sorted() {
        let tmp = TempDir::new().unwrap();
        write_csv(tmp.path(), "zz_gold.csv", "ts,close\n1,10\n2,11\n");
        write_csv(tmp.path(), "aa_es.csv", "ts,open,close\n1,9,10\n");
        write_csv(tmp.path(), "notes.txt", "not a csv");

        let datasets = scan_datasets(tmp.path()).unwrap();
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0].name, "aa_es");
        assert_eq!(datasets[0].columns, vec!["ts", "open", "close"]);
        assert_eq!(datasets[0].rows, 1);
        assert_eq!(datasets[1].name, "zz_gold");
        assert_eq!(datasets[1].rows, 2);
    }

    #[test]
    fn test_scan_missing_directory_errors() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(scan_datasets(&missing).is_err());
    }

    #[test]
    fn test_hostile_header_is_sanitized() {
        let tmp = TempDir::new().unwrap();
        write_csv(tmp.path(), "evil.csv", "ts,\x1b[31mclose\n1,10\n");

        let datasets = scan_datasets(tmp.path()).unwrap();
        assert_eq!(datasets.len(), 1);
        assert!(!datasets[0].columns.iter().any(|c| c.contains('\x1b')));
    }
}
