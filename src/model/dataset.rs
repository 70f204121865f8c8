//! Market-data file metadata

use chrono::{DateTime, Local};
use std::path::PathBuf;

/// A CSV market-data file discovered in the data directory
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// File stem, already sanitized for display
    pub name: String,
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub rows: usize,
    pub modified: DateTime<Local>,
}

impl Dataset {
    /// Case-insensitive substring match against the dataset name
    pub fn matches_filter(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(name: &str) -> Dataset {
        Dataset {
            name: name.to_string(),
            path: PathBuf::from(format!("{name}.csv")),
            columns: vec!["ts".to_string(), "close".to_string()],
            rows: 10,
            modified: Local::now(),
        }
    }

    #[test]
    fn test_filter_matching() {
        let d = dataset("ES_futures_2024");
        assert!(d.matches_filter(""));
        assert!(d.matches_filter("futures"));
        assert!(d.matches_filter("FUTURES"));
        assert!(!d.matches_filter("nasdaq"));
    }
}
