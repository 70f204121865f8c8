//! Application configuration and terminal capability detection
//!
//! Capabilities are resolved once at startup and passed down explicitly;
//! nothing below `main` reads the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Trading risk parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingParams {
    pub risk_tolerance: String,
    pub max_position_size: u32,
    pub stop_loss_percentage: f64,
}

impl Default for TradingParams {
    fn default() -> Self {
        Self {
            risk_tolerance: "medium".to_string(),
            max_position_size: 1000,
            stop_loss_percentage: 2.0,
        }
    }
}

/// PPO training hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpoSettings {
    pub learning_rate: f64,
    pub batch_size: u32,
    pub epochs: u32,
}

impl Default for PpoSettings {
    fn default() -> Self {
        Self {
            learning_rate: 0.0003,
            batch_size: 64,
            epochs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub trading_params: TradingParams,
    #[serde(default)]
    pub ppo_settings: PpoSettings,
    /// Directory scanned for market-data CSV files
    pub data_dir: String,
    /// Trainer executable used for training runs
    pub trainer_binary: String,
    /// Documentation link shown in the toolbar
    pub docs_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trading_params: TradingParams::default(),
            ppo_settings: PpoSettings::default(),
            data_dir: "data".to_string(),
            trainer_binary: "trader-train".to_string(),
            docs_url: "https://docs.example.com/trader-tui".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".trader-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

/// Color depth the terminal is assumed to support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Indexed256,
    Basic16,
    Monochrome,
}

/// Terminal capabilities detected once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCaps {
    pub color_depth: ColorDepth,
    pub unicode: bool,
    pub mouse: bool,
}

impl TermCaps {
    /// Detect capabilities from the process environment
    pub fn detect() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Detection against an injected environment lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let term = lookup("TERM").unwrap_or_default();

        let color_depth = if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            ColorDepth::Monochrome
        } else if lookup("COLORTERM")
            .is_some_and(|v| v == "truecolor" || v == "24bit")
        {
            ColorDepth::TrueColor
        } else if term.contains("256color") {
            ColorDepth::Indexed256
        } else if term == "dumb" || term.is_empty() {
            ColorDepth::Monochrome
        } else {
            ColorDepth::Basic16
        };

        let unicode = lookup("LC_ALL")
            .or_else(|| lookup("LC_CTYPE"))
            .or_else(|| lookup("LANG"))
            .is_some_and(|v| v.to_uppercase().contains("UTF-8") || v.to_uppercase().contains("UTF8"));

        // Dumb terminals do not deliver mouse events
        let mouse = term != "dumb" && !term.is_empty();

        Self {
            color_depth,
            unicode,
            mouse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps_for(vars: &[(&str, &str)]) -> TermCaps {
        let owned: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TermCaps::from_lookup(move |key| {
            owned
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn test_config_defaults_match_trading_console() {
        let config = Config::default();
        assert_eq!(config.trading_params.risk_tolerance, "medium");
        assert_eq!(config.trading_params.max_position_size, 1000);
        assert_eq!(config.trading_params.stop_loss_percentage, 2.0);
        assert_eq!(config.ppo_settings.learning_rate, 0.0003);
        assert_eq!(config.ppo_settings.batch_size, 64);
        assert_eq!(config.ppo_settings.epochs, 10);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.trading_params, config.trading_params);
        assert_eq!(parsed.ppo_settings, config.ppo_settings);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{"data_dir":"d","trainer_binary":"t","docs_url":"u"}"#;
        let parsed: Config = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.ppo_settings.batch_size, 64);
    }

    #[test]
    fn test_caps_truecolor() {
        let caps = caps_for(&[
            ("COLORTERM", "truecolor"),
            ("TERM", "xterm-256color"),
            ("LANG", "en_US.UTF-8"),
        ]);
        assert_eq!(caps.color_depth, ColorDepth::TrueColor);
        assert!(caps.unicode);
        assert!(caps.mouse);
    }

    #[test]
    fn test_caps_no_color_wins() {
        let caps = caps_for(&[
            ("NO_COLOR", "1"),
            ("COLORTERM", "truecolor"),
            ("TERM", "xterm-256color"),
        ]);
        assert_eq!(caps.color_depth, ColorDepth::Monochrome);
    }

    #[test]
    fn test_caps_256_and_basic() {
        assert_eq!(
            caps_for(&[("TERM", "screen-256color")]).color_depth,
            ColorDepth::Indexed256
        );
        assert_eq!(
            caps_for(&[("TERM", "xterm")]).color_depth,
            ColorDepth::Basic16
        );
    }

    #[test]
    fn test_caps_dumb_terminal() {
        let caps = caps_for(&[("TERM", "dumb")]);
        assert_eq!(caps.color_depth, ColorDepth::Monochrome);
        assert!(!caps.mouse);
    }
}
