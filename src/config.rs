// ⚙️ Settings - defaults, then an optional JSON file, then environment
//
// File keys mirror the struct fields. Environment variables win over the file.

use crate::flow::DEFAULT_COMPLETION_DELAY;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "VELOBANK_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay before a finished wizard returns to the dashboard
    pub completion_delay_ms: u64,

    pub min_password_len: usize,

    /// Event loop poll interval
    pub tick_rate_ms: u64,

    /// Where the account screen writes its CSV export
    pub export_path: PathBuf,

    /// The TUI owns the terminal, so logs go here
    pub log_file: PathBuf,

    /// EnvFilter directive, RUST_LOG takes precedence
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            completion_delay_ms: DEFAULT_COMPLETION_DELAY.as_millis() as u64,
            min_password_len: crate::validation::DEFAULT_MIN_PASSWORD_LEN,
            tick_rate_ms: 250,
            export_path: PathBuf::from("velobank-transactions.csv"),
            log_file: PathBuf::from("velobank.log"),
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load from an explicit path, or from $VELOBANK_CONFIG, then apply env overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let path = path.map(Path::to_path_buf).or(from_env);

        let mut settings = match path {
            Some(path) => Settings::from_file(&path)?,
            None => Settings::default(),
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Read settings from a JSON file; missing keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Apply VELOBANK_* overrides. `lookup` is the environment in production.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("VELOBANK_COMPLETION_DELAY_MS") {
            self.completion_delay_ms = v
                .parse()
                .with_context(|| format!("VELOBANK_COMPLETION_DELAY_MS is not a number: {}", v))?;
        }
        if let Some(v) = lookup("VELOBANK_MIN_PASSWORD_LEN") {
            self.min_password_len = v
                .parse()
                .with_context(|| format!("VELOBANK_MIN_PASSWORD_LEN is not a number: {}", v))?;
        }
        if let Some(v) = lookup("VELOBANK_TICK_RATE_MS") {
            self.tick_rate_ms = v
                .parse()
                .with_context(|| format!("VELOBANK_TICK_RATE_MS is not a number: {}", v))?;
        }
        if let Some(v) = lookup("VELOBANK_EXPORT_PATH") {
            self.export_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("VELOBANK_LOG_FILE") {
            self.log_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("VELOBANK_LOG") {
            self.log_filter = v;
        }
        Ok(())
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        // A zero tick would spin the event loop
        Duration::from_millis(self.tick_rate_ms.max(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.completion_delay(), Duration::from_secs(3));
        assert_eq!(settings.min_password_len, 6);
    }

    #[test]
    fn test_from_file_keeps_defaults_for_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "completion_delay_ms": 500, "log_filter": "debug" }}"#).unwrap();

        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.completion_delay_ms, 500);
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.min_password_len, 6);
        assert_eq!(settings.tick_rate_ms, 250);
    }

    #[test]
    fn test_from_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("VELOBANK_MIN_PASSWORD_LEN", "8"),
            ("VELOBANK_EXPORT_PATH", "/tmp/out.csv"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(settings.min_password_len, 8);
        assert_eq!(settings.export_path, PathBuf::from("/tmp/out.csv"));
        assert_eq!(settings.completion_delay_ms, 3000);
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut settings = Settings::default();
        let result = settings.apply_env(|k| (k == "VELOBANK_TICK_RATE_MS").then(|| "fast".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_tick_rate_has_a_floor() {
        let settings = Settings { tick_rate_ms: 0, ..Settings::default() };
        assert_eq!(settings.tick_rate(), Duration::from_millis(10));
    }
}
