//! Configuration
//!
//! Settings are read from an optional TOML file, then environment variables and command line
//! flags are applied on top.

use std::path::Path;

use serde::Deserialize;

use crate::{error::Error, render::RenderOptions, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How served lines are printed
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Amount of nesting levels which get pretty-printed
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Spaces per indentation level
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Print lines as stored without parsing them as JSON
    #[serde(default)]
    pub raw: bool,
}

fn default_depth() -> usize {
    2
}

fn default_indent() -> usize {
    2
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            indent: default_indent(),
            raw: false,
        }
    }
}

impl DisplayConfig {
    #[inline]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            depth: self.depth,
            indent: self.indent,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seed for random line selection. Uses OS entropy if not set
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Environment variable overriding `logging.level`
pub const LOG_LEVEL_ENV: &str = "JSONL_VIEW_LOG_LEVEL";

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {:?}: {}", path, e)))?;

        Self::parse(&content)
            .map_err(|e| Error::Config(format!("failed to parse {:?}: {}", path, e)))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from `path` if given, with environment variable overrides applied
    pub fn load_with_env(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment variable overrides, looked up through `var`
    fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = var(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.display.render_options(), RenderOptions::default());
        assert_eq!(config.session.seed, None);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_parse() {
        let config = Config::parse(
            r#"
[display]
depth = 3
raw = true

[session]
seed = 42

[logging]
level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.display.depth, 3);
        assert_eq!(config.display.indent, 2);
        assert!(config.display.raw);
        assert_eq!(config.session.seed, Some(42));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| {
            (key == LOG_LEVEL_ENV).then(|| "jsonl_index=trace".to_string())
        });
        assert_eq!(config.logging.level, "jsonl_index=trace");

        let mut config = Config::default();
        config.apply_env_overrides(|_| None);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"[display]\nindent = 4\n").unwrap();
        tmp.flush().unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.display.indent, 4);

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        broken.write_all(b"[display\n").unwrap();
        broken.flush().unwrap();
        assert!(matches!(Config::load(broken.path()), Err(Error::Config(_))));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(Error::Config(_))
        ));
    }
}
