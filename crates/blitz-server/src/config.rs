// File: src/config.rs
// Purpose: Configuration parsing from blitz.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Project root scanned for pages, API routes and resolvers (default: ".")
    #[serde(default = "default_root")]
    pub root: String,

    /// Whether static segments match case-insensitively (default: false)
    #[serde(default)]
    pub case_insensitive: bool,

    /// Directory names never descended into
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_root() -> String {
    ".".to_string()
}

fn default_ignore() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        ".next".to_string(),
        ".blitz".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            case_insensitive: false,
            ignore: default_ignore(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Applies `BLITZ_HOST` / `BLITZ_PORT` overrides from `lookup`
    ///
    /// Takes the lookup as a function so callers decide where variables come
    /// from (`std::env::var` in the binary, a map in tests).
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("BLITZ_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("BLITZ_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "ignoring invalid BLITZ_PORT"),
            }
        }

        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.routing.root, ".");
        assert!(!config.routing.case_insensitive);
        assert!(config.routing.ignore.contains(&"node_modules".to_string()));
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [server]
            port = 4000

            [routing]
            root = "examples/store"
            case_insensitive = true
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.routing.root, "examples/store");
        assert!(config.routing.case_insensitive);
        assert_eq!(config.routing.ignore, default_ignore());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("does/not/exist/blitz.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blitz.toml");
        fs::write(&path, "[server]\nport = \"not a number\"").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [("BLITZ_HOST", "0.0.0.0"), ("BLITZ_PORT", "8080")].into();
        let config = Config::default().with_env_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let config = Config::default().with_env_overrides(|k| {
            (k == "BLITZ_PORT").then(|| "eighty".to_string())
        });
        assert_eq!(config.server.port, 3000);
    }
}
