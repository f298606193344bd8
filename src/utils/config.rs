use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "FLIXMATE_BASE_URL";
/// Environment variable overriding the admin login email
pub const ENV_ADMIN_EMAIL: &str = "FLIXMATE_ADMIN_EMAIL";
/// Environment variable overriding the admin login password
pub const ENV_ADMIN_PASSWORD: &str = "FLIXMATE_ADMIN_PASSWORD";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub verify: VerifyConfig,
    pub report: ReportConfig,
}

/// Settings for the CRUD verification run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// API root, including the `/api` prefix
    pub base_url: String,

    /// Admin account used for create/update/delete
    pub admin_email: String,
    pub admin_password: String,

    /// Title prefix of synthetic movies (also used by the lookup scan)
    pub test_title_prefix: String,

    /// Pause before update and before delete (ms)
    pub step_pause_ms: u64,

    /// Pause before the final persistence read (ms)
    pub persistence_pause_ms: u64,

    /// Per-request timeout. None keeps the client default (no timeout).
    pub request_timeout_secs: Option<u64>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            admin_email: "admin@flixmate.com".to_string(),
            admin_password: "password".to_string(),
            test_title_prefix: "Test Movie".to_string(),
            step_pause_ms: 1000,
            persistence_pause_ms: 2000,
            request_timeout_secs: None,
        }
    }
}

impl VerifyConfig {
    pub fn step_pause(&self) -> Duration {
        Duration::from_millis(self.step_pause_ms)
    }

    pub fn persistence_pause(&self) -> Duration {
        Duration::from_millis(self.persistence_pause_ms)
    }

    /// Base URL without a trailing slash
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Settings for the Surefire report generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub results_dir: PathBuf,
    pub results_pattern: String,
    pub output_dir: PathBuf,
    pub html_file: String,
    pub json_file: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("target/surefire-reports"),
            results_pattern: "TEST-*.xml".to_string(),
            output_dir: PathBuf::from("."),
            html_file: "flixmate_crud_test_report.html".to_string(),
            json_file: "test_summary.json".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn html_path(&self) -> PathBuf {
        self.output_dir.join(&self.html_file)
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(&self.json_file)
    }
}

impl Config {
    /// Load configuration: defaults, then the optional YAML file, then environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_yaml_file(p)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.verify.base_url = url;
        }
        if let Some(email) = lookup(ENV_ADMIN_EMAIL) {
            self.verify.admin_email = email;
        }
        if let Some(password) = lookup(ENV_ADMIN_PASSWORD) {
            self.verify.admin_password = password;
        }
    }
}
