//! Configuration management for smokecheck
//!
//! Supports environment variables, config files, and runtime overrides.
//! Defaults reproduce the verification script's hardcoded constants, so a
//! zero-argument run checks the recorder app at http://localhost:5173/.
//!
//! Config file location: ~/.config/smokecheck/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{Result, SmokecheckError};

/// Main configuration for smokecheck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page under test
    pub target: TargetConfig,
    /// Browser launch configuration
    pub browser: BrowserSettings,
    /// Readiness / absence check configuration
    pub checks: CheckConfig,
    /// Screenshot artifact configuration
    #[serde(default)]
    pub artifact: ArtifactConfig,
}

/// Target application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// URL of the page under test (default: http://localhost:5173/)
    pub url: String,
}

/// Browser launch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Whether to run with a visible window
    pub headed: bool,
    /// Disable the Chromium sandbox (needed in most containers)
    pub no_sandbox: bool,
    /// Viewport width
    pub window_width: u32,
    /// Viewport height
    pub window_height: u32,
    /// Explicit Chrome/Chromium executable (None = auto-detect)
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,
}

/// Readiness and absence check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Button text used as the readiness signal
    /// Default: "Start Recording"
    pub readiness_text: String,
    /// Text whose visibility constitutes a FAIL
    /// Default: "Choose Background"
    pub absence_text: String,
    /// Bound on the readiness wait in ms
    /// Default: 20000
    pub readiness_timeout_ms: u64,
    /// Interval between readiness probes in ms
    pub poll_interval_ms: u64,
}

/// Screenshot artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Output path, overwritten on each run
    pub path: PathBuf,
    /// Capture the full page rather than the viewport
    pub full_page: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            browser: BrowserSettings::default(),
            checks: CheckConfig::default(),
            artifact: ArtifactConfig::default(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: env::var("SMOKECHECK_URL").unwrap_or_else(|_| "http://localhost:5173/".to_string()),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headed: env::var("SMOKECHECK_HEADED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            no_sandbox: env::var("SMOKECHECK_NO_SANDBOX")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            window_width: 1280,
            window_height: 720,
            chrome_path: env::var("SMOKECHECK_CHROME").ok().map(PathBuf::from),
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            readiness_text: "Start Recording".to_string(),
            absence_text: "Choose Background".to_string(),
            readiness_timeout_ms: env::var("SMOKECHECK_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20000),
            poll_interval_ms: 100,
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            path: env::var("SMOKECHECK_SCREENSHOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("verification/verification.png")),
            full_page: true,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("smokecheck")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(SmokecheckError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| SmokecheckError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| SmokecheckError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| SmokecheckError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SmokecheckError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| SmokecheckError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Validate the target URL before launching anything
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.target.url)?;
        match parsed.scheme() {
            "http" | "https" | "file" => Ok(()),
            other => Err(SmokecheckError::config(format!(
                "Unsupported URL scheme '{}' in target url",
                other
            ))),
        }
    }

    /// Update the target URL
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.target.url = url.into();
    }

    /// Update the readiness timeout
    pub fn set_readiness_timeout_ms(&mut self, timeout_ms: u64) {
        self.checks.readiness_timeout_ms = timeout_ms;
    }
}
