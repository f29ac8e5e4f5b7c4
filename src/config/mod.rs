// ABOUTME: Configuration management for vendorbox
// Handles backend connection settings and UI preferences loaded from TOML and the environment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Environment variable that overrides the backend URL
pub const BACKEND_URL_ENV: &str = "VENDORBOX_BACKEND_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Vendor backend connection
    #[serde(default)]
    pub backend: BackendConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiPreferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the vendor REST API (e.g. http://localhost:8000)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Timeouts surface as request failures; nothing is retried.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Event loop tick in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// How long footer notifications stay visible
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            notification_secs: default_notification_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("vendorbox/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_tick_rate_ms() -> u64 {
    250
}

const fn default_notification_secs() -> u64 {
    5
}

impl AppConfig {
    /// Load configuration from default locations, then the environment, then `backend_url`
    pub fn load(backend_url: Option<String>) -> Result<Self> {
        let mut config = Self::load_from_paths(&Self::get_config_paths())?;
        config.override_backend_url(std::env::var(BACKEND_URL_ENV).ok());
        config.override_backend_url(backend_url);
        config.validate()?;
        Ok(config)
    }

    /// Load and merge config files in order; later files win
    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();

        for path in paths {
            if path.exists() {
                debug!("Loading config from {}", path.display());
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;

                let file_config: PartialConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config from {}", path.display()))?;

                config.merge(file_config);
            }
        }

        Ok(config)
    }

    /// Save configuration to the user config directory
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_user_config_dir()?.join("config.toml");
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Override the backend URL, if set and non-empty
    pub fn override_backend_url(&mut self, backend_url: Option<String>) {
        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            self.backend.base_url = url.trim().to_string();
        }
    }

    /// Check that the backend URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.backend.base_url)
            .with_context(|| format!("Invalid backend URL '{}'", self.backend.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!(
                "Backend URL must use http or https, got '{}'",
                self.backend.base_url
            );
        }

        Ok(())
    }

    /// Configuration file paths, lowest precedence first
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/vendorbox/config.toml")];

        if let Ok(config_dir) = Self::get_user_config_dir() {
            paths.push(config_dir.join("config.toml"));
        }

        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".vendorbox").join("config.toml"));
        }

        paths
    }

    /// User configuration directory (~/.vendorbox/config)
    fn get_user_config_dir() -> Result<PathBuf> {
        Ok(base_dir()?.join("config"))
    }

    /// Merge a partially specified file into this config
    fn merge(&mut self, other: PartialConfig) {
        if let Some(backend) = other.backend {
            if let Some(base_url) = backend.base_url {
                self.backend.base_url = base_url;
            }
            if let Some(timeout) = backend.timeout_secs {
                self.backend.timeout_secs = timeout;
            }
            if let Some(user_agent) = backend.user_agent {
                self.backend.user_agent = user_agent;
            }
        }

        if let Some(ui) = other.ui {
            if let Some(tick) = ui.tick_rate_ms {
                self.ui.tick_rate_ms = tick;
            }
            if let Some(secs) = ui.notification_secs {
                self.ui.notification_secs = secs;
            }
        }
    }
}

/// Base vendorbox directory (~/.vendorbox), holding config and logs
pub fn base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".vendorbox"))
}

// Config files only set what they mention, so merging must not clobber
// earlier values with defaults.
#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    backend: Option<PartialBackend>,
    ui: Option<PartialUi>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialBackend {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialUi {
    tick_rate_ms: Option<u64>,
    notification_secs: Option<u64>,
}
