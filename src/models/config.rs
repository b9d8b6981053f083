use crate::assets::AssetLoader;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory for transient PDF artifacts (defaults to the OS temp dir)
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,

    /// Maximum number of browser sessions rendering at the same time
    #[serde(default = "default_max_concurrent_renders")]
    pub max_concurrent_renders: usize,

    /// Upper bound for a single render, in seconds
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,

    /// Headless Chrome launch settings
    #[serde(default)]
    pub chrome: ChromeConfig,
}

fn default_max_concurrent_renders() -> usize {
    2
}

fn default_render_timeout_secs() -> u64 {
    60
}

/// Launch settings for the headless browser
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChromeConfig {
    /// Path to the Chrome/Chromium executable; auto-detected when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Run Chrome with its sandbox enabled
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,

    /// Seconds of inactivity after which the browser connection is dropped
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

fn default_sandbox() -> bool {
    true
}

fn default_idle_timeout_secs() -> u64 {
    30
}

/// Headroom between the render deadline and the browser idle cutoff
const IDLE_TIMEOUT_SLACK_SECS: u64 = 5;

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            path: None,
            sandbox: default_sandbox(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

impl ChromeConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    let scratch_dir = config.scratch_dir();
                    tracing::info!(
                        scratch_dir = %scratch_dir.display(),
                        max_concurrent_renders = config.max_concurrent_renders,
                        render_timeout_secs = config.render_timeout_secs,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse YAML, clamping the render cap to at least one session
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(yaml)?;
        config.max_concurrent_renders = config.max_concurrent_renders.max(1);
        Ok(config)
    }

    /// Effective scratch directory
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    /// Chrome settings with the idle cutoff raised past the render deadline
    pub fn browser_config(&self) -> ChromeConfig {
        let floor = self
            .render_timeout_secs
            .saturating_add(IDLE_TIMEOUT_SLACK_SECS);
        ChromeConfig {
            idle_timeout_secs: self.chrome.idle_timeout_secs.max(floor),
            ..self.chrome.clone()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scratch_dir: None,
            max_concurrent_renders: default_max_concurrent_renders(),
            render_timeout_secs: default_render_timeout_secs(),
            chrome: ChromeConfig::default(),
        }
    }
}
