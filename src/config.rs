use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_text_field")]
    pub text_field: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Retries for network errors and 429/5xx. Zero keeps fail-fast behavior.
    #[serde(default)]
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            prefix: default_prefix(),
            text_field: default_text_field(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_retries: 0,
        }
    }
}

fn default_host() -> String {
    "https://www.sefaria.org".to_string()
}
fn default_prefix() -> String {
    "Mishnah".to_string()
}
fn default_text_field() -> String {
    "he".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PacingConfig {
    #[serde(default = "default_section_delay_ms")]
    pub section_delay_ms: u64,
    #[serde(default = "default_unit_delay_ms")]
    pub unit_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            section_delay_ms: default_section_delay_ms(),
            unit_delay_ms: default_unit_delay_ms(),
        }
    }
}

fn default_section_delay_ms() -> u64 {
    500
}
fn default_unit_delay_ms() -> u64 {
    1000
}

impl PacingConfig {
    pub fn section_delay(&self) -> Duration {
        Duration::from_millis(self.section_delay_ms)
    }

    pub fn unit_delay(&self) -> Duration {
        Duration::from_millis(self.unit_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("../mishna")
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Optional catalog file replacing the embedded one.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::minimal())
    }
}

fn validate(config: &Config) -> Result<()> {
    let api = &config.api;
    if !(api.host.starts_with("http://") || api.host.starts_with("https://")) {
        anyhow::bail!("api.host must start with http:// or https://");
    }
    if api.prefix.trim().is_empty() {
        anyhow::bail!("api.prefix must not be empty");
    }
    if api.text_field.trim().is_empty() {
        anyhow::bail!("api.text_field must not be empty");
    }
    if api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs must be > 0");
    }
    if config.output.dir.as_os_str().is_empty() {
        anyhow::bail!("output.dir must not be empty");
    }
    Ok(())
}
