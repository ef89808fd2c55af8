//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`THEMEUP_REGISTRY_URL`, `THEMEUP_EDITOR_URL`,
//!    `THEMEUP_RUNNER`, `THEMEUP_NO_COLOR`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./themeup.toml in the current directory
//! 4. $XDG_CONFIG_HOME/themeup/themeup.toml (or ~/.config/themeup/themeup.toml)
//! 5. Built-in defaults

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const DEFAULT_REGISTRY_BASE_URL: &str = "https://tweakcn.com";
const DEFAULT_EDITOR_URL: &str = "https://tweakcn.com/editor/theme";
const DEFAULT_RUNNER: &str = "pnpm dlx";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub registry: RegistryConfig,
    pub installer: InstallerConfig,
    pub network: NetworkConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Base URL of the theme registry.
    pub base_url: String,
    /// URL of the editor page scraped for font weights.
    pub editor_url: String,
}

#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Package-runner prefix for the component installer ("pnpm dlx",
    /// "npx", "bunx").
    pub runner: String,
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry: RegistryConfig {
                base_url: DEFAULT_REGISTRY_BASE_URL.to_string(),
                editor_url: DEFAULT_EDITOR_URL.to_string(),
            },
            installer: InstallerConfig {
                runner: DEFAULT_RUNNER.to_string(),
            },
            network: NetworkConfig {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            display: DisplayConfig { color: true },
        }
    }
}

// ---------------------------------------------------------------------------
// File shape
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    registry: Option<FileRegistry>,
    installer: Option<FileInstaller>,
    network: Option<FileNetwork>,
    display: Option<FileDisplay>,
}

#[derive(Debug, Default, Deserialize)]
struct FileRegistry {
    base_url: Option<String>,
    editor_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileInstaller {
    runner: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileNetwork {
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct FileDisplay {
    color: Option<bool>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let mut config = Config::default();

    if let Some(text) = read_config_text(path_override, &read_file, &config_root)? {
        let file: FileConfig = toml::from_str(&text)?;
        apply_file_config(&mut config, file);
    }
    apply_env_overrides(&mut config, &env_lookup);
    validate(&config)?;

    Ok(config)
}

fn read_config_text<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<Option<String>, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    // An explicit --config path must exist; the fallback locations are
    // optional.
    if let Some(path) = path_override {
        return Ok(Some(read_file(Path::new(path))?));
    }

    if let Ok(text) = read_file(Path::new("themeup.toml")) {
        return Ok(Some(text));
    }

    if let Some(root) = config_root() {
        let global = root.join("themeup").join("themeup.toml");
        if let Ok(text) = read_file(&global) {
            return Ok(Some(text));
        }
    }

    Ok(None)
}

fn config_root_dir() -> Option<PathBuf> {
    dirs::config_dir()
}

fn apply_file_config(config: &mut Config, file: FileConfig) {
    if let Some(registry) = file.registry {
        if let Some(base_url) = registry.base_url {
            config.registry.base_url = base_url;
        }
        if let Some(editor_url) = registry.editor_url {
            config.registry.editor_url = editor_url;
        }
    }
    if let Some(installer) = file.installer {
        if let Some(runner) = installer.runner {
            config.installer.runner = runner;
        }
    }
    if let Some(network) = file.network {
        if let Some(timeout_secs) = network.timeout_secs {
            config.network.timeout_secs = timeout_secs;
        }
    }
    if let Some(display) = file.display {
        if let Some(color) = display.color {
            config.display.color = color;
        }
    }
}

fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = env_lookup("THEMEUP_REGISTRY_URL") {
        config.registry.base_url = url;
    }
    if let Some(url) = env_lookup("THEMEUP_EDITOR_URL") {
        config.registry.editor_url = url;
    }
    if let Some(runner) = env_lookup("THEMEUP_RUNNER") {
        config.installer.runner = runner;
    }
    if env_lookup("THEMEUP_NO_COLOR").is_some_and(|value| !value.is_empty()) {
        config.display.color = false;
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.registry.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("registry.base_url is empty".into()));
    }
    if config.registry.editor_url.trim().is_empty() {
        return Err(ConfigError::Invalid("registry.editor_url is empty".into()));
    }
    if config.installer.runner.trim().is_empty() {
        return Err(ConfigError::Invalid("installer.runner is empty".into()));
    }
    Ok(())
}
