//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.kaiwa/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The API credential is deliberately not a config-file option: it is read
//! from `GEMINI_API_KEY` in the process environment (a `.env` file is
//! honored by main), and startup fails before the terminal UI opens when it
//! is absent. Everything is collapsed into one [`ResolvedConfig`] built
//! once in `main` and read-only afterwards.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::state::ThemeMode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KaiwaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub model: Option<String>,
    pub theme: Option<ThemeMode>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "gemini-exp-1114";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub model_name: String,
    pub base_url: String,
    pub theme: ThemeMode,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// `GEMINI_API_KEY` is not set. Fatal before the window opens.
    MissingCredential,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingCredential => write!(
                f,
                "GEMINI_API_KEY is not set (export it or add it to a .env file)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.kaiwa/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".kaiwa").join("config.toml"))
}

/// Load config from `~/.kaiwa/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `KaiwaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<KaiwaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(KaiwaConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(KaiwaConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: KaiwaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Kaiwa Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.
#
# The API key is never read from this file. Set GEMINI_API_KEY in the
# environment or in a .env file in the working directory.

# [general]
# model = "gemini-exp-1114"          # Or set KAIWA_MODEL
# theme = "dark"                     # "dark" or "light"; Ctrl+T toggles at runtime

# [gemini]
# base_url = "https://generativelanguage.googleapis.com/v1beta"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
///
/// Fails with [`ConfigError::MissingCredential`] when `GEMINI_API_KEY` is
/// absent from the environment.
pub fn resolve(config: &KaiwaConfig) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_key(config, std::env::var("GEMINI_API_KEY").ok())
}

/// Resolution with the credential passed in explicitly (testable without
/// touching the process environment).
pub fn resolve_with_key(
    config: &KaiwaConfig,
    api_key: Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    let api_key = api_key
        .filter(|k| !k.trim().is_empty())
        .ok_or(ConfigError::MissingCredential)?;

    // Model: env → config → default
    let model_name = std::env::var("KAIWA_MODEL")
        .ok()
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Base URL: env → config → default
    let base_url = std::env::var("GEMINI_BASE_URL")
        .ok()
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| crate::remote::gemini::DEFAULT_BASE_URL.to_string());

    // Initial theme: env → config → default (dark)
    let theme = std::env::var("KAIWA_THEME")
        .ok()
        .and_then(|s| parse_theme(&s))
        .or(config.general.theme)
        .unwrap_or_default();

    Ok(ResolvedConfig {
        api_key,
        model_name,
        base_url,
        theme,
    })
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s.to_ascii_lowercase().as_str() {
        "dark" => Some(ThemeMode::Dark),
        "light" => Some(ThemeMode::Light),
        other => {
            warn!("Unknown theme '{}', ignoring", other);
            None
        }
    }
}
