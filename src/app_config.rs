//! Application configuration loading for CLI defaults.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use weather_fetch::DEFAULT_BASE_URL;
use weather_fetch::DEFAULT_DATA_DIR;
use weather_fetch::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

/// File-backed configuration for weather-fetch defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default data directory for archives and extracted artifacts.
    pub data_dir: Option<PathBuf>,
    /// Archive host, e.g. a mirror of the public bucket.
    pub base_url: Option<String>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        if let Some(base_url) = &self.base_url
            && base_url.trim().is_empty()
        {
            bail!("Invalid config value for `base_url`: must not be empty");
        }
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Effective settings after merging CLI flags, file config, and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

/// Merges settings. Priority: CLI flag > config file > built-in default.
#[must_use]
pub fn resolve_settings(
    cli_data_dir: Option<&Path>,
    cli_base_url: Option<&str>,
    file: Option<&FileConfig>,
) -> Settings {
    let file = file.cloned().unwrap_or_default();
    Settings {
        data_dir: cli_data_dir
            .map(Path::to_path_buf)
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        base_url: cli_base_url
            .map(str::to_string)
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        connect_timeout_secs: file.connect_timeout_secs.unwrap_or(CONNECT_TIMEOUT_SECS),
        read_timeout_secs: file.read_timeout_secs.unwrap_or(READ_TIMEOUT_SECS),
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/weather-fetch/config.toml`
/// 2. `$HOME/.config/weather-fetch/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    config_path_from(
        env_var_non_empty_os("XDG_CONFIG_HOME"),
        env_var_non_empty_os("HOME"),
    )
}

fn config_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(xdg_config_home) = xdg_config_home {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("weather-fetch")
                .join("config.toml"),
        );
    }

    let home = home?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("weather-fetch")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig { path, config: None });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig { path, config: None });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "data_dir" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `data_dir` value on line {}", line_index + 1)
                })?;
                cfg.data_dir = Some(PathBuf::from(parsed));
            }
            "base_url" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `base_url` value on line {}", line_index + 1)
                })?;
                cfg.base_url = Some(parsed);
            }
            "connect_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!(
                        "Invalid `connect_timeout_secs` value on line {}",
                        line_index + 1
                    )
                })?;
                cfg.connect_timeout_secs = Some(parsed);
            }
            "read_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!(
                        "Invalid `read_timeout_secs` value on line {}",
                        line_index + 1
                    )
                })?;
                cfg.read_timeout_secs = Some(parsed);
            }
            unknown => {
                bail!(
                    "Unknown configuration key: '{}' on line {}",
                    unknown,
                    line_index + 1
                );
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}
