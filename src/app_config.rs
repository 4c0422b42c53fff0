//! Config file loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use openlib_core::{ClientConfig, Language};

/// `config.toml` values. Every key is optional; CLI flags override them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub api_base_url: Option<String>,
    pub covers_base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    /// Default search language.
    pub lang: Option<String>,
    /// Default page size for listing and search commands.
    pub limit: Option<u32>,
}

impl FileConfig {
    /// Validates values against the same ranges the client enforces.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("timeout_secs", self.timeout_secs)?;

        if let Some(limit) = self.limit
            && !(1..=1000).contains(&limit)
        {
            bail!("Invalid config value for `limit`: {limit}. Expected range: 1..=1000");
        }

        if let Some(lang) = &self.lang {
            Language::parse(lang).context("Invalid config value for `lang`")?;
        }

        self.apply_to(ClientConfig::default())
            .validate()
            .context("Invalid client settings in config file")?;
        Ok(())
    }

    /// Overlays the file values onto `config`.
    #[must_use]
    pub fn apply_to(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.api_base_url {
            config.api_base_url.clone_from(url);
        }
        if let Some(url) = &self.covers_base_url {
            config.covers_base_url.clone_from(url);
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout_secs = secs;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(agent) = &self.user_agent {
            config.user_agent.clone_from(agent);
        }
        config
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
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Resolved config path if one is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists.
    pub config: Option<FileConfig>,
}

impl LoadedConfig {
    /// File values, or empty defaults when no file was loaded.
    #[must_use]
    pub fn file(&self) -> FileConfig {
        self.config.clone().unwrap_or_default()
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/openlib/config.toml`
/// 2. `$HOME/.config/openlib/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join("openlib").join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("openlib")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from `explicit` if given (the file must exist), otherwise from
/// the default path if present.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
        });
    }

    let path = resolve_default_config_path();
    match path.as_deref() {
        Some(path_ref) if path_ref.exists() => {
            let config = load_file_config(path_ref)?;
            Ok(LoadedConfig {
                path,
                config: Some(config),
            })
        }
        _ => Ok(LoadedConfig { path, config: None }),
    }
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
        let line_no = line_index + 1;

        match key {
            "api_base_url" => {
                cfg.api_base_url = Some(parse_string_literal(value).with_context(|| {
                    format!("Invalid `api_base_url` value on line {line_no}")
                })?);
            }
            "covers_base_url" => {
                cfg.covers_base_url = Some(parse_string_literal(value).with_context(|| {
                    format!("Invalid `covers_base_url` value on line {line_no}")
                })?);
            }
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(parse_integer_u64(value).with_context(|| {
                    format!("Invalid `connect_timeout_secs` value on line {line_no}")
                })?);
            }
            "timeout_secs" => {
                cfg.timeout_secs = Some(parse_integer_u64(value).with_context(|| {
                    format!("Invalid `timeout_secs` value on line {line_no}")
                })?);
            }
            "user_agent" => {
                cfg.user_agent = Some(parse_string_literal(value).with_context(|| {
                    format!("Invalid `user_agent` value on line {line_no}")
                })?);
            }
            "lang" => {
                cfg.lang = Some(
                    parse_string_literal(value)
                        .with_context(|| format!("Invalid `lang` value on line {line_no}"))?,
                );
            }
            "limit" => {
                let parsed = parse_integer_u64(value)
                    .with_context(|| format!("Invalid `limit` value on line {line_no}"))?;
                let n = u32::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("limit out of range for u32"))?;
                cfg.limit = Some(n);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
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
