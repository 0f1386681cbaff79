//! User configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Top-level admitcalc configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmitConfig {
    /// Catalog file to use instead of the built-in one.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Entry-test maximum assumed when none is given.
    #[serde(default = "default_test_max")]
    pub default_test_max: f64,
    /// How many ranked results to display.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_test_max() -> f64 {
    200.0
}
fn default_top_n() -> usize {
    10
}

impl Default for AdmitConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            default_test_max: default_test_max(),
            top_n: default_top_n(),
            format: OutputFormat::default(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `admitcalc.toml` in the current directory
/// 2. `~/.config/admitcalc/config.toml`
///
/// Environment variable overrides: `ADMITCALC_CATALOG`, `ADMITCALC_TOP_N`.
pub fn load_config() -> Result<AdmitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AdmitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("admitcalc.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => AdmitConfig::default(),
    };

    apply_env_overrides(
        &mut config,
        std::env::var("ADMITCALC_CATALOG").ok(),
        std::env::var("ADMITCALC_TOP_N").ok(),
    )?;

    Ok(config)
}

/// Parse and sanity-check a TOML config.
pub fn parse_config_str(content: &str) -> Result<AdmitConfig> {
    let config: AdmitConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.default_test_max.is_finite() && config.default_test_max > 0.0,
        "default_test_max must be positive"
    );
    anyhow::ensure!(config.top_n >= 1, "top_n must be at least 1");
    Ok(config)
}

fn apply_env_overrides(
    config: &mut AdmitConfig,
    catalog: Option<String>,
    top_n: Option<String>,
) -> Result<()> {
    if let Some(catalog) = catalog.filter(|c| !c.trim().is_empty()) {
        config.catalog = Some(PathBuf::from(catalog));
    }
    if let Some(top_n) = top_n {
        config.top_n = top_n
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| anyhow::anyhow!("invalid ADMITCALC_TOP_N: '{}'", top_n.trim()))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("admitcalc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AdmitConfig::default();
        assert_eq!(config.default_test_max, 200.0);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config_str(
            r#"
catalog = "catalogs/custom.toml"
default_test_max = 400
top_n = 5
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("catalogs/custom.toml")));
        assert_eq!(config.default_test_max, 400.0);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn parse_rejects_bad_values() {
        assert!(parse_config_str("default_test_max = 0").is_err());
        assert!(parse_config_str("top_n = 0").is_err());
        assert!(parse_config_str("format = \"xml\"").is_err());
    }

    #[test]
    fn env_overrides() {
        let mut config = AdmitConfig::default();
        apply_env_overrides(&mut config, Some("other.toml".into()), Some(" 3 ".into())).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("other.toml")));
        assert_eq!(config.top_n, 3);

        assert!(apply_env_overrides(&mut config, None, Some("zero".into())).is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admitcalc.toml");
        std::fs::write(&path, "top_n = 7\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_test_max, 200.0);
    }

    #[test]
    fn output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
