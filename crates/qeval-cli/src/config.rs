//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level qeval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QevalConfig {
    /// Where `eval --save` writes stats reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Output format when `--format` is not given: text or json.
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Undo calls applied after loading when `--undo` is not given.
    #[serde(default)]
    pub undo_depth: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./qeval-results")
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for QevalConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
            undo_depth: 0,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut cursor = 0;
    // Substituted values are not rescanned.
    while let Some(offset) = result[cursor..].find("${") {
        let start = cursor + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        cursor = start + value.len();
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `qeval.toml` in the current directory
/// 2. `~/.config/qeval/config.toml`
///
/// `QEVAL_OUTPUT_DIR` overrides `output_dir`.
pub fn load_config_from(path: Option<&Path>) -> Result<QevalConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("qeval.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QevalConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QevalConfig::default(),
    };

    if let Ok(dir) = std::env::var("QEVAL_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));

    tracing::debug!(?config_path, ?config, "loaded configuration");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("qeval"))
}
