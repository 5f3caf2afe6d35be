//! Quiz configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::DEFAULT_QUESTION_COUNT;

/// Top-level upwind configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpwindConfig {
    /// Questions per quiz.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Bank file or directory to use instead of the built-in bank.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Fixed seed for question sampling and option shuffling.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Restrict quizzes to these topics. Empty means all topics.
    #[serde(default)]
    pub topics: Vec<String>,
}

fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}

impl Default for UpwindConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            bank: None,
            seed: None,
            topics: Vec::new(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `path`, which must exist when given
/// 2. `upwind.toml` in the current directory
/// 3. `~/.config/upwind/config.toml`
///
/// Environment variable overrides: `UPWIND_BANK`, `UPWIND_QUESTION_COUNT`.
pub fn load_config_from(path: Option<&Path>) -> Result<UpwindConfig> {
    let config_path = find_config_path(path, Path::new(""), dirs_path())?;

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(&path)?
        }
        None => UpwindConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

/// Resolve which config file to read. `local_dir` holds `upwind.toml`;
/// `global_dir` holds `config.toml`.
fn find_config_path(
    explicit: Option<&Path>,
    local_dir: &Path,
    global_dir: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    if let Some(p) = explicit {
        if !p.exists() {
            anyhow::bail!("config file not found: {}", p.display());
        }
        return Ok(Some(p.to_path_buf()));
    }

    let local = local_dir.join("upwind.toml");
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(global_dir
        .map(|dir| dir.join("config.toml"))
        .filter(|global| global.exists()))
}

fn parse_config(path: &Path) -> Result<UpwindConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<UpwindConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Apply `UPWIND_*` overrides, reading variables through `lookup`.
fn apply_env_overrides(
    config: &mut UpwindConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(bank) = lookup("UPWIND_BANK").filter(|b| !b.is_empty()) {
        config.bank = Some(PathBuf::from(bank));
    }

    if let Some(count) = lookup("UPWIND_QUESTION_COUNT") {
        config.question_count = count
            .trim()
            .parse()
            .with_context(|| format!("invalid UPWIND_QUESTION_COUNT: '{count}'"))?;
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("upwind"))
}
