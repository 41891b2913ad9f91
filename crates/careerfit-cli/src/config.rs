//! careerfit configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming a question bank; wins over the config file.
pub const BANK_ENV: &str = "CAREERFIT_BANK";

/// Top-level careerfit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerfitConfig {
    /// Question bank to use instead of the built-in one.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Output directory for saved reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report formats written when saving: json, html, markdown.
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./careerfit-results")
}
fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}

impl Default for CareerfitConfig {
    fn default() -> Self {
        Self {
            bank: None,
            output_dir: default_output_dir(),
            formats: default_formats(),
        }
    }
}

impl CareerfitConfig {
    /// The bank to load: an explicit path, else the configured one, else `None` for the built-in bank.
    pub fn bank_path(&self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| self.bank.clone())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `careerfit.toml` in the current directory
/// 2. `~/.config/careerfit/config.toml`
///
/// Environment variable override: `CAREERFIT_BANK`.
pub fn load_config_from(path: Option<&Path>) -> Result<CareerfitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("careerfit.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_config(&path)?
        }
        None => CareerfitConfig::default(),
    };

    if let Ok(bank) = std::env::var(BANK_ENV) {
        if !bank.trim().is_empty() {
            config.bank = Some(PathBuf::from(bank));
        }
    }

    Ok(config)
}

fn parse_config(path: &Path) -> Result<CareerfitConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<CareerfitConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("careerfit"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CareerfitConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./careerfit-results"));
        assert_eq!(config.formats, vec!["json".to_string()]);
        assert!(config.bank.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config: CareerfitConfig = toml::from_str(
            r#"
bank = "banks/analyst.toml"
formats = ["json", "html"]
"#,
        )
        .unwrap();
        assert_eq!(config.bank, Some(PathBuf::from("banks/analyst.toml")));
        assert_eq!(config.formats.len(), 2);
        assert_eq!(config.output_dir, PathBuf::from("./careerfit-results"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/nonexistent/careerfit.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("careerfit.toml");
        std::fs::write(&path, "output_dir = \"out\"\n").unwrap();
        let config = parse_config(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn explicit_bank_wins() {
        let config = CareerfitConfig {
            bank: Some(PathBuf::from("configured.toml")),
            ..CareerfitConfig::default()
        };
        assert_eq!(
            config.bank_path(Some(PathBuf::from("cli.toml"))),
            Some(PathBuf::from("cli.toml"))
        );
        assert_eq!(config.bank_path(None), Some(PathBuf::from("configured.toml")));
    }
}
