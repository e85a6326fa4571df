//! `docgen.toml` configuration.
//!
//! Precedence, lowest first: built-in defaults, the TOML file, environment
//! variables (`DOCGEN_OUTPUT_DIR`, `DOCGEN_LOG_FORMAT`), command-line flags.
//! Flags are applied by `main`; everything else happens here.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "docgen.toml";

pub const ENV_OUTPUT_DIR: &str = "DOCGEN_OUTPUT_DIR";
pub const ENV_LOG_FORMAT: &str = "DOCGEN_LOG_FORMAT";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputConfig,
    pub generation: GenerationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Fixed output directory. Skips discovery when set.
    pub dir: Option<PathBuf>,
    /// Discovery candidates, tried in order. Empty means the built-in list.
    pub candidates: Vec<PathBuf>,
    /// Where `zip_outputs` writes the archive.
    pub archive: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            candidates: Vec::new(),
            archive: PathBuf::from(tools::DEFAULT_ARCHIVE),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    pub overwrite: bool,
    /// Run the correction pass after generation.
    pub corrections: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format '{other}' (expected 'text' or 'json')"),
        }
    }
}

impl Config {
    /// Loads the configuration and applies environment overrides.
    ///
    /// An explicit `path` must exist. Without one, `docgen.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            self.output.dir = Some(PathBuf::from(dir));
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT).filter(|v| !v.trim().is_empty()) {
            self.logging.format = format
                .parse()
                .with_context(|| format!("invalid {ENV_LOG_FORMAT}"))?;
        }
        Ok(())
    }
}
