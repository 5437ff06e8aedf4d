use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ISSUER: &str = "促進轉型正義委員會";
pub const DEFAULT_DATE_WINDOW: usize = 2000;

/// Knobs of the structuring engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParserConfig {
    /// Issuing body; its name marks the end of the reasoning section.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Characters at the end of the text searched for the issuance date.
    #[serde(default = "default_date_window")]
    pub date_window: usize,
    /// Run pdftotext with -layout.
    #[serde(default)]
    pub layout: bool,
    /// Derive roster rows from tables.
    #[serde(default = "default_true")]
    pub roster: bool,
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_date_window() -> usize {
    DEFAULT_DATE_WINDOW
}

fn default_true() -> bool {
    true
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            issuer: default_issuer(),
            date_window: default_date_window(),
            layout: false,
            roster: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Datasource {
    pub name: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outputs {
    pub dir: Option<String>,
}

/// Run configuration read from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub id: String,
    #[serde(default)]
    pub datasources: Option<Vec<Datasource>>,
    #[serde(default)]
    pub outputs: Option<Outputs>,
    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub fn default_config() -> RunConfig {
    RunConfig {
        id: "tjc-decisions".to_string(),
        datasources: Some(vec![Datasource {
            name: Some("decisions".to_string()),
            path: Some("./input/**/*.pdf".to_string()),
        }]),
        outputs: Some(Outputs { dir: Some("./output".to_string()) }),
        parser: ParserConfig::default(),
    }
}

/// Reject configs that cannot drive a run.
pub fn validate_config(cfg: &RunConfig) -> Result<(), ConfigError> {
    if cfg.id.trim().is_empty() {
        return Err(ConfigError::Invalid("missing id".into()));
    }
    let has_ds_glob = cfg
        .datasources
        .as_ref()
        .and_then(|ds| ds.first())
        .and_then(|d| d.path.as_ref())
        .is_some();
    let has_out_dir = cfg.outputs.as_ref().and_then(|o| o.dir.as_ref()).is_some();
    if !has_ds_glob || !has_out_dir {
        return Err(ConfigError::Invalid("missing datasources.path or outputs.dir".into()));
    }
    if cfg.parser.issuer.trim().is_empty() {
        return Err(ConfigError::Invalid("empty parser.issuer".into()));
    }
    if cfg.parser.date_window == 0 {
        return Err(ConfigError::Invalid("parser.date_window must be positive".into()));
    }
    Ok(())
}

/// Load and validate a YAML run config.
pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
    let cfg: RunConfig = serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&cfg)?;
    Ok(cfg)
}

impl RunConfig {
    pub fn input_glob(&self) -> String {
        self.datasources
            .as_ref()
            .and_then(|d| d.first())
            .and_then(|d| d.path.clone())
            .unwrap_or_else(|| "./input/**/*.pdf".to_string())
    }

    pub fn output_dir(&self) -> String {
        self.outputs
            .as_ref()
            .and_then(|o| o.dir.clone())
            .unwrap_or_else(|| "./output".to_string())
    }
}
