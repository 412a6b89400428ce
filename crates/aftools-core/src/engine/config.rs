use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_ALIGNMENT_EXECUTABLE: &str = "USalign";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum SettingsLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Layout of the prediction output being read.
///
/// Only ColabFold bundles are understood. `AlphaFold2` (the layout written by the reference
/// DeepMind pipeline) is accepted but parsing it is not implemented: it always yields no
/// predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputDialect {
    #[default]
    ColabFold,
    AlphaFold2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    pub workers: usize,
    pub dialect: OutputDialect,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            dialect: OutputDialect::ColabFold,
        }
    }
}

impl AggregationConfig {
    /// Bundles are spread over a worker pool only when more than one worker is configured.
    pub fn is_parallel(&self) -> bool {
        self.workers > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentConfig {
    pub executable: PathBuf,
    pub workers: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_ALIGNMENT_EXECUTABLE),
            workers: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub aggregation: AggregationConfig,
    pub alignment: AlignmentConfig,
}

#[derive(Default)]
pub struct SettingsBuilder {
    workers: Option<usize>,
    dialect: Option<OutputDialect>,
    alignment_executable: Option<PathBuf>,
    alignment_workers: Option<usize>,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.workers = Some(n);
        self
    }
    pub fn dialect(mut self, dialect: OutputDialect) -> Self {
        self.dialect = Some(dialect);
        self
    }
    pub fn alignment_executable(mut self, path: PathBuf) -> Self {
        self.alignment_executable = Some(path);
        self
    }
    pub fn alignment_workers(mut self, n: usize) -> Self {
        self.alignment_workers = Some(n);
        self
    }

    pub fn build(self) -> Result<Settings, ConfigError> {
        let defaults = Settings::default();

        let executable = self
            .alignment_executable
            .unwrap_or(defaults.alignment.executable);
        if executable.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "alignment.executable",
                reason: "path must not be empty".to_string(),
            });
        }

        Ok(Settings {
            aggregation: AggregationConfig {
                workers: self.workers.unwrap_or(defaults.aggregation.workers),
                dialect: self.dialect.unwrap_or(defaults.aggregation.dialect),
            },
            alignment: AlignmentConfig {
                executable,
                workers: self.alignment_workers.unwrap_or(defaults.alignment.workers),
            },
        })
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialAggregationSettings {
    workers: Option<usize>,
    dialect: Option<OutputDialect>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialAlignmentSettings {
    executable: Option<PathBuf>,
    workers: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSettings {
    aggregation: Option<PartialAggregationSettings>,
    alignment: Option<PartialAlignmentSettings>,
}

impl Settings {
    /// Loads settings from a TOML file. Absent sections and keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, SettingsLoadError> {
        debug!("Loading settings from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| SettingsLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let partial: PartialSettings =
            toml::from_str(&content).map_err(|e| SettingsLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let mut builder = SettingsBuilder::new();
        if let Some(aggregation) = partial.aggregation {
            if let Some(n) = aggregation.workers {
                builder = builder.workers(n);
            }
            if let Some(dialect) = aggregation.dialect {
                builder = builder.dialect(dialect);
            }
        }
        if let Some(alignment) = partial.alignment {
            if let Some(executable) = alignment.executable {
                builder = builder.alignment_executable(executable);
            }
            if let Some(n) = alignment.workers {
                builder = builder.alignment_workers(n);
            }
        }
        Ok(builder.build()?)
    }
}
