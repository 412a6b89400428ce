use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File whose presence marks a directory as a finished ColabFold bundle.
pub const CONFIG_FILE_NAME: &str = "config.json";

const DONE_MARKER_SUFFIX: &str = ".done.txt";
const MSA_EXTENSION: &str = "a3m";

/// The subset of ColabFold's `config.json` needed to interpret a bundle.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BundleConfig {
    #[serde(rename = "model_type")]
    pub af_version: String,
    pub num_models: usize,
    #[serde(default)]
    pub num_relax: usize,
}

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Per-rank output files of a run, distinguished by the infix ColabFold puts between the
/// run name and the rank token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankedFileKind {
    Unrelaxed,
    Relaxed,
    Scores,
}

impl RankedFileKind {
    fn infix(self) -> &'static str {
        match self {
            RankedFileKind::Unrelaxed => "_unrelaxed_rank_",
            RankedFileKind::Relaxed => "_relaxed_rank_",
            RankedFileKind::Scores => "_scores_rank_",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            RankedFileKind::Unrelaxed | RankedFileKind::Relaxed => ".pdb",
            RankedFileKind::Scores => ".json",
        }
    }
}

/// A file matched by `<run><infix>*<ext>`. `rank_token` is the `*` part, which is shared
/// by the structure and score files of the same rank (e.g. `001_alphafold2_ptm_model_3_seed_000`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedFile {
    pub rank_token: String,
    pub path: PathBuf,
}

/// A snapshot of the top-level file names of one bundle directory.
#[derive(Debug, Clone)]
pub struct Bundle {
    dir: PathBuf,
    file_names: Vec<String>,
}

impl Bundle {
    pub fn open(dir: &Path) -> Result<Self, BundleError> {
        let io_err = |e| BundleError::Io {
            path: dir.to_string_lossy().to_string(),
            source: e,
        };

        let mut file_names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            // Follows symlinks; dangling links are skipped.
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                file_names.push(name.to_string());
            }
        }
        file_names.sort();

        Ok(Self {
            dir: dir.to_path_buf(),
            file_names,
        })
    }

    pub fn config(&self) -> Result<BundleConfig, BundleError> {
        let path = self.dir.join(CONFIG_FILE_NAME);
        let bytes = std::fs::read(&path).map_err(|e| BundleError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        serde_json::from_slice(&bytes).map_err(|e| BundleError::Json {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Names of the runs that have a `<run>.done.txt` marker, in sorted order.
    pub fn run_names(&self) -> Vec<String> {
        self.file_names
            .iter()
            .filter_map(|name| name.strip_suffix(DONE_MARKER_SUFFIX))
            .filter(|run| !run.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn msa_path(&self, run_name: &str) -> PathBuf {
        self.dir.join(format!("{run_name}.{MSA_EXTENSION}"))
    }

    /// Files of the given kind belonging to `run_name`, in lexicographic (= rank) order.
    pub fn ranked_files(&self, run_name: &str, kind: RankedFileKind) -> Vec<RankedFile> {
        let prefix = format!("{run_name}{}", kind.infix());
        self.file_names
            .iter()
            .filter_map(|name| {
                let token = name.strip_prefix(&prefix)?.strip_suffix(kind.extension())?;
                Some(RankedFile {
                    rank_token: token.to_string(),
                    path: self.dir.join(name),
                })
            })
            .collect()
    }
}
