use crate::core::io::bundle::BundleError;
use crate::core::io::msa::MsaHeaderError;
use crate::core::io::scores::ScoreFileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed MSA header in '{path}': {source}")]
    MalformedHeader {
        path: String,
        source: MsaHeaderError,
    },

    #[error("No score file found for structure '{structure_path}'")]
    MissingScoreFile { structure_path: String },

    #[error(transparent)]
    ScoreFile(#[from] ScoreFileError),

    #[error(
        "Score file '{path}' describes {found} residues but the MSA header of run '{run}' describes {expected}"
    )]
    ResidueCountMismatch {
        path: String,
        run: String,
        found: usize,
        expected: usize,
    },

    #[error("Failed to walk directory tree under '{path}': {source}")]
    Discovery {
        path: String,
        source: walkdir::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}
