use crate::engine::config::{AlignmentConfig, DEFAULT_ALIGNMENT_EXECUTABLE};
use crate::similarity::error::SimilarityError;
use crate::similarity::source::StructureSource;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, instrument};

/// Tab-separated output, multimer alignment with one-to-one chain mapping, and all chains
/// aligned regardless of TER records.
pub const USALIGN_FLAGS: [&str; 6] = ["-outfmt", "2", "-mm", "1", "-ter", "0"];

// `-outfmt 2` prints a header line, then one line whose fourth column is the TM-score
// normalised by the second structure.
const SCORE_LINE_INDEX: usize = 1;
const SCORE_FIELD_INDEX: usize = 3;

/// Computes TM-scores by running the external `USalign` binary once per pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityScorer {
    executable: PathBuf,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(DEFAULT_ALIGNMENT_EXECUTABLE)
    }
}

impl SimilarityScorer {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn from_config(config: &AlignmentConfig) -> Self {
        Self::new(config.executable.clone())
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// TM-score between `reference` and `target`. The result is not guaranteed to be
    /// symmetric in its arguments.
    #[instrument(skip_all, name = "tm_score")]
    pub fn score<R, T>(&self, reference: &R, target: &T) -> Result<f64, SimilarityError>
    where
        R: StructureSource + ?Sized,
        T: StructureSource + ?Sized,
    {
        let reference = reference.structure_path()?;
        let target = target.structure_path()?;
        self.score_paths(&reference, &target)
    }

    pub(crate) fn score_paths(
        &self,
        reference: &Path,
        target: &Path,
    ) -> Result<f64, SimilarityError> {
        debug!(
            reference = %reference.display(),
            target = %target.display(),
            "Running {}", self.executable.display()
        );

        let output = Command::new(&self.executable)
            .args(USALIGN_FLAGS)
            .arg(reference)
            .arg(target)
            .output()
            .map_err(|e| SimilarityError::Launch {
                program: self.executable.to_string_lossy().to_string(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(SimilarityError::ToolFailed {
                status: output.status.to_string(),
                stdout,
                stderr,
            });
        }

        match parse_score(&stdout) {
            Ok(score) => {
                debug!(score, "TM-score parsed.");
                Ok(score)
            }
            Err(reason) => Err(SimilarityError::UnexpectedOutput {
                reason,
                stdout,
                stderr,
            }),
        }
    }
}

fn parse_score(stdout: &str) -> Result<f64, String> {
    let line = stdout
        .lines()
        .nth(SCORE_LINE_INDEX)
        .ok_or_else(|| "expected at least 2 lines".to_string())?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    let field = fields.get(SCORE_FIELD_INDEX).ok_or_else(|| {
        format!(
            "expected at least {} fields on line 2, found {}",
            SCORE_FIELD_INDEX + 1,
            fields.len()
        )
    })?;
    let score: f64 = field
        .parse()
        .map_err(|_| format!("score field '{field}' is not a number"))?;
    if !score.is_finite() {
        return Err(format!("score field '{field}' is not finite"));
    }
    Ok(score)
}
