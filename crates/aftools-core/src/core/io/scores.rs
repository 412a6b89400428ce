use nalgebra::DMatrix;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Raw layout of a ColabFold `*_scores_rank_*.json` file.
#[derive(Debug, Deserialize)]
struct RawScores {
    plddt: Vec<f64>,
    pae: Vec<Vec<f64>>,
    ptm: f64,
    #[serde(default)]
    iptm: Option<f64>,
    #[serde(default)]
    max_pae: Option<f64>,
}

/// Confidence data for a single ranked model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelScores {
    pub plddt: Vec<f64>,
    pub pae: DMatrix<f64>,
    pub ptm: f64,
    pub iptm: Option<f64>,
    pub max_pae: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ScoreFileError {
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
    #[error(
        "PAE matrix in '{path}' is not square: row {row} has {len} entries, expected {expected}"
    )]
    NonSquarePae {
        path: String,
        row: usize,
        len: usize,
        expected: usize,
    },
}

impl ModelScores {
    pub fn load(path: &Path) -> Result<Self, ScoreFileError> {
        let bytes = std::fs::read(path).map_err(|e| ScoreFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_slice(&bytes, path)
    }

    fn from_slice(bytes: &[u8], path: &Path) -> Result<Self, ScoreFileError> {
        let raw: RawScores = serde_json::from_slice(bytes).map_err(|e| ScoreFileError::Json {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let n = raw.pae.len();
        if let Some((row, values)) = raw.pae.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(ScoreFileError::NonSquarePae {
                path: path.to_string_lossy().to_string(),
                row,
                len: values.len(),
                expected: n,
            });
        }
        let pae = DMatrix::from_row_iterator(n, n, raw.pae.into_iter().flatten());

        Ok(Self {
            plddt: raw.plddt,
            pae,
            ptm: raw.ptm,
            iptm: raw.iptm,
            max_pae: raw.max_pae,
        })
    }

    pub fn mean_plddt(&self) -> f64 {
        if self.plddt.is_empty() {
            return 0.0;
        }
        self.plddt.iter().sum::<f64>() / self.plddt.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_succeeds_with_colabfold_scores() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("q_scores_rank_001.json");
        fs::write(
            &path,
            r#"{"max_pae": 31.75, "pae": [[0.25, 3.5], [4.0, 0.5]], "plddt": [90.0, 70.0], "ptm": 0.82}"#,
        )
        .unwrap();

        let scores = ModelScores::load(&path).unwrap();
        assert_eq!(scores.plddt, vec![90.0, 70.0]);
        assert_eq!(scores.pae.shape(), (2, 2));
        assert_eq!(scores.pae[(0, 1)], 3.5);
        assert_eq!(scores.pae[(1, 0)], 4.0);
        assert_eq!(scores.ptm, 0.82);
        assert_eq!(scores.iptm, None);
        assert_eq!(scores.max_pae, Some(31.75));
        assert!((scores.mean_plddt() - 80.0).abs() < 1e-12);
    }

    #[test]
    fn load_reads_multimer_interface_score() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(
            &path,
            r#"{"pae": [[1.0]], "plddt": [50.0], "ptm": 0.4, "iptm": 0.35}"#,
        )
        .unwrap();

        let scores = ModelScores::load(&path).unwrap();
        assert_eq!(scores.iptm, Some(0.35));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ModelScores::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ScoreFileError::Io { .. })));
    }

    #[test]
    fn load_fails_when_required_key_is_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, r#"{"pae": [[1.0]], "plddt": [50.0]}"#).unwrap();

        let result = ModelScores::load(&path);
        assert!(matches!(result, Err(ScoreFileError::Json { .. })));
    }

    #[test]
    fn load_fails_for_ragged_pae_matrix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(
            &path,
            r#"{"pae": [[1.0, 2.0], [3.0]], "plddt": [50.0, 60.0], "ptm": 0.5}"#,
        )
        .unwrap();

        let result = ModelScores::load(&path);
        assert!(matches!(
            result,
            Err(ScoreFileError::NonSquarePae {
                row: 1,
                len: 1,
                expected: 2,
                ..
            })
        ));
    }
}
